use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  access::RequestContext,
  error::Entity,
  job::{Job, JobFilter, JobPatch, NewJob},
  store::AuthoringStore,
};

use super::Authoring;

impl<S: AuthoringStore> Authoring<S> {
  /// Optionally attached to a concept the caller owns.
  pub async fn create_job(&self, ctx: &RequestContext, input: NewJob) -> Result<Job> {
    let caller = ctx.require_caller()?;

    if let Some(concept_id) = input.concept_id {
      self.scope_concept(caller, concept_id).await?;
    }

    let job = self
      .store
      .insert_job(input.into_job(&caller.owner_id, Utc::now()))
      .await
      .map_err(Error::store)?;

    tracing::debug!(job_id = %job.job_id, job_type = %job.job_type, "job created");
    Ok(job)
  }

  /// Only `output` and `status` are mutable. An empty patch
  /// returns the stored row without writing.
  pub async fn update_job(
    &self,
    ctx: &RequestContext,
    id: Uuid,
    patch: JobPatch,
  ) -> Result<Job> {
    let caller = ctx.require_caller()?;

    let mut job = self
      .store
      .get_job(id)
      .await
      .map_err(Error::store)?
      .filter(|j| j.owner_id == caller.owner_id)
      .ok_or_else(|| Error::not_found(Entity::Job, id))?;

    if patch.is_empty() {
      return Ok(job);
    }

    patch.apply(&mut job);
    if !self.store.update_job(job.clone()).await.map_err(Error::store)? {
      return Err(Error::not_found(Entity::Job, id));
    }

    tracing::debug!(job_id = %id, status = %job.status, "job updated");
    Ok(job)
  }

  /// The caller's jobs, hiding any that point at a concept the
  /// caller does not own (stale or foreign references).
  pub async fn list_jobs(
    &self,
    ctx: &RequestContext,
    filter: &JobFilter,
  ) -> Result<Vec<Job>> {
    let caller = ctx.require_caller()?;

    let owned: HashSet<Uuid> = self
      .store
      .list_concepts(caller.owner_id.clone())
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|c| c.concept_id)
      .collect();

    if let Some(concept_id) = filter.concept_id
      && !owned.contains(&concept_id)
    {
      return Err(Error::not_found(Entity::Concept, concept_id));
    }

    let mut jobs = self
      .store
      .list_jobs(caller.owner_id.clone())
      .await
      .map_err(Error::store)?;

    jobs.retain(|job| {
      job.concept_id.is_none_or(|id| owned.contains(&id))
        && filter.concept_id.is_none_or(|id| job.concept_id == Some(id))
        && filter.status.is_none_or(|s| job.status == s)
    });
    Ok(jobs)
  }
}
