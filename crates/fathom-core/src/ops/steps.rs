use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  access::{ConceptScope, RequestContext},
  error::Entity,
  step::{SaveStep, Step},
  store::AuthoringStore,
  validate::Validate,
};

use super::Authoring;

impl<S: AuthoringStore> Authoring<S> {
  /// Insert, or fully replace an existing step of the same
  /// concept.
  pub async fn save_step(
    &self,
    ctx: &RequestContext,
    input: SaveStep,
  ) -> Result<Step> {
    input.validate()?;
    let caller = ctx.require_caller()?;
    let scope = self.scope_concept(caller, input.concept_id).await?;
    self.save_step_in(&scope, input).await
  }

  /// [`Self::save_step`] against an already verified concept.
  pub async fn save_step_in(
    &self,
    scope: &ConceptScope,
    input: SaveStep,
  ) -> Result<Step> {
    if input.concept_id != scope.concept_id() {
      return Err(Error::not_found(Entity::Concept, input.concept_id));
    }

    let Some(step_id) = input.step_id else {
      let step = self
        .store
        .insert_step(input.into_step(Uuid::new_v4(), Utc::now()))
        .await
        .map_err(Error::store)?;
      tracing::debug!(step_id = %step.step_id, concept_id = %step.concept_id, "step created");
      return Ok(step);
    };

    // A step id from another concept must not be pulled across.
    let existing = self
      .store
      .get_step(step_id)
      .await
      .map_err(Error::store)?
      .filter(|s| s.concept_id == scope.concept_id())
      .ok_or_else(|| Error::not_found(Entity::Step, step_id))?;

    let step = input.into_step(existing.step_id, existing.created_at);
    let matched = self
      .store
      .update_step(step.clone())
      .await
      .map_err(Error::store)?;
    if !matched {
      return Err(Error::not_found(Entity::Step, step_id));
    }

    tracing::debug!(step_id = %step_id, concept_id = %step.concept_id, "step replaced");
    Ok(step)
  }

  /// Hard delete; returns the removed row.
  pub async fn delete_step(
    &self,
    ctx: &RequestContext,
    id: Uuid,
    concept_id: Uuid,
  ) -> Result<Step> {
    let caller = ctx.require_caller()?;
    let scope = self.scope_concept(caller, concept_id).await?;
    self.delete_step_in(&scope, id).await
  }

  pub async fn delete_step_in(&self, scope: &ConceptScope, id: Uuid) -> Result<Step> {
    let step = self
      .store
      .delete_step(id, scope.concept_id())
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::not_found(Entity::Step, id))?;

    tracing::debug!(step_id = %id, concept_id = %scope.concept_id(), "step deleted");
    Ok(step)
  }
}
