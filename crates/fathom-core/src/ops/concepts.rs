use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  access::RequestContext,
  concept::{Concept, ConceptDetails, ConceptFilter, ConceptPatch, ConceptStatus, NewConcept},
  error::Entity,
  store::AuthoringStore,
  validate::Validate,
};

use super::Authoring;

impl<S: AuthoringStore> Authoring<S> {
  /// A new draft concept owned by the caller.
  pub async fn create_concept(
    &self,
    ctx: &RequestContext,
    input: NewConcept,
  ) -> Result<Concept> {
    input.validate()?;
    let caller = ctx.require_caller()?;

    let concept = self
      .store
      .insert_concept(input.into_concept(&caller.owner_id, Utc::now()))
      .await
      .map_err(Error::store)?;

    tracing::debug!(concept_id = %concept.concept_id, owner = %caller.owner_id, "concept created");
    Ok(concept)
  }

  /// Partial update. An empty patch returns the stored row
  /// without writing.
  pub async fn update_concept(
    &self,
    ctx: &RequestContext,
    id: Uuid,
    patch: ConceptPatch,
  ) -> Result<Concept> {
    patch.validate()?;
    let caller = ctx.require_caller()?;
    let mut concept = self.owned_concept(caller, id).await?;

    if patch.is_empty() {
      return Ok(concept);
    }

    patch.apply(&mut concept, Utc::now());
    self.write_concept(concept).await
  }

  /// Soft delete. Not terminal; a later update may change
  /// the status again.
  pub async fn archive_concept(
    &self,
    ctx: &RequestContext,
    id: Uuid,
  ) -> Result<Concept> {
    let caller = ctx.require_caller()?;
    let mut concept = self.owned_concept(caller, id).await?;

    concept.status = ConceptStatus::Archived;
    concept.updated_at = Utc::now();
    self.write_concept(concept).await
  }

  /// The caller's concepts matching `filter`, in storage order.
  pub async fn list_my_concepts(
    &self,
    ctx: &RequestContext,
    filter: &ConceptFilter,
  ) -> Result<Vec<Concept>> {
    let caller = ctx.require_caller()?;

    let mut concepts = self
      .store
      .list_concepts(caller.owner_id.clone())
      .await
      .map_err(Error::store)?;
    concepts.retain(|c| filter.matches(c));
    Ok(concepts)
  }

  /// The concept with all of its steps and checks.
  pub async fn get_concept_with_details(
    &self,
    ctx: &RequestContext,
    id: Uuid,
  ) -> Result<ConceptDetails> {
    let caller = ctx.require_caller()?;
    let concept = self.owned_concept(caller, id).await?;

    let steps = self.store.list_steps(id).await.map_err(Error::store)?;
    let checks = self.store.list_checks(id).await.map_err(Error::store)?;

    Ok(ConceptDetails { concept, steps, checks })
  }

  async fn write_concept(&self, concept: Concept) -> Result<Concept> {
    let id = concept.concept_id;
    let matched = self
      .store
      .update_concept(concept.clone())
      .await
      .map_err(Error::store)?;

    if !matched {
      return Err(Error::not_found(Entity::Concept, id));
    }

    tracing::debug!(concept_id = %id, status = %concept.status, "concept updated");
    Ok(concept)
  }
}
