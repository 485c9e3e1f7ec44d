use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  access::{ConceptScope, RequestContext},
  check::{Check, SaveCheck},
  error::Entity,
  store::AuthoringStore,
  validate::Validate,
};

use super::Authoring;

impl<S: AuthoringStore> Authoring<S> {
  /// Same upsert rules as [`Authoring::save_step`].
  pub async fn save_check(
    &self,
    ctx: &RequestContext,
    input: SaveCheck,
  ) -> Result<Check> {
    input.validate()?;
    let caller = ctx.require_caller()?;
    let scope = self.scope_concept(caller, input.concept_id).await?;
    self.save_check_in(&scope, input).await
  }

  pub async fn save_check_in(
    &self,
    scope: &ConceptScope,
    input: SaveCheck,
  ) -> Result<Check> {
    if input.concept_id != scope.concept_id() {
      return Err(Error::not_found(Entity::Concept, input.concept_id));
    }

    let Some(check_id) = input.check_id else {
      let check = self
        .store
        .insert_check(input.into_check(Uuid::new_v4(), Utc::now()))
        .await
        .map_err(Error::store)?;
      tracing::debug!(check_id = %check.check_id, concept_id = %check.concept_id, "check created");
      return Ok(check);
    };

    let existing = self
      .store
      .get_check(check_id)
      .await
      .map_err(Error::store)?
      .filter(|c| c.concept_id == scope.concept_id())
      .ok_or_else(|| Error::not_found(Entity::Check, check_id))?;

    let check = input.into_check(existing.check_id, existing.created_at);
    if !self
      .store
      .update_check(check.clone())
      .await
      .map_err(Error::store)?
    {
      return Err(Error::not_found(Entity::Check, check_id));
    }

    tracing::debug!(check_id = %check_id, concept_id = %check.concept_id, "check replaced");
    Ok(check)
  }

  /// Hard delete; returns the removed row.
  pub async fn delete_check(
    &self,
    ctx: &RequestContext,
    id: Uuid,
    concept_id: Uuid,
  ) -> Result<Check> {
    let caller = ctx.require_caller()?;
    let scope = self.scope_concept(caller, concept_id).await?;
    self.delete_check_in(&scope, id).await
  }

  pub async fn delete_check_in(
    &self,
    scope: &ConceptScope,
    id: Uuid,
  ) -> Result<Check> {
    let check = self
      .store
      .delete_check(id, scope.concept_id())
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::not_found(Entity::Check, id))?;

    tracing::debug!(check_id = %id, concept_id = %scope.concept_id(), "check deleted");
    Ok(check)
  }
}
