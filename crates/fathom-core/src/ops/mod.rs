//! The authoring operations.
//!
//! Every operation follows the same shape: validate the input, run the guard,
//! establish ownership (directly, or through a [`ConceptScope`]), then make the
//! persistence call. Ownership failures surface as [`Error::NotFound`] so that
//! callers cannot probe for rows belonging to other accounts.

mod checks;
mod concepts;
mod jobs;
mod steps;

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  access::{Caller, ConceptScope},
  concept::Concept,
  error::Entity,
  store::AuthoringStore,
};

/// Authenticated, ownership-scoped operations over an [`AuthoringStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct Authoring<S> {
  store: Arc<S>,
}

impl<S> Clone for Authoring<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: AuthoringStore> Authoring<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Load a concept and confirm `caller` owns it.
  async fn owned_concept(&self, caller: &Caller, id: Uuid) -> Result<Concept> {
    let concept = self
      .store
      .get_concept(id)
      .await
      .map_err(Error::store)?
      .filter(|c| c.is_owned_by(&caller.owner_id));

    concept.ok_or_else(|| {
      tracing::debug!(concept_id = %id, owner = %caller.owner_id, "concept not visible to caller");
      Error::not_found(Entity::Concept, id)
    })
  }

  /// Verify ownership of `concept_id` and hand back a scope that child
  /// operations accept as proof.
  pub async fn scope_concept(
    &self,
    caller: &Caller,
    concept_id: Uuid,
  ) -> Result<ConceptScope> {
    let concept = self.owned_concept(caller, concept_id).await?;
    Ok(ConceptScope::new(concept.concept_id, concept.owner_id))
  }
}
