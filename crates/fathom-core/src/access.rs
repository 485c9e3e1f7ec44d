//! Caller identity, the authorization guard, and concept scopes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
  pub owner_id: String,
}

impl Caller {
  pub fn new(owner_id: impl Into<String>) -> Self {
    Self { owner_id: owner_id.into() }
  }
}

/// Whatever the transport could establish about who is calling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
  identity: Option<Caller>,
}

impl RequestContext {
  pub fn anonymous() -> Self { Self { identity: None } }

  pub fn authenticated(caller: Caller) -> Self {
    Self { identity: Some(caller) }
  }

  pub fn identity(&self) -> Option<&Caller> { self.identity.as_ref() }

  /// The guard every operation runs first.
  pub fn require_caller(&self) -> Result<&Caller> {
    self.identity.as_ref().ok_or(Error::Unauthorized)
  }
}

/// Proof that a caller owns a concept.
///
/// Only [`Authoring::scope_concept`](crate::ops::Authoring::scope_concept)
/// constructs one, so a child operation holding a scope never needs to look
/// the parent up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptScope {
  concept_id: Uuid,
  owner_id:   String,
}

impl ConceptScope {
  pub(crate) fn new(concept_id: Uuid, owner_id: String) -> Self {
    Self { concept_id, owner_id }
  }

  pub fn concept_id(&self) -> Uuid { self.concept_id }

  pub fn owner_id(&self) -> &str { &self.owner_id }
}
