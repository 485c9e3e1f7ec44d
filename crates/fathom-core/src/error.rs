//! Error types for `fathom-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::ValidationError;

/// The kind of row a [`Error::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Entity {
  Concept,
  Step,
  Check,
  Job,
}

#[derive(Debug, Error)]
pub enum Error {
  /// The request carried no authenticated identity.
  #[error("unauthorized")]
  Unauthorized,

  /// The row is absent, owned by someone else, or sits under a different
  /// parent. These cases are deliberately indistinguishable.
  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: Uuid },

  #[error("invalid input: {0}")]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(entity: Entity, id: Uuid) -> Self {
    Self::NotFound { entity, id }
  }

  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
