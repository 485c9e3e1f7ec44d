//! Input validation that runs before any operation body.
//!
//! Type and enum checks are handled by deserialisation; this module covers the
//! constraints serde cannot express (non-empty strings, numeric minimums).

use thiserror::Error;

/// A single constraint violation on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
  pub field:   &'static str,
  pub message: &'static str,
}

impl ValidationError {
  pub fn new(field: &'static str, message: &'static str) -> Self {
    Self { field, message }
  }
}

/// Implemented by every operation input.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject empty or whitespace-only strings.
pub fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new(field, "must not be empty"));
  }
  Ok(())
}

/// Reject an explicit `null` for a field that cannot be cleared.
pub fn not_null<T>(
  field: &'static str,
  value: &Option<Option<T>>,
) -> Result<(), ValidationError> {
  if matches!(value, Some(None)) {
    return Err(ValidationError::new(field, "must not be null"));
  }
  Ok(())
}

/// Reject values below `min`.
pub fn at_least(
  field: &'static str,
  value: u32,
  min: u32,
) -> Result<(), ValidationError> {
  if value < min {
    return Err(ValidationError::new(field, "is below the allowed minimum"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn non_empty_rejects_blank() {
    assert!(non_empty("title", "").is_err());
    assert!(non_empty("title", "   ").is_err());
    assert!(non_empty("title", "Big-O").is_ok());
  }

  #[test]
  fn not_null_only_rejects_explicit_null() {
    assert!(not_null::<u8>("status", &Some(None)).is_err());
    assert!(not_null::<u8>("status", &None).is_ok());
    assert!(not_null("status", &Some(Some(1))).is_ok());
  }

  #[test]
  fn at_least_bounds() {
    assert!(at_least("step_number", 0, 1).is_err());
    assert!(at_least("step_number", 1, 1).is_ok());
  }

  #[test]
  fn error_message_names_field() {
    let err = non_empty("question", "").unwrap_err();
    assert_eq!(err.to_string(), "question: must not be empty");
  }
}
