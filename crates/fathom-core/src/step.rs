//! Steps, ordered units of explanation inside a concept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{Validate, ValidationError, at_least, non_empty};

/// The rhetorical role a step plays in the explanation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepType {
  Intuition,
  Definition,
  Explanation,
  Example,
  Analogy,
  Summary,
  #[default]
  Other,
}

/// A single explanation step. `step_number` is advisory and not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
  pub step_id:     Uuid,
  pub concept_id:  Uuid,
  pub step_number: u32,
  pub step_type:   StepType,
  pub heading:     Option<String>,
  pub content:     String,
  pub example:     Option<String>,
  pub analogy:     Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Input to `Authoring::save_step`. With `step_id` set the existing row is
/// replaced wholesale; omitted optional fields fall back to their defaults
/// rather than keeping the stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveStep {
  pub step_id:     Option<Uuid>,
  pub concept_id:  Uuid,
  pub step_number: Option<u32>,
  pub step_type:   Option<StepType>,
  pub heading:     Option<String>,
  pub content:     String,
  pub example:     Option<String>,
  pub analogy:     Option<String>,
}

impl SaveStep {
  pub fn new(concept_id: Uuid, content: impl Into<String>) -> Self {
    Self {
      step_id: None,
      concept_id,
      step_number: None,
      step_type: None,
      heading: None,
      content: content.into(),
      example: None,
      analogy: None,
    }
  }

  /// Build the row to persist. `step_id` and `created_at` come from the
  /// existing row on replace, or are fresh on insert.
  pub fn into_step(self, step_id: Uuid, created_at: DateTime<Utc>) -> Step {
    Step {
      step_id,
      concept_id: self.concept_id,
      step_number: self.step_number.unwrap_or(1),
      step_type: self.step_type.unwrap_or_default(),
      heading: self.heading,
      content: self.content,
      example: self.example,
      analogy: self.analogy,
      created_at,
    }
  }
}

impl Validate for SaveStep {
  fn validate(&self) -> Result<(), ValidationError> {
    non_empty("content", &self.content)?;
    if let Some(n) = self.step_number {
      at_least("step_number", n, 1)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_fill_omitted_fields() {
    let step = SaveStep::new(Uuid::new_v4(), "intro text")
      .into_step(Uuid::new_v4(), Utc::now());
    assert_eq!(step.step_number, 1);
    assert_eq!(step.step_type, StepType::Other);
  }

  #[test]
  fn zero_step_number_is_invalid() {
    let mut input = SaveStep::new(Uuid::new_v4(), "x");
    input.step_number = Some(0);
    assert!(input.validate().is_err());
  }

  #[test]
  fn step_type_wire_names() {
    let t: StepType = serde_json::from_str("\"intuition\"").unwrap();
    assert_eq!(t, StepType::Intuition);
    assert_eq!(StepType::Other.to_string(), "other");
  }
}
