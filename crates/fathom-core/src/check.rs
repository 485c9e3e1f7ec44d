//! Checks, comprehension questions attached to a concept.
//!
//! `options` and `correct_answer` are opaque JSON values. Their shape is the
//! caller's business and is not validated against the check type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validate::{Validate, ValidationError, non_empty};

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
pub enum CheckType {
  #[default]
  SingleChoice,
  MultipleChoice,
  TrueFalse,
  ShortAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
  pub check_id:       Uuid,
  pub concept_id:     Uuid,
  pub question:       String,
  pub options:        Option<Value>,
  pub correct_answer: Option<Value>,
  pub explanation:    Option<String>,
  #[serde(rename = "type")]
  pub check_type:     CheckType,
  pub created_at:     DateTime<Utc>,
}

/// Input to `Authoring::save_check`; same full-replace rules as
/// [`SaveStep`](crate::step::SaveStep).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveCheck {
  pub check_id:       Option<Uuid>,
  pub concept_id:     Uuid,
  pub question:       String,
  pub options:        Option<Value>,
  pub correct_answer: Option<Value>,
  pub explanation:    Option<String>,
  #[serde(rename = "type")]
  pub check_type:     Option<CheckType>,
}

impl SaveCheck {
  pub fn new(concept_id: Uuid, question: impl Into<String>) -> Self {
    Self {
      check_id: None,
      concept_id,
      question: question.into(),
      options: None,
      correct_answer: None,
      explanation: None,
      check_type: None,
    }
  }

  pub fn into_check(self, check_id: Uuid, created_at: DateTime<Utc>) -> Check {
    Check {
      check_id,
      concept_id: self.concept_id,
      question: self.question,
      options: self.options,
      correct_answer: self.correct_answer,
      explanation: self.explanation,
      check_type: self.check_type.unwrap_or_default(),
      created_at,
    }
  }
}

impl Validate for SaveCheck {
  fn validate(&self) -> Result<(), ValidationError> {
    non_empty("question", &self.question)
  }
}
