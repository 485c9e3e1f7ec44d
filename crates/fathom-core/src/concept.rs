//! Concepts, the learnable topics that own steps and checks.
//!
//! A concept is never hard-deleted. Archiving sets its status to
//! [`ConceptStatus::Archived`], and a later update may bring it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{
  check::Check,
  step::Step,
  validate::{Validate, ValidationError, non_empty, not_null},
};

// ─── Enumerations ────────────────────────────────────────────────────────────

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
pub enum Difficulty {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

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
pub enum ConceptStatus {
  #[default]
  Draft,
  Published,
  Archived,
}

// ─── Concept ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
  pub concept_id:  Uuid,
  /// Account that created the concept; never changes.
  pub owner_id:    String,
  pub title:       String,
  pub description: Option<String>,
  pub subject:     Option<String>,
  pub topic:       Option<String>,
  pub tags:        Option<Vec<String>>,
  pub difficulty:  Difficulty,
  pub status:      ConceptStatus,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Concept {
  pub fn is_owned_by(&self, owner_id: &str) -> bool { self.owner_id == owner_id }
}

// ─── NewConcept ──────────────────────────────────────────────────────────────

/// Input to `Authoring::create_concept`. Omitted enums take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewConcept {
  pub title:       String,
  pub description: Option<String>,
  pub subject:     Option<String>,
  pub topic:       Option<String>,
  pub tags:        Option<Vec<String>>,
  pub difficulty:  Option<Difficulty>,
  pub status:      Option<ConceptStatus>,
}

impl NewConcept {
  pub fn titled(title: impl Into<String>) -> Self {
    Self { title: title.into(), ..Default::default() }
  }

  /// Build the persisted row for `owner_id`.
  pub fn into_concept(self, owner_id: &str, now: DateTime<Utc>) -> Concept {
    Concept {
      concept_id:  Uuid::new_v4(),
      owner_id:    owner_id.to_owned(),
      title:       self.title,
      description: self.description,
      subject:     self.subject,
      topic:       self.topic,
      tags:        self.tags,
      difficulty:  self.difficulty.unwrap_or_default(),
      status:      self.status.unwrap_or_default(),
      created_at:  now,
      updated_at:  now,
    }
  }
}

impl Validate for NewConcept {
  fn validate(&self) -> Result<(), ValidationError> {
    non_empty("title", &self.title)
  }
}

// ─── ConceptPatch ────────────────────────────────────────────────────────────

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key
/// (`None`).
pub(crate) fn explicit<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// Input to `Authoring::update_concept`. Only the keys present are applied.
///
/// Every field keeps `null` apart from an absent key. For `title`,
/// `difficulty` and `status` a `null` fails validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConceptPatch {
  #[serde(default, deserialize_with = "explicit")]
  pub title:       Option<Option<String>>,
  #[serde(default, deserialize_with = "explicit")]
  pub description: Option<Option<String>>,
  #[serde(default, deserialize_with = "explicit")]
  pub subject:     Option<Option<String>>,
  #[serde(default, deserialize_with = "explicit")]
  pub topic:       Option<Option<String>>,
  #[serde(default, deserialize_with = "explicit")]
  pub tags:        Option<Option<Vec<String>>>,
  #[serde(default, deserialize_with = "explicit")]
  pub difficulty:  Option<Option<Difficulty>>,
  #[serde(default, deserialize_with = "explicit")]
  pub status:      Option<Option<ConceptStatus>>,
}

impl ConceptPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.subject.is_none()
      && self.topic.is_none()
      && self.tags.is_none()
      && self.difficulty.is_none()
      && self.status.is_none()
  }

  /// Apply the provided fields and bump `updated_at`.
  pub fn apply(self, concept: &mut Concept, now: DateTime<Utc>) {
    if let Some(Some(title)) = self.title {
      concept.title = title;
    }
    if let Some(description) = self.description {
      concept.description = description;
    }
    if let Some(subject) = self.subject {
      concept.subject = subject;
    }
    if let Some(topic) = self.topic {
      concept.topic = topic;
    }
    if let Some(tags) = self.tags {
      concept.tags = tags;
    }
    if let Some(Some(difficulty)) = self.difficulty {
      concept.difficulty = difficulty;
    }
    if let Some(Some(status)) = self.status {
      concept.status = status;
    }
    concept.updated_at = now;
  }
}

impl Validate for ConceptPatch {
  fn validate(&self) -> Result<(), ValidationError> {
    not_null("title", &self.title)?;
    not_null("difficulty", &self.difficulty)?;
    not_null("status", &self.status)?;
    match &self.title {
      Some(Some(title)) => non_empty("title", title),
      _ => Ok(()),
    }
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Exact-match filters for `Authoring::list_my_concepts`; an absent field matches all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConceptFilter {
  pub status:  Option<ConceptStatus>,
  pub subject: Option<String>,
  pub topic:   Option<String>,
}

impl ConceptFilter {
  pub fn matches(&self, concept: &Concept) -> bool {
    self.status.is_none_or(|s| concept.status == s)
      && self
        .subject
        .as_deref()
        .is_none_or(|s| concept.subject.as_deref() == Some(s))
      && self
        .topic
        .as_deref()
        .is_none_or(|t| concept.topic.as_deref() == Some(t))
  }
}

/// A concept bundled with all of its steps and checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptDetails {
  pub concept: Concept,
  pub steps:   Vec<Step>,
  pub checks:  Vec<Check>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn concept() -> Concept {
    NewConcept::titled("Big-O").into_concept("alice", Utc::now())
  }

  #[test]
  fn defaults_applied_on_create() {
    let c = concept();
    assert_eq!(c.difficulty, Difficulty::Beginner);
    assert_eq!(c.status, ConceptStatus::Draft);
    assert_eq!(c.created_at, c.updated_at);
    assert!(c.is_owned_by("alice"));
  }

  #[test]
  fn empty_patch_deserialises_as_empty() {
    let patch: ConceptPatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn explicit_null_clears_but_absent_keeps() {
    let mut c = concept();
    c.subject = Some("cs".into());
    c.topic = Some("complexity".into());

    let patch: ConceptPatch =
      serde_json::from_str(r#"{"subject": null}"#).unwrap();
    assert!(!patch.is_empty());
    patch.apply(&mut c, Utc::now());

    assert_eq!(c.subject, None);
    assert_eq!(c.topic.as_deref(), Some("complexity"));
  }

  #[test]
  fn apply_bumps_updated_at() {
    let mut c = concept();
    let later = c.updated_at + chrono::Duration::seconds(5);
    ConceptPatch { status: Some(Some(ConceptStatus::Published)), ..Default::default() }
      .apply(&mut c, later);
    assert_eq!(c.status, ConceptStatus::Published);
    assert_eq!(c.updated_at, later);
    assert_ne!(c.created_at, c.updated_at);
  }

  #[test]
  fn patch_with_blank_title_is_invalid() {
    let patch = ConceptPatch { title: Some(Some(" ".into())), ..Default::default() };
    assert!(patch.validate().is_err());
  }

  #[test]
  fn null_for_required_field_is_invalid() {
    for body in [r#"{"title": null}"#, r#"{"difficulty": null}"#, r#"{"status": null}"#] {
      let patch: ConceptPatch = serde_json::from_str(body).unwrap();
      assert!(!patch.is_empty(), "{body}");
      assert!(patch.validate().is_err(), "{body}");
    }

    let patch: ConceptPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn filter_requires_all_predicates() {
    let mut c = concept();
    c.subject = Some("cs".into());

    let by_subject = ConceptFilter { subject: Some("cs".into()), ..Default::default() };
    assert!(by_subject.matches(&c));

    let both = ConceptFilter {
      subject: Some("cs".into()),
      status:  Some(ConceptStatus::Published),
      ..Default::default()
    };
    assert!(!both.matches(&c));

    assert!(ConceptFilter::default().matches(&c));
  }
}
