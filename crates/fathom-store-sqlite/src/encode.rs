//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Opaque payloads and tag
//! lists are stored as compact JSON. Enumerations use their `snake_case`
//! names. UUIDs are stored as hyphenated lowercase strings.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use fathom_core::{check::Check, concept::Concept, job::Job, step::Step};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn decode_enum<T: FromStr>(column: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| Error::UnknownVariant {
    column,
    value: s.to_owned(),
  })
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_json(v: Option<&Value>) -> Result<Option<String>> {
  Ok(v.map(serde_json::to_string).transpose()?)
}

pub fn decode_json(s: Option<&str>) -> Result<Option<Value>> {
  Ok(s.map(serde_json::from_str::<Value>).transpose()?)
}

pub fn encode_tags(tags: Option<&[String]>) -> Result<Option<String>> {
  Ok(tags.map(serde_json::to_string).transpose()?)
}

pub fn decode_tags(s: Option<&str>) -> Result<Option<Vec<String>>> {
  Ok(s.map(serde_json::from_str::<Vec<String>>).transpose()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CONCEPT_COLUMNS: &str = "concept_id, owner_id, title, description, \
  subject, topic, tags, difficulty, status, created_at, updated_at";

/// Raw strings read directly from a `concepts` row.
pub struct RawConcept {
  pub concept_id:  String,
  pub owner_id:    String,
  pub title:       String,
  pub description: Option<String>,
  pub subject:     Option<String>,
  pub topic:       Option<String>,
  pub tags:        Option<String>,
  pub difficulty:  String,
  pub status:      String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawConcept {
  /// Map a row selected with [`CONCEPT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      concept_id:  row.get(0)?,
      owner_id:    row.get(1)?,
      title:       row.get(2)?,
      description: row.get(3)?,
      subject:     row.get(4)?,
      topic:       row.get(5)?,
      tags:        row.get(6)?,
      difficulty:  row.get(7)?,
      status:      row.get(8)?,
      created_at:  row.get(9)?,
      updated_at:  row.get(10)?,
    })
  }

  pub fn into_concept(self) -> Result<Concept> {
    Ok(Concept {
      concept_id:  decode_uuid(&self.concept_id)?,
      owner_id:    self.owner_id,
      title:       self.title,
      description: self.description,
      subject:     self.subject,
      topic:       self.topic,
      tags:        decode_tags(self.tags.as_deref())?,
      difficulty:  decode_enum("difficulty", &self.difficulty)?,
      status:      decode_enum("status", &self.status)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const STEP_COLUMNS: &str = "step_id, concept_id, step_number, step_type, \
  heading, content, example, analogy, created_at";

/// Raw values read directly from a `steps` row.
pub struct RawStep {
  pub step_id:     String,
  pub concept_id:  String,
  pub step_number: u32,
  pub step_type:   String,
  pub heading:     Option<String>,
  pub content:     String,
  pub example:     Option<String>,
  pub analogy:     Option<String>,
  pub created_at:  String,
}

impl RawStep {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      step_id:     row.get(0)?,
      concept_id:  row.get(1)?,
      step_number: row.get(2)?,
      step_type:   row.get(3)?,
      heading:     row.get(4)?,
      content:     row.get(5)?,
      example:     row.get(6)?,
      analogy:     row.get(7)?,
      created_at:  row.get(8)?,
    })
  }

  pub fn into_step(self) -> Result<Step> {
    Ok(Step {
      step_id:     decode_uuid(&self.step_id)?,
      concept_id:  decode_uuid(&self.concept_id)?,
      step_number: self.step_number,
      step_type:   decode_enum("step_type", &self.step_type)?,
      heading:     self.heading,
      content:     self.content,
      example:     self.example,
      analogy:     self.analogy,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const CHECK_COLUMNS: &str = "check_id, concept_id, question, options, \
  correct_answer, explanation, check_type, created_at";

/// Raw strings read directly from a `checks` row.
pub struct RawCheck {
  pub check_id:       String,
  pub concept_id:     String,
  pub question:       String,
  pub options:        Option<String>,
  pub correct_answer: Option<String>,
  pub explanation:    Option<String>,
  pub check_type:     String,
  pub created_at:     String,
}

impl RawCheck {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      check_id:       row.get(0)?,
      concept_id:     row.get(1)?,
      question:       row.get(2)?,
      options:        row.get(3)?,
      correct_answer: row.get(4)?,
      explanation:    row.get(5)?,
      check_type:     row.get(6)?,
      created_at:     row.get(7)?,
    })
  }

  pub fn into_check(self) -> Result<Check> {
    Ok(Check {
      check_id:       decode_uuid(&self.check_id)?,
      concept_id:     decode_uuid(&self.concept_id)?,
      question:       self.question,
      options:        decode_json(self.options.as_deref())?,
      correct_answer: decode_json(self.correct_answer.as_deref())?,
      explanation:    self.explanation,
      check_type:     decode_enum("check_type", &self.check_type)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

pub const JOB_COLUMNS: &str =
  "job_id, concept_id, owner_id, job_type, input, output, status, created_at";

/// Raw strings read directly from a `jobs` row.
pub struct RawJob {
  pub job_id:     String,
  pub concept_id: Option<String>,
  pub owner_id:   String,
  pub job_type:   String,
  pub input:      Option<String>,
  pub output:     Option<String>,
  pub status:     String,
  pub created_at: String,
}

impl RawJob {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      job_id:     row.get(0)?,
      concept_id: row.get(1)?,
      owner_id:   row.get(2)?,
      job_type:   row.get(3)?,
      input:      row.get(4)?,
      output:     row.get(5)?,
      status:     row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_job(self) -> Result<Job> {
    Ok(Job {
      job_id:     decode_uuid(&self.job_id)?,
      concept_id: self.concept_id.as_deref().map(decode_uuid).transpose()?,
      owner_id:   self.owner_id,
      job_type:   decode_enum("job_type", &self.job_type)?,
      input:      decode_json(self.input.as_deref())?,
      output:     decode_json(self.output.as_deref())?,
      status:     decode_enum("status", &self.status)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
