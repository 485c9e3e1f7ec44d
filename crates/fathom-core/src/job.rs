//! Jobs: bookkeeping for asynchronous content-generation requests.
//!
//! Payloads are opaque; only the lifecycle (`pending` → `completed` /
//! `failed`) is tracked here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::concept::explicit;

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
pub enum JobType {
  #[default]
  StepBreakdown,
  CheckGeneration,
  Explanation,
  Analogy,
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
pub enum JobStatus {
  #[default]
  Pending,
  Completed,
  Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
  pub job_id:     Uuid,
  /// Concept the job works on, if any. Verified to belong to `owner_id` when
  /// the job is created.
  pub concept_id: Option<Uuid>,
  pub owner_id:   String,
  pub job_type:   JobType,
  pub input:      Option<Value>,
  pub output:     Option<Value>,
  pub status:     JobStatus,
  pub created_at: DateTime<Utc>,
}

/// Input to `Authoring::create_job`; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJob {
  pub concept_id: Option<Uuid>,
  pub job_type:   Option<JobType>,
  pub input:      Option<Value>,
  pub output:     Option<Value>,
  pub status:     Option<JobStatus>,
}

impl NewJob {
  pub fn into_job(self, owner_id: &str, now: DateTime<Utc>) -> Job {
    Job {
      job_id:     Uuid::new_v4(),
      concept_id: self.concept_id,
      owner_id:   owner_id.to_owned(),
      job_type:   self.job_type.unwrap_or_default(),
      input:      self.input,
      output:     self.output,
      status:     self.status.unwrap_or_default(),
      created_at: now,
    }
  }
}

/// Input to `Authoring::update_job`. Only `output` and `status` change after
/// creation; an explicit `null` output clears the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
  #[serde(default, deserialize_with = "explicit")]
  pub output: Option<Option<Value>>,
  pub status: Option<JobStatus>,
}

impl JobPatch {
  pub fn is_empty(&self) -> bool { self.output.is_none() && self.status.is_none() }

  pub fn apply(self, job: &mut Job) {
    if let Some(output) = self.output {
      job.output = output;
    }
    if let Some(status) = self.status {
      job.status = status;
    }
  }
}

/// Filters for `Authoring::list_jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
  pub concept_id: Option<Uuid>,
  pub status:     Option<JobStatus>,
}
