//! The `AuthoringStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `fathom-store-sqlite`).
//! It is a plain persistence surface: it knows nothing about callers or
//! ownership. Access control lives in [`crate::ops`].

use std::future::Future;

use uuid::Uuid;

use crate::{check::Check, concept::Concept, job::Job, step::Step};

/// Abstraction over a relational backend holding concepts, steps, checks and
/// jobs.
///
/// List methods return rows in insertion order. `update_*` methods return
/// `false` when no row with the given id exists.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait AuthoringStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Concepts ──────────────────────────────────────────────────────────

  fn insert_concept(
    &self,
    concept: Concept,
  ) -> impl Future<Output = Result<Concept, Self::Error>> + Send + '_;

  fn get_concept(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Concept>, Self::Error>> + Send + '_;

  /// Overwrite every mutable column of the concept with the same id.
  fn update_concept(
    &self,
    concept: Concept,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_concepts(
    &self,
    owner_id: String,
  ) -> impl Future<Output = Result<Vec<Concept>, Self::Error>> + Send + '_;

  // ── Steps ─────────────────────────────────────────────────────────────

  fn insert_step(
    &self,
    step: Step,
  ) -> impl Future<Output = Result<Step, Self::Error>> + Send + '_;

  fn get_step(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Step>, Self::Error>> + Send + '_;

  fn update_step(
    &self,
    step: Step,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete the step matching both `id` and `concept_id`, returning the row
  /// that was removed.
  fn delete_step(
    &self,
    id: Uuid,
    concept_id: Uuid,
  ) -> impl Future<Output = Result<Option<Step>, Self::Error>> + Send + '_;

  fn list_steps(
    &self,
    concept_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Step>, Self::Error>> + Send + '_;

  // ── Checks ────────────────────────────────────────────────────────────

  fn insert_check(
    &self,
    check: Check,
  ) -> impl Future<Output = Result<Check, Self::Error>> + Send + '_;

  fn get_check(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Check>, Self::Error>> + Send + '_;

  fn update_check(
    &self,
    check: Check,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete the check matching both `id` and `concept_id`, returning the row
  /// that was removed.
  fn delete_check(
    &self,
    id: Uuid,
    concept_id: Uuid,
  ) -> impl Future<Output = Result<Option<Check>, Self::Error>> + Send + '_;

  fn list_checks(
    &self,
    concept_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Check>, Self::Error>> + Send + '_;

  // ── Jobs ──────────────────────────────────────────────────────────────

  fn insert_job(
    &self,
    job: Job,
  ) -> impl Future<Output = Result<Job, Self::Error>> + Send + '_;

  fn get_job(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Job>, Self::Error>> + Send + '_;

  fn update_job(
    &self,
    job: Job,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_jobs(
    &self,
    owner_id: String,
  ) -> impl Future<Output = Result<Vec<Job>, Self::Error>> + Send + '_;
}
