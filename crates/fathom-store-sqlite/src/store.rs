//! [`SqliteStore`], the SQLite implementation of [`AuthoringStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use fathom_core::{
  check::Check, concept::Concept, job::Job, step::Step, store::AuthoringStore,
};

use crate::{
  Result,
  encode::{
    CHECK_COLUMNS, CONCEPT_COLUMNS, JOB_COLUMNS, RawCheck, RawConcept, RawJob,
    RawStep, STEP_COLUMNS, encode_dt, encode_json, encode_tags, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Fathom authoring store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AuthoringStore impl ─────────────────────────────────────────────────────

impl AuthoringStore for SqliteStore {
  type Error = crate::Error;

  // ── Concepts ──────────────────────────────────────────────────────────────

  async fn insert_concept(&self, concept: Concept) -> Result<Concept> {
    let id_str      = encode_uuid(concept.concept_id);
    let owner_id    = concept.owner_id.clone();
    let title       = concept.title.clone();
    let description = concept.description.clone();
    let subject     = concept.subject.clone();
    let topic       = concept.topic.clone();
    let tags_str    = encode_tags(concept.tags.as_deref())?;
    let difficulty  = concept.difficulty.to_string();
    let status      = concept.status.to_string();
    let created_str = encode_dt(concept.created_at);
    let updated_str = encode_dt(concept.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO concepts (
             concept_id, owner_id, title, description, subject, topic,
             tags, difficulty, status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            owner_id,
            title,
            description,
            subject,
            topic,
            tags_str,
            difficulty,
            status,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(concept)
  }

  async fn get_concept(&self, id: Uuid) -> Result<Option<Concept>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawConcept> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONCEPT_COLUMNS} FROM concepts WHERE concept_id = ?1"),
            rusqlite::params![id_str],
            RawConcept::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawConcept::into_concept).transpose()
  }

  async fn update_concept(&self, concept: Concept) -> Result<bool> {
    let id_str      = encode_uuid(concept.concept_id);
    let tags_str    = encode_tags(concept.tags.as_deref())?;
    let difficulty  = concept.difficulty.to_string();
    let status      = concept.status.to_string();
    let updated_str = encode_dt(concept.updated_at);
    let Concept { title, description, subject, topic, .. } = concept;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE concepts
              SET title = ?2, description = ?3, subject = ?4, topic = ?5,
                  tags = ?6, difficulty = ?7, status = ?8, updated_at = ?9
            WHERE concept_id = ?1",
          rusqlite::params![
            id_str,
            title,
            description,
            subject,
            topic,
            tags_str,
            difficulty,
            status,
            updated_str,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn list_concepts(&self, owner_id: String) -> Result<Vec<Concept>> {
    let raws: Vec<RawConcept> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONCEPT_COLUMNS} FROM concepts WHERE owner_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_id], RawConcept::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawConcept::into_concept).collect()
  }

  // ── Steps ─────────────────────────────────────────────────────────────────

  async fn insert_step(&self, step: Step) -> Result<Step> {
    let id_str      = encode_uuid(step.step_id);
    let concept_str = encode_uuid(step.concept_id);
    let step_number = step.step_number;
    let step_type   = step.step_type.to_string();
    let heading     = step.heading.clone();
    let content     = step.content.clone();
    let example     = step.example.clone();
    let analogy     = step.analogy.clone();
    let created_str = encode_dt(step.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO steps (
             step_id, concept_id, step_number, step_type,
             heading, content, example, analogy, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            concept_str,
            step_number,
            step_type,
            heading,
            content,
            example,
            analogy,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(step)
  }

  async fn get_step(&self, id: Uuid) -> Result<Option<Step>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStep> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STEP_COLUMNS} FROM steps WHERE step_id = ?1"),
            rusqlite::params![id_str],
            RawStep::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStep::into_step).transpose()
  }

  async fn update_step(&self, step: Step) -> Result<bool> {
    let id_str    = encode_uuid(step.step_id);
    let step_type = step.step_type.to_string();
    let Step { step_number, heading, content, example, analogy, .. } = step;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE steps
              SET step_number = ?2, step_type = ?3, heading = ?4,
                  content = ?5, example = ?6, analogy = ?7
            WHERE step_id = ?1",
          rusqlite::params![
            id_str,
            step_number,
            step_type,
            heading,
            content,
            example,
            analogy,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_step(&self, id: Uuid, concept_id: Uuid) -> Result<Option<Step>> {
    let id_str      = encode_uuid(id);
    let concept_str = encode_uuid(concept_id);

    let raw: Option<RawStep> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!(
              "SELECT {STEP_COLUMNS} FROM steps WHERE step_id = ?1 AND concept_id = ?2"
            ),
            rusqlite::params![id_str, concept_str],
            RawStep::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM steps WHERE step_id = ?1 AND concept_id = ?2",
            rusqlite::params![id_str, concept_str],
          )?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawStep::into_step).transpose()
  }

  async fn list_steps(&self, concept_id: Uuid) -> Result<Vec<Step>> {
    let concept_str = encode_uuid(concept_id);

    let raws: Vec<RawStep> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STEP_COLUMNS} FROM steps WHERE concept_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![concept_str], RawStep::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStep::into_step).collect()
  }

  // ── Checks ────────────────────────────────────────────────────────────────

  async fn insert_check(&self, check: Check) -> Result<Check> {
    let id_str      = encode_uuid(check.check_id);
    let concept_str = encode_uuid(check.concept_id);
    let question    = check.question.clone();
    let options     = encode_json(check.options.as_ref())?;
    let answer      = encode_json(check.correct_answer.as_ref())?;
    let explanation = check.explanation.clone();
    let check_type  = check.check_type.to_string();
    let created_str = encode_dt(check.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO checks (
             check_id, concept_id, question, options, correct_answer,
             explanation, check_type, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            concept_str,
            question,
            options,
            answer,
            explanation,
            check_type,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(check)
  }

  async fn get_check(&self, id: Uuid) -> Result<Option<Check>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCheck> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CHECK_COLUMNS} FROM checks WHERE check_id = ?1"),
            rusqlite::params![id_str],
            RawCheck::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCheck::into_check).transpose()
  }

  async fn update_check(&self, check: Check) -> Result<bool> {
    let id_str     = encode_uuid(check.check_id);
    let options    = encode_json(check.options.as_ref())?;
    let answer     = encode_json(check.correct_answer.as_ref())?;
    let check_type = check.check_type.to_string();
    let Check { question, explanation, .. } = check;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE checks
              SET question = ?2, options = ?3, correct_answer = ?4,
                  explanation = ?5, check_type = ?6
            WHERE check_id = ?1",
          rusqlite::params![id_str, question, options, answer, explanation, check_type],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_check(&self, id: Uuid, concept_id: Uuid) -> Result<Option<Check>> {
    let id_str      = encode_uuid(id);
    let concept_str = encode_uuid(concept_id);

    let raw: Option<RawCheck> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!(
              "SELECT {CHECK_COLUMNS} FROM checks WHERE check_id = ?1 AND concept_id = ?2"
            ),
            rusqlite::params![id_str, concept_str],
            RawCheck::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM checks WHERE check_id = ?1 AND concept_id = ?2",
            rusqlite::params![id_str, concept_str],
          )?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawCheck::into_check).transpose()
  }

  async fn list_checks(&self, concept_id: Uuid) -> Result<Vec<Check>> {
    let concept_str = encode_uuid(concept_id);

    let raws: Vec<RawCheck> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CHECK_COLUMNS} FROM checks WHERE concept_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![concept_str], RawCheck::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCheck::into_check).collect()
  }

  // ── Jobs ──────────────────────────────────────────────────────────────────

  async fn insert_job(&self, job: Job) -> Result<Job> {
    let id_str      = encode_uuid(job.job_id);
    let concept_str = job.concept_id.map(encode_uuid);
    let owner_id    = job.owner_id.clone();
    let job_type    = job.job_type.to_string();
    let input       = encode_json(job.input.as_ref())?;
    let output      = encode_json(job.output.as_ref())?;
    let status      = job.status.to_string();
    let created_str = encode_dt(job.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO jobs (
             job_id, concept_id, owner_id, job_type, input, output, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            concept_str,
            owner_id,
            job_type,
            input,
            output,
            status,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(job)
  }

  async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawJob> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE job_id = ?1"),
            rusqlite::params![id_str],
            RawJob::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawJob::into_job).transpose()
  }

  async fn update_job(&self, job: Job) -> Result<bool> {
    let id_str = encode_uuid(job.job_id);
    let output = encode_json(job.output.as_ref())?;
    let status = job.status.to_string();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE jobs SET output = ?2, status = ?3 WHERE job_id = ?1",
          rusqlite::params![id_str, output, status],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn list_jobs(&self, owner_id: String) -> Result<Vec<Job>> {
    let raws: Vec<RawJob> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {JOB_COLUMNS} FROM jobs WHERE owner_id = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_id], RawJob::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJob::into_job).collect()
  }
}
