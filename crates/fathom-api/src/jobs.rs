//! Handlers for `/jobs` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/jobs` | Optional `concept_id`, `status` filters |
//! | `POST`  | `/jobs` | Body: [`NewJob`]; returns 201 |
//! | `PATCH` | `/jobs/{id}` | Body: [`JobPatch`]; only `output` and `status` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use fathom_core::{
  job::{Job, JobFilter, JobPatch, NewJob},
  store::AuthoringStore,
};
use uuid::Uuid;

use crate::{AppState, auth::Session, error::ApiError};

/// `GET /jobs[?concept_id=...][&status=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<Job>>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.list_jobs(&ctx, &filter).await?))
}

/// `POST /jobs`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Json(body): Json<NewJob>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AuthoringStore + 'static,
{
  let job = state.authoring.create_job(&ctx, body).await?;
  Ok((StatusCode::CREATED, Json(job)))
}

/// `PATCH /jobs/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path(id): Path<Uuid>,
  Json(patch): Json<JobPatch>,
) -> Result<Json<Job>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.update_job(&ctx, id, patch).await?))
}
