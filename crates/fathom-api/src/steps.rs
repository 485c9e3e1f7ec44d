//! Handlers for steps.
//!
//! `POST /steps` inserts when the body has no `step_id` and fully replaces the
//! step otherwise; omitted fields fall back to their defaults.

use axum::{
  Json,
  extract::{Path, State},
};
use fathom_core::{
  step::{SaveStep, Step},
  store::AuthoringStore,
};
use uuid::Uuid;

use crate::{AppState, auth::Session, error::ApiError};

/// `POST /steps`
pub async fn save<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Json(body): Json<SaveStep>,
) -> Result<Json<Step>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.save_step(&ctx, body).await?))
}

/// `DELETE /concepts/{concept_id}/steps/{id}`, returning the removed step.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path((concept_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Step>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.delete_step(&ctx, id, concept_id).await?))
}
