//! Handlers for checks. Same insert-or-replace contract as steps.

use axum::{
  Json,
  extract::{Path, State},
};
use fathom_core::{
  check::{Check, SaveCheck},
  store::AuthoringStore,
};
use uuid::Uuid;

use crate::{AppState, auth::Session, error::ApiError};

/// `POST /checks`
pub async fn save<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Json(body): Json<SaveCheck>,
) -> Result<Json<Check>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.save_check(&ctx, body).await?))
}

/// `DELETE /concepts/{concept_id}/checks/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path((concept_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Check>, ApiError>
where
  S: AuthoringStore + 'static,
{
  Ok(Json(state.authoring.delete_check(&ctx, id, concept_id).await?))
}
