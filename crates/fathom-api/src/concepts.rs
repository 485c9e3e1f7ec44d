//! Handlers for `/concepts` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/concepts` | Optional `status`, `subject`, `topic` filters |
//! | `POST`  | `/concepts` | Body: [`NewConcept`]; returns 201 + stored concept |
//! | `GET`   | `/concepts/{id}` | Concept with its steps and checks |
//! | `PATCH` | `/concepts/{id}` | Body: [`ConceptPatch`]; `null` clears a nullable field |
//! | `POST`  | `/concepts/{id}/archive` | No body |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use fathom_core::{
  concept::{Concept, ConceptDetails, ConceptFilter, ConceptPatch, NewConcept},
  store::AuthoringStore,
};
use uuid::Uuid;

use crate::{AppState, auth::Session, error::ApiError};

/// `GET /concepts[?status=...][&subject=...][&topic=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Query(filter): Query<ConceptFilter>,
) -> Result<Json<Vec<Concept>>, ApiError>
where
  S: AuthoringStore + 'static,
{
  let concepts = state.authoring.list_my_concepts(&ctx, &filter).await?;
  Ok(Json(concepts))
}

/// `POST /concepts`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Json(body): Json<NewConcept>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AuthoringStore + 'static,
{
  let concept = state.authoring.create_concept(&ctx, body).await?;
  Ok((StatusCode::CREATED, Json(concept)))
}

/// `GET /concepts/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path(id): Path<Uuid>,
) -> Result<Json<ConceptDetails>, ApiError>
where
  S: AuthoringStore + 'static,
{
  let details = state.authoring.get_concept_with_details(&ctx, id).await?;
  Ok(Json(details))
}

/// `PATCH /concepts/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path(id): Path<Uuid>,
  Json(patch): Json<ConceptPatch>,
) -> Result<Json<Concept>, ApiError>
where
  S: AuthoringStore + 'static,
{
  let concept = state.authoring.update_concept(&ctx, id, patch).await?;
  Ok(Json(concept))
}

/// `POST /concepts/{id}/archive`
pub async fn archive<S>(
  State(state): State<AppState<S>>,
  Session(ctx): Session,
  Path(id): Path<Uuid>,
) -> Result<Json<Concept>, ApiError>
where
  S: AuthoringStore + 'static,
{
  let concept = state.authoring.archive_concept(&ctx, id).await?;
  Ok(Json(concept))
}
