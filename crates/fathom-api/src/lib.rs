//! JSON REST API for Fathom.
//!
//! Exposes an axum [`Router`] backed by any [`AuthoringStore`]. Every route
//! resolves the caller from HTTP Basic credentials and delegates to
//! [`Authoring`]; TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = fathom_api::api_router(AppState::new(store, auth));
//! ```

pub mod auth;
pub mod checks;
pub mod concepts;
pub mod error;
pub mod jobs;
pub mod steps;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, patch, post},
};
use fathom_core::{Authoring, store::AuthoringStore};

pub use auth::{Account, AuthConfig};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub authoring: Authoring<S>,
  pub auth:      Arc<AuthConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      authoring: self.authoring.clone(),
      auth:      Arc::clone(&self.auth),
    }
  }
}

impl<S: AuthoringStore> AppState<S> {
  pub fn new(store: Arc<S>, auth: AuthConfig) -> Self {
    Self {
      authoring: Authoring::new(store),
      auth:      Arc::new(auth),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: AuthoringStore + 'static,
{
  Router::new()
    // Concepts
    .route("/concepts", get(concepts::list::<S>).post(concepts::create::<S>))
    .route("/concepts/{id}", get(concepts::get_one::<S>).patch(concepts::update::<S>))
    .route("/concepts/{id}/archive", post(concepts::archive::<S>))
    // Steps & checks
    .route("/steps", post(steps::save::<S>))
    .route("/concepts/{concept_id}/steps/{id}", delete(steps::delete::<S>))
    .route("/checks", post(checks::save::<S>))
    .route("/concepts/{concept_id}/checks/{id}", delete(checks::delete::<S>))
    // Jobs
    .route("/jobs", get(jobs::list::<S>).post(jobs::create::<S>))
    .route("/jobs/{id}", patch(jobs::update::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use fathom_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  // Cheap parameters keep the per-request verification fast under test.
  fn hash(password: &str) -> String {
    let params = Params::new(1024, 1, 1, None).unwrap();
    let salt   = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState::new(
      Arc::new(store),
      AuthConfig::new(vec![
        Account { username: "alice".into(), password_hash: hash("alice-pw") },
        Account { username: "bob".into(),   password_hash: hash("bob-pw") },
      ]),
    )
  }

  const ALICE: Option<(&str, &str)> = Some(("alice", "alice-pw"));
  const BOB: Option<(&str, &str)> = Some(("bob", "bob-pw"));

  async fn send(
    state:  &AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    creds:  Option<(&str, &str)>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user, pass)) = creds {
      let encoded = B64.encode(format!("{user}:{pass}"));
      builder = builder.header(header::AUTHORIZATION, format!("Basic {encoded}"));
    }
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp   = api_router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json   = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
  }

  async fn create_concept(state: &AppState<SqliteStore>, title: &str) -> String {
    let (status, body) =
      send(state, "POST", "/concepts", ALICE, Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["concept_id"].as_str().unwrap().to_string()
  }

  // ── Auth ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state().await;

    let req  = Request::builder().uri("/concepts").body(Body::empty()).unwrap();
    let resp = api_router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

    let (status, body) = send(&state, "GET", "/jobs", Some(("alice", "nope")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
  }

  // ── Concepts ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn concept_lifecycle() {
    let state = make_state().await;
    let (status, created) =
      send(&state, "POST", "/concepts", ALICE, Some(json!({ "title": "Big-O" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["difficulty"], "beginner");
    assert_eq!(created["status"], "draft");
    assert_eq!(created["owner_id"], "alice");
    let id = created["concept_id"].as_str().unwrap();

    let (status, archived) =
      send(&state, "POST", &format!("/concepts/{id}/archive"), ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["status"], "archived");

    let (status, published) = send(
      &state,
      "PATCH",
      &format!("/concepts/{id}"),
      ALICE,
      Some(json!({ "status": "published" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["status"], "published");
    assert_eq!(published["title"], "Big-O");

    let (_, listed) = send(&state, "GET", "/concepts?status=published", ALICE, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (_, listed) = send(&state, "GET", "/concepts?status=draft", ALICE, None).await;
    assert!(listed.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn other_accounts_get_404() {
    let state = make_state().await;
    let id = create_concept(&state, "private").await;

    let (status, body) = send(&state, "GET", &format!("/concepts/{id}"), BOB, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(
      &state,
      "PATCH",
      &format!("/concepts/{id}"),
      BOB,
      Some(json!({ "title": "stolen" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&state, "GET", "/concepts", BOB, None).await;
    assert!(listed.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn invalid_input_returns_422() {
    let state = make_state().await;

    let (status, body) =
      send(&state, "POST", "/concepts", ALICE, Some(json!({ "title": "   " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("title"));

    // Rejected by the extractor: not a known difficulty.
    let (status, _) = send(
      &state,
      "POST",
      "/concepts",
      ALICE,
      Some(json!({ "title": "x", "difficulty": "expert" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  // ── Steps & checks ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn step_save_replace_and_delete() {
    let state = make_state().await;
    let concept_id = create_concept(&state, "Big-O").await;

    let (status, step) = send(
      &state,
      "POST",
      "/steps",
      ALICE,
      Some(json!({ "concept_id": concept_id, "content": "intro text", "step_number": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(step["step_number"], 3);
    assert_eq!(step["step_type"], "other");
    let step_id = step["step_id"].as_str().unwrap().to_string();

    let (_, revised) = send(
      &state,
      "POST",
      "/steps",
      ALICE,
      Some(json!({ "step_id": step_id, "concept_id": concept_id, "content": "revised" })),
    )
    .await;
    assert_eq!(revised["step_id"], step_id.as_str());
    assert_eq!(revised["step_number"], 1);

    let (_, details) = send(&state, "GET", &format!("/concepts/{concept_id}"), ALICE, None).await;
    assert_eq!(details["steps"].as_array().unwrap().len(), 1);
    assert_eq!(details["steps"][0]["content"], "revised");

    let uri = format!("/concepts/{concept_id}/steps/{step_id}");
    let (status, deleted) = send(&state, "DELETE", &uri, ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["content"], "revised");

    let (status, _) = send(&state, "DELETE", &uri, ALICE, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn check_uses_type_field() {
    let state = make_state().await;
    let concept_id = create_concept(&state, "Big-O").await;

    let (status, check) = send(
      &state,
      "POST",
      "/checks",
      ALICE,
      Some(json!({
        "concept_id": concept_id,
        "question": "Is O(1) constant?",
        "type": "true_false",
        "correct_answer": true
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["type"], "true_false");
    assert_eq!(check["correct_answer"], true);

    let check_id = check["check_id"].as_str().unwrap();
    let (status, _) = send(
      &state,
      "DELETE",
      &format!("/concepts/{concept_id}/checks/{check_id}"),
      BOB,
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Jobs ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn job_create_update_list() {
    let state = make_state().await;
    let concept_id = create_concept(&state, "Big-O").await;

    let (status, job) = send(
      &state,
      "POST",
      "/jobs",
      ALICE,
      Some(json!({ "concept_id": concept_id, "job_type": "check_generation" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(job["status"], "pending");
    let job_id = job["job_id"].as_str().unwrap();

    let (status, done) = send(
      &state,
      "PATCH",
      &format!("/jobs/{job_id}"),
      ALICE,
      Some(json!({ "status": "completed", "output": { "checks": 3 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");
    assert_eq!(done["output"]["checks"], 3);

    let (_, listed) = send(
      &state,
      "GET",
      &format!("/jobs?concept_id={concept_id}&status=completed"),
      ALICE,
      None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(
      &state,
      "POST",
      "/jobs",
      BOB,
      Some(json!({ "concept_id": concept_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, "GET", &format!("/jobs?concept_id={concept_id}"), BOB, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
