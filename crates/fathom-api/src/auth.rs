//! HTTP Basic identity resolution and the [`Session`] extractor.
//!
//! Resolution never rejects a request on its own. A missing or wrong
//! `Authorization` header yields an anonymous [`RequestContext`], and the
//! operation's guard turns that into `Unauthorized`.

use std::convert::Infallible;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use fathom_core::{
  access::{Caller, RequestContext},
  store::AuthoringStore,
};
use serde::Deserialize;

use crate::AppState;

/// One login accepted by this server instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  pub accounts: Vec<Account>,
}

impl AuthConfig {
  pub fn new(accounts: Vec<Account>) -> Self { Self { accounts } }

  fn account(&self, username: &str) -> Option<&Account> {
    self.accounts.iter().find(|a| a.username == username)
  }
}

/// Resolve the caller from an `Authorization: Basic` header.
///
/// The account's username becomes the caller's `owner_id`.
pub fn resolve_identity(headers: &HeaderMap, config: &AuthConfig) -> Option<Caller> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())?;

  let encoded = header_val.strip_prefix("Basic ")?;
  let decoded = B64.decode(encoded).ok()?;
  let creds   = std::str::from_utf8(&decoded).ok()?;

  let (username, password) = creds.split_once(':')?;

  let Some(account) = config.account(username) else {
    tracing::debug!(username, "unknown account");
    return None;
  };

  let parsed_hash = PasswordHash::new(&account.password_hash).ok()?;
  if Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .is_err()
  {
    tracing::debug!(username, "password mismatch");
    return None;
  }

  Some(Caller::new(username))
}

/// The request's [`RequestContext`], authenticated or not.
pub struct Session(pub RequestContext);

impl<S> FromRequestParts<AppState<S>> for Session
where
  S: AuthoringStore + 'static,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let ctx = match resolve_identity(&parts.headers, &state.auth) {
      Some(caller) => RequestContext::authenticated(caller),
      None => RequestContext::anonymous(),
    };
    Ok(Session(ctx))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::HeaderValue;
  use rand_core::OsRng;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn config() -> AuthConfig {
    AuthConfig::new(vec![
      Account { username: "alice".into(), password_hash: hash("secret") },
      Account { username: "bob".into(),   password_hash: hash("hunter2") },
    ])
  }

  fn basic(user: &str, pass: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", B64.encode(format!("{user}:{pass}")));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    headers
  }

  #[test]
  fn correct_credentials() {
    let config = config();
    assert_eq!(
      resolve_identity(&basic("alice", "secret"), &config),
      Some(Caller::new("alice"))
    );
    assert_eq!(
      resolve_identity(&basic("bob", "hunter2"), &config),
      Some(Caller::new("bob"))
    );
  }

  #[test]
  fn wrong_password() {
    assert_eq!(resolve_identity(&basic("alice", "hunter2"), &config()), None);
  }

  #[test]
  fn unknown_user() {
    assert_eq!(resolve_identity(&basic("mallory", "secret"), &config()), None);
  }

  #[test]
  fn missing_header() {
    assert_eq!(resolve_identity(&HeaderMap::new(), &config()), None);
  }

  #[test]
  fn invalid_base64() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::AUTHORIZATION,
      HeaderValue::from_static("Basic !!!not-base64!!!"),
    );
    assert_eq!(resolve_identity(&headers, &config()), None);
  }

  #[test]
  fn bearer_scheme_is_ignored() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    assert_eq!(resolve_identity(&headers, &config()), None);
  }
}
