//! Core types, the persistence trait, and the authoring operations for Fathom.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod access;
pub mod check;
pub mod concept;
pub mod error;
pub mod job;
pub mod ops;
pub mod step;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use ops::Authoring;
