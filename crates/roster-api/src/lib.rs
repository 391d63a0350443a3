//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] over the schemas and handler logic in
//! `roster-core`. Transport concerns (binding, tracing layers) are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(AppState::new(known, 8 * 1024 * 1024));
//! ```

pub mod error;
pub mod extract;
pub mod forms;
pub mod person;
pub mod upload;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post, put},
};
use roster_core::KnownPersons;

pub use error::ApiError;

/// Default cap on the `/post-image` request body.
pub const DEFAULT_UPLOAD_LIMIT: usize = 8 * 1024 * 1024;

// ─── Application state ────────────────────────────────────────────────────────

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
  pub known:        Arc<KnownPersons>,
  /// Largest accepted `/post-image` body, in bytes.
  pub upload_limit: usize,
}

impl AppState {
  pub fn new(known: KnownPersons, upload_limit: usize) -> Self {
    AppState { known: Arc::new(known), upload_limit }
  }
}

impl Default for AppState {
  fn default() -> Self {
    AppState::new(KnownPersons::default(), DEFAULT_UPLOAD_LIMIT)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full route table for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(state: AppState) -> Router<()> {
  let upload_limit = state.upload_limit;
  Router::new()
    .route("/", get(person::home))
    // Person
    .route("/person/new", post(person::create))
    .route("/person/detail", get(person::show_by_query))
    .route("/person/detail/{detail}", get(person::show_by_path))
    .route("/person/{person_id}", put(person::update))
    // Forms
    .route("/login", post(forms::login))
    .route("/contact", post(forms::contact))
    // Upload
    .route(
      "/post-image",
      post(upload::post_image).layer(DefaultBodyLimit::max(upload_limit)),
    )
    .with_state(state)
}
