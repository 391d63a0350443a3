//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has a single `detail` key: a list of violations for
//! validation failures, a plain message for everything else.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::Violation;
use serde_json::json;
use thiserror::Error;

pub const PERSON_NOT_FOUND: &str = "This person doesn't exist";

/// An error returned by an API handler or extractor.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{} validation error(s)", .0.len())]
  Validation(Vec<Violation>),

  #[error("not found: {0}")]
  NotFound(String),

  /// An extractor rejection that is not a validation failure (wrong content
  /// type, oversized body). Keeps the status axum chose.
  #[error("{1}")]
  Rejected(StatusCode, String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    match e {
      roster_core::Error::Invalid(v) => ApiError::Validation(v),
      roster_core::Error::PersonNotFound(_) => {
        ApiError::NotFound(PERSON_NOT_FOUND.to_owned())
      }
      roster_core::Error::Serialization(e) => ApiError::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(violations) => {
        tracing::debug!(count = violations.len(), "request failed validation");
        (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "detail": violations })),
        )
          .into_response()
      }
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": m }))).into_response()
      }
      ApiError::Rejected(status, m) => {
        (status, Json(json!({ "detail": m }))).into_response()
      }
      ApiError::Internal(m) => {
        tracing::error!(error = %m, "internal error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": m })))
          .into_response()
      }
    }
  }
}
