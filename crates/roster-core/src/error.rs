//! Error types for `roster-core`.

use thiserror::Error;

use crate::violation::Violation;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{} validation error(s)", .0.len())]
  Invalid(Vec<Violation>),

  #[error("person not found: {0}")]
  PersonNotFound(i64),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
