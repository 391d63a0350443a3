//! Server wiring for Roster: configuration and the traced application router.

use std::path::Path;

use axum::Router;
use roster_api::{AppState, DEFAULT_UPLOAD_LIMIT, api_router};
use roster_core::known::DEFAULT_PERSON_IDS;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix for environment overrides, e.g. `ROSTER_PORT=9000`.
pub const ENV_PREFIX: &str = "ROSTER";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, then the TOML file, then `ROSTER_*`
/// environment variables. `ROSTER_KNOWN_PERSON_IDS` takes a comma-separated
/// list.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub known_person_ids:   Vec<i64>,
  pub upload_limit_bytes: usize,
}

impl ServerConfig {
  /// Load configuration; a missing file at `path` is not an error.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000_i64)?
      .set_default("known_person_ids", DEFAULT_PERSON_IDS.to_vec())?
      .set_default("upload_limit_bytes", DEFAULT_UPLOAD_LIMIT as i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("known_person_ids"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Shared handler state derived from this configuration.
  pub fn state(&self) -> AppState {
    AppState::new(
      self.known_person_ids.iter().copied().collect(),
      self.upload_limit_bytes,
    )
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in a per-request tracing layer.
pub fn app(config: &ServerConfig) -> Router {
  api_router(config.state()).layer(TraceLayer::new_for_http())
}
