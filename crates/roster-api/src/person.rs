//! Handlers for `/` and `/person` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Greeting |
//! | `POST` | `/person/new` | Body: [`Person`]; returns 201 + [`PersonOut`] |
//! | `GET`  | `/person/detail` | `?age` required, optional `name` |
//! | `GET`  | `/person/detail/{person_id}&{age}` | 404 if the id is unknown |
//! | `PUT`  | `/person/{person_id}` | Body: [`PersonUpdate`]; returns 201 + merged mapping |

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::person::{
  Person, PersonDetail, PersonIdPath, PersonOut, PersonQuery, PersonUpdate,
  create_person,
};
use serde_json::{Map, Value, json};

use crate::{
  AppState,
  error::ApiError,
  extract::{ValidatedJson, ValidatedPath, ValidatedQuery, path_rejection},
};

/// `GET /`
pub async fn home() -> Json<Value> { Json(json!({ "Hello": "world" })) }

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /person/new`: returns 201 + the password-free projection.
pub async fn create(
  ValidatedJson(person): ValidatedJson<Person>,
) -> impl IntoResponse {
  tracing::debug!(first_name = %person.profile.first_name, "create person");
  let out: PersonOut = create_person(person);
  (StatusCode::CREATED, Json(out))
}

// ─── Show ─────────────────────────────────────────────────────────────────────

/// `GET /person/detail?age=<n>[&name=<name>]`
pub async fn show_by_query(
  ValidatedQuery(query): ValidatedQuery<PersonQuery>,
) -> Json<Map<String, Value>> {
  Json(query.echo())
}

/// `GET /person/detail/{person_id}&{age}`
pub async fn show_by_path(
  State(state): State<AppState>,
  segment: Result<Path<String>, PathRejection>,
) -> Result<Json<Map<String, Value>>, ApiError> {
  let Path(segment) = segment.map_err(path_rejection)?;
  let detail = PersonDetail::parse(&segment)?;
  let described = detail.describe(&state.known).inspect_err(|_| {
    tracing::debug!(person_id = detail.person_id, "unknown person");
  })?;
  Ok(Json(described))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /person/{person_id}`: nothing is stored; the merged input is echoed.
pub async fn update(
  ValidatedPath(path): ValidatedPath<PersonIdPath>,
  ValidatedJson(body): ValidatedJson<PersonUpdate>,
) -> Result<impl IntoResponse, ApiError> {
  tracing::debug!(person_id = path.person_id, "update person");
  let merged = body.merge()?;
  Ok((StatusCode::CREATED, Json(merged)))
}
