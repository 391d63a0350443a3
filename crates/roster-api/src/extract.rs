//! Extractors that decode a request part and then run its field rules.
//!
//! Each wrapper delegates decoding to the matching axum extractor and feeds
//! the result through [`roster_core::validate`]. Decoding failures and rule
//! failures both come back as [`ApiError::Validation`], tagged with the
//! request part they came from.

use axum::{
  Form, Json,
  extract::{
    FromRequest, FromRequestParts, Path, Query, Request,
    rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
  },
  http::request::Parts,
};
use roster_core::{Source, Violation, validate};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

// ─── JSON body ───────────────────────────────────────────────────────────────

pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(json_rejection)?;
    Ok(ValidatedJson(validate(value, Source::Body)?))
  }
}

fn json_rejection(r: JsonRejection) -> ApiError {
  match &r {
    JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
      ApiError::Validation(vec![Violation::decode(Source::Body, r.body_text())])
    }
    _ => ApiError::Rejected(r.status(), r.body_text()),
  }
}

// ─── URL-encoded form ────────────────────────────────────────────────────────

pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Form(value) = Form::<T>::from_request(req, state)
      .await
      .map_err(form_rejection)?;
    Ok(ValidatedForm(validate(value, Source::Form)?))
  }
}

fn form_rejection(r: FormRejection) -> ApiError {
  match &r {
    FormRejection::FailedToDeserializeForm(_)
    | FormRejection::FailedToDeserializeFormBody(_) => {
      ApiError::Validation(vec![Violation::decode(Source::Form, r.body_text())])
    }
    _ => ApiError::Rejected(r.status(), r.body_text()),
  }
}

// ─── Query string ────────────────────────────────────────────────────────────

pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Query(value) = Query::<T>::from_request_parts(parts, state)
      .await
      .map_err(|r: QueryRejection| {
        ApiError::Validation(vec![Violation::decode(Source::Query, r.body_text())])
      })?;
    Ok(ValidatedQuery(validate(value, Source::Query)?))
  }
}

// ─── Path parameters ─────────────────────────────────────────────────────────

pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
  T: DeserializeOwned + Validate + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(value) = Path::<T>::from_request_parts(parts, state)
      .await
      .map_err(path_rejection)?;
    Ok(ValidatedPath(validate(value, Source::Path)?))
  }
}

pub(crate) fn path_rejection(r: PathRejection) -> ApiError {
  match &r {
    PathRejection::FailedToDeserializePathParams(_) => {
      ApiError::Validation(vec![Violation::decode(Source::Path, r.body_text())])
    }
    _ => ApiError::Rejected(r.status(), r.body_text()),
  }
}
