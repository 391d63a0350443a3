//! Handler for `POST /post-image`.
//!
//! The `image` part is buffered in memory. The route carries an explicit
//! body limit (see [`crate::api_router`]); anything larger is rejected with
//! 413 before the handler returns.

use axum::{
  Json,
  extract::{Multipart, multipart::MultipartRejection},
};
use roster_core::{Source, Violation, upload::ImageSummary};

use crate::error::ApiError;

const IMAGE_FIELD: &str = "image";

/// `POST /post-image`: multipart body with an `image` file part.
pub async fn post_image(
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageSummary>, ApiError> {
  let mut multipart =
    multipart.map_err(|r| ApiError::Rejected(r.status(), r.body_text()))?;

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?
  {
    if field.name() != Some(IMAGE_FIELD) {
      continue;
    }
    let filename = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);
    let data = field
      .bytes()
      .await
      .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;
    tracing::debug!(?filename, bytes = data.len(), "image received");
    return Ok(Json(ImageSummary::new(filename, content_type, &data)));
  }

  Err(ApiError::Validation(vec![Violation::missing(Source::Form, IMAGE_FIELD)]))
}
