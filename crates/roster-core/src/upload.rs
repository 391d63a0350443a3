//! Summary of an uploaded image.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Response body of `POST /post-image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
  #[serde(rename = "Filename")]
  pub filename:     Option<String>,
  #[serde(rename = "Format")]
  pub content_type: Option<String>,
  #[serde(rename = "Size(kb)")]
  pub size_kb:      f64,
}

impl ImageSummary {
  pub fn new(
    filename: Option<String>,
    content_type: Option<String>,
    data: &Bytes,
  ) -> Self {
    ImageSummary { filename, content_type, size_kb: size_kb(data.len()) }
  }
}

/// Byte count in KiB, rounded to a whole number with ties to even.
pub fn size_kb(len: usize) -> f64 { (len as f64 / 1024.0).round_ties_even() }
