//! Contact form schema.

use serde::Deserialize;
use validator::Validate;

/// Form fields of `POST /contact`. Only validated; the handler echoes the
/// caller's `User-Agent` instead.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
  #[validate(length(min = 1, max = 20))]
  pub first_name: String,
  #[validate(length(min = 1, max = 20))]
  pub last_name:  String,
  #[validate(email)]
  pub email:      String,
  #[validate(length(min = 20))]
  pub message:    String,
}
