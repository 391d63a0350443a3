//! Handlers for the url-encoded form endpoints `/login` and `/contact`.

use axum::{
  Json,
  http::{HeaderMap, header},
};
use axum_extra::extract::cookie::CookieJar;
use roster_core::{
  contact::ContactForm,
  login::{LoginForm, LoginOut},
};

use crate::extract::ValidatedForm;

/// `POST /login`: form fields `username`, `password`.
pub async fn login(ValidatedForm(form): ValidatedForm<LoginForm>) -> Json<LoginOut> {
  tracing::debug!(username = %form.username, "login");
  Json(roster_core::login::login(form))
}

/// `POST /contact`: returns the caller's `User-Agent` header, or `null`.
///
/// The form is validated and then discarded. The `ads` cookie is read but
/// has no effect on the response.
pub async fn contact(
  headers: HeaderMap,
  jar: CookieJar,
  ValidatedForm(form): ValidatedForm<ContactForm>,
) -> Json<Option<String>> {
  let user_agent = headers
    .get(header::USER_AGENT)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);
  let ads = jar.get("ads").map(|c| c.value().to_owned());
  tracing::debug!(email = %form.email, ?ads, "contact");
  Json(user_agent)
}
