//! Demo login. Credentials are accepted as-is; nothing is stored or checked.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const LOGIN_SUCCESSFUL: &str = "Login Successful";

/// Form fields of `POST /login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
  #[validate(length(max = 20))]
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOut {
  pub username: String,
  #[serde(default = "default_message")]
  pub message:  String,
}

fn default_message() -> String { LOGIN_SUCCESSFUL.to_owned() }

impl LoginOut {
  pub fn new(username: impl Into<String>) -> Self {
    LoginOut { username: username.into(), message: default_message() }
  }
}

/// Echo the username with the fixed success message. The password is
/// dropped here.
pub fn login(form: LoginForm) -> LoginOut { LoginOut::new(form.username) }
