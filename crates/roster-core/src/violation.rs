//! Validation pass and the flat violation list it produces.
//!
//! `validator` reports failures as a tree keyed by field name. Callers on the
//! HTTP side want a flat, ordered list where each entry names the input
//! source and the full field path, so [`validate`] walks the tree once and
//! emits one [`Violation`] per failed rule.

use serde::{Deserialize, Serialize};
use validator::{
  Validate, ValidationError, ValidationErrors, ValidationErrorsKind,
};

use crate::{Error, Result};

// ─── Source ──────────────────────────────────────────────────────────────────

/// Where in the request a value was read from. Becomes the first `loc`
/// segment of every violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
  Body,
  Query,
  Path,
  Form,
}

impl Source {
  pub fn as_str(self) -> &'static str {
    match self {
      Source::Body => "body",
      Source::Query => "query",
      Source::Path => "path",
      Source::Form => "form",
    }
  }
}

// ─── Violation ───────────────────────────────────────────────────────────────

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
  /// Source followed by the field path, e.g. `["body", "person", "age"]`.
  pub loc:  Vec<String>,
  pub msg:  String,
  /// Rule code (`length`, `range`, `email`, `decode`, ...).
  #[serde(rename = "type")]
  pub kind: String,
}

impl Violation {
  /// A failure to decode the raw input at all (bad JSON, wrong type,
  /// unknown enum variant, missing field).
  ///
  /// The field path is recovered into `loc` from decoder messages such as
  /// `person.age: invalid type ...`. A ``missing field `age` `` message
  /// appends the field and is reported with kind `missing`.
  pub fn decode(source: Source, msg: impl Into<String>) -> Self {
    let msg = msg.into();
    let mut loc = vec![source.as_str().to_owned()];
    loc.extend(decoded_path(&msg));
    let kind = match missing_field(&msg) {
      Some(field) => {
        loc.push(field.to_owned());
        "missing"
      }
      None => "decode",
    };
    Violation { loc, msg, kind: kind.to_owned() }
  }

  /// A required input that never arrived.
  pub fn missing(source: Source, field: &str) -> Self {
    Violation {
      loc:  vec![source.as_str().to_owned(), field.to_owned()],
      msg:  "field required".to_owned(),
      kind: "missing".to_owned(),
    }
  }
}

/// Field path prefix of a decoder message, e.g. `["person", "age"]` for
/// `... target type: person.age: invalid type`. Prose segments (anything with
/// spaces) are skipped; the final segment is never a path.
fn decoded_path(msg: &str) -> Vec<String> {
  let segments: Vec<&str> = msg.split(": ").collect();
  let Some((_, heads)) = segments.split_last() else {
    return Vec::new();
  };
  heads
    .iter()
    .find(|s| {
      !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || "_.[]".contains(c))
    })
    .map(|path| {
      path
        .split(['.', '['])
        .map(|part| part.trim_end_matches(']'))
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
    })
    .unwrap_or_default()
}

/// Name inside ``missing field `name` `` if the message reports one.
fn missing_field(msg: &str) -> Option<&str> {
  let (_, rest) = msg.split_once("missing field `")?;
  rest.split_once('`').map(|(field, _)| field)
}

// ─── Validation pass ─────────────────────────────────────────────────────────

/// Run every declared rule on `value`.
///
/// Returns the value untouched when it satisfies all rules, otherwise
/// [`Error::Invalid`] carrying the violations sorted by location.
pub fn validate<T: Validate>(value: T, source: Source) -> Result<T> {
  match value.validate() {
    Ok(()) => Ok(value),
    Err(errors) => Err(Error::Invalid(violations(&errors, source))),
  }
}

/// Flatten a `validator` error tree into violations rooted at `source`.
pub fn violations(errors: &ValidationErrors, source: Source) -> Vec<Violation> {
  let mut out = Vec::new();
  collect(errors, &[source.as_str().to_owned()], &mut out);
  out.sort_by(|a, b| a.loc.cmp(&b.loc));
  out
}

fn collect(errors: &ValidationErrors, prefix: &[String], out: &mut Vec<Violation>) {
  for (field, kind) in errors.errors() {
    let mut loc = prefix.to_vec();
    loc.push(field.to_string());
    match kind {
      ValidationErrorsKind::Field(list) => {
        out.extend(list.iter().map(|error| Violation {
          loc:  loc.clone(),
          msg:  describe(error),
          kind: error.code.to_string(),
        }));
      }
      ValidationErrorsKind::Struct(inner) => collect(inner, &loc, out),
      ValidationErrorsKind::List(items) => {
        for (index, inner) in items {
          let mut item_loc = loc.clone();
          item_loc.push(index.to_string());
          collect(inner, &item_loc, out);
        }
      }
    }
  }
}

/// Human-readable message for a failed rule. An explicit message on the rule
/// wins; otherwise one is built from the rule's parameters.
fn describe(error: &ValidationError) -> String {
  if let Some(message) = &error.message {
    return message.to_string();
  }
  let param = |key: &str| error.params.get(key).map(|v| v.to_string());
  match error.code.as_ref() {
    "length" => match (param("min"), param("max")) {
      (Some(min), Some(max)) => {
        format!("ensure this value has between {min} and {max} characters")
      }
      (Some(min), None) => {
        format!("ensure this value has at least {min} characters")
      }
      (None, Some(max)) => {
        format!("ensure this value has at most {max} characters")
      }
      (None, None) => "invalid length".to_owned(),
    },
    "range" => match (param("min"), param("max")) {
      (Some(min), Some(max)) => {
        format!("ensure this value is between {min} and {max}")
      }
      (Some(min), None) => {
        format!("ensure this value is greater than or equal to {min}")
      }
      (None, Some(max)) => {
        format!("ensure this value is less than or equal to {max}")
      }
      (None, None) => "value out of range".to_owned(),
    },
    "email" => "value is not a valid email address".to_owned(),
    code => format!("failed `{code}` check"),
  }
}
