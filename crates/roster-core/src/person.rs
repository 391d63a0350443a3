//! Person schemas and the logic behind the `/person` endpoints.
//!
//! [`Person`] is the input record and carries a password; [`PersonOut`] is
//! the projection handed back to callers and only ever holds the
//! [`PersonBase`] fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{Error, KnownPersons, Result, Source, Violation};

pub const PASSWORD_MIN_CHARS: usize = 8;

// ─── Schemas ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
  White,
  Brown,
  Black,
  Blonde,
  Red,
}

/// Fields shared by every person view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonBase {
  #[validate(length(min = 1, max = 50))]
  pub first_name: String,
  #[validate(length(min = 1, max = 50))]
  pub last_name:  String,
  #[validate(range(min = 18, max = 115))]
  pub age:        i64,
  #[serde(default)]
  pub hair_color: Option<HairColor>,
  #[serde(default)]
  pub is_married: Option<bool>,
}

/// A person as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  #[serde(flatten)]
  pub profile:  PersonBase,
  pub password: String,
}

// The profile rules are reported at the top level rather than under a
// `profile` key, matching the flat wire shape.
impl Validate for Person {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = match self.profile.validate() {
      Ok(()) => ValidationErrors::new(),
      Err(errors) => errors,
    };
    if self.password.chars().count() < PASSWORD_MIN_CHARS {
      let mut error = ValidationError::new("length");
      error.add_param("min".into(), &PASSWORD_MIN_CHARS);
      errors.add("password", error);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }
}

/// Output view of a person. Serialises as the bare [`PersonBase`] fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonOut(PersonBase);

impl PersonOut {
  pub fn profile(&self) -> &PersonBase { &self.0 }
}

impl From<Person> for PersonOut {
  fn from(person: Person) -> Self { PersonOut(person.profile) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Location {
  #[validate(length(max = 20))]
  pub city:    String,
  #[validate(length(max = 20))]
  pub state:   String,
  #[validate(length(max = 20))]
  pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
  #[validate(email)]
  pub personalemail: String,
  #[validate(length(min = 10))]
  pub cellphone:     String,
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Project a validated person onto its public view, dropping the password.
pub fn create_person(person: Person) -> PersonOut { PersonOut::from(person) }

// ─── Update ──────────────────────────────────────────────────────────────────

/// Path parameters of `PUT /person/{person_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonIdPath {
  #[validate(range(min = 1))]
  pub person_id: i64,
}

/// JSON body of `PUT /person/{person_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonUpdate {
  #[validate(nested)]
  pub person:   Person,
  #[validate(nested)]
  pub location: Location,
  #[validate(nested)]
  #[serde(alias = "personalcontact")]
  pub contact:  ContactInfo,
}

impl PersonUpdate {
  /// Flatten person, location and contact (in that order) into one mapping.
  /// A key present in more than one part takes the value of the last part.
  pub fn merge(&self) -> Result<Map<String, Value>> {
    let parts = [
      serde_json::to_value(&self.person)?,
      serde_json::to_value(&self.location)?,
      serde_json::to_value(&self.contact)?,
    ];
    let mut merged = Map::new();
    for part in parts {
      if let Value::Object(fields) = part {
        merged.extend(fields);
      }
    }
    Ok(merged)
  }
}

// ─── Show by query ───────────────────────────────────────────────────────────

/// Query parameters of `GET /person/detail`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonQuery {
  #[validate(length(min = 1, max = 50))]
  pub name: Option<String>,
  pub age:  i64,
}

impl PersonQuery {
  /// `{name: age}`; a missing name is keyed by the literal `"null"`.
  pub fn echo(&self) -> Map<String, Value> {
    let key = self.name.clone().unwrap_or_else(|| "null".to_owned());
    let mut out = Map::new();
    out.insert(key, Value::from(self.age));
    out
  }
}

// ─── Show by path ────────────────────────────────────────────────────────────

/// The `{person_id}&{age}` segment of `GET /person/detail/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PersonDetail {
  #[validate(range(min = 1))]
  pub person_id: i64,
  #[validate(range(min = 18))]
  pub age:       i64,
}

impl PersonDetail {
  /// Split and parse the raw path segment, then run the field rules.
  pub fn parse(segment: &str) -> Result<Self> {
    let (id, age) = segment.split_once('&').ok_or_else(|| {
      Error::Invalid(vec![Violation::decode(
        Source::Path,
        "expected `{person_id}&{age}`",
      )])
    })?;

    let mut found = Vec::new();
    let person_id = parse_int(id, "person_id", &mut found);
    let age = parse_int(age, "age", &mut found);
    match (person_id, age) {
      (Some(person_id), Some(age)) => {
        crate::validate(PersonDetail { person_id, age }, Source::Path)
      }
      _ => Err(Error::Invalid(found)),
    }
  }

  /// Existence check against `known`. Both numbers become keys of the
  /// returned mapping, so equal values collapse to the second entry.
  pub fn describe(&self, known: &KnownPersons) -> Result<Map<String, Value>> {
    known.ensure_known(self.person_id)?;
    let mut out = Map::new();
    out.insert(self.person_id.to_string(), Value::from("It exists"));
    out.insert(self.age.to_string(), Value::from("years old"));
    Ok(out)
  }
}

fn parse_int(raw: &str, field: &str, found: &mut Vec<Violation>) -> Option<i64> {
  match raw.trim().parse() {
    Ok(n) => Some(n),
    Err(_) => {
      found.push(Violation {
        loc:  vec![Source::Path.as_str().to_owned(), field.to_owned()],
        msg:  format!("value is not a valid integer: {raw:?}"),
        kind: "int_parsing".to_owned(),
      });
      None
    }
  }
}
