//! The fixed set of person identifiers the API treats as existing.

use std::collections::BTreeSet;

use crate::{Error, Result};

/// Identifiers seeded when no other set is configured.
pub const DEFAULT_PERSON_IDS: [i64; 5] = [1, 2, 3, 4, 5];

/// Read-only set of known person identifiers.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPersons {
  ids: BTreeSet<i64>,
}

impl KnownPersons {
  pub fn contains(&self, id: i64) -> bool { self.ids.contains(&id) }

  /// `Ok(())` if `id` is known, [`Error::PersonNotFound`] otherwise.
  pub fn ensure_known(&self, id: i64) -> Result<()> {
    if self.contains(id) {
      Ok(())
    } else {
      Err(Error::PersonNotFound(id))
    }
  }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}

impl Default for KnownPersons {
  fn default() -> Self { DEFAULT_PERSON_IDS.into_iter().collect() }
}

impl FromIterator<i64> for KnownPersons {
  fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
    KnownPersons { ids: iter.into_iter().collect() }
  }
}
