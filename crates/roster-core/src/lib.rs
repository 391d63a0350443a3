//! Schemas, validation and handler logic for the Roster person API.
//!
//! This crate has no HTTP dependency. Every input record declares its field
//! rules with `validator` derives; [`violation::validate`] turns a decoded
//! value into either the same value or a flat list of [`Violation`]s. The
//! functions that back each endpoint are plain transformations over the
//! validated records.

pub mod contact;
pub mod error;
pub mod known;
pub mod login;
pub mod person;
pub mod upload;
pub mod violation;

pub use error::{Error, Result};
pub use known::KnownPersons;
pub use violation::{Source, Violation, validate};
