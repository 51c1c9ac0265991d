//! Core types for Strata polymorphic references
//!
//! This crate defines the foundational types used throughout the system:
//! - TypeIdentity: Canonical name of a record type
//! - Designator: The four ways of naming a record type
//! - Record / Value: Host record instances and their field values
//! - QueryResult / RecordQuery: The query primitive the record store provides
//! - ValidationErrors: Per-field validation messages
//! - Error: Error type hierarchy
//! - inflect: Naming conventions (classify, underscore, sanitize)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod designator;
pub mod error;
pub mod inflect;
pub mod query;
pub mod record;
pub mod types;
pub mod validation;
pub mod value;

pub use designator::{sym, Designator, Symbol};
pub use error::{PolyrefError, Result};
pub use query::{QueryResult, RecordQuery};
pub use record::{id_field, type_field, Record};
pub use types::{RecordId, TypeIdentity, TypeNameError, MAX_TYPE_NAME_LENGTH};
pub use validation::ValidationErrors;
pub use value::Value;
