//! Type designators
//!
//! A designator is any of the accepted ways to name a target record type:
//!
//! | Form | Example | Resolution |
//! |------|---------|------------|
//! | Type | `TypeIdentity("User")` | used directly |
//! | Name | `"users"`, `"User"` | classified, then looked up |
//! | Symbol | `Symbol("publisher")` | string form, then as Name |
//! | Instance | `&user_record` | runtime type of the instance, then as Type |
//!
//! Resolution itself lives with the type catalog; this module only carries the
//! four forms and the conversions into them.

use crate::record::Record;
use crate::types::TypeIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic type name
///
/// Kept distinct from `String` so a caller can say "this is an identifier"
/// rather than "this is free text". Both resolve the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    /// String form of the symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Shorthand for `Symbol::new`
pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

/// One way of naming a record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Designator {
    /// A type identity, used as is
    Type(TypeIdentity),
    /// A type-name token such as `"users"` or `"Admin::User"`
    Name(String),
    /// A symbolic type name
    Symbol(Symbol),
    /// The runtime type of a sample instance
    Instance(TypeIdentity),
}

impl Designator {
    /// Designator for the runtime type of `record`
    pub fn instance(record: &Record) -> Self {
        Designator::Instance(record.record_type().clone())
    }

    /// Short description of the form, used in diagnostics
    pub fn form(&self) -> &'static str {
        match self {
            Designator::Type(_) => "type",
            Designator::Name(_) => "name",
            Designator::Symbol(_) => "symbol",
            Designator::Instance(_) => "instance",
        }
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Designator::Type(t) => write!(f, "{}", t),
            Designator::Name(s) => write!(f, "\"{}\"", s),
            Designator::Symbol(s) => write!(f, "{}", s),
            Designator::Instance(t) => write!(f, "#<{}>", t),
        }
    }
}

impl From<TypeIdentity> for Designator {
    fn from(t: TypeIdentity) -> Self {
        Designator::Type(t)
    }
}

impl From<&TypeIdentity> for Designator {
    fn from(t: &TypeIdentity) -> Self {
        Designator::Type(t.clone())
    }
}

impl From<&str> for Designator {
    fn from(s: &str) -> Self {
        Designator::Name(s.to_string())
    }
}

impl From<String> for Designator {
    fn from(s: String) -> Self {
        Designator::Name(s)
    }
}

impl From<Symbol> for Designator {
    fn from(s: Symbol) -> Self {
        Designator::Symbol(s)
    }
}

impl From<&Record> for Designator {
    fn from(record: &Record) -> Self {
        Designator::instance(record)
    }
}
