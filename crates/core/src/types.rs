//! Type identity and record id types
//!
//! A polymorphic reference stores the *name* of its target type next to the
//! target's id. `TypeIdentity` is the canonical form of that name.
//!
//! ## Examples
//!
//! - "User"
//! - "Admin::User"
//!
//! ## Validation
//!
//! Type names must:
//! - Be 1-256 characters
//! - Consist of `::`-separated segments
//! - Have every segment start with an ASCII uppercase letter
//! - Contain only alphanumeric and underscore inside a segment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a type name
pub const MAX_TYPE_NAME_LENGTH: usize = 256;

/// Separator between namespace segments of a type name
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Canonical, comparable name of a record type
///
/// Two designators that refer to the same record type always resolve to
/// equal `TypeIdentity` values. The stored form is exactly what lands in a
/// reference's `_type` field.
///
/// Valid names:
/// - "User"
/// - "Admin::User"
/// - "Publisher2"
///
/// Invalid names:
/// - "" (empty)
/// - "user" (lowercase start)
/// - "Admin::" (empty segment)
/// - "Admin/User"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeIdentity(String);

/// Error when validating a type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeNameError {
    /// Name is empty
    #[error("type name cannot be empty")]
    Empty,

    /// Name exceeds maximum length
    #[error("type name too long: {length} chars (max {max})")]
    TooLong {
        /// Actual length of the name
        length: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// A `::`-separated segment is malformed
    #[error("invalid segment '{segment}' in type name '{name}'")]
    InvalidSegment {
        /// The full name being validated
        name: String,
        /// The offending segment
        segment: String,
    },
}

impl TypeIdentity {
    /// Create a new TypeIdentity, validating the input
    ///
    /// # Errors
    ///
    /// Returns `TypeNameError` if the name is not a well-formed type name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(TypeIdentity(name))
    }

    /// Validate a type name
    pub fn validate(name: &str) -> Result<(), TypeNameError> {
        if name.is_empty() {
            return Err(TypeNameError::Empty);
        }

        if name.len() > MAX_TYPE_NAME_LENGTH {
            return Err(TypeNameError::TooLong {
                length: name.len(),
                max: MAX_TYPE_NAME_LENGTH,
            });
        }

        for segment in name.split(NAMESPACE_SEPARATOR) {
            if !Self::is_valid_segment(segment) {
                return Err(TypeNameError::InvalidSegment {
                    name: name.to_string(),
                    segment: segment.to_string(),
                });
            }
        }

        Ok(())
    }

    fn is_valid_segment(segment: &str) -> bool {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// Get the name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TypeIdentity {
    type Error = TypeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeIdentity::new(value)
    }
}

impl TryFrom<&str> for TypeIdentity {
    type Error = TypeNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TypeIdentity::new(value)
    }
}

impl From<TypeIdentity> for String {
    fn from(value: TypeIdentity) -> Self {
        value.0
    }
}

impl PartialEq<str> for TypeIdentity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeIdentity {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Identifier assigned to a record by the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id
    pub const fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Raw id value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
