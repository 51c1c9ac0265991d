//! Error types for polymorphic reference declarations
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Declaration-time errors (`UnresolvableType`, `AccessorNameCollision`,
//! `DuplicateDeclaration`) are fatal: the declaration is aborted and nothing
//! is registered. A record failing its allow-list is NOT an error here; see
//! `ValidationErrors`.

use crate::types::{TypeIdentity, TypeNameError};
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias for polyref operations
pub type Result<T> = std::result::Result<T, PolyrefError>;

/// Error types for polymorphic reference handling
#[derive(Debug, Error)]
pub enum PolyrefError {
    /// A designator names no known record type
    #[error("unresolvable type: {designator} does not name a known record type")]
    UnresolvableType {
        /// The designator as given by the caller
        designator: String,
    },

    /// Lookup of a reference that was never declared
    #[error("unknown reference '{name}' on {host}")]
    UnknownReference {
        /// Host record type
        host: TypeIdentity,
        /// Reference name
        name: String,
    },

    /// Two generated accessors would share a name
    #[error("accessor name collision on {host}: '{accessor}' generated for {type_name} is already taken")]
    AccessorNameCollision {
        /// Host record type
        host: TypeIdentity,
        /// The colliding accessor name
        accessor: String,
        /// Allowed type whose accessor collided
        type_name: TypeIdentity,
    },

    /// A polymorphic reference was declared twice under the reject policy
    #[error("polymorphic reference '{name}' is already declared on {host}")]
    DuplicateDeclaration {
        /// Host record type
        host: TypeIdentity,
        /// Reference name
        name: String,
    },

    /// No model definition exists for a host type
    #[error("unknown model: {0}")]
    UnknownModel(TypeIdentity),

    /// A named accessor does not exist on a host type
    #[error("unknown operation '{name}' on {host}")]
    UnknownOperation {
        /// Host record type
        host: TypeIdentity,
        /// Operation name
        name: String,
    },

    /// A string could not be turned into a type identity
    #[error("invalid type name: {0}")]
    InvalidTypeName(#[from] TypeNameError),

    /// A record failed validation on a strict save
    #[error("record invalid: {0}")]
    RecordInvalid(ValidationErrors),

    /// Configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// The record store failed to execute a query
    #[error("query failed: {0}")]
    Query(String),
}

impl PolyrefError {
    /// Create an UnresolvableType error from any displayable designator
    pub fn unresolvable(designator: impl std::fmt::Display) -> Self {
        PolyrefError::UnresolvableType {
            designator: designator.to_string(),
        }
    }

    /// Create an UnknownReference error
    pub fn unknown_reference(host: &TypeIdentity, name: &str) -> Self {
        PolyrefError::UnknownReference {
            host: host.clone(),
            name: name.to_string(),
        }
    }

    /// Create an UnknownOperation error
    pub fn unknown_operation(host: &TypeIdentity, name: &str) -> Self {
        PolyrefError::UnknownOperation {
            host: host.clone(),
            name: name.to_string(),
        }
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        PolyrefError::Config(msg.into())
    }

    /// True for errors raised while declaring a reference
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            PolyrefError::UnresolvableType { .. }
                | PolyrefError::AccessorNameCollision { .. }
                | PolyrefError::DuplicateDeclaration { .. }
                | PolyrefError::InvalidTypeName(_)
        )
    }
}
