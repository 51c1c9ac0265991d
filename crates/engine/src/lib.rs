//! Polymorphic reference guard for strata-polyref
//!
//! This crate sits between host models and the record store:
//! - Type catalog: resolves designators (types, names, symbols, instances)
//! - Allow-list registry: which types each polymorphic reference may target
//! - Validation rules: inclusion, reference presence, field presence
//! - Accessors: typed lookups, per-type scopes and predicates
//! - Schema: declares all of the above atomically per reference
//!
//! The core crate holds the data model; nothing here knows how records are
//! actually persisted beyond the `RecordQuery` seam.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessors;
pub mod catalog;
pub mod config;
pub mod messages;
pub mod model;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod store;

pub use accessors::{
    lookup_name, predicate_name, scope_name, types_reader_name, AccessorGenerator,
    DerivedAccessors, ScopedQuery, TypePredicate, TypedLookup,
};
pub use catalog::TypeCatalog;
pub use config::{PolyrefConfig, RedeclarationPolicy, CONFIG_FILE_NAME};
pub use messages::{MessageCatalog, Messages};
pub use model::ModelDefinition;
pub use registry::{AllowListRegistry, ReferenceDeclaration};
pub use rule::{FieldPresenceRule, FieldValidator, InclusionRule, PresenceRule, ValidationContext};
pub use schema::{global, Schema};
pub use store::MemoryStore;
