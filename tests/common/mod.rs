//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;
pub use strata_polyref::{
    sym, Designator, MemoryStore, ModelDefinition, PolyrefConfig, PolyrefError, Record,
    RecordId, RecordQuery, RedeclarationPolicy, Schema, TypeIdentity, Value,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test writer; set `RUST_LOG` to see it.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shorthand for a known-good type name.
pub fn ty(name: &str) -> TypeIdentity {
    TypeIdentity::new(name).expect("valid type name")
}

// ============================================================================
// Library fixture
// ============================================================================

/// Schema with `User`, `Publisher`, `Book` and `OtherThing` defined and no
/// references declared yet.
pub fn library_schema() -> Schema {
    library_schema_with(PolyrefConfig::default())
}

/// Same as [`library_schema`] with a custom configuration.
pub fn library_schema_with(config: PolyrefConfig) -> Schema {
    init_tracing();
    let schema = Schema::with_config(config);
    for name in ["User", "Publisher", "Book", "OtherThing"] {
        schema.define_model(ty(name)).expect("define model");
    }
    schema
}

/// Library schema with both references declared:
/// - `Book.owner` over `[Publisher, User]`, required
/// - `OtherThing.thing` over `["user", :publisher]`, optional
pub fn declared_library() -> Schema {
    let schema = library_schema();
    schema
        .declare_polymorphic_reference(
            &ty("Book"),
            "owner",
            &[ty("Publisher").into(), ty("User").into()],
            false,
        )
        .expect("declare owner");
    schema
        .declare_polymorphic_reference(
            &ty("OtherThing"),
            "thing",
            &["user".into(), sym("publisher").into()],
            true,
        )
        .expect("declare thing");
    schema
}

/// Library with a fresh store.
pub struct Library {
    pub schema: Schema,
    pub store: MemoryStore,
}

impl Library {
    pub fn new() -> Self {
        Library {
            schema: declared_library(),
            store: MemoryStore::new(),
        }
    }

    /// Save a record with no fields set.
    pub fn create(&self, type_name: &str) -> Record {
        self.store
            .create(&self.schema, Record::new(ty(type_name)))
            .expect("create record")
    }

    /// Save a `Book` owned by `owner`.
    pub fn book_owned_by(&self, owner: &Record) -> Record {
        self.store
            .create(
                &self.schema,
                Record::new(ty("Book")).with_reference("owner", Some(owner)),
            )
            .expect("create book")
    }

    /// Current `Book` definition.
    pub fn book_model(&self) -> std::sync::Arc<ModelDefinition> {
        self.schema.model(&ty("Book")).expect("book model")
    }
}
