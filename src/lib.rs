//! strata-polyref - guarded polymorphic references for Strata record models
//!
//! A polymorphic reference is a `(R_type, R_id)` field pair that may point at
//! any one of several record types. Declaring one through the [`Schema`]
//! restricts the stored type tag to an allow-list and generates typed
//! accessors for each allowed type.
//!
//! # Quick Start
//!
//! ```ignore
//! use strata_polyref::{MemoryStore, Record, Schema, TypeIdentity};
//!
//! let schema = Schema::new();
//! for name in ["User", "Publisher", "Book"] {
//!     schema.define_model(TypeIdentity::new(name)?)?;
//! }
//! let book = TypeIdentity::new("Book")?;
//! schema.declare_polymorphic_reference(&book, "owner", &["user".into(), "publisher".into()], false)?;
//!
//! let store = MemoryStore::new();
//! let user = store.create(&schema, Record::new(TypeIdentity::new("User")?))?;
//! store.create(&schema, Record::new(book.clone()).with_reference("owner", Some(&user)))?;
//!
//! let owned_by_users = schema.model(&book)?.query_scope("with_owner_user", &store)?;
//! ```

pub use strata_polyref_core::*;
pub use strata_polyref_engine::*;
