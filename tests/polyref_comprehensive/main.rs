//! Polymorphic Reference Comprehensive Test Suite
//!
//! Exercises the full declaration path through the public `Schema` API and
//! the in-memory store.
//!
//! ## Test Modules
//!
//! - **resolution**: designator forms resolve to one type identity
//! - **declaration**: allow-lists, atomicity, re-declaration policies
//! - **validation**: inclusion and presence rules, message rendering
//! - **accessors**: typed lookups, scopes, predicates, type readers
//! - **library_scenario**: the Book / OtherThing walkthrough end to end
//! - **properties**: proptest checks over generated allow-lists and records
//! - **configuration**: `polyref.toml` loading
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test polyref_comprehensive
//! ```

#[path = "../common/mod.rs"]
mod common;

mod accessors;
mod configuration;
mod declaration;
