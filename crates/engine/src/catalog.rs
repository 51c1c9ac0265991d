//! Type catalog and designator resolution
//!
//! The catalog is the set of record types the process knows about. A type
//! becomes known when its model is defined (`Schema::define_model`) or when
//! it is registered directly.
//!
//! ## Resolution
//!
//! | Designator | Rule |
//! |------------|------|
//! | `Type(t)` | catalog lookup of `t` |
//! | `Name(s)` | `classify(s)`, then catalog lookup |
//! | `Symbol(s)` | string form, then as `Name` |
//! | `Instance(t)` | runtime type `t`, then as `Type` |
//!
//! A `TypeIdentity` only proves the name is well formed, so type objects and
//! instances are checked against the catalog like everything else. Anything
//! unknown is an `UnresolvableType` error. Resolution never falls
//! back to a guess and never drops an entry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use strata_polyref_core::inflect::classify;
use strata_polyref_core::{Designator, PolyrefError, Result, TypeIdentity};
use tracing::debug;

/// Known record types, keyed by canonical name
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: DashMap<String, TypeIdentity>,
}

impl TypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a type known; returns false if it already was
    pub fn register(&self, identity: TypeIdentity) -> bool {
        match self.types.entry(identity.as_str().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                debug!(type_name = %identity, "Registered record type");
                slot.insert(identity);
                true
            }
        }
    }

    /// Look up a type by its exact canonical name
    pub fn get(&self, name: &str) -> Option<TypeIdentity> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// True if `name` is a known canonical type name
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of known types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no type has been registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Normalize a designator into its canonical type identity
    ///
    /// # Errors
    ///
    /// Returns `UnresolvableType` if the designator does not name a known
    /// type.
    pub fn resolve(&self, designator: &Designator) -> Result<TypeIdentity> {
        let resolved = match designator {
            Designator::Type(identity) | Designator::Instance(identity) => self
                .get(identity.as_str())
                .ok_or_else(|| PolyrefError::unresolvable(designator))?,
            Designator::Name(token) => self.resolve_token(token, designator)?,
            Designator::Symbol(symbol) => self.resolve_token(symbol.as_str(), designator)?,
        };
        debug!(
            form = designator.form(),
            designator = %designator,
            resolved = %resolved,
            "Resolved type designator"
        );
        Ok(resolved)
    }

    /// Resolve every designator, keeping the first occurrence of each type
    ///
    /// Fails on the first unresolvable entry; nothing is partially returned.
    pub fn resolve_all(&self, designators: &[Designator]) -> Result<Vec<TypeIdentity>> {
        let mut resolved: Vec<TypeIdentity> = Vec::with_capacity(designators.len());
        for designator in designators {
            let identity = self.resolve(designator)?;
            if !resolved.contains(&identity) {
                resolved.push(identity);
            }
        }
        Ok(resolved)
    }

    fn resolve_token(&self, token: &str, designator: &Designator) -> Result<TypeIdentity> {
        let class_name = classify(token);
        self.get(&class_name)
            .ok_or_else(|| PolyrefError::unresolvable(designator))
    }
}
