//! Allow-list registry
//!
//! Holds, per `(host type, reference name)`, the canonical list of record
//! types a polymorphic reference may point at and whether it is optional.
//!
//! ## Lifecycle
//!
//! A declaration goes from undeclared to declared once. Under the `replace`
//! policy a later declaration may swap it, or withdraw it when the reference
//! is re-declared without an allow-list. `declare` only computes a
//! declaration; `publish` makes it visible.
//! The schema keeps those two steps apart so a declaration that fails later
//! (for example on an accessor collision) leaves nothing behind.
//!
//! Reads go straight to the map and never wait on the schema's declare lock.

use crate::catalog::TypeCatalog;
use dashmap::DashMap;
use std::sync::Arc;
use strata_polyref_core::{Designator, PolyrefError, Result, TypeIdentity};

/// A declared polymorphic reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDeclaration {
    host: TypeIdentity,
    name: String,
    allowed_types: Vec<TypeIdentity>,
    optional: bool,
}

impl ReferenceDeclaration {
    /// Host record type the reference is declared on
    pub fn host(&self) -> &TypeIdentity {
        &self.host
    }

    /// Reference name (`owner` for the `owner_type` / `owner_id` pair)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allowed target types, in declaration order, without duplicates
    pub fn allowed_types(&self) -> &[TypeIdentity] {
        &self.allowed_types
    }

    /// True if the reference may be left empty
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True if `type_name` is one of the allowed target types
    pub fn allows(&self, type_name: &str) -> bool {
        self.allowed_types.iter().any(|t| t.as_str() == type_name)
    }
}

type DeclarationKey = (TypeIdentity, String);

/// Process-wide store of reference declarations
#[derive(Debug, Default)]
pub struct AllowListRegistry {
    declarations: DashMap<DeclarationKey, Arc<ReferenceDeclaration>>,
}

impl AllowListRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a declaration from raw designators
    ///
    /// Every designator is resolved through `catalog`; duplicates are dropped
    /// keeping the first occurrence. Nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvableType` for the first designator that names no
    /// known type.
    pub fn declare(
        &self,
        catalog: &TypeCatalog,
        host: &TypeIdentity,
        name: &str,
        designators: &[Designator],
        optional: bool,
    ) -> Result<ReferenceDeclaration> {
        let allowed_types = catalog.resolve_all(designators)?;
        Ok(ReferenceDeclaration {
            host: host.clone(),
            name: name.to_string(),
            allowed_types,
            optional,
        })
    }

    /// Make a declaration visible, returning the one it replaced (if any)
    pub(crate) fn publish(
        &self,
        declaration: ReferenceDeclaration,
    ) -> Option<Arc<ReferenceDeclaration>> {
        let key = (declaration.host.clone(), declaration.name.clone());
        self.declarations.insert(key, Arc::new(declaration))
    }

    /// Drop the declaration for `(host, name)`
    pub(crate) fn withdraw(&self, host: &TypeIdentity, name: &str) -> Option<Arc<ReferenceDeclaration>> {
        self.declarations
            .remove(&(host.clone(), name.to_string()))
            .map(|(_, declaration)| declaration)
    }

    /// Look up a declaration
    ///
    /// # Errors
    ///
    /// Returns `UnknownReference` if `(host, name)` was never declared.
    pub fn lookup(&self, host: &TypeIdentity, name: &str) -> Result<Arc<ReferenceDeclaration>> {
        self.declarations
            .get(&(host.clone(), name.to_string()))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PolyrefError::unknown_reference(host, name))
    }

    /// True if `(host, name)` has been declared
    pub fn is_declared(&self, host: &TypeIdentity, name: &str) -> bool {
        self.declarations
            .contains_key(&(host.clone(), name.to_string()))
    }

    /// All declarations on `host`, ordered by reference name
    pub fn declarations_for(&self, host: &TypeIdentity) -> Vec<Arc<ReferenceDeclaration>> {
        let mut found: Vec<_> = self
            .declarations
            .iter()
            .filter(|entry| &entry.key().0 == host)
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Number of declarations across all hosts
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True if nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
