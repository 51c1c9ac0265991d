//! Host model definitions
//!
//! A `ModelDefinition` is the method and validation surface of one host
//! record type: the field rules run on every validation pass, and the
//! operation tables that generated accessors are registered into.
//!
//! Definitions are copy-on-write. The schema clones the current definition,
//! adds a declaration's rule and accessors to the clone, and publishes the
//! clone only if every step succeeded. Readers holding an `Arc` to the old
//! definition are unaffected.

use crate::accessors::{DerivedAccessors, ScopedQuery, TypePredicate, TypedLookup};
use crate::rule::{FieldValidator, PresenceRule, ValidationContext};
use std::collections::BTreeMap;
use std::sync::Arc;
use strata_polyref_core::{
    Designator, PolyrefError, QueryResult, Record, RecordQuery, Result, TypeIdentity,
    ValidationErrors,
};

/// Validation rules and operation tables of one host type
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    name: TypeIdentity,
    validators: Vec<Arc<dyn FieldValidator>>,
    references: BTreeMap<String, ReferenceEntry>,
    finders: BTreeMap<String, TypedLookup>,
    scopes: BTreeMap<String, ScopedQuery>,
    predicates: BTreeMap<String, TypePredicate>,
    type_readers: BTreeMap<String, Vec<TypeIdentity>>,
    installed: BTreeMap<String, Installed>,
}

/// A declared reference and the presence rule it brought along
#[derive(Debug, Clone)]
struct ReferenceEntry {
    optional: bool,
    presence: Option<Arc<dyn FieldValidator>>,
}

/// What one polymorphic declaration added to the definition
#[derive(Debug, Clone)]
struct Installed {
    rule: Arc<dyn FieldValidator>,
    accessors: Vec<String>,
}

impl ModelDefinition {
    /// Empty definition for `name`
    pub fn new(name: TypeIdentity) -> Self {
        Self {
            name,
            validators: Vec::new(),
            references: BTreeMap::new(),
            finders: BTreeMap::new(),
            scopes: BTreeMap::new(),
            predicates: BTreeMap::new(),
            type_readers: BTreeMap::new(),
            installed: BTreeMap::new(),
        }
    }

    /// Host type name
    pub fn name(&self) -> &TypeIdentity {
        &self.name
    }

    /// Attach a field rule
    pub fn add_validator(&mut self, validator: Arc<dyn FieldValidator>) {
        self.validators.push(validator);
    }

    /// Attached field rules, in attachment order
    pub fn validators(&self) -> &[Arc<dyn FieldValidator>] {
        &self.validators
    }

    /// Run every rule against `record`
    pub fn validate(&self, record: &Record, ctx: &ValidationContext<'_>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for validator in &self.validators {
            validator.validate(record, ctx, &mut errors);
        }
        errors
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Declare a plain reference: the host framework's own primitive
    ///
    /// A required reference gets a `PresenceRule` on `reference`. Declaring
    /// the same reference again swaps the old presence rule for the new
    /// optionality.
    pub(crate) fn declare_reference(&mut self, reference: &str, optional: bool) {
        if let Some(previous) = self.references.remove(reference) {
            if let Some(rule) = previous.presence {
                self.remove_validator(&rule);
            }
        }

        let presence = if optional {
            None
        } else {
            let rule: Arc<dyn FieldValidator> = Arc::new(PresenceRule::new(reference));
            self.validators.push(Arc::clone(&rule));
            Some(rule)
        };

        self.references
            .insert(reference.to_string(), ReferenceEntry { optional, presence });
    }

    fn remove_validator(&mut self, rule: &Arc<dyn FieldValidator>) {
        let target = Arc::as_ptr(rule) as *const ();
        self.validators
            .retain(|v| Arc::as_ptr(v) as *const () != target);
    }

    /// True if a reference with this name exists (plain or polymorphic)
    pub fn has_reference(&self, reference: &str) -> bool {
        self.references.contains_key(reference)
    }

    /// Optionality of a declared reference
    pub fn is_optional(&self, reference: &str) -> Option<bool> {
        self.references.get(reference).map(|entry| entry.optional)
    }

    /// Names of all declared references
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }

    // =========================================================================
    // Operation table
    // =========================================================================

    /// True if an operation of any kind is registered under `name`
    pub fn has_operation(&self, name: &str) -> bool {
        self.finders.contains_key(name)
            || self.scopes.contains_key(name)
            || self.predicates.contains_key(name)
            || self.type_readers.contains_key(name)
    }

    /// Names of every registered operation, sorted
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .finders
            .keys()
            .chain(self.scopes.keys())
            .chain(self.predicates.keys())
            .chain(self.type_readers.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Register an inclusion rule and a full accessor family
    ///
    /// # Errors
    ///
    /// Returns `AccessorNameCollision` if any generated name is already
    /// registered. The definition is left untouched in that case.
    pub(crate) fn install(
        &mut self,
        rule: Arc<dyn FieldValidator>,
        accessors: DerivedAccessors,
        allowed_types: Vec<TypeIdentity>,
    ) -> Result<()> {
        if let Some(taken) = accessors.names().into_iter().find(|n| self.has_operation(n)) {
            let type_name = accessors
                .scopes()
                .iter()
                .find(|s| s.name() == taken)
                .map(|s| s.target().clone())
                .or_else(|| {
                    accessors
                        .predicates()
                        .iter()
                        .find(|p| p.name() == taken)
                        .map(|p| p.target().clone())
                })
                .unwrap_or_else(|| self.name.clone());
            return Err(PolyrefError::AccessorNameCollision {
                host: self.name.clone(),
                accessor: taken.to_string(),
                type_name,
            });
        }

        self.installed.insert(
            accessors.reference().to_string(),
            Installed {
                rule: Arc::clone(&rule),
                accessors: accessors.names().iter().map(|n| n.to_string()).collect(),
            },
        );
        self.validators.push(rule);
        self.type_readers
            .insert(accessors.types_reader().to_string(), allowed_types);
        self.finders
            .insert(accessors.lookup().name().to_string(), accessors.lookup().clone());
        for scope in accessors.scopes() {
            self.scopes.insert(scope.name().to_string(), scope.clone());
        }
        for predicate in accessors.predicates() {
            self.predicates
                .insert(predicate.name().to_string(), predicate.clone());
        }
        Ok(())
    }

    /// Remove the inclusion rule and accessors previously installed for
    /// `reference`; plain reference rules stay
    pub(crate) fn uninstall(&mut self, reference: &str) {
        let Some(installed) = self.installed.remove(reference) else {
            return;
        };
        self.remove_validator(&installed.rule);
        for name in &installed.accessors {
            self.finders.remove(name);
            self.scopes.remove(name);
            self.predicates.remove(name);
            self.type_readers.remove(name);
        }
    }

    /// True if a polymorphic guard is installed for `reference`
    pub fn is_guarded(&self, reference: &str) -> bool {
        self.installed.contains_key(reference)
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Typed lookup `with_R`
    pub fn finder(&self, name: &str) -> Result<&TypedLookup> {
        self.finders
            .get(name)
            .ok_or_else(|| PolyrefError::unknown_operation(&self.name, name))
    }

    /// Scoped query `with_R_t`
    pub fn scope(&self, name: &str) -> Result<&ScopedQuery> {
        self.scopes
            .get(name)
            .ok_or_else(|| PolyrefError::unknown_operation(&self.name, name))
    }

    /// Predicate `is_R_t`
    pub fn predicate(&self, name: &str) -> Result<&TypePredicate> {
        self.predicates
            .get(name)
            .ok_or_else(|| PolyrefError::unknown_operation(&self.name, name))
    }

    /// Call typed lookup `name` with `designator`
    pub fn find_with(
        &self,
        name: &str,
        store: &dyn RecordQuery,
        designator: impl Into<Designator>,
    ) -> Result<QueryResult> {
        self.finder(name)?.call(store, designator)
    }

    /// Call scoped query `name`
    pub fn query_scope(&self, name: &str, store: &dyn RecordQuery) -> Result<QueryResult> {
        self.scope(name)?.call(store)
    }

    /// Call predicate `name` on `record`
    pub fn check(&self, name: &str, record: &Record) -> Result<bool> {
        Ok(self.predicate(name)?.call(record))
    }

    /// Call reader `R_types`
    pub fn types_reader(&self, name: &str) -> Result<&[TypeIdentity]> {
        self.type_readers
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| PolyrefError::unknown_operation(&self.name, name))
    }
}
