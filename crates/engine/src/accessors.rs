//! Accessor generation
//!
//! For a reference `R` with allowed types `T1..Tn`, a declaration derives:
//!
//! | Accessor | Kind | Behavior |
//! |----------|------|----------|
//! | `with_R` | typed lookup | records whose `R_type` equals the resolved designator |
//! | `with_R_t` | scoped query, one per `T` | records whose `R_type` equals `T` |
//! | `is_R_t` | predicate, one per `T` | true iff the record's `R_type` equals `T` |
//! | `R_types` | reader | the allow-list, in declaration order |
//!
//! `t` is the sanitized type name (`Admin::User` -> `admin_user`). Accessors
//! are plain data built once per declaration; invoking one never touches the
//! registry.

use crate::catalog::TypeCatalog;
use crate::registry::ReferenceDeclaration;
use std::collections::HashSet;
use std::sync::Arc;
use strata_polyref_core::inflect::sanitize;
use strata_polyref_core::{
    type_field, Designator, PolyrefError, QueryResult, Record, RecordQuery, Result, TypeIdentity,
    Value,
};
use tracing::debug;

/// Name of the typed lookup for reference `reference`
pub fn lookup_name(reference: &str) -> String {
    format!("with_{}", reference)
}

/// Name of the scoped query for `target` on reference `reference`
pub fn scope_name(reference: &str, target: &TypeIdentity) -> String {
    format!("with_{}_{}", reference, sanitize(target.as_str()))
}

/// Name of the predicate for `target` on reference `reference`
pub fn predicate_name(reference: &str, target: &TypeIdentity) -> String {
    format!("is_{}_{}", reference, sanitize(target.as_str()))
}

/// Name of the allow-list reader for reference `reference`
pub fn types_reader_name(reference: &str) -> String {
    format!("{}_types", reference)
}

/// `with_R(designator)`: records whose tag equals any resolvable type
#[derive(Debug, Clone)]
pub struct TypedLookup {
    name: String,
    host: TypeIdentity,
    field: String,
    catalog: Arc<TypeCatalog>,
}

impl TypedLookup {
    /// Accessor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the lookup
    ///
    /// The designator may be a type, a name, a symbol or an instance; it is
    /// resolved the same way as at declaration time. It does not have to be
    /// in the allow-list.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvableType` for a designator naming no known type, or
    /// whatever the store reports.
    pub fn call(
        &self,
        store: &dyn RecordQuery,
        designator: impl Into<Designator>,
    ) -> Result<QueryResult> {
        let target = self.catalog.resolve(&designator.into())?;
        store.where_equals(&self.host, &self.field, &Value::String(target.into_inner()))
    }
}

/// `with_R_t()`: records whose tag equals one fixed allowed type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery {
    name: String,
    host: TypeIdentity,
    field: String,
    target: TypeIdentity,
}

impl ScopedQuery {
    /// Accessor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type this scope filters on
    pub fn target(&self) -> &TypeIdentity {
        &self.target
    }

    /// Run the query
    pub fn call(&self, store: &dyn RecordQuery) -> Result<QueryResult> {
        store.where_equals(
            &self.host,
            &self.field,
            &Value::String(self.target.as_str().to_string()),
        )
    }
}

/// `is_R_t(record)`: does the record's tag equal one fixed allowed type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePredicate {
    name: String,
    reference: String,
    target: TypeIdentity,
}

impl TypePredicate {
    /// Accessor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type this predicate tests for
    pub fn target(&self) -> &TypeIdentity {
        &self.target
    }

    /// Evaluate against a record; an absent tag is simply `false`
    pub fn call(&self, record: &Record) -> bool {
        record.reference_type(&self.reference) == Some(self.target.as_str())
    }
}

/// Every accessor derived from one declaration
#[derive(Debug, Clone)]
pub struct DerivedAccessors {
    reference: String,
    lookup: TypedLookup,
    scopes: Vec<ScopedQuery>,
    predicates: Vec<TypePredicate>,
    types_reader: String,
}

impl DerivedAccessors {
    /// Reference the accessors belong to
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The typed lookup
    pub fn lookup(&self) -> &TypedLookup {
        &self.lookup
    }

    /// Scoped queries, in allow-list order
    pub fn scopes(&self) -> &[ScopedQuery] {
        &self.scopes
    }

    /// Predicates, in allow-list order
    pub fn predicates(&self) -> &[TypePredicate] {
        &self.predicates
    }

    /// Name of the allow-list reader
    pub fn types_reader(&self) -> &str {
        &self.types_reader
    }

    /// Every generated name
    pub fn names(&self) -> Vec<&str> {
        let mut names = vec![self.lookup.name(), self.types_reader.as_str()];
        names.extend(self.scopes.iter().map(ScopedQuery::name));
        names.extend(self.predicates.iter().map(TypePredicate::name));
        names
    }
}

/// Derives accessors from declarations
#[derive(Debug, Clone)]
pub struct AccessorGenerator {
    catalog: Arc<TypeCatalog>,
}

impl AccessorGenerator {
    /// Generator resolving lookups through `catalog`
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }

    /// Derive the accessor family for `declaration`
    ///
    /// # Errors
    ///
    /// Returns `AccessorNameCollision` if two allowed types sanitize to the
    /// same accessor name.
    pub fn generate(&self, declaration: &ReferenceDeclaration) -> Result<DerivedAccessors> {
        let reference = declaration.name();
        let host = declaration.host();
        let field = type_field(reference);

        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(lookup_name(reference));
        taken.insert(types_reader_name(reference));

        let mut scopes = Vec::with_capacity(declaration.allowed_types().len());
        let mut predicates = Vec::with_capacity(declaration.allowed_types().len());

        for target in declaration.allowed_types() {
            let scope = scope_name(reference, target);
            let predicate = predicate_name(reference, target);

            for name in [&scope, &predicate] {
                if !taken.insert(name.clone()) {
                    return Err(PolyrefError::AccessorNameCollision {
                        host: host.clone(),
                        accessor: name.clone(),
                        type_name: target.clone(),
                    });
                }
            }

            debug!(host = %host, scope = %scope, predicate = %predicate, "Generated accessors");

            scopes.push(ScopedQuery {
                name: scope,
                host: host.clone(),
                field: field.clone(),
                target: target.clone(),
            });
            predicates.push(TypePredicate {
                name: predicate,
                reference: reference.to_string(),
                target: target.clone(),
            });
        }

        Ok(DerivedAccessors {
            reference: reference.to_string(),
            lookup: TypedLookup {
                name: lookup_name(reference),
                host: host.clone(),
                field,
                catalog: Arc::clone(&self.catalog),
            },
            scopes,
            predicates,
            types_reader: types_reader_name(reference),
        })
    }
}
