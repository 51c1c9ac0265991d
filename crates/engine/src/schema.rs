//! Schema: the entry point host models declare references through
//!
//! ## Declaring
//!
//! ```ignore
//! let schema = Schema::new();
//! schema.define_model(user.clone())?;
//! schema.define_model(publisher.clone())?;
//! schema.define_model(book.clone())?;
//!
//! schema.declare_polymorphic_reference(
//!     &book,
//!     "owner",
//!     &[Designator::from(&publisher), Designator::from(&user)],
//!     false,
//! )?;
//! ```
//!
//! A polymorphic declaration first goes through the plain reference
//! primitive (`declare_reference`), then layers the guard on top: allow-list,
//! inclusion rule, and the generated accessors. An empty designator list
//! stops after the plain step.
//!
//! ## Concurrency
//!
//! Declarations are expected during bootstrap. The declare path is
//! serialized by a mutex; everything it builds is published as a fresh
//! `Arc` snapshot, so validation and accessor calls never take that lock and
//! never see a half-finished declaration.
//!
//! The registry entry is published before the host's model snapshot. A
//! reader that finds a guarded reference on a model can therefore always
//! read its allow-list through `types_of`.

use crate::accessors::AccessorGenerator;
use crate::catalog::TypeCatalog;
use crate::config::{PolyrefConfig, RedeclarationPolicy};
use crate::messages::{MessageCatalog, Messages};
use crate::model::ModelDefinition;
use crate::registry::AllowListRegistry;
use crate::rule::{FieldPresenceRule, InclusionRule, ValidationContext};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use strata_polyref_core::{
    Designator, PolyrefError, Record, Result, TypeIdentity, ValidationErrors,
};
use tracing::{info, warn};

/// Process-wide schema
static GLOBAL_SCHEMA: Lazy<Schema> = Lazy::new(Schema::new);

/// The process-wide schema, created with default configuration on first use
pub fn global() -> &'static Schema {
    &GLOBAL_SCHEMA
}

/// Models, their references and the allow-list registry
pub struct Schema {
    config: PolyrefConfig,
    catalog: Arc<TypeCatalog>,
    registry: AllowListRegistry,
    models: DashMap<TypeIdentity, Arc<ModelDefinition>>,
    messages: Option<Arc<dyn MessageCatalog>>,
    declare_lock: Mutex<()>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("config", &self.config)
            .field("types", &self.catalog.len())
            .field("models", &self.models.len())
            .field("declarations", &self.registry.len())
            .field("messages", &self.messages.is_some())
            .finish()
    }
}

impl Schema {
    /// Schema with default configuration and the bundled messages
    pub fn new() -> Self {
        Self::with_config(PolyrefConfig::default())
    }

    /// Schema with `config`; message overrides from the config are applied
    /// on top of the bundled messages
    pub fn with_config(config: PolyrefConfig) -> Self {
        let messages = Messages::english().with_overrides(config.messages.clone());
        Self {
            config,
            catalog: Arc::new(TypeCatalog::new()),
            registry: AllowListRegistry::new(),
            models: DashMap::new(),
            messages: Some(Arc::new(messages)),
            declare_lock: Mutex::new(()),
        }
    }

    /// Schema configured from a `polyref.toml` file
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::with_config(PolyrefConfig::from_file(path)?))
    }

    /// Replace the message catalog; `None` falls back to built-in text
    pub fn with_messages(mut self, messages: Option<Arc<dyn MessageCatalog>>) -> Self {
        self.messages = messages;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &PolyrefConfig {
        &self.config
    }

    /// Known record types
    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    /// Allow-list registry
    pub fn registry(&self) -> &AllowListRegistry {
        &self.registry
    }

    // =========================================================================
    // Models
    // =========================================================================

    /// Define a host model; defining the same model twice is a no-op
    pub fn define_model(&self, name: TypeIdentity) -> Result<()> {
        let _guard = self.declare_lock.lock();
        self.catalog.register(name.clone());
        self.models
            .entry(name.clone())
            .or_insert_with(|| Arc::new(ModelDefinition::new(name)));
        Ok(())
    }

    /// Current definition of `host`
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if `host` was never defined.
    pub fn model(&self, host: &TypeIdentity) -> Result<Arc<ModelDefinition>> {
        self.models
            .get(host)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PolyrefError::UnknownModel(host.clone()))
    }

    /// Require `field` to be set on every `host` record
    pub fn validates_presence_of(&self, host: &TypeIdentity, field: &str) -> Result<()> {
        self.update_model(host, |model| {
            model.add_validator(Arc::new(FieldPresenceRule::new(field)));
            Ok(())
        })
    }

    // =========================================================================
    // References
    // =========================================================================

    /// Declare a plain, single-target reference
    ///
    /// Required references must point somewhere (`"must exist"` on `name`).
    /// No allow-list is involved.
    pub fn declare_reference(&self, host: &TypeIdentity, name: &str, optional: bool) -> Result<()> {
        self.update_model(host, |model| {
            model.declare_reference(name, optional);
            Ok(())
        })?;
        info!(host = %host, reference = name, optional, "Declared reference");
        Ok(())
    }

    /// Declare a reference that may point at any of `designators`
    ///
    /// Resolves the designators, registers the allow-list, attaches the
    /// inclusion rule and the generated accessors to `host`. All of it is
    /// published together or not at all.
    ///
    /// With an empty designator list this is a plain reference.
    ///
    /// # Errors
    ///
    /// - `UnknownModel` if `host` was never defined
    /// - `UnresolvableType` if a designator names no known type
    /// - `AccessorNameCollision` if a generated accessor name is taken
    /// - `DuplicateDeclaration` if `(host, name)` is already declared and the
    ///   policy is `Reject`
    pub fn declare_polymorphic_reference(
        &self,
        host: &TypeIdentity,
        name: &str,
        designators: &[Designator],
        optional: bool,
    ) -> Result<()> {
        let _guard = self.declare_lock.lock();

        let current = self.model(host)?;
        let redeclaring = self.registry.is_declared(host, name);
        if redeclaring && self.config.redeclaration == RedeclarationPolicy::Reject {
            return Err(PolyrefError::DuplicateDeclaration {
                host: host.clone(),
                name: name.to_string(),
            });
        }

        let mut next = (*current).clone();
        next.declare_reference(name, optional);

        if designators.is_empty() {
            if redeclaring {
                next.uninstall(name);
            }
            if self.registry.withdraw(host, name).is_some() {
                warn!(host = %host, reference = name, "Withdrew polymorphic reference declaration");
            }
            self.models.insert(host.clone(), Arc::new(next));
            info!(host = %host, reference = name, optional, "Declared reference");
            return Ok(());
        }

        let declaration =
            self.registry
                .declare(&self.catalog, host, name, designators, optional)?;
        let rule = InclusionRule::build(&declaration);
        let accessors = AccessorGenerator::new(Arc::clone(&self.catalog)).generate(&declaration)?;

        if redeclaring {
            next.uninstall(name);
        }
        next.install(
            Arc::new(rule),
            accessors,
            declaration.allowed_types().to_vec(),
        )?;

        let allowed: Vec<String> = declaration
            .allowed_types()
            .iter()
            .map(ToString::to_string)
            .collect();
        if self.registry.publish(declaration).is_some() {
            warn!(host = %host, reference = name, "Replaced polymorphic reference declaration");
        }
        self.models.insert(host.clone(), Arc::new(next));

        info!(
            host = %host,
            reference = name,
            optional,
            allowed = ?allowed,
            "Declared polymorphic reference"
        );
        Ok(())
    }

    /// Allow-list of a polymorphic reference, in declaration order
    ///
    /// # Errors
    ///
    /// Returns `UnknownReference` if `(host, name)` was never declared.
    pub fn types_of(&self, host: &TypeIdentity, name: &str) -> Result<Vec<TypeIdentity>> {
        Ok(self.registry.lookup(host, name)?.allowed_types().to_vec())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Run every rule of the record's model against it
    ///
    /// An empty result means the record is valid.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if the record's type has no model.
    pub fn validate(&self, record: &Record) -> Result<ValidationErrors> {
        let model = self.model(record.record_type())?;
        let ctx = ValidationContext {
            messages: self.messages.as_deref(),
        };
        Ok(model.validate(record, &ctx))
    }

    /// True if `record` passes validation
    pub fn is_valid(&self, record: &Record) -> Result<bool> {
        Ok(self.validate(record)?.is_empty())
    }

    fn update_model<F>(&self, host: &TypeIdentity, change: F) -> Result<()>
    where
        F: FnOnce(&mut ModelDefinition) -> Result<()>,
    {
        let _guard = self.declare_lock.lock();
        let mut next = (*self.model(host)?).clone();
        change(&mut next)?;
        self.models.insert(host.clone(), Arc::new(next));
        Ok(())
    }
}
