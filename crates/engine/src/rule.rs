//! Field validation rules
//!
//! A host model carries a list of `FieldValidator`s that run on every
//! validation pass of its records. Two kinds matter for references:
//!
//! - `PresenceRule`: attached by the plain reference primitive when a
//!   reference is required. Fails with "must exist" on field `R`.
//! - `InclusionRule`: attached by the polymorphic guard. Fails on field
//!   `R_type` when the stored tag is not in the allow-list.
//!
//! A missing tag on a required reference trips both rules; on an optional
//! reference it trips neither.

use crate::messages::{render_or_fallback, MessageCatalog, BLANK, CLASS_NOT_ALLOWED, REQUIRED};
use crate::registry::ReferenceDeclaration;
use std::fmt;
use strata_polyref_core::{id_field, type_field, Record, ValidationErrors, Value};

/// Everything a rule needs besides the record itself
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Message catalog, if one is configured
    pub messages: Option<&'a dyn MessageCatalog>,
}

impl<'a> ValidationContext<'a> {
    /// Context rendering through `messages`
    pub fn new(messages: &'a dyn MessageCatalog) -> Self {
        Self {
            messages: Some(messages),
        }
    }

    /// Context without a message catalog; built-in text is used
    pub fn without_messages() -> Self {
        Self { messages: None }
    }

    fn render(&self, key: &str, params: &[(&str, &str)]) -> String {
        render_or_fallback(self.messages, key, params)
    }
}

impl fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("messages", &self.messages.is_some())
            .finish()
    }
}

/// A rule attached to one field of a host model
pub trait FieldValidator: Send + Sync + fmt::Debug {
    /// Field the rule reports on
    fn field(&self) -> &str;

    /// Reference this rule belongs to, if any
    fn reference(&self) -> Option<&str> {
        None
    }

    /// Check `record`, adding messages to `errors` on failure
    fn validate(&self, record: &Record, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors);
}

/// Rejects a stored type tag outside a reference's allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionRule {
    reference: String,
    field: String,
    allowed_values: Vec<Option<String>>,
    message_key: &'static str,
}

impl InclusionRule {
    /// Derive the rule for a declaration
    ///
    /// The allowed values are the names of the allowed types, plus `None`
    /// when the reference is optional.
    pub fn build(declaration: &ReferenceDeclaration) -> Self {
        let mut allowed_values: Vec<Option<String>> = declaration
            .allowed_types()
            .iter()
            .map(|t| Some(t.as_str().to_string()))
            .collect();
        if declaration.is_optional() {
            allowed_values.push(None);
        }

        Self {
            reference: declaration.name().to_string(),
            field: type_field(declaration.name()),
            allowed_values,
            message_key: CLASS_NOT_ALLOWED,
        }
    }

    /// Values that pass the rule
    pub fn allowed_values(&self) -> &[Option<String>] {
        &self.allowed_values
    }

    /// Key of the rejection message
    pub fn message_key(&self) -> &'static str {
        self.message_key
    }

    /// True if `value` passes
    pub fn permits(&self, value: Option<&str>) -> bool {
        self.allowed_values
            .iter()
            .any(|allowed| allowed.as_deref() == value)
    }
}

impl FieldValidator for InclusionRule {
    fn field(&self) -> &str {
        &self.field
    }

    fn reference(&self) -> Option<&str> {
        Some(&self.reference)
    }

    fn validate(&self, record: &Record, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        let stored = record.get(&self.field).filter(|v| !v.is_null());
        let passes = match stored {
            None => self.permits(None),
            Some(Value::String(tag)) => self.permits(Some(tag.as_str())),
            // A non-string tag can never match.
            Some(_) => false,
        };

        if !passes {
            let offending = stored.map(Value::to_string).unwrap_or_default();
            let message = ctx.render(self.message_key, &[("class", &offending)]);
            errors.add(self.field.clone(), message);
        }
    }
}

/// Requires a reference to point somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRule {
    reference: String,
}

impl PresenceRule {
    /// Presence rule for reference `reference`
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl FieldValidator for PresenceRule {
    fn field(&self) -> &str {
        &self.reference
    }

    fn reference(&self) -> Option<&str> {
        Some(&self.reference)
    }

    fn validate(&self, record: &Record, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        let present = |field: String| record.get(&field).map_or(false, |v| !v.is_null());
        if !(present(type_field(&self.reference)) && present(id_field(&self.reference))) {
            errors.add(self.reference.clone(), ctx.render(REQUIRED, &[]));
        }
    }
}

/// Requires a plain field to be set and non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPresenceRule {
    field: String,
}

impl FieldPresenceRule {
    /// Presence rule for `field`
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl FieldValidator for FieldPresenceRule {
    fn field(&self) -> &str {
        &self.field
    }

    fn validate(&self, record: &Record, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        let blank = match record.get(&self.field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if blank {
            errors.add(self.field.clone(), ctx.render(BLANK, &[]));
        }
    }
}
