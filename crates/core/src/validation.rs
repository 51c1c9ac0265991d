//! Validation results
//!
//! Validation failures are ordinary values, not errors: a record that fails
//! a rule gets a message attached to the offending field and the caller
//! decides what to do with it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Messages attached to fields after a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// No errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `message` to `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// True if the record passed every rule
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of messages
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Messages for one field (empty slice if none)
    pub fn on(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields that have at least one message
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `"field message"` for every message, in field order
    pub fn full_messages(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |message| format!("{} {}", field, message))
            })
            .collect()
    }

    /// Fold another set of errors into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}
