//! Validation message catalog
//!
//! The guard never hard-codes user-facing text; it asks a catalog to render
//! a message by key. `Messages` is the bundled catalog, loaded from a TOML
//! locale file whose nested tables flatten into dotted keys:
//!
//! ```toml
//! [polyref.errors.messages]
//! class_not_allowed = "%{class} is not an allowed class"
//! ```
//!
//! renders `polyref.errors.messages.class_not_allowed` with `class = "OtherThing"`
//! as `"OtherThing is not an allowed class"`.

use std::collections::HashMap;
use strata_polyref_core::{PolyrefError, Result};

/// Key of the rejection message for a type outside the allow-list
pub const CLASS_NOT_ALLOWED: &str = "polyref.errors.messages.class_not_allowed";

/// Key of the message for a missing required reference
pub const REQUIRED: &str = "polyref.errors.messages.required";

/// Key of the message for a blank plain field
pub const BLANK: &str = "polyref.errors.messages.blank";

/// Bundled English locale
const EN_LOCALE: &str = include_str!("../locales/en.toml");

/// Renders human-readable text for a message key
pub trait MessageCatalog: Send + Sync {
    /// Render `key` with `params`; `None` if the key is unknown
    fn render(&self, key: &str, params: &[(&str, &str)]) -> Option<String>;
}

/// Message templates keyed by dotted name
#[derive(Debug, Clone, Default)]
pub struct Messages {
    templates: HashMap<String, String>,
}

impl Messages {
    /// Empty catalog; every lookup falls back to built-in text
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled English catalog
    pub fn english() -> Self {
        // The bundled file is part of the crate and always parses.
        Self::from_toml_str(EN_LOCALE).unwrap_or_default()
    }

    /// Parse a locale file
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the content is not valid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e| PolyrefError::config(format!("Failed to parse locale: {}", e)))?;
        let mut templates = HashMap::new();
        flatten("", &table, &mut templates);
        Ok(Self { templates })
    }

    /// Replace or add templates
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, template) in overrides {
            self.templates.insert(key.into(), template.into());
        }
        self
    }

    /// Raw template for `key`
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if the catalog has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MessageCatalog for Messages {
    fn render(&self, key: &str, params: &[(&str, &str)]) -> Option<String> {
        self.template(key).map(|template| interpolate(template, params))
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten(&full, nested, out),
            toml::Value::String(template) => {
                out.insert(full, template.clone());
            }
            _ => {}
        }
    }
}

/// Substitute `%{name}` placeholders
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("%{{{}}}", name), value)
        })
}

/// Render a message, falling back to built-in text when the catalog is
/// missing or lacks the key
pub fn render_or_fallback(
    catalog: Option<&dyn MessageCatalog>,
    key: &str,
    params: &[(&str, &str)],
) -> String {
    catalog
        .and_then(|c| c.render(key, params))
        .unwrap_or_else(|| interpolate(fallback_template(key), params))
}

fn fallback_template(key: &str) -> &'static str {
    match key {
        CLASS_NOT_ALLOWED => "%{class} is not an allowed class",
        REQUIRED => "must exist",
        BLANK => "can't be blank",
        _ => "is invalid",
    }
}
