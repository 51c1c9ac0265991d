//! Schema configuration via `polyref.toml`
//!
//! Settings are read once at bootstrap, before any model is defined. Missing
//! keys take their defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use strata_polyref_core::{PolyrefError, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "polyref.toml";

/// What happens when a polymorphic reference is declared a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeclarationPolicy {
    /// Fail with `DuplicateDeclaration`
    #[default]
    Reject,
    /// Swap the previous declaration, rule and accessors out in one step
    Replace,
}

/// Schema configuration loaded from `polyref.toml`.
///
/// # Example
///
/// ```toml
/// # "reject" (default) or "replace"
/// redeclaration = "reject"
///
/// locale = "en"
///
/// [messages]
/// "polyref.errors.messages.class_not_allowed" = "%{class} cannot own this record"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolyrefConfig {
    /// Re-declaration policy
    #[serde(default)]
    pub redeclaration: RedeclarationPolicy,
    /// Locale of the bundled message catalog
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Message template overrides, keyed by dotted message key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for PolyrefConfig {
    fn default() -> Self {
        Self {
            redeclaration: RedeclarationPolicy::default(),
            locale: default_locale(),
            messages: BTreeMap::new(),
        }
    }
}

impl PolyrefConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Polymorphic reference configuration
#
# Re-declaring the same polymorphic reference on the same model:
#   "reject"  = fail with a duplicate declaration error (default)
#   "replace" = swap the old allow-list, rule and accessors for the new ones
redeclaration = "reject"

# Locale of the bundled validation messages
locale = "en"

# Override individual message templates. Placeholders use %{name}.
# [messages]
# "polyref.errors.messages.class_not_allowed" = "%{class} is not an allowed class"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the content cannot be parsed or names an
    /// unsupported locale.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PolyrefConfig = toml::from_str(content)
            .map_err(|e| PolyrefError::config(format!("Failed to parse polyref config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PolyrefError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| PolyrefError::config(format!("Failed to serialize config: {}", e)))
    }

    fn check(&self) -> Result<()> {
        if self.locale != "en" {
            return Err(PolyrefError::config(format!(
                "Unsupported locale '{}'. Only \"en\" is bundled.",
                self.locale
            )));
        }
        Ok(())
    }
}
