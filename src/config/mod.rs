//! Rendering configuration for keyof.
//!
//! [`RenderConfig`] tunes how key paths are turned into text: which notation
//! is the default, whether values are escaped, and the root and quote
//! characters used by the bracketed notations. It can be built in code or
//! loaded from a TOML file; missing fields fall back to their defaults.
//!
//! # Example
//!
//! ```
//! use keyof::config::RenderConfig;
//! use keyof::Format;
//!
//! // Use default configuration
//! let config = RenderConfig::default();
//! assert_eq!(config.default_format, Format::Dot);
//! assert!(!config.strict);
//!
//! // Create custom configuration
//! let custom = RenderConfig {
//!     default_format: Format::JsonPath,
//!     strict: true,
//!     ..RenderConfig::default()
//! };
//! assert_eq!(custom.jsonpath_root, "$");
//! ```

use crate::keypath::Format;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied when rendering key paths.
///
/// # Fields
///
/// * `strict` - Escape values that collide with a notation's syntax (default: false)
/// * `default_format` - Notation used by `KeyPath::render_default` (default: "dot")
/// * `jsonpath_root` - Root token of the jsonpath notation (default: "$")
/// * `quote` - Quote character for bracketed string keys (default: `'`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Escape delimiters and quote non-identifier keys
    #[serde(default)]
    pub strict: bool,

    /// Notation used when none is given explicitly
    #[serde(default)]
    pub default_format: Format,

    /// Root token prepended by the jsonpath notation
    #[serde(default = "default_jsonpath_root")]
    pub jsonpath_root: String,

    /// Quote character for bracketed string keys
    #[serde(default = "default_quote")]
    pub quote: char,
}

/// Returns the default jsonpath root token.
fn default_jsonpath_root() -> String {
    "$".to_string()
}

/// Returns the default quote character.
fn default_quote() -> char {
    '\''
}

impl Default for RenderConfig {
    /// Creates a configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `strict`: false
    /// * `default_format`: dot
    /// * `jsonpath_root`: "$"
    /// * `quote`: '\''
    fn default() -> Self {
        Self {
            strict: false,
            default_format: Format::default(),
            jsonpath_root: default_jsonpath_root(),
            quote: default_quote(),
        }
    }
}

impl RenderConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents).context("Invalid render configuration")?;
        if config.quote == '\\' {
            anyhow::bail!("Backslash cannot be used as the quote character");
        }
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded render config");
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}
