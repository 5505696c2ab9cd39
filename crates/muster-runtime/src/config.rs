//! Runtime configuration.
//!
//! One [`MusterConfig`] is attached to each HQ container at build time and
//! shared read-only with every base the container constructs. Per-base
//! settings live in the free-form `[bases.<name>]` sections and are
//! deserialized on demand through [`MusterConfig::for_base`]; the runtime
//! itself never interprets them.

use muster_types::ErrorCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// HQ-wide configuration.
///
/// Every field has a default, so an empty document (or no document at
/// all) is a valid configuration.
///
/// # Example
///
/// ```
/// use muster_runtime::MusterConfig;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default)]
/// struct CacheSettings {
///     capacity: usize,
/// }
///
/// let config = MusterConfig::from_toml(
///     r#"
///     debug = true
///
///     [bases.cache]
///     capacity = 256
///     "#,
/// )
/// .unwrap();
///
/// assert!(config.debug);
/// let cache: CacheSettings = config.for_base("cache").unwrap();
/// assert_eq!(cache.capacity, 256);
///
/// // Absent sections deserialize from an empty table.
/// let other: CacheSettings = config.for_base("other").unwrap();
/// assert_eq!(other.capacity, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MusterConfig {
    /// Enables verbose diagnostic behavior in bases that honor it.
    pub debug: bool,

    /// Marks the container as running under a test harness.
    pub testing: bool,

    /// Free-form per-base sections, keyed by base name.
    pub bases: HashMap<String, serde_json::Value>,
}

impl MusterConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unexpected
    /// field types.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        toml::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes the configuration to a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] when a base section holds a value
    /// TOML cannot represent (such as `null`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }

    /// Deserializes the named base's section into `T`.
    ///
    /// An absent section deserializes from an empty table, so section
    /// types usually derive `Default` and opt into `#[serde(default)]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Section`] when the section exists but does
    /// not match `T`'s shape.
    pub fn for_base<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        let section = self
            .bases
            .get(name)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        serde_json::from_value(section).map_err(|e| ConfigError::Section {
            base: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Configuration error.
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`Parse`](ConfigError::Parse) | `HQ_CONFIG_PARSE` | No |
/// | [`Encode`](ConfigError::Encode) | `HQ_CONFIG_ENCODE` | No |
/// | [`Section`](ConfigError::Section) | `HQ_CONFIG_SECTION` | No |
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("configuration parse failed: {0}")]
    Parse(String),

    /// The configuration could not be serialized to TOML.
    #[error("configuration encode failed: {0}")]
    Encode(String),

    /// A base section exists but does not match the requested shape.
    #[error("configuration section for base '{base}' invalid: {reason}")]
    Section { base: String, reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "HQ_CONFIG_PARSE",
            Self::Encode(_) => "HQ_CONFIG_ENCODE",
            Self::Section { .. } => "HQ_CONFIG_SECTION",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
