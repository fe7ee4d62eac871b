//! Namespaced TOML configuration scopes.
//!
//! A [`ConfigScope`] is the configuration context handed to a controller at
//! initialization: a named subtree of the host's TOML configuration. The host
//! loads the full file once and carves out one scope per controller with
//! [`ConfigScope::scoped`]; the controller reads its own keys with typed
//! accessors and never sees its siblings' namespaces.
//!
//! # TOML Example
//!
//! ```toml
//! [hold_position]
//! target = 1500
//!
//! [feed_override]
//! gain = 0.8
//! limits = [0.0, 1.2]
//! ```

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;
use toml::value::Table;

/// Error type for configuration access.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// File could not be read or its TOML did not parse.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required key is absent from the scope.
    #[error("missing configuration key `{key}` in scope `{namespace}`")]
    MissingKey {
        /// Dotted namespace of the scope that was queried.
        namespace: String,
        /// Key that was requested.
        key: String,
    },

    /// A key exists but does not deserialize to the requested type.
    #[error("configuration key `{key}` in scope `{namespace}` has the wrong type: {reason}")]
    TypeError {
        /// Dotted namespace of the scope that was queried.
        namespace: String,
        /// Key that was requested.
        key: String,
        /// Deserializer message.
        reason: String,
    },
}

/// A named subtree of the host configuration.
///
/// Scopes are passed by reference into controller initialization and are
/// cheap to clone; a controller that needs configuration after init clones
/// what it needs (or the whole scope) during init.
#[derive(Debug, Clone)]
pub struct ConfigScope {
    /// Dotted path from the root, for diagnostics (`""` at the root).
    namespace: String,
    table: Table,
}

impl ConfigScope {
    /// Root scope over an already parsed TOML table.
    pub fn from_table(table: Table) -> Self {
        Self {
            namespace: String::new(),
            table,
        }
    }

    /// Root scope over the contents of a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::FileNotFound` if the file does not exist and
    /// `ConfigError::ParseError` if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound(path.display().to_string())
            } else {
                ConfigError::ParseError(format!("failed to read {}: {}", path.display(), e))
            }
        })?;

        let table: Table = toml::from_str(&content).map_err(|e| {
            ConfigError::ParseError(format!("failed to parse {}: {}", path.display(), e))
        })?;

        Ok(Self::from_table(table))
    }

    /// Child scope for the namespace `ns`.
    ///
    /// An absent namespace (or one that is not a table) yields an empty
    /// scope: the distinction surfaces later as `MissingKey` on the keys the
    /// controller actually requires.
    pub fn scoped(&self, ns: &str) -> Self {
        let namespace = if self.namespace.is_empty() {
            ns.to_string()
        } else {
            format!("{}.{}", self.namespace, ns)
        };

        let table = match self.table.get(ns) {
            Some(toml::Value::Table(t)) => t.clone(),
            _ => Table::new(),
        };

        Self { namespace, table }
    }

    /// Dotted namespace of this scope (`""` for the root).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether `key` is present in this scope.
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Read a required typed value.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingKey` if absent and
    /// `ConfigError::TypeError` if the value does not deserialize to `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .table
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey {
                namespace: self.namespace.clone(),
                key: key.to_string(),
            })?;

        value.try_into().map_err(|e| ConfigError::TypeError {
            namespace: self.namespace.clone(),
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read an optional typed value, falling back to `default` when absent.
    ///
    /// # Errors
    /// A present-but-mistyped value is still `ConfigError::TypeError`; a typo
    /// in a value should not silently select the default.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        if self.contains(key) {
            self.get(key)
        } else {
            Ok(default)
        }
    }
}

impl Default for ConfigScope {
    fn default() -> Self {
        Self::from_table(Table::new())
    }
}
