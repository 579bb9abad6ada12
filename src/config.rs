//! Persisted CLI configuration: records and the on-disk JSON store.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One configured provider instance.
///
/// `provider` is the provider identity (registry key), `id` the unique
/// configuration identifier. Everything else — credentials, base URLs, the
/// selected-model field (whose key name varies per provider) — lives in the
/// flattened `fields` map so each authenticator can shape its own record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: String::new(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Top-level persisted configuration.
///
/// Only `providers` is modeled; every other top-level field round-trips
/// through the flattened `rest` map so a save never drops state this
/// version does not know about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl CliConfig {
    #[must_use]
    pub fn has_provider_id(&self, id: &str) -> bool {
        self.providers.iter().any(|p| p.id == id)
    }
}

/// Configuration storage collaborator. Failures here are fatal to the
/// wizard and propagate to the caller.
pub trait ConfigStore {
    fn load(&self) -> Result<CliConfig>;
    fn save(&mut self, config: &CliConfig) -> Result<()>;
}

/// JSON file store under the user config directory.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/provwiz/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::config("could not determine the user config directory"))?;
        Ok(base.join("provwiz").join("config.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<CliConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "config file absent, starting empty");
            return Ok(CliConfig::default());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&mut self, config: &CliConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, raw).map_err(|e| {
            Error::config(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), providers = config.providers.len(), "config saved");
        Ok(())
    }
}
