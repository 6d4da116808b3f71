//! Store adapter configuration via `foreman.toml`
//!
//! Two layers:
//! - [`ForemanConfig`]: the serializable settings (default adapter name,
//!   namespace hint, per-entity adapter overrides)
//! - [`Configuration`]: the settings plus live adapter handles, keyed by name
//!
//! Commands bind their adapters from a `Configuration` when they are first
//! resolved. A process-wide configuration can be installed with
//! [`configure`] and is read by [`Factory::global`](crate::Factory::global).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use foreman_core::{EntityName, EntityRef, StoreAdapter};

use crate::{Error, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "foreman.toml";

/// Adapter settings loaded from `foreman.toml`.
///
/// # Example
///
/// ```toml
/// adapter = "memory"
/// namespace = "hr"
///
/// [entities]
/// audit_log = "archive"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForemanConfig {
    /// Name of the adapter used for every entity without an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    /// Namespace hint attached to every bound entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Per-entity adapter overrides: entity name to adapter name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entities: BTreeMap<String, String>,
}

impl ForemanConfig {
    /// Settings naming a default adapter
    pub fn with_adapter(adapter: impl Into<String>) -> Self {
        ForemanConfig {
            adapter: Some(adapter.into()),
            ..Default::default()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Foreman adapter configuration
#
# Name of the store adapter used for every entity (required unless every
# entity has an override below). Adapters are registered in code by name.
# adapter = "memory"

# Namespace hint passed to the adapter with every entity (optional).
# namespace = "app"

# Per-entity adapter overrides.
# [entities]
# audit_log = "archive"
"#
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the text does not parse or fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ForemanConfig = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Configuration { reason } => {
                Error::configuration(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::configuration(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize these settings to TOML and write them to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::configuration(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Check that adapter names are non-empty and override keys are valid
    /// entity names.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.adapter.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(Error::configuration("adapter name cannot be empty"));
        }
        for (entity, adapter) in &self.entities {
            EntityName::validate(entity).map_err(|e| {
                Error::configuration(format!("invalid entity '{}' in [entities]: {}", entity, e))
            })?;
            if adapter.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "adapter name for entity '{}' cannot be empty",
                    entity
                )));
            }
        }
        Ok(())
    }
}

/// Settings plus the adapters they refer to
#[derive(Clone, Default)]
pub struct Configuration {
    settings: ForemanConfig,
    adapters: HashMap<String, Arc<dyn StoreAdapter>>,
}

impl Configuration {
    /// Configuration from settings, with no adapters registered yet
    pub fn new(settings: ForemanConfig) -> Self {
        Configuration {
            settings,
            adapters: HashMap::new(),
        }
    }

    /// Configuration using `adapter` for every entity, registered under its
    /// own name
    pub fn with_default_adapter(adapter: Arc<dyn StoreAdapter>) -> Self {
        let name = adapter.name().to_string();
        Configuration::new(ForemanConfig::with_adapter(name.clone())).with_adapter(name, adapter)
    }

    /// Register an adapter under `name`, replacing any previous one
    pub fn register_adapter(&mut self, name: impl Into<String>, adapter: Arc<dyn StoreAdapter>) {
        self.adapters.insert(name.into(), adapter);
    }

    /// Builder form of [`register_adapter`](Self::register_adapter)
    pub fn with_adapter(mut self, name: impl Into<String>, adapter: Arc<dyn StoreAdapter>) -> Self {
        self.register_adapter(name, adapter);
        self
    }

    /// The serializable settings
    pub fn settings(&self) -> &ForemanConfig {
        &self.settings
    }

    /// Name of the adapter responsible for `entity`: its override, else the default
    pub fn adapter_name_for(&self, entity: &EntityName) -> Option<&str> {
        self.settings
            .entities
            .get(entity.as_str())
            .or(self.settings.adapter.as_ref())
            .map(String::as_str)
    }

    /// The adapter responsible for `entity`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if no adapter is named for the entity
    /// or the named adapter is not registered.
    pub fn adapter_for(&self, entity: &EntityName) -> Result<Arc<dyn StoreAdapter>> {
        let name = self.adapter_name_for(entity).ok_or_else(|| {
            Error::configuration(format!("no store adapter configured for '{}'", entity))
        })?;
        self.adapters.get(name).cloned().ok_or_else(|| {
            Error::configuration(format!(
                "store adapter '{}' (for '{}') is not registered",
                name, entity
            ))
        })
    }

    /// Adapter-facing reference to `entity`, carrying the namespace hint
    pub fn entity_ref(&self, entity: EntityName) -> EntityRef {
        match &self.settings.namespace {
            Some(namespace) => EntityRef::new(entity).with_namespace(namespace.clone()),
            None => EntityRef::new(entity),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adapters: Vec<_> = self.adapters.keys().collect();
        adapters.sort();
        f.debug_struct("Configuration")
            .field("settings", &self.settings)
            .field("adapters", &adapters)
            .finish()
    }
}

static GLOBAL: Lazy<RwLock<Option<Arc<Configuration>>>> = Lazy::new(|| RwLock::new(None));

/// Install the process-wide configuration, returning the shared handle.
///
/// Factories already built keep the configuration they were built with.
pub fn configure(configuration: Configuration) -> Arc<Configuration> {
    let configuration = Arc::new(configuration);
    info!(target: "foreman::config", ?configuration, "Installed global configuration");
    *GLOBAL.write() = Some(Arc::clone(&configuration));
    configuration
}

/// The process-wide configuration.
///
/// # Errors
///
/// Returns `Error::Configuration` if [`configure`] has not been called.
pub fn current() -> Result<Arc<Configuration>> {
    GLOBAL
        .read()
        .clone()
        .ok_or_else(|| Error::configuration("no configuration installed; call configure() first"))
}

/// Remove the process-wide configuration
pub fn reset() {
    *GLOBAL.write() = None;
}
