//! Resolver configuration.
//!
//! The defaults are the built-in tables. A deployment may load its own tables
//! from YAML once at startup; after that they are never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::flags::{FlagTable, BUILTIN_FLAGS, BUILTIN_RECEIVE_EXPENSES_TYPES};
use crate::settings::SETTINGS_ROOT;
use crate::types::{Capability, EntityType};

/// Errors raised while loading or validating a [`ResolverConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document is not valid YAML for this config
    #[error("Invalid resolver config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Empty settings path for {0}")]
    EmptyPath(Capability),

    #[error("Settings path for {capability} must start with 'settings.': {path}")]
    InvalidRoot { capability: Capability, path: String },

    #[error("Settings path for {capability} has an empty segment: {path}")]
    EmptySegment { capability: Capability, path: String },
}

/// Tables consulted by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Legacy capability to settings path mapping
    pub flag_paths: BTreeMap<Capability, String>,
    /// Entity types allowed to receive expenses
    pub receive_expenses_types: Vec<EntityType>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            flag_paths: BUILTIN_FLAGS
                .iter()
                .map(|(capability, path)| (*capability, path.to_string()))
                .collect(),
            receive_expenses_types: BUILTIN_RECEIVE_EXPENSES_TYPES.to_vec(),
        }
    }
}

impl ResolverConfig {
    /// Parse config from YAML without validating it.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parse and validate.
    pub fn load(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::from_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every flag path is a non-empty dotted path under `settings`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (capability, path) in &self.flag_paths {
            let capability = *capability;
            if path.is_empty() {
                return Err(ConfigError::EmptyPath(capability));
            }
            let mut segments = path.split('.');
            if segments.next() != Some(SETTINGS_ROOT) {
                return Err(ConfigError::InvalidRoot {
                    capability,
                    path: path.clone(),
                });
            }
            if segments.any(str::is_empty) {
                return Err(ConfigError::EmptySegment {
                    capability,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn flag_table(&self) -> FlagTable {
        FlagTable::new(self.flag_paths.clone())
    }
}
