//! Configuration management for the bridge core

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// Default functions for serde
fn default_use_canonical_name() -> bool {
    true
}

fn default_global_max_entries() -> usize {
    crate::DEFAULT_GLOBAL_MAX_ENTRIES
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeConfig {
    /// List engine configuration
    #[serde(default)]
    pub list: ListConfig,
    /// History store configuration
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Configuration for the metadata tree builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Order key properties canonically (sorted) instead of as registered
    #[serde(default = "default_use_canonical_name")]
    pub use_canonical_name: bool,
    /// Default truncation depth for list responses; 0 means unlimited
    #[serde(default)]
    pub max_depth: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            use_canonical_name: true,
            max_depth: 0,
        }
    }
}

/// Configuration for the historical value store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Process-wide ceiling on per-key history entry counts
    #[serde(default = "default_global_max_entries")]
    pub global_max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            global_max_entries: crate::DEFAULT_GLOBAL_MAX_ENTRIES,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            global_max_entries = config.history.global_max_entries,
            "Loaded bridge configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.history.global_max_entries == 0 {
            return Err(BridgeError::config(
                "history.global_max_entries must be greater than 0",
            ));
        }
        Ok(())
    }
}
