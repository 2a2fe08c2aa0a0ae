//! Configuration for the ad strategy engine

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// How the global ad flag behaves across evaluation cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Once raised, the global ad flag stays raised for the session
    #[default]
    Sticky,
    /// The global ad flag is recomputed from the context on every cycle
    PerCycle,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reset behavior of the global ad flag
    pub reset_policy: ResetPolicy,

    /// Next-page number that triggers the brand campaign global ad
    pub brand_campaign_page: f64,

    /// Novel page counter value flagged as the second page of reading
    pub second_page_milestone: u64,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            reset_policy: ResetPolicy::Sticky,
            brand_campaign_page: 2.0,
            second_page_milestone: 2,
        }
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
