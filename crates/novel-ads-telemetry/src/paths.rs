//! Default locations for engine config and emission logs

use crate::error::TelemetryError;
use std::path::PathBuf;

/// Resolves standard paths under the user data directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
}

impl Paths {
    pub fn new() -> Result<Self, TelemetryError> {
        let data = dirs::data_dir().ok_or(TelemetryError::NoDataDir)?;
        Ok(Self::with_base(data.join("novel-ads")))
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("engine.json")
    }

    pub fn emissions_file(&self) -> PathBuf {
        self.base.join("telemetry").join("emissions.jsonl")
    }
}
