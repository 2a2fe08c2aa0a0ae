//! Emission record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outbound control event as written to the emission log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub target: String,
    #[serde(default)]
    pub data: Value,
}

impl EmissionRecord {
    pub fn new(
        session_id: impl Into<String>,
        event: impl Into<String>,
        target: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event: event.into(),
            target: target.into(),
            data,
        }
    }
}
