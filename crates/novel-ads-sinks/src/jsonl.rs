//! Sink appending emission records to a JSONL log

use novel_ads_core::{EventSink, OutboundEvent};
use novel_ads_telemetry::{append_emission, EmissionRecord};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Appends every event to a JSONL file. Write failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
    session_id: String,
    failures: usize,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_id: session_id.into(),
            failures: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events that could not be written
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl EventSink for JsonlSink {
    fn emit(&mut self, event: OutboundEvent) {
        let record = EmissionRecord::new(
            self.session_id.as_str(),
            event.name.as_str(),
            event.target.as_str(),
            event.data,
        );
        if let Err(err) = append_emission(&self.path, &record) {
            self.failures += 1;
            warn!(path = %self.path.display(), error = %err, "failed to record emission");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_ads_core::{EventName, Target};
    use novel_ads_telemetry::read_emissions;
    use serde_json::json;

    #[test]
    fn test_appends_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::new(dir.path().join("emissions.jsonl"), "session-1");

        sink.emit(OutboundEvent::new(
            EventName::ControlCustomFetch,
            Target::CurrentPage,
            json!({"customId": "p2"}),
        ));

        let records = read_emissions(sink.path()).unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_id, "session-1");
        assert_eq!(records[0].event, "controlCustomFetch");
        assert_eq!(records[0].data["customId"], "p2");
        assert_eq!(sink.failures(), 0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be makes the append fail
        let blocked = dir.path().join("blocked");
        std::fs::create_dir_all(&blocked).unwrap();
        let mut sink = JsonlSink::new(&blocked, "session-1");

        sink.emit(OutboundEvent::new(
            EventName::ShowAdvertising,
            Target::PageTree,
            json!({}),
        ));

        assert_eq!(sink.failures(), 1);
    }
}
