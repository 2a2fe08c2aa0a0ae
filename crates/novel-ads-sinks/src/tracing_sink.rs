//! Sink that reports each event as a structured log record

use novel_ads_core::{EventSink, OutboundEvent};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn emit(&mut self, event: OutboundEvent) {
        info!(
            event = %event.name,
            to = event.target.as_str(),
            data = %event.data,
            "ad control event"
        );
    }
}
