//! Registry fanning events out to several sinks

use novel_ads_core::{EventSink, OutboundEvent};

struct Entry {
    name: String,
    enabled: bool,
    sink: Box<dyn EventSink>,
}

/// Delivers each event to every enabled sink, in registration order
#[derive(Default)]
pub struct SinkRegistry {
    sinks: Vec<Entry>,
}

impl SinkRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Register a sink under a unique name, replacing any sink with that name
    pub fn register(&mut self, name: impl Into<String>, sink: Box<dyn EventSink>) {
        let name = name.into();
        self.sinks.retain(|e| e.name != name);
        self.sinks.push(Entry {
            name,
            enabled: true,
            sink,
        });
    }

    /// Enable or disable a registered sink; returns false for unknown names
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.sinks.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Names of the registered sinks, in delivery order
    pub fn names(&self) -> Vec<&str> {
        self.sinks.iter().map(|e| e.name.as_str()).collect()
    }

    /// Get number of registered sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for SinkRegistry {
    fn emit(&mut self, event: OutboundEvent) {
        for entry in self.sinks.iter_mut().filter(|e| e.enabled) {
            entry.sink.emit(event.clone());
        }
    }
}
