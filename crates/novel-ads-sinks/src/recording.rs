//! In-memory sink with a shared handle

use novel_ads_core::{EventName, EventSink, OutboundEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every event; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<OutboundEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OutboundEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, name: EventName) -> usize {
        self.events.borrow().iter().filter(|e| e.name == name).count()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Take the recorded events, leaving the buffer empty
    pub fn drain(&self) -> Vec<OutboundEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: OutboundEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_ads_core::Target;
    use serde_json::json;

    #[test]
    fn test_clones_share_buffer() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();

        handle.emit(OutboundEvent::new(
            EventName::ShowAdvertising,
            Target::HostDocument,
            json!({"customId": "root"}),
        ));

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.count(EventName::ShowAdvertising), 1);
        assert_eq!(sink.count(EventName::ControlCustomFetch), 0);

        let drained = sink.drain();
        assert_eq!(drained.len(), 1);
        assert!(handle.is_empty());
    }
}
