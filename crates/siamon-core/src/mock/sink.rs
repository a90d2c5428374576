use std::sync::Mutex;

use crate::collector::{CollectEvent, CollectSink};

/// Sink that stores every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CollectEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events reported so far, oldest first.
    pub fn events(&self) -> Vec<CollectEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl CollectSink for RecordingSink {
    fn report(&self, event: CollectEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
