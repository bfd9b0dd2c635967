//! Analytics sinks.

use std::sync::Mutex;

use crate::events::Event;

/// Receives every event the engines emit.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: &Event);
}

/// Writes events to the `analytics` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                tracing::info!(target: "analytics", event = event.name(), %payload);
            }
            Err(e) => {
                tracing::warn!(target: "analytics", event = event.name(), error = %e, "unserializable event");
            }
        }
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(Event::name).collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn record(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
