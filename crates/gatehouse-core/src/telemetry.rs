//! Telemetry events for Gatehouse.
//!
//! Events are named, carry string-valued properties, and are delivered
//! fire-and-forget: sinks must not block the caller and no acknowledgement
//! is expected.

use std::sync::Mutex;

use tracing::info;

/// A named telemetry event with string-valued properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    /// Event name.
    pub name: String,

    /// Property key-value pairs.
    pub properties: Vec<(String, String)>,
}

impl TelemetryEvent {
    /// Creates a new event with no properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property key-value pair.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Gets a property value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sink for telemetry events.
///
/// Implementations must be thread-safe; `track` is fire-and-forget and
/// must never fail the caller.
pub trait TelemetrySink: Send + Sync {
    /// Records one event.
    fn track(&self, event: TelemetryEvent);
}

/// Default sink that emits events through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn track(&self, event: TelemetryEvent) {
        info!(name = %event.name, properties = ?event.properties, "telemetry event");
    }
}

/// Sink that records events in memory, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("telemetry lock poisoned").clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn track(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .expect("telemetry lock poisoned")
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_builder_collects_properties() {
        let event = TelemetryEvent::new("DisableInactiveAuthUsersFinished")
            .property("total", "23")
            .property("errors", "0");

        assert_eq!(event.name, "DisableInactiveAuthUsersFinished");
        assert_eq!(event.get("total"), Some("23"));
        assert_eq!(event.get("errors"), Some("0"));
        assert_eq!(event.get("missing"), None);
    }

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::new();
        sink.track(TelemetryEvent::new("first"));
        sink.track(TelemetryEvent::new("second").property("k", "v"));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "first");
        assert_eq!(events[1].get("k"), Some("v"));
    }
}
