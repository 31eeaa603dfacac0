//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use crate::bridge::registry::{ComponentRegistry, ComponentSpec, InMemoryComponents};
use crate::core::events::{EventSink, NullSink, OutboundEvent};
use crate::session::NavigationSession;

/// A registry preloaded with the component names the tests navigate to.
pub fn test_components() -> Arc<InMemoryComponents> {
    let components = InMemoryComponents::new();
    components.register("Home", ComponentSpec::new("HomeScreen"));
    components.register("Detail", ComponentSpec::new("DetailScreen"));
    components.register("Settings", ComponentSpec::new("SettingsScreen"));
    Arc::new(components)
}

/// Sink that keeps every emitted event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<OutboundEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<OutboundEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: OutboundEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Creates a wired session over [`test_components`] that drops all events.
pub fn test_session() -> NavigationSession {
    NavigationSession::new(test_components(), Arc::new(NullSink))
}

/// Creates a wired session whose emitted events are recorded.
pub fn recording_session() -> (NavigationSession, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let session = NavigationSession::new(test_components(), sink.clone());
    (session, sink)
}
