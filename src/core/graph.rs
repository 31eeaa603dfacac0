//! # Navigation Graph
//!
//! Owns every [`Destination`] built during a session plus the start
//! back-reference. Destinations are inserted when a screen is first built and
//! are never removed for the life of the graph - pop-to-root relies on the
//! start identity staying valid, and that only holds because nothing is ever
//! evicted. If eviction is ever introduced, the start reference must be
//! re-validated on every pop-to-root.
//!
//! The back-stack itself (the ordered history of entries) lives on
//! `BackStackController`; this module only defines the entry record.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::core::error::NavError;

/// Opaque destination identity. Generated uniquely per construction by
/// [`DestinationBuilder`](crate::core::builder::DestinationBuilder); unique
/// within the graph for the graph's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DestinationId(pub i32);

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One navigable screen/surface in the graph.
#[derive(Debug, Clone)]
pub struct Destination {
    pub id: DestinationId,
    /// Backing view-class reference, resolved at build time. The core never
    /// looks inside it; it travels to the hosting surface as-is.
    pub view_class: String,
    /// Optional configuration map (push props, tab-bar options).
    pub config: Option<serde_json::Map<String, Value>>,
}

/// Styling a back-stack entry was applied with. Push and present share stack
/// semantics; the transition tag is the only thing that tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Default push/set-root styling.
    Standard,
    /// Present styling (modal enter/exit animations on the hosting surface).
    Modal,
}

/// Ordered record of one traversed destination. Entries form a sequence,
/// most-recent last; the first entry is always the start destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackStackEntry {
    pub destination: DestinationId,
    pub transition: Transition,
}

/// Mutable owner of all known destinations and the start reference.
#[derive(Debug, Default)]
pub struct NavigationGraph {
    destinations: HashMap<DestinationId, Destination>,
    /// Back-reference by identity, never ownership. Used for pop-to-root
    /// lookups only.
    start: Option<DestinationId>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a destination. The identity generator makes collisions
    /// unreachable, but the invariant is checked anyway.
    pub fn add_destination(&mut self, destination: Destination) -> Result<(), NavError> {
        if self.destinations.contains_key(&destination.id) {
            return Err(NavError::DuplicateIdentity(destination.id));
        }
        self.destinations.insert(destination.id, destination);
        Ok(())
    }

    /// Replaces the start reference. The previous start's destination record
    /// stays in the graph.
    pub fn set_start(&mut self, id: DestinationId) {
        self.start = Some(id);
    }

    pub fn start(&self) -> Option<DestinationId> {
        self.start
    }

    pub fn get(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.get(&id)
    }

    pub fn contains(&self, id: DestinationId) -> bool {
        self.destinations.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
