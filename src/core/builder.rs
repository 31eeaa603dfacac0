//! # Destination Construction
//!
//! Turns logical component names into [`Destination`] records. Every build
//! allocates a fresh identity from a monotonic counter: pushing the same
//! name twice yields two distinct destinations, and identities are never
//! reused for the life of the session.

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

use crate::bridge::registry::ComponentRegistry;
use crate::core::error::NavError;
use crate::core::graph::{Destination, DestinationId};

/// View class of the distinguished tab-bar container destination. Hosts
/// map this name to their tab-bar implementation; it is never resolved
/// through the component registry.
pub const TAB_BAR_VIEW_CLASS: &str = "TabBarHost";

/// Allocates identities and assembles [`Destination`] records, resolving
/// component names through the shared registry.
pub struct DestinationBuilder {
    components: Arc<dyn ComponentRegistry>,
    next_id: i32,
}

impl DestinationBuilder {
    pub fn new(components: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            components,
            next_id: 1,
        }
    }

    /// Next identity in the session. Exhausting the identity space is the
    /// one condition this crate treats as fatal.
    fn next_identity(&mut self) -> DestinationId {
        let id = DestinationId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("destination identity space exhausted");
        id
    }

    /// Builds a plain screen destination for a registered component name.
    ///
    /// Fails with [`NavError::UnknownComponent`] when the name has no
    /// registered view class; nothing is allocated in that case.
    pub fn build(
        &mut self,
        name: &str,
        config: Option<Map<String, Value>>,
    ) -> Result<Destination, NavError> {
        let spec = self
            .components
            .resolve(name)
            .ok_or_else(|| NavError::UnknownComponent(name.to_string()))?;
        let id = self.next_identity();
        debug!("Built destination {id} for component {name} ({})", spec.view_class);
        Ok(Destination {
            id,
            view_class: spec.view_class,
            config,
        })
    }

    /// Builds the tab-bar container destination. `options` is the tab
    /// configuration, handed to the host verbatim.
    pub fn build_tab_bar(&mut self, options: Option<Map<String, Value>>) -> Destination {
        let id = self.next_identity();
        debug!("Built tab bar destination {id}");
        Destination {
            id,
            view_class: TAB_BAR_VIEW_CLASS.to_string(),
            config: options,
        }
    }
}
