//! # Action Bus
//!
//! Single-slot pub/sub keyed by [`ActionKind`]. Subscribing wires the
//! handler for one kind and replaces whatever was there before; dispatching
//! invokes the matching handler synchronously on the calling thread, in
//! arrival order. A kind with no live subscription drops the action with a
//! debug line and reports it as ignored rather than erroring.

use std::collections::HashMap;

use log::{debug, warn};

use crate::core::action::{Action, ActionKind};
use crate::core::controller::{IgnoreReason, Outcome};
use crate::core::error::NavError;

type Handler = Box<dyn FnMut(Action) -> Result<Outcome, NavError>>;

/// Dispatch table from action kind to the one live handler for it.
#[derive(Default)]
pub struct ActionBus {
    handlers: HashMap<ActionKind, Handler>,
}

impl ActionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for one action kind.
    ///
    /// No multicast: the prior handler for that kind, if any, is dropped on
    /// the spot, with a warning so the silent-replace is at least visible in
    /// logs.
    pub fn subscribe<F>(&mut self, kind: ActionKind, handler: F)
    where
        F: FnMut(Action) -> Result<Outcome, NavError> + 'static,
    {
        if self.is_subscribed(kind) {
            warn!("Replacing existing subscription for {kind:?}");
        }
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Hands the action to the matching subscription.
    ///
    /// Synchronous: the handler runs to completion on this thread before
    /// `dispatch` returns, so actions apply in exactly the order they are
    /// dispatched.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, NavError> {
        let kind = action.kind();
        match self.handlers.get_mut(&kind) {
            Some(handler) => handler(action),
            None => {
                debug!("No subscription for {kind:?}; dropping action");
                Ok(Outcome::Ignored(IgnoreReason::Unsubscribed))
            }
        }
    }

    pub fn is_subscribed(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}
