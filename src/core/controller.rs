//! # Back-Stack Controller
//!
//! The navigation state machine. It owns the destination graph and the
//! back-stack, applies one action at a time, and reports what happened as an
//! [`Outcome`].
//!
//! ```text
//! Uninitialized --SET_ROOT--> Ready
//!                               ^  SET_ROOT again replaces the root and
//!                               |  resets the stack to [start]
//!
//! Ready:
//!   PUSH / PRESENT   build destination, append entry      depth +1
//!   POP / DISMISS    drop the top entry, floor at root    depth -1
//!   POP_TO_ROOT      collapse to the start entry          depth  1
//!   SET_RESULT       emit to the entry below the top      no change
//!   CURRENT_ROUTE    reply with the top identity          no change
//! ```
//!
//! Transitions are synchronous and run to completion before the next
//! dispatch. The graph and stack are mutated here and nowhere else.
//! Navigation actions arriving before any root is set are ignored, not
//! errors: the host may race its first dispatches against root setup.

use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::bridge::registry::ComponentRegistry;
use crate::core::action::{Action, Root};
use crate::core::builder::DestinationBuilder;
use crate::core::error::NavError;
use crate::core::events::{EventSink, OutboundEvent};
use crate::core::graph::{BackStackEntry, Destination, DestinationId, NavigationGraph, Transition};

/// Observable lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No root yet; navigation actions are ignored.
    Uninitialized,
    /// Root set, back-stack non-empty, all actions live.
    Ready,
}

/// What applying an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or a registration/emission took effect).
    Applied,
    /// A reply handle was resolved; no state change.
    Replied,
    /// The action was a defined no-op. The reason says which one.
    Ignored(IgnoreReason),
}

/// Why an action was ignored. All of these are defined no-ops, logged but
/// never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Pop or dismiss with only the root on the stack.
    PopAtRoot,
    /// Navigation before any root was set.
    NoRoot,
    /// Set-result with no entry below the top to address.
    NoResultTarget,
    /// Dispatched action type had no live subscription.
    Unsubscribed,
}

/// Owns the graph, the back-stack, and the current root; applies actions.
///
/// The component registry and event sink are external collaborators shared
/// with the host, which is why they sit behind `Arc<dyn _>`.
pub struct BackStackController {
    graph: NavigationGraph,
    stack: Vec<BackStackEntry>,
    builder: DestinationBuilder,
    root: Option<Root>,
    components: Arc<dyn ComponentRegistry>,
    sink: Arc<dyn EventSink>,
}

impl BackStackController {
    pub fn new(components: Arc<dyn ComponentRegistry>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            graph: NavigationGraph::new(),
            stack: Vec::new(),
            builder: DestinationBuilder::new(Arc::clone(&components)),
            root: None,
            components,
            sink,
        }
    }

    /// Applies one action and reports the outcome.
    ///
    /// Errors never leave the controller in a half-applied state: a failed
    /// build happens before any graph or stack mutation.
    pub fn handle(&mut self, action: Action) -> Result<Outcome, NavError> {
        match action {
            Action::SetRoot(root) => self.set_root(root),
            Action::Push { name, props } => self.advance(&name, props, Transition::Standard),
            Action::Present { name, props } => self.advance(&name, props, Transition::Modal),
            Action::Pop => Ok(self.retreat("pop")),
            Action::Dismiss => Ok(self.retreat("dismiss")),
            Action::PopToRoot => Ok(self.pop_to_root()),
            Action::CurrentRoute(reply) => {
                reply.resolve(self.current_destination_id());
                Ok(Outcome::Replied)
            }
            Action::SetResult(data) => Ok(self.set_result(data)),
            Action::RegisterComponent { name, spec } => {
                self.components.register(&name, spec);
                debug!("Registered component: {name}");
                Ok(Outcome::Applied)
            }
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.root.is_some() {
            ControllerState::Ready
        } else {
            ControllerState::Uninitialized
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn back_stack(&self) -> &[BackStackEntry] {
        &self.stack
    }

    pub fn root(&self) -> Option<&Root> {
        self.root.as_ref()
    }

    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    /// Destination record at the top of the back-stack.
    pub fn current_destination(&self) -> Option<&Destination> {
        self.stack
            .last()
            .and_then(|entry| self.graph.get(entry.destination))
    }

    pub fn current_destination_id(&self) -> Option<DestinationId> {
        self.stack.last().map(|entry| entry.destination)
    }

    /// Entry immediately below the top, the addressee for results.
    pub fn previous_back_stack_entry(&self) -> Option<&BackStackEntry> {
        self.stack
            .len()
            .checked_sub(2)
            .and_then(|index| self.stack.get(index))
    }

    /// Builds the start destination for the root variant, records it as the
    /// graph start, and resets the back-stack to exactly that entry. Prior
    /// destinations stay in the graph; only the stack is reset.
    fn set_root(&mut self, root: Root) -> Result<Outcome, NavError> {
        let start = match &root {
            Root::Tabs { options } => self.builder.build_tab_bar(options.clone()),
            Root::Stack { page } | Root::Screen { page } => {
                self.builder.build(&page.root_name, None)?
            }
        };
        let start_id = start.id;
        self.graph.add_destination(start)?;
        self.graph.set_start(start_id);
        self.stack.clear();
        self.stack.push(BackStackEntry {
            destination: start_id,
            transition: Transition::Standard,
        });
        info!(
            "Root set: {:?} (start destination {start_id})",
            root.root_type()
        );
        self.root = Some(root);
        Ok(Outcome::Applied)
    }

    /// Push and present share mechanics; only the recorded transition
    /// differs.
    fn advance(
        &mut self,
        name: &str,
        props: Option<Map<String, Value>>,
        transition: Transition,
    ) -> Result<Outcome, NavError> {
        if self.stack.is_empty() {
            debug!("Ignoring navigation to {name} before any root is set");
            return Ok(Outcome::Ignored(IgnoreReason::NoRoot));
        }
        let destination = self.builder.build(name, props)?;
        let id = destination.id;
        self.graph.add_destination(destination)?;
        self.stack.push(BackStackEntry {
            destination: id,
            transition,
        });
        debug!(
            "Navigated to {name} as destination {id} (depth {})",
            self.depth()
        );
        Ok(Outcome::Applied)
    }

    /// Pop and dismiss share mechanics. The stack never goes below the root
    /// entry; at depth 1 this is a defined no-op.
    fn retreat(&mut self, verb: &'static str) -> Outcome {
        match self.stack.len() {
            0 => {
                debug!("Ignoring {verb} before any root is set");
                Outcome::Ignored(IgnoreReason::NoRoot)
            }
            1 => {
                debug!("Ignoring {verb} at back-stack root");
                Outcome::Ignored(IgnoreReason::PopAtRoot)
            }
            _ => {
                self.stack.pop();
                debug!(
                    "Applied {verb}, back at destination {:?} (depth {})",
                    self.current_destination_id(),
                    self.depth()
                );
                Outcome::Applied
            }
        }
    }

    /// Collapses the stack to the retained start identity. Valid for the
    /// life of the session because destinations are never removed from the
    /// graph.
    fn pop_to_root(&mut self) -> Outcome {
        let Some(start) = self.graph.start() else {
            debug!("Ignoring pop-to-root before any root is set");
            return Outcome::Ignored(IgnoreReason::NoRoot);
        };
        self.stack.clear();
        self.stack.push(BackStackEntry {
            destination: start,
            transition: Transition::Standard,
        });
        debug!("Collapsed back-stack to root destination {start}");
        Outcome::Applied
    }

    /// Emits a result addressed to the entry below the top. With no such
    /// entry the result is dropped, loudly.
    fn set_result(&mut self, data: Map<String, Value>) -> Outcome {
        let Some(previous) = self.previous_back_stack_entry() else {
            warn!("Dropping result: no destination below the top to address");
            return Outcome::Ignored(IgnoreReason::NoResultTarget);
        };
        let target = previous.destination;
        self.sink.emit(OutboundEvent::component_result(target, data));
        debug!("Forwarded result to destination {target}");
        Outcome::Applied
    }
}
