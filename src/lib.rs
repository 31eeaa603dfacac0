//! # Navstack
//!
//! A declarative navigation core: the host describes intent (set a root,
//! push, present, pop, hand back a result) as actions, and the core owns
//! the destination graph and back-stack that realize it. Rendering,
//! animation, and transports stay on the host's side of the seams.
//!
//! - [`core`](crate::core): the action-dispatch state machine
//! - [`bridge`]: what a host plugs into (wire decoding, component registry)
//! - [`session`]: per-surface wiring, single-threaded or worker-backed
//! - [`config`] / [`driver`]: the scriptable reference host

pub mod bridge;
pub mod config;
pub mod core;
pub mod driver;
pub mod session;

#[cfg(test)]
pub mod test_support;

pub use crate::bridge::{ComponentRegistry, ComponentSpec, InMemoryComponents};
pub use crate::core::{
    Action, ActionBus, ActionKind, BackStackController, ControllerState, Destination,
    DestinationId, EventSink, IgnoreReason, NavError, NavigationGraph, NullSink, Outcome,
    OutboundEvent, Page, ResultType, Root, RootType, RouteReply, Transition,
};
pub use crate::session::{NavigationSession, SessionWorker};
