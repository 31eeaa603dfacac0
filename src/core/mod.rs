//! # Navigation Core
//!
//! The action-dispatch state machine. It knows nothing about any specific
//! host technology: rendering, animation lookup, and transports all live on
//! the other side of the bridge seams.
//!
//! ```text
//!   host / external controller
//!          │  dispatch(action)
//!          ▼
//!   ┌──────────────────────────────────────────┐
//!   │                 CORE                     │
//!   │                                          │
//!   │   ActionBus ──▶ BackStackController      │
//!   │                    │                     │
//!   │                    ├─▶ DestinationBuilder│
//!   │                    ├─▶ NavigationGraph   │
//!   │                    └─▶ EventSink         │
//!   │                                          │
//!   │   Synchronous. One action at a time.     │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`action`]: the closed `Action` enum - everything a host can ask for
//! - [`bus`]: single-slot pub/sub dispatch table
//! - [`builder`]: destination construction and identity generation
//! - [`controller`]: the back-stack state machine
//! - [`error`]: the error taxonomy
//! - [`events`]: outbound event envelope and sinks
//! - [`graph`]: destination ownership and the start reference

pub mod action;
pub mod builder;
pub mod bus;
pub mod controller;
pub mod error;
pub mod events;
pub mod graph;

// Re-export commonly used types for convenience
pub use action::{Action, ActionKind, Page, Root, RootType, RouteReply};
pub use builder::{DestinationBuilder, TAB_BAR_VIEW_CLASS};
pub use bus::ActionBus;
pub use controller::{BackStackController, ControllerState, IgnoreReason, Outcome};
pub use error::NavError;
pub use events::{COMPONENT_RESULT, ChannelSink, EventSink, NullSink, OutboundEvent, ResultType};
pub use graph::{BackStackEntry, Destination, DestinationId, NavigationGraph, Transition};
