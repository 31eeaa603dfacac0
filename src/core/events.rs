//! # Outbound Events
//!
//! Navigation talks back to the host through events, not return values. The
//! core emits a single event kind, `COMPONENT_RESULT`, addressed to the
//! screen a pop is about to reveal. Delivery is fire-and-forget: sinks never
//! acknowledge, never retry, and never feed errors back into dispatch. A
//! host that is not listening simply misses the event.

use std::sync::mpsc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::graph::DestinationId;

/// Event name for a result handed back to the screen below the popped one.
pub const COMPONENT_RESULT: &str = "COMPONENT_RESULT";

/// Disposition attached to every emitted result. Serialized as `"OK"`.
///
/// Results are only forwarded on a successful pop, so the only value is
/// `Ok`. Cancellation is expressed by popping without setting a result: the
/// receiver then sees nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    Ok,
}

/// Envelope delivered to the host. `target_destination_id` is the
/// stringified identity of the destination the event is addressed to, absent
/// when the event is broadcast; the payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_destination_id: Option<String>,
    pub payload: Map<String, Value>,
    pub result_type: ResultType,
}

impl OutboundEvent {
    /// A `COMPONENT_RESULT` addressed to `target`.
    pub fn component_result(target: DestinationId, payload: Map<String, Value>) -> Self {
        Self {
            name: COMPONENT_RESULT.to_string(),
            target_destination_id: Some(target.to_string()),
            payload,
            result_type: ResultType::Ok,
        }
    }
}

/// Where outbound events go.
///
/// Emission has no error surface by contract. A sink that cannot deliver
/// drops the event and at most logs about it.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: OutboundEvent);
}

/// Sink for hosts that do not listen. Everything is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: OutboundEvent) {}
}

/// Sink that forwards events over a channel to whatever thread is watching.
///
/// A dropped receiver is the same as nobody listening: the event is dropped
/// and dispatch continues.
pub struct ChannelSink {
    tx: mpsc::Sender<OutboundEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<OutboundEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: OutboundEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event receiver dropped; discarding event");
        }
    }
}
