use std::fmt;

use crate::core::graph::DestinationId;

/// Errors surfaced to the external controller by dispatch.
///
/// All of these are local, recoverable conditions - none terminates the
/// session. Pop/dismiss at depth 1 and set-result below depth 2 are defined
/// as no-ops, not errors; they surface as
/// [`Outcome::Ignored`](crate::core::controller::Outcome) instead.
#[derive(Debug)]
pub enum NavError {
    /// A push/present/set-root named a component with no registered
    /// view-class. Surfaced rather than navigating to an empty destination.
    UnknownComponent(String),
    /// Graph insert hit an identity already present. Unreachable with the
    /// monotonic generator, but the invariant is checked.
    DuplicateIdentity(DestinationId),
    /// A wire payload did not match the expected shape for its action type.
    MalformedPayload {
        action: &'static str,
        detail: String,
    },
    /// A wire action-type string is not part of the protocol.
    UnknownAction(String),
    /// The action type carries a live reply handle and cannot be decoded
    /// from a wire payload; the transport must construct it directly.
    ReplyRequired(&'static str),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownComponent(name) => {
                write!(f, "unknown component: {name}")
            }
            NavError::DuplicateIdentity(id) => {
                write!(f, "duplicate destination identity: {id}")
            }
            NavError::MalformedPayload { action, detail } => {
                write!(f, "malformed {action} payload: {detail}")
            }
            NavError::UnknownAction(name) => {
                write!(f, "unknown action type: {name}")
            }
            NavError::ReplyRequired(action) => {
                write!(f, "{action} requires a reply handle, not a wire payload")
            }
        }
    }
}

impl std::error::Error for NavError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            NavError::UnknownComponent("Detail".into()).to_string(),
            "unknown component: Detail"
        );
        assert_eq!(
            NavError::DuplicateIdentity(DestinationId(4)).to_string(),
            "duplicate destination identity: 4"
        );
        assert_eq!(
            NavError::MalformedPayload {
                action: "DISPATCH_PUSH",
                detail: "missing componentName".into(),
            }
            .to_string(),
            "malformed DISPATCH_PUSH payload: missing componentName"
        );
        assert_eq!(
            NavError::UnknownAction("DISPATCH_WARP".into()).to_string(),
            "unknown action type: DISPATCH_WARP"
        );
    }
}
