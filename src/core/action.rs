//! # Actions
//!
//! Everything the external controller can ask of the navigator becomes an
//! [`Action`]. The JS side wants a new screen? That's `Action::Push`. It
//! asks where it is? That's `Action::CurrentRoute` carrying a one-shot reply
//! handle.
//!
//! The enum is closed and built exactly once, at the boundary where the raw
//! event arrives (see [`bridge::wire`](crate::bridge::wire)). Every
//! transition in the controller pattern-matches on a variant instead of
//! trusting an assumed payload shape, so a mismatched payload can only fail
//! at the boundary, with a diagnostic, never inside the state machine.

use std::fmt;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bridge::registry::ComponentSpec;
use crate::core::graph::DestinationId;

/// Navigation mode tag. Three tags, three [`Root`] variants; mismatched
/// pairs are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootType {
    Tabs,
    Stack,
    Screen,
}

/// Page descriptor anchoring a stack or single-screen root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub root_name: String,
}

/// The navigation mode and initial destination configuration. Created once
/// per set-root action; replaces any prior root.
///
/// `Stack` and `Screen` build identical start destinations from
/// `page.root_name`; they differ only in the mode the hosting surface runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Root {
    Tabs {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<serde_json::Map<String, Value>>,
    },
    Stack {
        page: Page,
    },
    Screen {
        page: Page,
    },
}

impl Root {
    pub fn root_type(&self) -> RootType {
        match self {
            Root::Tabs { .. } => RootType::Tabs,
            Root::Stack { .. } => RootType::Stack,
            Root::Screen { .. } => RootType::Screen,
        }
    }
}

/// One-shot reply handle for a current-route query.
///
/// Resolved exactly once with the current destination identity (`None` when
/// no root has been set yet). The closure is `Send` so queries can cross a
/// worker-session channel.
pub struct RouteReply(Box<dyn FnOnce(Option<DestinationId>) + Send>);

impl RouteReply {
    pub fn new(reply: impl FnOnce(Option<DestinationId>) + Send + 'static) -> Self {
        Self(Box::new(reply))
    }

    /// A reply paired with a receiver, for hosts that want to block on the
    /// answer. Delivery is advisory: if the receiver is gone, the answer is
    /// dropped.
    pub fn channel() -> (Self, mpsc::Receiver<Option<DestinationId>>) {
        let (tx, rx) = mpsc::channel();
        (
            Self::new(move |id| {
                let _ = tx.send(id);
            }),
            rx,
        )
    }

    pub fn resolve(self, id: Option<DestinationId>) {
        (self.0)(id)
    }
}

impl fmt::Debug for RouteReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RouteReply")
    }
}

/// A typed navigation action, ready for dispatch.
#[derive(Debug)]
pub enum Action {
    SetRoot(Root),
    Push {
        name: String,
        props: Option<serde_json::Map<String, Value>>,
    },
    Pop,
    PopToRoot,
    Present {
        name: String,
        props: Option<serde_json::Map<String, Value>>,
    },
    Dismiss,
    CurrentRoute(RouteReply),
    SetResult(serde_json::Map<String, Value>),
    RegisterComponent {
        name: String,
        spec: ComponentSpec,
    },
}

/// Fieldless discriminant of [`Action`], used as the bus subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetRoot,
    Push,
    Pop,
    PopToRoot,
    Present,
    Dismiss,
    CurrentRoute,
    SetResult,
    RegisterComponent,
}

impl ActionKind {
    /// Every dispatchable kind, in a stable order. Sessions subscribe one
    /// handler per kind at wiring time.
    pub const ALL: [ActionKind; 9] = [
        ActionKind::SetRoot,
        ActionKind::Push,
        ActionKind::Pop,
        ActionKind::PopToRoot,
        ActionKind::Present,
        ActionKind::Dismiss,
        ActionKind::CurrentRoute,
        ActionKind::SetResult,
        ActionKind::RegisterComponent,
    ];
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SetRoot(_) => ActionKind::SetRoot,
            Action::Push { .. } => ActionKind::Push,
            Action::Pop => ActionKind::Pop,
            Action::PopToRoot => ActionKind::PopToRoot,
            Action::Present { .. } => ActionKind::Present,
            Action::Dismiss => ActionKind::Dismiss,
            Action::CurrentRoute(_) => ActionKind::CurrentRoute,
            Action::SetResult(_) => ActionKind::SetResult,
            Action::RegisterComponent { .. } => ActionKind::RegisterComponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_covers_every_variant() {
        assert_eq!(Action::Pop.kind(), ActionKind::Pop);
        assert_eq!(Action::PopToRoot.kind(), ActionKind::PopToRoot);
        assert_eq!(Action::Dismiss.kind(), ActionKind::Dismiss);
        assert_eq!(
            Action::Push {
                name: "Home".into(),
                props: None
            }
            .kind(),
            ActionKind::Push
        );
        assert_eq!(
            Action::SetResult(serde_json::Map::new()).kind(),
            ActionKind::SetResult
        );
    }

    #[test]
    fn test_root_type_tags() {
        let tabs = Root::Tabs { options: None };
        let stack = Root::Stack {
            page: Page {
                root_name: "Home".into(),
            },
        };
        let screen = Root::Screen {
            page: Page {
                root_name: "Home".into(),
            },
        };
        assert_eq!(tabs.root_type(), RootType::Tabs);
        assert_eq!(stack.root_type(), RootType::Stack);
        assert_eq!(screen.root_type(), RootType::Screen);
    }

    #[test]
    fn test_root_wire_tags() {
        let root: Root =
            serde_json::from_str(r#"{"type": "stack", "page": {"rootName": "Home"}}"#).unwrap();
        assert_eq!(
            root,
            Root::Stack {
                page: Page {
                    root_name: "Home".into()
                }
            }
        );

        let tabs: Root = serde_json::from_str(r#"{"type": "tabs"}"#).unwrap();
        assert_eq!(tabs, Root::Tabs { options: None });
    }

    #[test]
    fn test_route_reply_channel_delivers_once() {
        let (reply, rx) = RouteReply::channel();
        reply.resolve(Some(DestinationId(3)));
        assert_eq!(rx.recv().unwrap(), Some(DestinationId(3)));
        // Sender consumed with the reply; the channel is now closed.
        assert!(rx.recv().is_err());
    }
}
