//! # Wire Decoding
//!
//! Raw host events arrive as an action-type string plus an untyped JSON
//! payload. This module is the single place that shape is trusted: decoding
//! builds a typed [`Action`] once, and everything downstream pattern-matches
//! instead of casting. A payload that does not match its action type fails
//! here with a diagnostic and touches no navigation state.
//!
//! Current-route queries are the one action that cannot be decoded from a
//! payload: they carry a live reply handle, so transports construct
//! [`Action::CurrentRoute`] themselves.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::bridge::registry::ComponentSpec;
use crate::core::action::{Action, Root};
use crate::core::error::NavError;

pub const SET_ROOT: &str = "SET_ROOT";
pub const DISPATCH_PUSH: &str = "DISPATCH_PUSH";
pub const DISPATCH_POP: &str = "DISPATCH_POP";
pub const DISPATCH_POP_TO_ROOT: &str = "DISPATCH_POP_TO_ROOT";
pub const DISPATCH_PRESENT: &str = "DISPATCH_PRESENT";
pub const DISPATCH_DISMISS: &str = "DISPATCH_DISMISS";
pub const CURRENT_ROUTE: &str = "CURRENT_ROUTE";
pub const SET_RESULT: &str = "SET_RESULT";
pub const REGISTER_REACT_COMPONENT: &str = "REGISTER_REACT_COMPONENT";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigatePayload {
    component_name: String,
    #[serde(default)]
    props: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload {
    component_name: String,
    #[serde(default)]
    component_definition: Value,
}

fn parse<T: DeserializeOwned>(action: &'static str, payload: Value) -> Result<T, NavError> {
    serde_json::from_value(payload).map_err(|err| NavError::MalformedPayload {
        action,
        detail: err.to_string(),
    })
}

/// Decodes one raw host event into a typed [`Action`].
///
/// Pop, pop-to-root, and dismiss carry no payload; whatever arrives with
/// them is ignored. Unknown action-type strings are rejected, not dropped,
/// so transports can log exactly what they received.
pub fn decode(action_type: &str, payload: Value) -> Result<Action, NavError> {
    match action_type {
        SET_ROOT => {
            let root: Root = parse(SET_ROOT, payload)?;
            Ok(Action::SetRoot(root))
        }
        DISPATCH_PUSH => {
            let navigate: NavigatePayload = parse(DISPATCH_PUSH, payload)?;
            Ok(Action::Push {
                name: navigate.component_name,
                props: navigate.props,
            })
        }
        DISPATCH_PRESENT => {
            let navigate: NavigatePayload = parse(DISPATCH_PRESENT, payload)?;
            Ok(Action::Present {
                name: navigate.component_name,
                props: navigate.props,
            })
        }
        DISPATCH_POP => Ok(Action::Pop),
        DISPATCH_POP_TO_ROOT => Ok(Action::PopToRoot),
        DISPATCH_DISMISS => Ok(Action::Dismiss),
        SET_RESULT => Ok(Action::SetResult(parse(SET_RESULT, payload)?)),
        CURRENT_ROUTE => Err(NavError::ReplyRequired(CURRENT_ROUTE)),
        REGISTER_REACT_COMPONENT => {
            let register: RegisterPayload = parse(REGISTER_REACT_COMPONENT, payload)?;
            let spec = ComponentSpec::from_definition(
                &register.component_name,
                register.component_definition,
            );
            Ok(Action::RegisterComponent {
                name: register.component_name,
                spec,
            })
        }
        unknown => Err(NavError::UnknownAction(unknown.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::core::action::Page;

    #[test]
    fn test_decode_set_root_stack() {
        let action = decode(SET_ROOT, json!({"type": "stack", "page": {"rootName": "Home"}}))
            .unwrap();
        match action {
            Action::SetRoot(Root::Stack { page }) => {
                assert_eq!(
                    page,
                    Page {
                        root_name: "Home".into()
                    }
                );
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_decode_push_with_and_without_props() {
        let bare = decode(DISPATCH_PUSH, json!({"componentName": "Detail"})).unwrap();
        match bare {
            Action::Push { name, props } => {
                assert_eq!(name, "Detail");
                assert!(props.is_none());
            }
            other => panic!("unexpected action: {other:?}"),
        }

        let with_props = decode(
            DISPATCH_PRESENT,
            json!({"componentName": "Picker", "props": {"id": 42}}),
        )
        .unwrap();
        match with_props {
            Action::Present { name, props } => {
                assert_eq!(name, "Picker");
                assert_eq!(props.unwrap()["id"], json!(42));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_payloadless_actions_ignore_whatever_arrives() {
        assert!(matches!(decode(DISPATCH_POP, Value::Null), Ok(Action::Pop)));
        assert!(matches!(
            decode(DISPATCH_POP_TO_ROOT, json!({"stray": true})),
            Ok(Action::PopToRoot)
        ));
        assert!(matches!(
            decode(DISPATCH_DISMISS, json!(17)),
            Ok(Action::Dismiss)
        ));
    }

    #[test]
    fn test_malformed_push_payload_names_the_action() {
        let err = decode(DISPATCH_PUSH, json!({"props": {}})).unwrap_err();
        match err {
            NavError::MalformedPayload { action, detail } => {
                assert_eq!(action, DISPATCH_PUSH);
                assert!(detail.contains("componentName"), "detail was: {detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_root_tag_is_rejected() {
        let err = decode(SET_ROOT, json!({"type": "drawer"})).unwrap_err();
        assert!(matches!(
            err,
            NavError::MalformedPayload {
                action: SET_ROOT,
                ..
            }
        ));
    }

    #[test]
    fn test_set_result_requires_an_object() {
        let ok = decode(SET_RESULT, json!({"picked": "blue"})).unwrap();
        assert!(matches!(ok, Action::SetResult(data) if data["picked"] == json!("blue")));

        let err = decode(SET_RESULT, json!([1, 2])).unwrap_err();
        assert!(matches!(
            err,
            NavError::MalformedPayload {
                action: SET_RESULT,
                ..
            }
        ));
    }

    #[test]
    fn test_register_component_promotes_view_class() {
        let action = decode(
            REGISTER_REACT_COMPONENT,
            json!({
                "componentName": "Detail",
                "componentDefinition": {"viewClass": "screens.Detail"}
            }),
        )
        .unwrap();
        match action {
            Action::RegisterComponent { name, spec } => {
                assert_eq!(name, "Detail");
                assert_eq!(spec.view_class, "screens.Detail");
            }
            other => panic!("unexpected action: {other:?}"),
        }

        // Without a definition the name itself is the view class.
        let fallback = decode(
            REGISTER_REACT_COMPONENT,
            json!({"componentName": "Settings"}),
        )
        .unwrap();
        match fallback {
            Action::RegisterComponent { spec, .. } => {
                assert_eq!(spec.view_class, "Settings");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_current_route_needs_a_live_reply() {
        let err = decode(CURRENT_ROUTE, Value::Null).unwrap_err();
        assert!(matches!(err, NavError::ReplyRequired(CURRENT_ROUTE)));
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let err = decode("OPEN_DRAWER", Value::Null).unwrap_err();
        assert!(matches!(err, NavError::UnknownAction(name) if name == "OPEN_DRAWER"));
    }
}
