use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;
use serde_json::Value;

/// A renderable component as the host described it: the native view class to
/// instantiate plus whatever definition blob the host attached at
/// registration time. The definition is opaque to navigation; it rides along
/// so the renderer gets back exactly what was registered.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub view_class: String,
    pub definition: Value,
}

impl ComponentSpec {
    pub fn new(view_class: impl Into<String>) -> Self {
        Self {
            view_class: view_class.into(),
            definition: Value::Null,
        }
    }

    /// Builds a spec from a raw registration definition. A `viewClass` field
    /// in the definition wins; otherwise the registered name doubles as the
    /// view class, which is how hosts with one class per component register.
    pub fn from_definition(name: &str, definition: Value) -> Self {
        let view_class = definition
            .get("viewClass")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string();
        Self {
            view_class,
            definition,
        }
    }
}

/// Name-to-spec mapping shared between the host (which registers) and the
/// navigation core (which resolves names while building destinations).
///
/// Registration is last-write-wins and cannot fail; hosts re-register the
/// same names freely across reloads. Resolving an unregistered name returns
/// `None` and the caller decides how loud to be about it.
pub trait ComponentRegistry: Send + Sync {
    fn register(&self, name: &str, spec: ComponentSpec);
    fn resolve(&self, name: &str) -> Option<ComponentSpec>;
}

/// Stock registry backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryComponents {
    components: Mutex<HashMap<String, ComponentSpec>>,
}

impl InMemoryComponents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentRegistry for InMemoryComponents {
    fn register(&self, name: &str, spec: ComponentSpec) {
        let mut components = self.components.lock().unwrap();
        if components.insert(name.to_string(), spec).is_some() {
            debug!("Re-registered component: {name}");
        }
    }

    fn resolve(&self, name: &str) -> Option<ComponentSpec> {
        self.components.lock().unwrap().get(name).cloned()
    }
}
