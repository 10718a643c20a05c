//! Actions consumed by resource reducers.
//!
//! Actions are produced outside this crate (by whatever layer talks to the
//! API) and follow the JSON shape
//! `{ type, meta?: { referenceId? }, errors?, payload? }`. The reducer only
//! ever inspects `type`, `meta.referenceId`, `errors` and `payload`.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::action::Action;
//! use resource_reducers_core::codec::{Lifecycle, Verb};
//!
//! let action = Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Failure)
//!     .with_reference_id("789")
//!     .with_errors(vec!["e".into()]);
//!
//! assert_eq!(action.action_type, "FETCH_foo_FAILURE");
//! assert_eq!(action.reference_id(), Some("789"));
//! ```

use crate::codec::{Lifecycle, Verb, action_type};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action type dispatched by the host container when it bootstraps.
pub const INIT: &str = "@@INIT";

/// Optional metadata attached to an action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMeta {
    /// Id of the single entity this action concerns; `None` targets the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// A dispatched action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Either convention-shaped (`VERB_RESOURCE_LIFECYCLE`) or an opaque external type.
    #[serde(rename = "type")]
    pub action_type: String,

    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActionMeta>,

    /// Errors reported by a failed operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,

    /// Operation result; its shape is owned by the action producer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Action {
    /// Create a bare action of the given type.
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            meta: None,
            errors: None,
            payload: None,
        }
    }

    /// The `@@INIT` bootstrap action.
    #[must_use]
    pub fn init() -> Self {
        Self::new(INIT)
    }

    /// Create an action following the `VERB_RESOURCE_LIFECYCLE` convention.
    #[must_use]
    pub fn lifecycle(verb: &Verb, resource: &str, lifecycle: Lifecycle) -> Self {
        Self::new(action_type(verb, resource, Some(lifecycle)))
    }

    /// Target a single entity.
    #[must_use]
    pub fn with_reference_id(mut self, id: impl Into<String>) -> Self {
        self.meta = Some(ActionMeta {
            reference_id: Some(id.into()),
        });
        self
    }

    /// Attach errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<Value>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// `meta.referenceId`, if present.
    #[must_use]
    pub fn reference_id(&self) -> Option<&str> {
        self.meta.as_ref()?.reference_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    #[allow(clippy::unwrap_used)] // Test will fail if deserialization fails
    fn test_deserializes_wire_shape() {
        let action: Action = serde_json::from_value(json!({
            "type": "FETCH_foo_FAILURE",
            "errors": ["e"],
            "meta": { "referenceId": "789" }
        }))
        .unwrap();

        assert_eq!(action.action_type, "FETCH_foo_FAILURE");
        assert_eq!(action.reference_id(), Some("789"));
        assert_eq!(action.errors, Some(vec![json!("e")]));
        assert!(action.payload.is_none());
    }

    #[test]
    fn test_reference_id_absent_without_meta() {
        assert_eq!(Action::init().reference_id(), None);

        let empty_meta = Action {
            meta: Some(ActionMeta::default()),
            ..Action::new("FETCH_foo_START")
        };
        assert_eq!(empty_meta.reference_id(), None);
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let value = serde_json::to_value(Action::new("UPDATE_foo_START")).ok();
        assert_eq!(value, Some(json!({ "type": "UPDATE_foo_START" })));
    }
}
