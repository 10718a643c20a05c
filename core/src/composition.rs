//! Combining resource reducers into a root reducer.
//!
//! A host container keeps one slice per resource at `state[resource]`.
//! [`combine_resources`] builds that routing for callers without their own
//! container: each resource reducer sees only its own slice, and the root
//! keeps its identity when no slice changed.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::action::Action;
//! use resource_reducers_core::composition::combine_resources;
//! use resource_reducers_core::config::ResourceConfig;
//! use resource_reducers_core::reducer::make_reducer;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = combine_resources(vec![
//!     make_reducer(ResourceConfig::new("foo", "byId", json!({ "byId": {} }))),
//!     make_reducer(ResourceConfig::new("bar", "byId", json!({ "byId": {} }))),
//! ]);
//!
//! let state = root.reduce(None, &Action::init())?;
//! assert_eq!(*state, json!({ "foo": { "byId": {} }, "bar": { "byId": {} } }));
//!
//! let next = root.reduce(Some(&state), &Action::new("FETCH_baz_START"))?;
//! assert!(Arc::ptr_eq(&state, &next));
//! # Ok(())
//! # }
//! ```

use crate::action::Action;
use crate::error::Result;
use crate::reducer::ResourceReducer;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Combine resource reducers into a reducer over the root state.
#[must_use]
pub fn combine_resources(reducers: Vec<ResourceReducer>) -> CombinedResources {
    CombinedResources { reducers }
}

/// Root reducer routing each resource reducer to `state[resource]`.
///
/// Created by [`combine_resources`].
#[derive(Debug)]
pub struct CombinedResources {
    reducers: Vec<ResourceReducer>,
}

impl CombinedResources {
    /// The combined reducers, in registration order.
    #[must_use]
    pub fn reducers(&self) -> &[ResourceReducer] {
        &self.reducers
    }

    /// Find the reducer registered for `resource`.
    #[must_use]
    pub fn reducer(&self, resource: &str) -> Option<&ResourceReducer> {
        self.reducers
            .iter()
            .find(|reducer| reducer.context().resource == resource)
    }

    /// Compute the next root state.
    ///
    /// Missing slices are filled with their resource's initial state. Slices
    /// run in registration order and the first failure aborts the dispatch.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a resource reducer.
    pub fn reduce(&self, state: Option<&Arc<Value>>, action: &Action) -> Result<Arc<Value>> {
        let current = state.and_then(|root| root.as_object());
        let mut next: Option<Map<String, Value>> = None;

        for reducer in &self.reducers {
            let resource = &reducer.context().resource;
            let existing = current.and_then(|root| root.get(resource));

            if existing.is_some() && !reducer.handles(action) {
                continue;
            }

            if existing.is_none() {
                tracing::trace!(%resource, "Initializing missing resource slice");
            }

            let slice = existing.map(|value| Arc::new(value.clone()));
            let reduced = reducer.reduce(slice.as_ref(), action)?;
            if slice.as_ref().is_some_and(|slice| Arc::ptr_eq(slice, &reduced)) {
                continue;
            }

            next.get_or_insert_with(|| current.cloned().unwrap_or_default())
                .insert(resource.clone(), Arc::unwrap_or_clone(reduced));
        }

        Ok(match (next, state) {
            (Some(root), _) => Arc::new(Value::Object(root)),
            (None, Some(root)) => Arc::clone(root),
            (None, None) => Arc::new(Value::Object(Map::new())),
        })
    }
}
