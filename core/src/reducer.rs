//! Resource reducer factory.
//!
//! [`make_reducer`] turns a [`ResourceConfig`] into a [`ResourceReducer`]:
//! the built-in lifecycle reducers chained with any number of custom
//! sub-reducers. Every call follows the same rule:
//!
//! 1. An action that neither follows `VERB_RESOURCE_LIFECYCLE` for this
//!    resource nor appears in the external allow-list returns the input state.
//! 2. A convention match with a built-in verb and a lifecycle runs the
//!    matching lifecycle reducer.
//! 3. Custom reducers run in declaration order, each seeing the previous
//!    one's output.
//! 4. If the result is value-equal to the input, the input `Arc` is returned.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::action::Action;
//! use resource_reducers_core::config::ResourceConfig;
//! use resource_reducers_core::reducer::{make_reducer, sub_reducer, ResourceContext};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResourceConfig::new("foo", "byId", json!({ "byId": {} }))
//!     .with_external_action_type("MY_CUSTOM_ACTION_TYPE")
//!     .with_custom_reducer("makeHelloReducer", |_: &ResourceContext| {
//!         sub_reducer(|state, action| {
//!             if action.action_type == "MY_CUSTOM_ACTION_TYPE" {
//!                 state["hello"] = json!("world");
//!             }
//!             Ok(())
//!         })
//!     });
//! let reducer = make_reducer(config);
//!
//! let state = reducer.reduce(None, &Action::init())?;
//! assert!(Arc::ptr_eq(&state, reducer.initial_state()));
//!
//! let next = reducer.reduce(Some(&state), &Action::new("MY_CUSTOM_ACTION_TYPE"))?;
//! assert_eq!(*next, json!({ "byId": {}, "hello": "world" }));
//! # Ok(())
//! # }
//! ```

use crate::action::Action;
use crate::codec::{ActionDescriptor, ActionTypeCodec, ActionTypeMatch};
use crate::config::ResourceConfig;
use crate::error::{BoxError, ReducerError, Result};
use crate::lifecycle;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// What a custom reducer factory learns about the resource it serves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceContext {
    /// Resource name.
    pub resource: String,
    /// Key of the entity map inside the slice.
    pub entities_path: String,
}

/// A step in the reducer chain.
///
/// Sub-reducers update the working copy of the slice in place. They only
/// run for actions relevant to the resource, but must ignore action types
/// they do not handle themselves.
pub trait SubReducer: Send + Sync {
    /// Apply `action` to `state`.
    ///
    /// # Errors
    ///
    /// Any error aborts the dispatch and is returned to the caller as the
    /// source of [`ReducerError::SubReducer`].
    fn reduce(&self, state: &mut Value, action: &Action) -> std::result::Result<(), BoxError>;
}

impl<F> SubReducer for F
where
    F: Fn(&mut Value, &Action) -> std::result::Result<(), BoxError> + Send + Sync,
{
    fn reduce(&self, state: &mut Value, action: &Action) -> std::result::Result<(), BoxError> {
        self(state, action)
    }
}

/// Builds a [`SubReducer`] once per reducer construction.
pub trait ReducerFactory: Send + Sync {
    /// Produce the sub-reducer for the resource described by `context`.
    fn make(&self, context: &ResourceContext) -> Box<dyn SubReducer>;
}

impl<F, R> ReducerFactory for F
where
    F: Fn(&ResourceContext) -> R + Send + Sync,
    R: SubReducer + 'static,
{
    fn make(&self, context: &ResourceContext) -> Box<dyn SubReducer> {
        Box::new(self(context))
    }
}

/// Pin a closure to the [`SubReducer`] signature so its argument types infer.
pub const fn sub_reducer<F>(reducer: F) -> F
where
    F: Fn(&mut Value, &Action) -> std::result::Result<(), BoxError> + Send + Sync,
{
    reducer
}

/// Named custom reducer factories, in declaration order.
#[derive(Clone, Default)]
pub struct CustomReducerFactories {
    factories: Vec<(String, Arc<dyn ReducerFactory>)>,
}

impl CustomReducerFactories {
    /// Append a factory.
    pub fn push<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: ReducerFactory + 'static,
    {
        self.factories.push((name.into(), Arc::new(factory)));
    }

    /// Factory names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factory is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for CustomReducerFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Build the reducer for one resource.
///
/// Every custom reducer factory is invoked exactly once, here.
#[must_use]
pub fn make_reducer(config: ResourceConfig) -> ResourceReducer {
    ResourceReducer::new(config)
}

/// The composed reducer for one resource.
///
/// Holds no mutable state; all state lives in the slice passed to
/// [`ResourceReducer::reduce`].
pub struct ResourceReducer {
    context: ResourceContext,
    codec: ActionTypeCodec,
    initial_state: Arc<Value>,
    custom_reducers: SmallVec<[(String, Box<dyn SubReducer>); 4]>,
}

impl ResourceReducer {
    /// Build the reducer, invoking each custom reducer factory once.
    #[must_use]
    pub fn new(config: ResourceConfig) -> Self {
        let context = config.context();
        let codec = ActionTypeCodec::new(config.resource, config.external_action_types);
        let custom_reducers = config
            .custom_reducer_factories
            .factories
            .iter()
            .map(|(name, factory)| (name.clone(), factory.make(&context)))
            .collect();

        tracing::debug!(
            resource = %context.resource,
            custom_reducers = config.custom_reducer_factories.len(),
            "Built resource reducer"
        );

        Self {
            context,
            codec,
            initial_state: Arc::new(config.initial_state),
            custom_reducers,
        }
    }

    /// Resource name and entities path.
    #[must_use]
    pub const fn context(&self) -> &ResourceContext {
        &self.context
    }

    /// The action type codec for this resource.
    #[must_use]
    pub const fn codec(&self) -> &ActionTypeCodec {
        &self.codec
    }

    /// The state used for an uninitialized slice.
    #[must_use]
    pub const fn initial_state(&self) -> &Arc<Value> {
        &self.initial_state
    }

    /// Whether `action` can change this resource's slice at all.
    #[must_use]
    pub fn handles(&self, action: &Action) -> bool {
        self.codec.classify(&action.action_type).is_relevant()
    }

    /// Compute the next state.
    ///
    /// `None` stands for an uninitialized slice and is replaced by the
    /// configured initial state. The returned `Arc` is the input one whenever
    /// the result is value-equal to the input.
    ///
    /// # Errors
    ///
    /// - [`ReducerError::NonObjectState`] if a built-in lifecycle reducer
    ///   matched but the slice is not a JSON object.
    /// - [`ReducerError::SubReducer`] if a custom reducer failed.
    pub fn reduce(&self, state: Option<&Arc<Value>>, action: &Action) -> Result<Arc<Value>> {
        let current = state.map_or_else(|| Arc::clone(&self.initial_state), Arc::clone);

        let matched = self.codec.classify(&action.action_type);
        if !matched.is_relevant() {
            tracing::trace!(
                resource = %self.context.resource,
                action_type = %action.action_type,
                "Ignoring unrelated action"
            );
            return Ok(current);
        }

        let mut next = Value::clone(&current);

        if let ActionTypeMatch::Convention(ActionDescriptor {
            verb,
            lifecycle: Some(phase),
        }) = &matched
        {
            if let Some(reducer) = lifecycle::reducer_for(verb, *phase) {
                let Value::Object(slice) = &mut next else {
                    return Err(ReducerError::NonObjectState {
                        resource: self.context.resource.clone(),
                        action_type: action.action_type.clone(),
                    });
                };
                tracing::trace!(resource = %self.context.resource, %verb, %phase, "Applying lifecycle reducer");
                reducer(slice, action, &self.context);
            }
        }

        for (name, reducer) in &self.custom_reducers {
            tracing::trace!(resource = %self.context.resource, reducer = %name, "Applying custom reducer");
            reducer
                .reduce(&mut next, action)
                .map_err(|source| ReducerError::SubReducer {
                    name: name.clone(),
                    source,
                })?;
        }

        if next == *current {
            tracing::trace!(
                resource = %self.context.resource,
                action_type = %action.action_type,
                "No change, keeping state identity"
            );
            Ok(current)
        } else {
            Ok(Arc::new(next))
        }
    }
}

impl fmt::Debug for ResourceReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceReducer")
            .field("context", &self.context)
            .field("codec", &self.codec)
            .field(
                "custom_reducers",
                &self.custom_reducers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
