//! Ergonomic testing utilities for resource reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use resource_reducers_core::action::Action;
use resource_reducers_core::error::ReducerError;
use resource_reducers_core::reducer::ResourceReducer;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for state assertion functions
type StateAssertion = Box<dyn FnOnce(&Value)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&ReducerError)>;

/// Fluent API for testing resource reducers with Given-When-Then syntax
///
/// Actions passed to [`ReducerTest::when_action`] are dispatched in order,
/// each against the previous result.
///
/// # Example
///
/// ```
/// use resource_reducers_core::prelude::*;
/// use resource_reducers_testing::ReducerTest;
/// use serde_json::json;
///
/// let reducer = make_reducer(ResourceConfig::new("foo", "byId", json!({ "byId": {} })));
///
/// ReducerTest::new(reducer)
///     .given_initial_state()
///     .when_action(Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Start))
///     .then_state(|state| {
///         assert_eq!(state["collectionPending"]["fetching"], json!(true));
///     })
///     .run();
/// ```
pub struct ReducerTest {
    reducer: ResourceReducer,
    initial_state: Option<Arc<Value>>,
    given: bool,
    actions: Vec<Action>,
    state_assertions: Vec<StateAssertion>,
    error_assertions: Vec<ErrorAssertion>,
    expect_unchanged: bool,
}

impl ReducerTest {
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: ResourceReducer) -> Self {
        Self {
            reducer,
            initial_state: None,
            given: false,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            error_assertions: Vec::new(),
            expect_unchanged: false,
        }
    }

    /// Start from an existing slice (Given)
    #[must_use]
    pub fn given_state(self, state: Value) -> Self {
        self.given_shared_state(Arc::new(state))
    }

    /// Start from an existing shared slice (Given)
    #[must_use]
    pub fn given_shared_state(mut self, state: Arc<Value>) -> Self {
        self.initial_state = Some(state);
        self.given = true;
        self
    }

    /// Start from an uninitialized slice (Given)
    #[must_use]
    pub fn given_initial_state(mut self) -> Self {
        self.initial_state = None;
        self.given = true;
        self
    }

    /// Dispatch an action (When)
    #[must_use]
    pub fn when_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Value) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Expect the final state to be the very `Arc` the test started from (Then)
    #[must_use]
    pub const fn then_unchanged(mut self) -> Self {
        self.expect_unchanged = true;
        self
    }

    /// Expect a dispatch to fail and inspect the error (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&ReducerError) + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no state or action is set, if a dispatch fails without an
    /// error assertion (or succeeds with one), or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    pub fn run(self) {
        assert!(
            self.given,
            "Initial state must be set with given_state() or given_initial_state()"
        );
        assert!(!self.actions.is_empty(), "Action must be set with when_action()");

        let start = self
            .initial_state
            .unwrap_or_else(|| Arc::clone(self.reducer.initial_state()));
        let mut state = Arc::clone(&start);

        for action in &self.actions {
            match self.reducer.reduce(Some(&state), action) {
                Ok(next) => state = next,
                Err(error) => {
                    if self.error_assertions.is_empty() {
                        panic!("Reducer failed on `{}`: {error}", action.action_type);
                    }
                    for assertion in self.error_assertions {
                        assertion(&error);
                    }
                    return;
                },
            }
        }

        assert!(
            self.error_assertions.is_empty(),
            "Expected the reducer to fail, but every action succeeded"
        );

        if self.expect_unchanged {
            assertions::assert_same_state(&start, &state);
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

/// Helper assertions for reducer results
pub mod assertions {
    use resource_reducers_core::codec::Verb;
    use resource_reducers_core::lifecycle::{PENDING, pending_key};
    use serde_json::Value;
    use std::sync::Arc;

    /// Assert that two states are the same allocation
    ///
    /// # Panics
    ///
    /// Panics if `after` is a different `Arc` than `before`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_same_state(before: &Arc<Value>, after: &Arc<Value>) {
        assert!(
            Arc::ptr_eq(before, after),
            "Expected the original state reference, got a new one: {after}"
        );
    }

    /// Assert that a new state was produced
    ///
    /// # Panics
    ///
    /// Panics if `after` is the same `Arc` as `before`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_new_state(before: &Arc<Value>, after: &Arc<Value>) {
        assert!(
            !Arc::ptr_eq(before, after),
            "Expected a new state reference, got the original: {after}"
        );
    }

    /// Assert the per-id pending flag for a built-in verb
    ///
    /// # Panics
    ///
    /// Panics if `verb` is custom or the flag differs from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_pending(slice: &Value, verb: &Verb, id: &str, expected: Option<bool>) {
        let Some(key) = pending_key(verb) else {
            panic!("`{verb}` has no pending flag");
        };
        let actual = slice
            .get(PENDING)
            .and_then(|pending| pending.get(key))
            .and_then(|flags| flags.get(id))
            .and_then(Value::as_bool);
        assert_eq!(
            actual, expected,
            "Unexpected `{key}` flag for `{id}` in {slice}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_reducers_core::codec::{Lifecycle, Verb};
    use resource_reducers_core::config::ResourceConfig;
    use resource_reducers_core::reducer::{ResourceContext, make_reducer, sub_reducer};
    use serde_json::json;

    fn reducer() -> ResourceReducer {
        make_reducer(ResourceConfig::new("foo", "byId", json!({ "byId": {} })))
    }

    #[test]
    fn test_reducer_test_start() {
        ReducerTest::new(reducer())
            .given_initial_state()
            .when_action(Action::lifecycle(&Verb::Remove, "foo", Lifecycle::Start).with_reference_id("1"))
            .then_state(|state| {
                assertions::assert_pending(state, &Verb::Remove, "1", Some(true));
            })
            .run();
    }

    #[test]
    fn test_reducer_test_sequence() {
        ReducerTest::new(reducer())
            .given_state(json!({ "byId": {} }))
            .when_action(Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Start).with_reference_id("1"))
            .when_action(
                Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Success)
                    .with_reference_id("1")
                    .with_payload(json!({ "id": "1" })),
            )
            .then_state(|state| {
                assertions::assert_pending(state, &Verb::Fetch, "1", Some(false));
                assert_eq!(state["byId"]["1"], json!({ "id": "1" }));
            })
            .run();
    }

    #[test]
    fn test_reducer_test_unchanged() {
        ReducerTest::new(reducer())
            .given_state(json!({ "byId": {} }))
            .when_action(Action::init())
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_reducer_test_error() {
        let failing = make_reducer(
            ResourceConfig::new("foo", "byId", json!({}))
                .with_custom_reducer("makeFailing", |_: &ResourceContext| {
                    sub_reducer(|_, _| Err("nope".into()))
                }),
        );

        ReducerTest::new(failing)
            .given_initial_state()
            .when_action(Action::new("CUSTOM_foo"))
            .then_error(|error| {
                assert!(matches!(error, ReducerError::SubReducer { name, .. } if name == "makeFailing"));
            })
            .run();
    }

    #[test]
    fn test_assertions_state_identity() {
        let state = Arc::new(json!({}));
        assertions::assert_same_state(&state, &Arc::clone(&state));
        assertions::assert_new_state(&state, &Arc::new(json!({})));
    }
}
