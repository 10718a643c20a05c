//! # Resource Reducers Testing
//!
//! Testing utilities and helpers for resource reducers and selectors.
//!
//! This crate provides:
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for state identity and pending flags
//! - Fixtures mirroring a typical `foo` resource
//! - Property-based testing strategies for action types
//!
//! ## Example
//!
//! ```
//! use resource_reducers_core::prelude::*;
//! use resource_reducers_testing::fixtures;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reducer = make_reducer(fixtures::foo_config());
//! let selectors = make_selectors(fixtures::foo_config().selector_config());
//!
//! let slice = reducer.reduce(None, &Action::init())?;
//! let state = fixtures::root_state(fixtures::RESOURCE, &slice);
//!
//! assert_eq!(selectors.by_id(&state, "123").map(|e| e["name"].clone()), Some("foo".into()));
//! # Ok(())
//! # }
//! ```

/// Given-When-Then reducer harness
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Fixtures shared across tests
///
/// A `foo` resource with entities stored under `byId`, seeded with three
/// entities in insertion order `123`, `456`, `789`.
pub mod fixtures {
    use resource_reducers_core::config::ResourceConfig;
    use serde_json::{Map, Value, json};

    /// Resource name used by the fixtures.
    pub const RESOURCE: &str = "foo";

    /// Entities path used by the fixtures.
    pub const ENTITIES_PATH: &str = "byId";

    /// Seeded initial state.
    #[must_use]
    pub fn foo_initial_state() -> Value {
        json!({
            ENTITIES_PATH: {
                "123": { "id": "123", "name": "foo" },
                "456": { "id": "456", "name": "bar" },
                "789": { "id": "789", "name": "baz" }
            }
        })
    }

    /// Configuration for the `foo` resource with no custom reducers.
    #[must_use]
    pub fn foo_config() -> ResourceConfig {
        ResourceConfig::new(RESOURCE, ENTITIES_PATH, foo_initial_state())
    }

    /// Wrap a slice the way a host container stores it: `{ resource: slice }`.
    #[must_use]
    pub fn root_state(resource: &str, slice: &Value) -> Value {
        let mut root = Map::new();
        root.insert(resource.to_string(), slice.clone());
        Value::Object(root)
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a `tracing` subscriber writing to the test output.
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
///
/// Strategies generating action types relative to a resource name.
pub mod properties {
    use proptest::prelude::*;
    use resource_reducers_core::codec::{Lifecycle, Verb, action_type};

    /// Any built-in verb.
    pub fn builtin_verb() -> impl Strategy<Value = Verb> {
        prop_oneof![Just(Verb::Fetch), Just(Verb::Update), Just(Verb::Remove)]
    }

    /// Any lifecycle phase.
    pub fn lifecycle() -> impl Strategy<Value = Lifecycle> {
        prop::sample::select(Lifecycle::ALL.to_vec())
    }

    /// Convention-shaped action types for `resource`.
    pub fn lifecycle_action_type(resource: &str) -> impl Strategy<Value = String> {
        let resource = resource.to_string();
        (builtin_verb(), lifecycle())
            .prop_map(move |(verb, lifecycle)| action_type(&verb, &resource, Some(lifecycle)))
    }

    /// Action types that never match `resource`: other resources, resources
    /// that merely share a prefix, and types outside the convention.
    pub fn unrelated_action_type(resource: &str) -> impl Strategy<Value = String> {
        let prefixed = resource.to_string();
        let resource = resource.to_string();
        prop_oneof![
            (builtin_verb(), lifecycle(), "[a-z]{1,4}").prop_map(move |(verb, lifecycle, extra)| {
                action_type(&verb, &format!("{prefixed}{extra}"), Some(lifecycle))
            }),
            "@@[A-Z]{2,8}",
            "[A-Z]{3,12}".prop_filter("must not end with the resource", move |ty| {
                !ty.ends_with(&resource)
            }),
        ]
    }
}
