//! # Resource Reducers Core
//!
//! Reducer and selector factories for normalized resource collections.
//!
//! From a small declarative configuration this crate derives, for one
//! resource, a pure reducer handling the fetch/update/remove lifecycle and a
//! fixed family of selectors reading the resulting slice.
//!
//! ## Core Concepts
//!
//! - **Action type convention**: `VERB_RESOURCE_LIFECYCLE`, e.g. `FETCH_foo_START`
//! - **Lifecycle reducers**: built-in handling of start/success/failure for each verb
//! - **Custom reducers**: caller-supplied steps chained after the built-ins
//! - **Selectors**: `getFooById`, `getIsFooFetching`, ... generated from the resource name
//! - **Identity preservation**: an unchanged slice is returned as the same `Arc`
//!
//! ## Example
//!
//! ```
//! use resource_reducers_core::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResourceConfig::new("foo", "byId", json!({ "byId": {} }));
//! let selectors = make_selectors(config.selector_config());
//! let reducer = make_reducer(config);
//!
//! let failure = Action::lifecycle(&Verb::Fetch, "foo", Lifecycle::Failure)
//!     .with_reference_id("789")
//!     .with_errors(vec![json!("e")]);
//! let slice = reducer.reduce(None, &failure)?;
//!
//! let state = json!({ "foo": &*slice });
//! assert_eq!(selectors.errors_by_id(&state, "789"), Some(&vec![json!("e")]));
//! assert_eq!(selectors.errors(&state), None);
//! # Ok(())
//! # }
//! ```

/// Actions consumed by resource reducers
pub mod action;

/// Action type parsing and construction
pub mod codec;

/// Reducer composition across resources
pub mod composition;

/// Resource configuration
pub mod config;

/// Error types
pub mod error;

/// Built-in fetch/update/remove lifecycle reducers
pub mod lifecycle;

/// The resource reducer factory
pub mod reducer;

/// The base selector factory
pub mod selectors;

// Re-export commonly used types
pub use serde_json::{Map, Value};

/// Commonly used items.
pub mod prelude {
    pub use crate::action::{Action, ActionMeta};
    pub use crate::codec::{ActionTypeCodec, ActionTypeMatch, Lifecycle, Verb};
    pub use crate::composition::{CombinedResources, combine_resources};
    pub use crate::config::ResourceConfig;
    pub use crate::error::{BoxError, ConfigError, ReducerError};
    pub use crate::reducer::{
        ResourceContext, ResourceReducer, SubReducer, make_reducer, sub_reducer,
    };
    pub use crate::selectors::{
        BaseSelectors, SelectorConfig, SelectorKind, SelectorProps, make_selectors,
    };
}
