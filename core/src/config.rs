//! Resource configuration.
//!
//! The declarative part of a resource (name, entities path, initial state,
//! external action types) deserializes from JSON. Custom reducer factories
//! are code and are attached programmatically.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::config::ResourceConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResourceConfig::from_json(
//!     r#"{
//!         "resource": "foo",
//!         "entitiesPath": "byId",
//!         "initialState": { "byId": {} },
//!         "externalActionTypes": ["MY_CUSTOM_ACTION_TYPE"]
//!     }"#,
//! )?;
//!
//! config.validate()?;
//! assert_eq!(config.context().resource, "foo");
//! # Ok(())
//! # }
//! ```

use crate::error::ConfigError;
use crate::reducer::{CustomReducerFactories, ReducerFactory, ResourceContext};
use crate::selectors::SelectorConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Configuration for one resource's reducer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// Name used inside action types and generated selector names.
    pub resource: String,

    /// Key under which normalized entities live in the resource slice.
    pub entities_path: String,

    /// State returned for an uninitialized slice.
    #[serde(default = "empty_object")]
    pub initial_state: Value,

    /// Types outside the convention that custom reducers may react to.
    #[serde(default)]
    pub external_action_types: Vec<String>,

    /// Custom reducer factories, run in declaration order.
    #[serde(skip)]
    pub custom_reducer_factories: CustomReducerFactories,
}

impl ResourceConfig {
    /// Create a configuration with no custom reducers or external types.
    #[must_use]
    pub fn new(
        resource: impl Into<String>,
        entities_path: impl Into<String>,
        initial_state: Value,
    ) -> Self {
        Self {
            resource: resource.into(),
            entities_path: entities_path.into(),
            initial_state,
            external_action_types: Vec::new(),
            custom_reducer_factories: CustomReducerFactories::default(),
        }
    }

    /// Parse the declarative fields from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the JSON is malformed or lacks
    /// `resource` / `entitiesPath`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Allow custom reducers to see `action_type` even though it does not
    /// follow the resource's naming convention.
    #[must_use]
    pub fn with_external_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.external_action_types.push(action_type.into());
        self
    }

    /// Append a custom reducer factory.
    ///
    /// The factory runs once, when the reducer is built, and the sub-reducer
    /// it returns runs after the built-in lifecycle reducer and after every
    /// previously appended custom reducer.
    #[must_use]
    pub fn with_custom_reducer<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: ReducerFactory + 'static,
    {
        self.custom_reducer_factories.push(name, factory);
        self
    }

    /// Resource name and entities path, as handed to reducer factories.
    #[must_use]
    pub fn context(&self) -> ResourceContext {
        ResourceContext {
            resource: self.resource.clone(),
            entities_path: self.entities_path.clone(),
        }
    }

    /// Matching selector configuration.
    #[must_use]
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            entities_path: self.entities_path.clone(),
            resource: self.resource.clone(),
        }
    }

    /// Check the configuration for mistakes the reducer itself never reports.
    ///
    /// Reducers built from an invalid configuration still run; this is an
    /// opt-in check for callers that assemble configuration at runtime.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource.is_empty() {
            return Err(ConfigError::EmptyResource);
        }
        if self.resource.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidResourceName(self.resource.clone()));
        }
        if self.entities_path.is_empty() {
            return Err(ConfigError::EmptyEntitiesPath);
        }

        let mut seen = HashSet::new();
        for name in self.custom_reducer_factories.names() {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateCustomReducer(name.to_string()));
            }
        }

        Ok(())
    }
}
