//! Error types for reducer execution and configuration.

use thiserror::Error;

/// Result type alias for reducer operations.
pub type Result<T> = std::result::Result<T, ReducerError>;

/// Error type returned by custom sub-reducers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by a generated resource reducer.
///
/// Unmatched actions and missing lookup targets are not errors and never
/// produce one of these. Everything here is returned synchronously from the
/// `reduce` call that caused it; nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum ReducerError {
    /// A built-in lifecycle reducer was handed a state that is not a JSON object.
    #[error("State for resource `{resource}` must be an object to apply `{action_type}`")]
    NonObjectState {
        /// Resource the reducer was built for
        resource: String,
        /// Action type that required an object state
        action_type: String,
    },

    /// A custom sub-reducer failed.
    #[error("Custom reducer `{name}` failed: {source}")]
    SubReducer {
        /// Name the custom reducer factory was registered under
        name: String,
        /// The failure reported by the sub-reducer
        #[source]
        source: BoxError,
    },
}

/// Problems detected by [`crate::config::ResourceConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The resource name is empty.
    #[error("Resource name must not be empty")]
    EmptyResource,

    /// The resource name cannot appear inside an action type.
    #[error("Invalid resource name `{0}`: must not contain whitespace")]
    InvalidResourceName(String),

    /// The entities path is empty.
    #[error("Entities path must not be empty")]
    EmptyEntitiesPath,

    /// Two custom reducer factories share a name.
    #[error("Custom reducer `{0}` is registered more than once")]
    DuplicateCustomReducer(String),

    /// The JSON configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}
