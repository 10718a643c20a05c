//! Action type codec.
//!
//! Action types driving the built-in lifecycle follow the public convention
//! `VERB_RESOURCE_LIFECYCLE`:
//!
//! ```text
//! action-type = verb "_" resource [ "_" lifecycle ]
//! verb        = "FETCH" / "UPDATE" / "REMOVE" / custom-verb
//! custom-verb = word *( "_" word )
//! word        = UPPER *( UPPER / DIGIT )
//! lifecycle   = "START" / "SUCCESS" / "FAILURE"
//! ```
//!
//! The resource segment is matched exactly, so a codec for `foo` never
//! matches `FETCH_foobar_START`, and a codec for `bar` never matches
//! `FETCH_foo_bar_START` since `FETCH_foo` is not a verb. The lifecycle-less form (`CUSTOM_foo`) still
//! pertains to the resource and is handed to custom reducers.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::codec::{ActionTypeCodec, ActionTypeMatch, Lifecycle, Verb};
//!
//! let codec = ActionTypeCodec::new("foo", ["MY_CUSTOM_ACTION_TYPE"]);
//!
//! let ActionTypeMatch::Convention(descriptor) = codec.classify("UPDATE_foo_SUCCESS") else {
//!     panic!("expected a convention match");
//! };
//! assert_eq!(descriptor.verb, Verb::Update);
//! assert_eq!(descriptor.lifecycle, Some(Lifecycle::Success));
//!
//! assert_eq!(codec.classify("MY_CUSTOM_ACTION_TYPE"), ActionTypeMatch::External);
//! assert_eq!(codec.classify("FETCH_foobar_START"), ActionTypeMatch::Unmatched);
//! assert_eq!(
//!     ActionTypeCodec::new("bar", Vec::<String>::new()).classify("FETCH_foo_bar_START"),
//!     ActionTypeMatch::Unmatched
//! );
//! ```

use std::collections::HashSet;
use std::fmt;

/// Verb prefix for fetch operations.
pub const FETCH: &str = "FETCH";
/// Verb prefix for update operations.
pub const UPDATE: &str = "UPDATE";
/// Verb prefix for remove operations.
pub const REMOVE: &str = "REMOVE";

/// Lifecycle suffix emitted when an operation begins.
pub const START: &str = "START";
/// Lifecycle suffix emitted when an operation succeeds.
pub const SUCCESS: &str = "SUCCESS";
/// Lifecycle suffix emitted when an operation fails.
pub const FAILURE: &str = "FAILURE";

/// Operation kind named by the first segment of an action type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `FETCH`
    Fetch,
    /// `UPDATE`
    Update,
    /// `REMOVE`
    Remove,
    /// Any other verb, introduced by a custom reducer's own convention.
    Custom(String),
}

impl Verb {
    /// Decode a verb segment. Unknown segments become [`Verb::Custom`].
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            FETCH => Self::Fetch,
            UPDATE => Self::Update,
            REMOVE => Self::Remove,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The segment as it appears inside an action type.
    #[must_use]
    pub fn as_segment(&self) -> &str {
        match self {
            Self::Fetch => FETCH,
            Self::Update => UPDATE,
            Self::Remove => REMOVE,
            Self::Custom(segment) => segment,
        }
    }

    /// Whether the built-in lifecycle reducers handle this verb.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

/// Phase of an asynchronous operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The operation has been issued.
    Start,
    /// The operation completed.
    Success,
    /// The operation failed.
    Failure,
}

impl Lifecycle {
    /// All lifecycle phases, in the order they normally occur.
    pub const ALL: [Self; 3] = [Self::Start, Self::Success, Self::Failure];

    /// The suffix as it appears inside an action type.
    #[must_use]
    pub const fn as_suffix(self) -> &'static str {
        match self {
            Self::Start => START,
            Self::Success => SUCCESS,
            Self::Failure => FAILURE,
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_suffix())
    }
}

/// Semantic fields extracted from a convention-shaped action type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Operation kind.
    pub verb: Verb,
    /// Phase, absent for the lifecycle-less `VERB_RESOURCE` form.
    pub lifecycle: Option<Lifecycle>,
}

/// Outcome of classifying an action type against one resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionTypeMatch {
    /// Follows the convention for this resource.
    Convention(ActionDescriptor),
    /// Listed in the resource's external action types.
    External,
    /// Neither; the reducer leaves state untouched.
    Unmatched,
}

impl ActionTypeMatch {
    /// Whether the reducer should run at all.
    #[must_use]
    pub const fn is_relevant(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// Build an action type string from its parts.
#[must_use]
pub fn action_type(verb: &Verb, resource: &str, lifecycle: Option<Lifecycle>) -> String {
    match lifecycle {
        Some(lifecycle) => format!("{verb}_{resource}_{lifecycle}"),
        None => format!("{verb}_{resource}"),
    }
}

/// Parser for the action types of a single resource.
#[derive(Clone, Debug)]
pub struct ActionTypeCodec {
    resource: String,
    external_action_types: HashSet<String>,
}

impl ActionTypeCodec {
    /// Create a codec for `resource` with an allow-list of external types.
    pub fn new<I, S>(resource: impl Into<String>, external_action_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource: resource.into(),
            external_action_types: external_action_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Resource name this codec matches.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Parse a convention-shaped action type for this resource.
    ///
    /// Returns `None` when the resource segment differs or the verb is not
    /// made of upper-case words.
    #[must_use]
    pub fn parse(&self, action_type: &str) -> Option<ActionDescriptor> {
        Lifecycle::ALL
            .into_iter()
            .find_map(|lifecycle| {
                let head = action_type
                    .strip_suffix(lifecycle.as_suffix())?
                    .strip_suffix('_')?;
                let verb = self.strip_resource(head)?;
                Some(ActionDescriptor {
                    verb,
                    lifecycle: Some(lifecycle),
                })
            })
            .or_else(|| {
                self.strip_resource(action_type).map(|verb| ActionDescriptor {
                    verb,
                    lifecycle: None,
                })
            })
    }

    /// Whether `action_type` is one of the configured external types.
    #[must_use]
    pub fn is_external(&self, action_type: &str) -> bool {
        self.external_action_types.contains(action_type)
    }

    /// Classify an action type. Convention matches win over the allow-list.
    #[must_use]
    pub fn classify(&self, action_type: &str) -> ActionTypeMatch {
        if let Some(descriptor) = self.parse(action_type) {
            ActionTypeMatch::Convention(descriptor)
        } else if self.is_external(action_type) {
            ActionTypeMatch::External
        } else {
            ActionTypeMatch::Unmatched
        }
    }

    /// Build the action type for `verb`/`lifecycle` on this resource.
    #[must_use]
    pub fn format(&self, verb: &Verb, lifecycle: Option<Lifecycle>) -> String {
        action_type(verb, &self.resource, lifecycle)
    }

    fn strip_resource(&self, head: &str) -> Option<Verb> {
        let verb = head.strip_suffix(self.resource.as_str())?.strip_suffix('_')?;
        is_verb(verb).then(|| Verb::from_segment(verb))
    }
}

fn is_verb(segment: &str) -> bool {
    segment.split('_').all(|word| {
        let mut chars = word.chars();
        chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}
