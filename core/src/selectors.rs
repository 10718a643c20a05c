//! Base selector factory.
//!
//! [`make_selectors`] derives nine read-only selectors from a resource name.
//! For a resource `foo` they are named:
//!
//! | name                        | reads                                    |
//! |-----------------------------|------------------------------------------|
//! | `getFooEntities`            | the entity map                           |
//! | `getFooById`                | one entity (`props.id`)                  |
//! | `getCurrentFoo`             | the first entity, in insertion order     |
//! | `getFooErrors`              | root-level errors                        |
//! | `getFooErrorsById`          | one entity's errors (`props.id`)         |
//! | `getAreFooEntitiesFetching` | collection-level fetch flag              |
//! | `getIsFooFetching`          | one entity's fetch flag (`props.id`)     |
//! | `getIsFooUpdating`          | one entity's update flag (`props.id`)    |
//! | `getIsFooRemoving`          | one entity's remove flag (`props.id`)    |
//!
//! Selectors read `state[resource]` and return `None` for anything missing.
//!
//! # Example
//!
//! ```
//! use resource_reducers_core::selectors::{make_selectors, SelectorConfig, SelectorProps};
//! use serde_json::json;
//!
//! let selectors = make_selectors(SelectorConfig::new("byId", "foo"));
//! let state = json!({ "foo": { "byId": { "123": { "id": "123" } } } });
//!
//! let entity = selectors
//!     .get("getFooById")
//!     .and_then(|select| select.select(&state, &SelectorProps::with_id("123")));
//! assert_eq!(entity, Some(&json!({ "id": "123" })));
//! assert_eq!(selectors.current(&state), Some(&json!({ "id": "123" })));
//! ```

use crate::lifecycle::{COLLECTION_PENDING, ERRORS, ERRORS_BY_ID, FETCHING, PENDING, REMOVING, UPDATING};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Configuration for [`make_selectors`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Key of the entity map inside the slice.
    pub entities_path: String,
    /// Resource name; also the slice's key in the root state.
    pub resource: String,
}

impl SelectorConfig {
    /// Create a selector configuration.
    #[must_use]
    pub fn new(entities_path: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            entities_path: entities_path.into(),
            resource: resource.into(),
        }
    }
}

/// Extra selector input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorProps {
    /// Entity id, for the by-id selectors.
    #[serde(default)]
    pub id: Option<String>,
}

impl SelectorProps {
    /// Props targeting one entity.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

/// The nine generated selectors, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// `get{R}Entities`
    Entities,
    /// `get{R}ById`
    ById,
    /// `getCurrent{R}`
    Current,
    /// `get{R}Errors`
    Errors,
    /// `get{R}ErrorsById`
    ErrorsById,
    /// `getAre{R}EntitiesFetching`
    AreEntitiesFetching,
    /// `getIs{R}Fetching`
    IsFetching,
    /// `getIs{R}Updating`
    IsUpdating,
    /// `getIs{R}Removing`
    IsRemoving,
}

/// Reads from one resource slice: `(slice, props, entities_path)`.
type SelectFn = for<'a> fn(&'a Value, &SelectorProps, &str) -> Option<&'a Value>;

struct SelectorTemplate {
    kind: SelectorKind,
    prefix: &'static str,
    suffix: &'static str,
    select: SelectFn,
}

const TEMPLATES: [SelectorTemplate; 9] = [
    SelectorTemplate {
        kind: SelectorKind::Entities,
        prefix: "get",
        suffix: "Entities",
        select: select_entities,
    },
    SelectorTemplate {
        kind: SelectorKind::ById,
        prefix: "get",
        suffix: "ById",
        select: select_by_id,
    },
    SelectorTemplate {
        kind: SelectorKind::Current,
        prefix: "getCurrent",
        suffix: "",
        select: select_current,
    },
    SelectorTemplate {
        kind: SelectorKind::Errors,
        prefix: "get",
        suffix: "Errors",
        select: select_errors,
    },
    SelectorTemplate {
        kind: SelectorKind::ErrorsById,
        prefix: "get",
        suffix: "ErrorsById",
        select: select_errors_by_id,
    },
    SelectorTemplate {
        kind: SelectorKind::AreEntitiesFetching,
        prefix: "getAre",
        suffix: "EntitiesFetching",
        select: select_are_entities_fetching,
    },
    SelectorTemplate {
        kind: SelectorKind::IsFetching,
        prefix: "getIs",
        suffix: "Fetching",
        select: select_is_fetching,
    },
    SelectorTemplate {
        kind: SelectorKind::IsUpdating,
        prefix: "getIs",
        suffix: "Updating",
        select: select_is_updating,
    },
    SelectorTemplate {
        kind: SelectorKind::IsRemoving,
        prefix: "getIs",
        suffix: "Removing",
        select: select_is_removing,
    },
];

fn select_entities<'a>(slice: &'a Value, _: &SelectorProps, entities_path: &str) -> Option<&'a Value> {
    slice.get(entities_path)
}

fn select_by_id<'a>(slice: &'a Value, props: &SelectorProps, entities_path: &str) -> Option<&'a Value> {
    slice.get(entities_path)?.get(props.id.as_deref()?)
}

fn select_current<'a>(slice: &'a Value, _: &SelectorProps, entities_path: &str) -> Option<&'a Value> {
    slice.get(entities_path)?.as_object()?.values().next()
}

fn select_errors<'a>(slice: &'a Value, _: &SelectorProps, _: &str) -> Option<&'a Value> {
    slice.get(ERRORS)
}

fn select_errors_by_id<'a>(slice: &'a Value, props: &SelectorProps, _: &str) -> Option<&'a Value> {
    slice.get(ERRORS_BY_ID)?.get(props.id.as_deref()?)
}

fn select_are_entities_fetching<'a>(slice: &'a Value, _: &SelectorProps, _: &str) -> Option<&'a Value> {
    slice.get(COLLECTION_PENDING)?.get(FETCHING)
}

fn select_is_fetching<'a>(slice: &'a Value, props: &SelectorProps, _: &str) -> Option<&'a Value> {
    pending_flag(slice, FETCHING, props)
}

fn select_is_updating<'a>(slice: &'a Value, props: &SelectorProps, _: &str) -> Option<&'a Value> {
    pending_flag(slice, UPDATING, props)
}

fn select_is_removing<'a>(slice: &'a Value, props: &SelectorProps, _: &str) -> Option<&'a Value> {
    pending_flag(slice, REMOVING, props)
}

fn pending_flag<'a>(slice: &'a Value, pending: &str, props: &SelectorProps) -> Option<&'a Value> {
    slice.get(PENDING)?.get(pending)?.get(props.id.as_deref()?)
}

/// `foo` → `Foo`.
fn upper_first(resource: &str) -> String {
    let mut chars = resource.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// One generated selector.
#[derive(Clone)]
pub struct Selector {
    name: String,
    kind: SelectorKind,
    resource: String,
    entities_path: String,
    select: SelectFn,
}

impl Selector {
    /// Generated name, e.g. `getFooById`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which template produced this selector.
    #[must_use]
    pub const fn kind(&self) -> SelectorKind {
        self.kind
    }

    /// Read from the root `state`; `None` when anything along the way is missing.
    #[must_use]
    pub fn select<'a>(&self, state: &'a Value, props: &SelectorProps) -> Option<&'a Value> {
        let slice = state.get(&self.resource)?;
        (self.select)(slice, props, &self.entities_path)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The selectors generated for one resource, in table order.
#[derive(Clone, Debug)]
pub struct BaseSelectors {
    config: SelectorConfig,
    selectors: Vec<Selector>,
}

/// Generate the base selectors for a resource.
#[must_use]
pub fn make_selectors(config: SelectorConfig) -> BaseSelectors {
    let resource_name = upper_first(&config.resource);
    let selectors = TEMPLATES
        .iter()
        .map(|template| Selector {
            name: format!("{}{resource_name}{}", template.prefix, template.suffix),
            kind: template.kind,
            resource: config.resource.clone(),
            entities_path: config.entities_path.clone(),
            select: template.select,
        })
        .collect();

    BaseSelectors { config, selectors }
}

impl BaseSelectors {
    /// The configuration these selectors were generated from.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Look a selector up by its generated name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Selector> {
        self.selectors.iter().find(|selector| selector.name == name)
    }

    /// Generated names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(Selector::name)
    }

    /// All selectors, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter()
    }

    /// Run the selector of the given kind.
    #[must_use]
    pub fn select<'a>(&self, kind: SelectorKind, state: &'a Value, props: &SelectorProps) -> Option<&'a Value> {
        self.selectors
            .iter()
            .find(|selector| selector.kind == kind)?
            .select(state, props)
    }

    /// `get{R}Entities`
    #[must_use]
    pub fn entities<'a>(&self, state: &'a Value) -> Option<&'a Map<String, Value>> {
        self.select(SelectorKind::Entities, state, &SelectorProps::default())?
            .as_object()
    }

    /// `get{R}ById`
    #[must_use]
    pub fn by_id<'a>(&self, state: &'a Value, id: &str) -> Option<&'a Value> {
        self.select(SelectorKind::ById, state, &SelectorProps::with_id(id))
    }

    /// `getCurrent{R}`
    #[must_use]
    pub fn current<'a>(&self, state: &'a Value) -> Option<&'a Value> {
        self.select(SelectorKind::Current, state, &SelectorProps::default())
    }

    /// `get{R}Errors`
    #[must_use]
    pub fn errors<'a>(&self, state: &'a Value) -> Option<&'a Vec<Value>> {
        self.select(SelectorKind::Errors, state, &SelectorProps::default())?
            .as_array()
    }

    /// `get{R}ErrorsById`
    #[must_use]
    pub fn errors_by_id<'a>(&self, state: &'a Value, id: &str) -> Option<&'a Vec<Value>> {
        self.select(SelectorKind::ErrorsById, state, &SelectorProps::with_id(id))?
            .as_array()
    }

    /// `getAre{R}EntitiesFetching`
    #[must_use]
    pub fn are_entities_fetching(&self, state: &Value) -> Option<bool> {
        self.select(SelectorKind::AreEntitiesFetching, state, &SelectorProps::default())?
            .as_bool()
    }

    /// `getIs{R}Fetching`
    #[must_use]
    pub fn is_fetching(&self, state: &Value, id: &str) -> Option<bool> {
        self.select(SelectorKind::IsFetching, state, &SelectorProps::with_id(id))?
            .as_bool()
    }

    /// `getIs{R}Updating`
    #[must_use]
    pub fn is_updating(&self, state: &Value, id: &str) -> Option<bool> {
        self.select(SelectorKind::IsUpdating, state, &SelectorProps::with_id(id))?
            .as_bool()
    }

    /// `getIs{R}Removing`
    #[must_use]
    pub fn is_removing(&self, state: &Value, id: &str) -> Option<bool> {
        self.select(SelectorKind::IsRemoving, state, &SelectorProps::with_id(id))?
            .as_bool()
    }
}

impl<'s> IntoIterator for &'s BaseSelectors {
    type Item = &'s Selector;
    type IntoIter = std::slice::Iter<'s, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}
