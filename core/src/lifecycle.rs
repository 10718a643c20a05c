//! Built-in lifecycle reducers.
//!
//! One reducer per `(verb, lifecycle)` pair for the three standard verbs.
//! They all write the same slice layout:
//!
//! | key                 | contents                                        |
//! |---------------------|-------------------------------------------------|
//! | `<entitiesPath>`    | id → entity                                     |
//! | `errors`            | root-level errors                               |
//! | `errorsById`        | id → errors                                     |
//! | `pending`           | `fetching`/`updating`/`removing` → (id → bool)  |
//! | `collectionPending` | `fetching`/`updating`/`removing` → bool         |
//!
//! An action carrying `meta.referenceId` targets that id; without it the
//! action targets the collection (pending flags) or the root (errors).
//!
//! Payloads merged into the entity map may be an array of entities carrying
//! an `id`, an object holding an `<entitiesPath>` map, a single entity
//! (keyed by `referenceId`, else by its own `id`), or a bare id → entity map.

use crate::action::Action;
use crate::codec::{Lifecycle, Verb};
use crate::reducer::ResourceContext;
use serde_json::{Map, Value};

/// Root-level error sequence.
pub const ERRORS: &str = "errors";
/// Per-id error map.
pub const ERRORS_BY_ID: &str = "errorsById";
/// Per-verb, per-id pending flags.
pub const PENDING: &str = "pending";
/// Per-verb collection-level pending flags.
pub const COLLECTION_PENDING: &str = "collectionPending";

/// Pending key for fetch.
pub const FETCHING: &str = "fetching";
/// Pending key for update.
pub const UPDATING: &str = "updating";
/// Pending key for remove.
pub const REMOVING: &str = "removing";

/// A built-in reducer operating on an object-shaped resource slice.
pub type LifecycleReducer = fn(&mut Map<String, Value>, &Action, &ResourceContext);

/// Pending key used for `verb`, if it is a built-in verb.
#[must_use]
pub const fn pending_key(verb: &Verb) -> Option<&'static str> {
    match verb {
        Verb::Fetch => Some(FETCHING),
        Verb::Update => Some(UPDATING),
        Verb::Remove => Some(REMOVING),
        Verb::Custom(_) => None,
    }
}

/// Look up the built-in reducer for a `(verb, lifecycle)` pair.
///
/// Custom verbs have no built-in reducer.
#[must_use]
pub const fn reducer_for(verb: &Verb, lifecycle: Lifecycle) -> Option<LifecycleReducer> {
    let reducer: LifecycleReducer = match (verb, lifecycle) {
        (Verb::Fetch, Lifecycle::Start) => fetch_start,
        (Verb::Fetch, Lifecycle::Success) => fetch_success,
        (Verb::Fetch, Lifecycle::Failure) => fetch_failure,
        (Verb::Update, Lifecycle::Start) => update_start,
        (Verb::Update, Lifecycle::Success) => update_success,
        (Verb::Update, Lifecycle::Failure) => update_failure,
        (Verb::Remove, Lifecycle::Start) => remove_start,
        (Verb::Remove, Lifecycle::Success) => remove_success,
        (Verb::Remove, Lifecycle::Failure) => remove_failure,
        (Verb::Custom(_), _) => return None,
    };
    Some(reducer)
}

fn fetch_start(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    start(slice, FETCHING, action);
}

fn fetch_success(slice: &mut Map<String, Value>, action: &Action, context: &ResourceContext) {
    set_pending(slice, FETCHING, action.reference_id(), false);
    if let Some(payload) = &action.payload {
        merge_entities(slice, payload, action.reference_id(), context);
    }
}

fn fetch_failure(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    failure(slice, FETCHING, action);
}

fn update_start(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    start(slice, UPDATING, action);
}

fn update_success(slice: &mut Map<String, Value>, action: &Action, context: &ResourceContext) {
    set_pending(slice, UPDATING, action.reference_id(), false);
    let Some(payload) = &action.payload else {
        return;
    };
    match (action.reference_id(), payload) {
        (Some(id), Value::Object(patch)) => {
            let Some(entities) = object_at(slice, &context.entities_path) else {
                return;
            };
            match entities.get_mut(id) {
                Some(Value::Object(existing)) => {
                    for (key, value) in patch {
                        existing.insert(key.clone(), value.clone());
                    }
                },
                _ => {
                    entities.insert(id.to_string(), payload.clone());
                },
            }
        },
        (reference_id, _) => merge_entities(slice, payload, reference_id, context),
    }
}

fn update_failure(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    failure(slice, UPDATING, action);
}

fn remove_start(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    start(slice, REMOVING, action);
}

fn remove_success(slice: &mut Map<String, Value>, action: &Action, context: &ResourceContext) {
    set_pending(slice, REMOVING, action.reference_id(), false);

    let ids: Vec<String> = match (action.reference_id(), &action.payload) {
        (Some(id), _) => vec![id.to_string()],
        (None, Some(Value::Array(items))) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id.clone()),
                other => entity_id(other),
            })
            .collect(),
        (None, Some(entity @ Value::Object(_))) => entity_id(entity).into_iter().collect(),
        (None, _) => Vec::new(),
    };

    if ids.is_empty() {
        return;
    }
    if let Some(Value::Object(entities)) = slice.get_mut(&context.entities_path) {
        for id in &ids {
            entities.shift_remove(id);
        }
    }
}

fn remove_failure(slice: &mut Map<String, Value>, action: &Action, _: &ResourceContext) {
    failure(slice, REMOVING, action);
}

fn start(slice: &mut Map<String, Value>, pending: &str, action: &Action) {
    let reference_id = action.reference_id();
    set_pending(slice, pending, reference_id, true);
    clear_errors(slice, reference_id);
}

fn failure(slice: &mut Map<String, Value>, pending: &str, action: &Action) {
    let reference_id = action.reference_id();
    set_pending(slice, pending, reference_id, false);

    let errors = Value::Array(action.errors.clone().unwrap_or_default());
    match reference_id {
        Some(id) => {
            if let Some(by_id) = object_at(slice, ERRORS_BY_ID) {
                by_id.insert(id.to_string(), errors);
            }
        },
        None => {
            slice.insert(ERRORS.to_string(), errors);
        },
    }
}

fn set_pending(slice: &mut Map<String, Value>, pending: &str, reference_id: Option<&str>, flag: bool) {
    match reference_id {
        Some(id) => {
            if let Some(flags) = object_at(slice, PENDING).and_then(|by_verb| object_at(by_verb, pending)) {
                flags.insert(id.to_string(), Value::Bool(flag));
            }
        },
        None => {
            if let Some(flags) = object_at(slice, COLLECTION_PENDING) {
                flags.insert(pending.to_string(), Value::Bool(flag));
            }
        },
    }
}

fn clear_errors(slice: &mut Map<String, Value>, reference_id: Option<&str>) {
    match reference_id {
        Some(id) => {
            if let Some(Value::Object(by_id)) = slice.get_mut(ERRORS_BY_ID) {
                by_id.shift_remove(id);
            }
        },
        None => {
            slice.shift_remove(ERRORS);
        },
    }
}

fn merge_entities(
    slice: &mut Map<String, Value>,
    payload: &Value,
    reference_id: Option<&str>,
    context: &ResourceContext,
) {
    let Some(entities) = object_at(slice, &context.entities_path) else {
        return;
    };
    match payload {
        Value::Array(items) => {
            for item in items {
                if let Some(id) = entity_id(item) {
                    entities.insert(id, item.clone());
                }
            }
        },
        Value::Object(object) => {
            if let Some(Value::Object(nested)) = object.get(&context.entities_path) {
                for (id, entity) in nested {
                    entities.insert(id.clone(), entity.clone());
                }
            } else if let Some(id) = reference_id {
                entities.insert(id.to_string(), payload.clone());
            } else if let Some(id) = entity_id(payload) {
                entities.insert(id, payload.clone());
            } else {
                for (id, entity) in object {
                    entities.insert(id.clone(), entity.clone());
                }
            }
        },
        _ => {},
    }
}

/// The `id` field of an entity, as a map key.
fn entity_id(entity: &Value) -> Option<String> {
    match entity.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// The object stored at `key`, created (or replaced, if not an object) on demand.
fn object_at<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}
