// Copyright (c) 2025 - Cowboy AI, Inc.
//! Object helpers over JSON objects
//!
//! Thin consumers of the iteration core for merging and projecting
//! `serde_json` objects.

use serde_json::{Map, Value};

use crate::collection::{each, Traversable};
use crate::functional::map;

/// Return the argument unchanged
pub fn identity<T>(value: T) -> T {
    value
}

/// Value stored under `key` in each element; `null` where it is missing
///
/// # Examples
///
/// ```rust
/// use underbar::objects::pluck;
/// use serde_json::json;
///
/// let people = vec![json!({"name": "moe", "age": 30}), json!({"name": "curly"})];
/// assert_eq!(pluck(&people, "age"), vec![json!(30), json!(null)]);
/// ```
pub fn pluck<C>(collection: &C, key: &str) -> Vec<Value>
where
    C: Traversable<Item = Value> + ?Sized,
{
    map(collection, |item, _, _| {
        item.get(key).cloned().unwrap_or(Value::Null)
    })
}

/// Copy every property of each source into `destination`
///
/// Sources are applied in order, so later sources overwrite earlier ones.
pub fn extend<'d>(
    destination: &'d mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'d mut Map<String, Value> {
    for source in sources {
        each(*source, |value, key, _| {
            destination.insert(key.clone(), value.clone());
        });
    }
    destination
}

/// Copy properties of each source into `destination` only where missing
///
/// A property already present, even as `null`, is never overwritten.
pub fn defaults<'d>(
    destination: &'d mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'d mut Map<String, Value> {
    for source in sources {
        each(*source, |value, key, _| {
            if !destination.contains_key(key.as_str()) {
                destination.insert(key.clone(), value.clone());
            }
        });
    }
    destination
}
