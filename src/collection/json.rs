// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dynamic collections backed by `serde_json::Value`
//!
//! A JSON value is only a collection when it is an array or an object.
//! `JsonCollection` checks the shape once, up front, so every traversal over
//! it is infallible; scalars are rejected with `InvalidArgument` before any
//! callback runs.

use serde_json::{Map, Value};
use std::fmt;

use super::{MapEntries, SeqEntries, Traversable};
use crate::errors::{UnderbarError, UnderbarResult};

/// A JSON array or object viewed as a traversable collection
#[derive(Debug, Clone, Copy)]
pub enum JsonCollection<'v> {
    /// JSON array, keyed by index
    Array(&'v [Value]),
    /// JSON object, keyed by property name
    Object(&'v Map<String, Value>),
}

/// Key of a JSON collection element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKey<'a> {
    /// Position in an array
    Index(usize),
    /// Property name in an object
    Name(&'a str),
}

impl fmt::Display for JsonKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKey::Index(index) => write!(f, "{}", index),
            JsonKey::Name(name) => f.write_str(name),
        }
    }
}

impl<'v> JsonCollection<'v> {
    /// View `value` as a collection
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `value` is neither an array nor an object.
    pub fn new(value: &'v Value) -> UnderbarResult<Self> {
        match value {
            Value::Array(items) => Ok(JsonCollection::Array(items)),
            Value::Object(map) => Ok(JsonCollection::Object(map)),
            other => Err(UnderbarError::InvalidArgument(format!(
                "expected a JSON array or object, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// True for the array shape
    pub fn is_array(&self) -> bool {
        matches!(self, JsonCollection::Array(_))
    }
}

impl<'v> TryFrom<&'v Value> for JsonCollection<'v> {
    type Error = UnderbarError;

    fn try_from(value: &'v Value) -> Result<Self, Self::Error> {
        JsonCollection::new(value)
    }
}

/// Entries of a JSON collection
#[derive(Debug, Clone)]
pub enum JsonEntries<'a> {
    Array(SeqEntries<'a, Value>),
    Object(MapEntries<serde_json::map::Iter<'a>>),
}

impl<'a> Iterator for JsonEntries<'a> {
    type Item = (&'a Value, JsonKey<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            JsonEntries::Array(entries) => entries
                .next()
                .map(|(value, index)| (value, JsonKey::Index(index))),
            JsonEntries::Object(entries) => entries
                .next()
                .map(|(value, name)| (value, JsonKey::Name(name.as_str()))),
        }
    }
}

impl<'v> Traversable for JsonCollection<'v> {
    type Item = Value;
    type Key<'a> = JsonKey<'a> where Self: 'a;
    type Entries<'a> = JsonEntries<'a> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        match *self {
            JsonCollection::Array(items) => JsonEntries::Array(items.entries()),
            JsonCollection::Object(map) => JsonEntries::Object(map.entries()),
        }
    }

    fn size(&self) -> usize {
        match self {
            JsonCollection::Array(items) => items.len(),
            JsonCollection::Object(map) => map.len(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
