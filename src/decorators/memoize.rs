// Copyright (c) 2025 - Cowboy AI, Inc.
//! Memoize - Cache results per argument list
//!
//! The cache key is the JSON serialization of the argument value. Two
//! argument lists that serialize to the same text share one cache entry,
//! e.g. `None` and `()` both serialize to `null`. Entries are never evicted;
//! the cache grows for as long as the `Memoize` lives.

use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

use crate::errors::UnderbarResult;

/// Decorator that remembers the result for each distinct argument list
///
/// # Examples
///
/// ```rust
/// use underbar::decorators::memoize;
///
/// let mut add = memoize(|(a, b): (i32, i32)| a + b);
///
/// assert_eq!(add.call((2, 3)).unwrap(), 5);
/// assert_eq!(add.call((2, 3)).unwrap(), 5);
/// assert_eq!(add.len(), 1);
/// ```
pub struct Memoize<F, R> {
    func: F,
    cache: HashMap<String, R>,
}

/// Wrap `func` with a result cache
pub fn memoize<F, R>(func: F) -> Memoize<F, R> {
    Memoize::new(func)
}

impl<F, R> Memoize<F, R> {
    /// Wrap `func` with an empty result cache
    pub fn new(func: F) -> Self {
        Self {
            func,
            cache: HashMap::new(),
        }
    }

    /// Return the cached result for `args`, computing it on first sight
    ///
    /// # Errors
    ///
    /// `Serialization` if `args` cannot be turned into a cache key; the
    /// function is not invoked in that case.
    pub fn call<A>(&mut self, args: A) -> UnderbarResult<R>
    where
        A: Serialize,
        F: FnMut(A) -> R,
        R: Clone,
    {
        let key = cache_key(&args)?;
        if let Some(hit) = self.cache.get(&key) {
            trace!(%key, "memo hit");
            return Ok(hit.clone());
        }

        trace!(%key, "memo miss");
        let result = (self.func)(args);
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Number of cached argument lists
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// True when nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn cache_key<A: Serialize>(args: &A) -> UnderbarResult<String> {
    Ok(serde_json::to_string(args)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::UnderbarError;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[test]
    fn test_same_arguments_invoke_once() {
        let calls = Cell::new(0);
        let mut multiply = memoize(|(a, b): (i32, i32)| {
            calls.set(calls.get() + 1);
            a * b
        });

        assert_eq!(multiply.call((2, 3)).unwrap(), 6);
        assert_eq!(multiply.call((2, 3)).unwrap(), 6);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_argument_order_matters() {
        let calls = Cell::new(0);
        let mut subtract = memoize(|(a, b): (i32, i32)| {
            calls.set(calls.get() + 1);
            a - b
        });

        assert_eq!(subtract.call((5, 2)).unwrap(), 3);
        assert_eq!(subtract.call((2, 5)).unwrap(), -3);
        assert_eq!(calls.get(), 2);
        assert_eq!(subtract.len(), 2);
    }

    #[test]
    fn test_identical_serialization_shares_entry() {
        let mut describe = memoize(|value: Option<()>| format!("{:?}", value));

        assert_eq!(describe.call(None).unwrap(), "None");
        // Some(()) also serializes to `null`
        assert_eq!(describe.call(Some(())).unwrap(), "None");
        assert_eq!(describe.len(), 1);
    }

    #[test]
    fn test_unserializable_arguments_error() {
        let calls = Cell::new(0);
        let mut count_keys = memoize(|map: HashMap<Vec<u8>, i32>| {
            calls.set(calls.get() + 1);
            map.len()
        });

        let args = HashMap::from([(vec![1u8], 1)]);
        let err = count_keys.call(args).unwrap_err();

        assert!(matches!(err, UnderbarError::Serialization(_)));
        assert_eq!(calls.get(), 0);
        assert!(count_keys.is_empty());
    }
}
