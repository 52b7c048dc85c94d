// Copyright (c) 2025 - Cowboy AI, Inc.
//! Iterator Core - Uniform traversal over sequences and mappings
//!
//! Every higher-order operation in this crate is written once, against the
//! `Traversable` capability, instead of inspecting the shape of its input at
//! runtime. Both collection shapes present the same `(value, key, collection)`
//! triple to callbacks.
//!
//! # Collection Shapes
//!
//! ```text
//! Traversable
//!   ├── Sequence  ([T], Vec<T>, [T; N])        key = usize, index order
//!   ├── Mapping   (HashMap, BTreeMap, Map)      key = &K, enumeration order
//!   └── JsonCollection (array or object Value)  key = JsonKey
//! ```
//!
//! # Traversal Order
//!
//! - Sequences: ascending index `0..len`
//! - Mappings: the map's own enumeration order. `BTreeMap` and
//!   `serde_json::Map` enumerate in key order; `HashMap` order is arbitrary
//!   but stable within one traversal.
//!
//! # Preconditions
//!
//! A traversal borrows the collection immutably for its whole duration, so a
//! callback cannot mutate the collection it is traversing.
//!
//! # Example
//!
//! ```rust
//! use underbar::collection::each;
//! use std::collections::BTreeMap;
//!
//! let mut seen = Vec::new();
//! each(&vec![10, 20], |value, index, _| seen.push((index, *value)));
//! assert_eq!(seen, vec![(0, 10), (1, 20)]);
//!
//! let ages = BTreeMap::from([("ann", 31), ("bob", 27)]);
//! let mut names = Vec::new();
//! each(&ages, |_, name, _| names.push(*name));
//! assert_eq!(names, vec!["ann", "bob"]);
//! ```

pub mod json;

pub use json::{JsonCollection, JsonKey};

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A collection that can present its elements as `(value, key)` pairs
///
/// Implemented by ordered sequences (keyed by index) and by mappings (keyed
/// by a reference to the map key).
pub trait Traversable {
    /// Element type
    type Item;

    /// Key presented alongside each element (index or map key)
    type Key<'a>
    where
        Self: 'a;

    /// Iterator over `(value, key)` pairs in traversal order
    type Entries<'a>: Iterator<Item = (&'a Self::Item, Self::Key<'a>)>
    where
        Self: 'a;

    /// Produce all elements in traversal order
    fn entries(&self) -> Self::Entries<'_>;

    /// Number of elements
    fn size(&self) -> usize {
        self.entries().count()
    }
}

/// Call `iterator(value, key, collection)` for each element of `collection`
///
/// This is the single traversal primitive; `map`, `filter`, `uniq` and the
/// rest are expressed through it.
pub fn each<'a, C, F>(collection: &'a C, mut iterator: F)
where
    C: Traversable + ?Sized + 'a,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C),
{
    for (value, key) in collection.entries() {
        iterator(value, key, collection);
    }
}

/// Entries of an ordered sequence
#[derive(Debug, Clone)]
pub struct SeqEntries<'a, T> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for SeqEntries<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, value)| (value, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> Traversable for [T] {
    type Item = T;
    type Key<'a> = usize where Self: 'a;
    type Entries<'a> = SeqEntries<'a, T> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        SeqEntries {
            inner: self.iter().enumerate(),
        }
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> Traversable for Vec<T> {
    type Item = T;
    type Key<'a> = usize where Self: 'a;
    type Entries<'a> = SeqEntries<'a, T> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        self.as_slice().entries()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Traversable for [T; N] {
    type Item = T;
    type Key<'a> = usize where Self: 'a;
    type Entries<'a> = SeqEntries<'a, T> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        self.as_slice().entries()
    }

    fn size(&self) -> usize {
        N
    }
}

/// Entries of a mapping; flips the map's `(key, value)` order
#[derive(Debug, Clone)]
pub struct MapEntries<I> {
    inner: I,
}

impl<'a, K: 'a, V: 'a, I> Iterator for MapEntries<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
{
    type Item = (&'a V, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (value, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S: BuildHasher> Traversable for HashMap<K, V, S> {
    type Item = V;
    type Key<'a> = &'a K where Self: 'a;
    type Entries<'a> = MapEntries<std::collections::hash_map::Iter<'a, K, V>> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        MapEntries { inner: self.iter() }
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V> Traversable for BTreeMap<K, V> {
    type Item = V;
    type Key<'a> = &'a K where Self: 'a;
    type Entries<'a> = MapEntries<std::collections::btree_map::Iter<'a, K, V>> where Self: 'a;

    fn entries(&self) -> Self::Entries<'_> {
        MapEntries { inner: self.iter() }
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Traversable for serde_json::Map<String, serde_json::Value> {
    type Item = serde_json::Value;
    type Key<'a> = &'a String;
    type Entries<'a> = MapEntries<serde_json::map::Iter<'a>>;

    fn entries(&self) -> Self::Entries<'_> {
        MapEntries { inner: self.iter() }
    }

    fn size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_sequence_ascending_indices() {
        let mut visited = Vec::new();
        each(&vec!["a", "b", "c"], |value, index, _| visited.push((index, *value)));

        assert_eq!(visited, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn test_each_passes_collection() {
        let numbers = [1, 2, 3];
        let mut lengths = Vec::new();
        each(&numbers, |_, _, collection| lengths.push(collection.len()));

        assert_eq!(lengths, vec![3, 3, 3]);
    }

    #[test]
    fn test_each_btree_map_key_order() {
        let map = BTreeMap::from([("b", 2), ("a", 1), ("c", 3)]);
        let mut visited = Vec::new();
        each(&map, |value, key, _| visited.push((*key, *value)));

        assert_eq!(visited, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_each_hash_map_visits_every_entry() {
        let map: HashMap<&str, i32> = HashMap::from([("x", 1), ("y", 2)]);
        let mut total = 0;
        let mut keys = Vec::new();
        each(&map, |value, key, _| {
            total += value;
            keys.push(*key);
        });
        keys.sort();

        assert_eq!(total, 3);
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_each_empty_never_calls() {
        let empty: Vec<i32> = Vec::new();
        let mut calls = 0;
        each(&empty, |_, _, _| calls += 1);

        assert_eq!(calls, 0);
    }

    #[test]
    fn test_size() {
        assert_eq!(vec![1, 2, 3].size(), 3);
        assert_eq!([0u8; 4].size(), 4);
        assert_eq!(BTreeMap::<i32, i32>::new().size(), 0);
    }
}
