// Copyright (c) 2025 - Cowboy AI, Inc.
//! Higher-Order Operations
//!
//! Pure functions over any `Traversable` collection. None of them mutate
//! their input; results that are collections are always fresh `Vec`s in
//! traversal order.
//!
//! # Laws
//!
//! ```text
//! reject(c, p)  == filter(c, !p)
//! some(c, p)    == !every(c, !p)
//! every([], p)  == true
//! some([], p)   == false
//! ```
//!
//! # Example
//!
//! ```rust
//! use underbar::functional::{filter, map, reduce};
//!
//! let numbers = vec![1, 2, 3, 4];
//! let evens = filter(&numbers, |n| n % 2 == 0);
//! let squares = map(&evens, |n, _, _| n * n);
//! let sum = reduce(&squares, |total, n| total + n, Some(0)).unwrap();
//!
//! assert_eq!(squares, vec![4, 16]);
//! assert_eq!(sum, 20);
//! ```

use serde_json::Value;

use crate::collection::{each, Traversable};
use crate::errors::{UnderbarError, UnderbarResult};

/// Return the results of applying `iterator(value, key, collection)` to each element
pub fn map<'a, C, U, F>(collection: &'a C, mut iterator: F) -> Vec<U>
where
    C: Traversable + ?Sized + 'a,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> U,
{
    let mut mapped = Vec::with_capacity(collection.size());
    each(collection, |value, key, collection| {
        mapped.push(iterator(value, key, collection))
    });
    mapped
}

/// Return all elements that pass `test`, in traversal order
pub fn filter<C, F>(collection: &C, mut test: F) -> Vec<C::Item>
where
    C: Traversable + ?Sized,
    C::Item: Clone,
    F: FnMut(&C::Item) -> bool,
{
    let mut passed = Vec::new();
    each(collection, |item, _, _| {
        if test(item) {
            passed.push(item.clone());
        }
    });
    passed
}

/// Return all elements that fail `test`, in traversal order
pub fn reject<C, F>(collection: &C, mut test: F) -> Vec<C::Item>
where
    C: Traversable + ?Sized,
    C::Item: Clone,
    F: FnMut(&C::Item) -> bool,
{
    filter(collection, |item| !test(item))
}

/// Fold the collection into an accumulator of any type
///
/// Every element is passed to `iterator`, starting from `init`.
pub fn fold<C, A, F>(collection: &C, init: A, mut iterator: F) -> A
where
    C: Traversable + ?Sized,
    F: FnMut(A, &C::Item) -> A,
{
    collection
        .entries()
        .fold(init, |accumulator, (item, _)| iterator(accumulator, item))
}

/// Reduce the collection to a single element-typed value
///
/// With `accumulator` set, every element is folded into it. Without one, the
/// first element becomes the accumulator and is never passed to `iterator`.
///
/// # Errors
///
/// `EmptyReduce` when the collection is empty and no accumulator is given.
///
/// # Examples
///
/// ```rust
/// use underbar::functional::reduce;
///
/// assert_eq!(reduce(&[1, 2, 3], |t, n| t + n, Some(0)).unwrap(), 6);
/// assert_eq!(reduce(&[5], |t, n| t + n * n, None).unwrap(), 5);
/// assert!(reduce(&Vec::<i32>::new(), |t, n| t + n, None).is_err());
/// ```
pub fn reduce<C, F>(
    collection: &C,
    mut iterator: F,
    accumulator: Option<C::Item>,
) -> UnderbarResult<C::Item>
where
    C: Traversable + ?Sized,
    C::Item: Clone,
    F: FnMut(C::Item, &C::Item) -> C::Item,
{
    let mut items = collection.entries().map(|(item, _)| item);
    let seed = match accumulator {
        Some(seed) => seed,
        None => items.next().cloned().ok_or(UnderbarError::EmptyReduce)?,
    };
    Ok(items.fold(seed, |total, item| iterator(total, item)))
}

/// Determine whether all elements pass `predicate`
///
/// Stops at the first failing element. Vacuously true for an empty collection.
pub fn every<C, F>(collection: &C, mut predicate: F) -> bool
where
    C: Traversable + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    collection.entries().all(|(item, _)| predicate(item))
}

/// `every` with element truthiness as the predicate
pub fn every_truthy<C>(collection: &C) -> bool
where
    C: Traversable + ?Sized,
    C::Item: Truthy,
{
    every(collection, |item| item.is_truthy())
}

/// Determine whether any element passes `predicate`
///
/// Defined as "not every element fails", so `some` and `every` cannot drift
/// apart. False for an empty collection.
pub fn some<C, F>(collection: &C, mut predicate: F) -> bool
where
    C: Traversable + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    !every(collection, |item| !predicate(item))
}

/// `some` with element truthiness as the predicate
pub fn some_truthy<C>(collection: &C) -> bool
where
    C: Traversable + ?Sized,
    C::Item: Truthy,
{
    some(collection, |item| item.is_truthy())
}

/// Determine whether the collection contains `target` (value equality)
pub fn contains<C>(collection: &C, target: &C::Item) -> bool
where
    C: Traversable + ?Sized,
    C::Item: PartialEq,
{
    fold(collection, false, |was_found, item| was_found || item == target)
}

/// Index of the first element equal to `target`, or `None`
pub fn index_of<T: PartialEq>(array: &[T], target: &T) -> Option<usize> {
    array
        .entries()
        .find(|(item, _)| *item == target)
        .map(|(_, index)| index)
}

/// Loose boolean coercion used when no predicate is supplied
///
/// Mirrors dynamic-language truthiness: zero, `NaN`, empty strings, `None`,
/// `()` and JSON `null` are falsy. Sequences are always truthy, even empty.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

macro_rules! truthy_integer {
    ($($ty:ty),*) => {
        $(impl Truthy for $ty {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_truthy())
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n.is_truthy()),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}
