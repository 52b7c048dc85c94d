// Copyright (c) 2025 - Cowboy AI, Inc.
//! Array-Set Algorithms
//!
//! Operations on ordered sequences with set-like semantics. All of them
//! return new vectors and leave their inputs untouched.
//!
//! # Equality Policies
//!
//! | Operation      | Equality                                   | Duplicates          |
//! |----------------|--------------------------------------------|---------------------|
//! | `uniq`         | `PropertyKey` string of value or key fn    | first occurrence    |
//! | `intersection` | `PartialEq`                                | first occurrence    |
//! | `difference`   | `PartialEq`                                | kept                |
//!
//! `uniq` compares the *string form* of each key, the way a plain object used
//! as a lookup table would. Distinct values with the same string form (for
//! example the JSON number `1` and the JSON string `"1"`, or any two JSON
//! objects) are treated as duplicates. This is a known limitation.
//!
//! # Example
//!
//! ```rust
//! use underbar::arrays::{difference, intersection, uniq};
//!
//! assert_eq!(uniq(&[1, 2, 1, 3, 2], false), vec![1, 2, 3]);
//! let shared: Vec<i32> = intersection(&[vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
//! assert_eq!(shared, vec![3]);
//! assert_eq!(difference(&[1, 2, 3, 4], &[vec![2, 4]]), vec![1, 3]);
//! ```

use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;
use tracing::trace;

use crate::collection::each;
use crate::functional::{contains, map, reject};

/// String form of a value when it is used as a lookup-table key
pub trait PropertyKey {
    fn property_key(&self) -> String;
}

macro_rules! property_key_display {
    ($($ty:ty),*) => {
        $(impl PropertyKey for $ty {
            fn property_key(&self) -> String {
                self.to_string()
            }
        })*
    };
}

property_key_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String
);

/// Number-to-string conversion of dynamic languages: shortest round-trip
/// digits, `-0` prints as `"0"`, and exponent form outside `[1e-6, 1e21)`
impl PropertyKey for f64 {
    fn property_key(&self) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        if self.is_infinite() {
            return if *self > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if *self == 0.0 {
            return "0".to_string();
        }
        if *self < 0.0 {
            return format!("-{}", (-*self).property_key());
        }

        // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3"
        let scientific = format!("{:e}", self);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
        let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let k = digits.len() as i32;
        let n = exponent + 1;

        if k <= n && n <= 21 {
            format!("{}{}", digits, "0".repeat((n - k) as usize))
        } else if 0 < n && n <= 21 {
            let (whole, fraction) = digits.split_at(n as usize);
            format!("{}.{}", whole, fraction)
        } else if -6 < n && n <= 0 {
            format!("0.{}{}", "0".repeat((-n) as usize), digits)
        } else {
            let sign = if exponent < 0 { '-' } else { '+' };
            let (lead, rest) = digits.split_at(1);
            if rest.is_empty() {
                format!("{}e{}{}", lead, sign, exponent.abs())
            } else {
                format!("{}.{}e{}{}", lead, rest, sign, exponent.abs())
            }
        }
    }
}

impl PropertyKey for f32 {
    fn property_key(&self) -> String {
        f64::from(*self).property_key()
    }
}

impl<T: PropertyKey> PropertyKey for Option<T> {
    fn property_key(&self) -> String {
        match self {
            Some(value) => value.property_key(),
            None => "undefined".to_string(),
        }
    }
}

impl<T: PropertyKey + ?Sized> PropertyKey for &T {
    fn property_key(&self) -> String {
        (**self).property_key()
    }
}

impl PropertyKey for Value {
    fn property_key(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => integer.to_string(),
                None => number
                    .as_f64()
                    .map_or_else(|| number.to_string(), |float| float.property_key()),
            },
            Value::String(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => other.property_key(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }
}

/// Produce a duplicate-free copy of `array`, keeping first occurrences
///
/// `is_sorted` is accepted as a hint only; the result does not depend on it.
pub fn uniq<T>(array: &[T], is_sorted: bool) -> Vec<T>
where
    T: Clone + PropertyKey,
{
    trace!(is_sorted, len = array.len(), "uniq");
    dedupe_by_key(array, |item, _, _| item.property_key())
}

/// Like `uniq`, but when `is_sorted` is true duplicates are decided by
/// `iterator(value, index, array)` instead of the value itself
///
/// # Examples
///
/// ```rust
/// use underbar::arrays::uniq_by;
///
/// // Only two distinct keys exist: true (for 1) and false (for the rest)
/// let result = uniq_by(&[1, 2, 2, 3, 4, 4], true, |value, _, _| *value == 1);
/// assert_eq!(result, vec![1, 2]);
///
/// // Without the sorted flag the key function is ignored
/// let result = uniq_by(&[1, 2, 2, 3], false, |value, _, _| *value == 1);
/// assert_eq!(result, vec![1, 2, 3]);
/// ```
pub fn uniq_by<T, K, F>(array: &[T], is_sorted: bool, mut iterator: F) -> Vec<T>
where
    T: Clone + PropertyKey,
    K: PropertyKey,
    F: FnMut(&T, usize, &[T]) -> K,
{
    if is_sorted {
        dedupe_by_key(array, |item, index, array| {
            iterator(item, index, array).property_key()
        })
    } else {
        uniq(array, is_sorted)
    }
}

fn dedupe_by_key<T, F>(array: &[T], mut key_of: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, usize, &[T]) -> String,
{
    let mut seen = HashSet::new();
    let mut duplicate_free = Vec::new();
    each(array, |item, index, array| {
        if seen.insert(key_of(item, index, array)) {
            duplicate_free.push(item.clone());
        }
    });
    duplicate_free
}

/// One node of a nested sequence
#[derive(Debug)]
pub enum Shape<'a, N, L> {
    /// A nested sequence to descend into
    Seq(&'a [N]),
    /// A plain element
    Leaf(L),
}

/// Values that may themselves be sequences of values
pub trait Nestable: Sized {
    type Leaf;

    fn shape(&self) -> Shape<'_, Self, Self::Leaf>;
}

/// Arbitrarily nested sequence of plain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    Seq(Vec<Nested<T>>),
}

impl<T: Clone> Nestable for Nested<T> {
    type Leaf = T;

    fn shape(&self) -> Shape<'_, Self, T> {
        match self {
            Nested::Item(value) => Shape::Leaf(value.clone()),
            Nested::Seq(children) => Shape::Seq(children),
        }
    }
}

impl Nestable for Value {
    type Leaf = Value;

    fn shape(&self) -> Shape<'_, Self, Value> {
        match self {
            Value::Array(children) => Shape::Seq(children),
            other => Shape::Leaf(other.clone()),
        }
    }
}

/// Flatten nested sequences into one sequence, depth-first, left to right
///
/// # Examples
///
/// ```rust
/// use underbar::arrays::flatten;
/// use serde_json::json;
///
/// let nested = json!([1, [2, [3, 4]], 5]);
/// let flat = flatten(nested.as_array().unwrap());
/// assert_eq!(flat, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
/// ```
pub fn flatten<N: Nestable>(nested: &[N]) -> Vec<N::Leaf> {
    let mut flat = Vec::new();
    flatten_into(nested, &mut flat);
    flat
}

fn flatten_into<N: Nestable>(nested: &[N], flat: &mut Vec<N::Leaf>) {
    each(nested, |item, _, _| match item.shape() {
        Shape::Seq(children) => flatten_into(children, &mut *flat),
        Shape::Leaf(leaf) => flat.push(leaf),
    });
}

/// Zip sequences together; tuple `i` holds element `i` of every input
///
/// The result is as long as the longest input. Positions past the end of a
/// shorter input are `None`.
pub fn zip<T, S>(sequences: &[S]) -> Vec<Vec<Option<T>>>
where
    T: Clone,
    S: AsRef<[T]>,
{
    let longest = sequences
        .iter()
        .map(|sequence| sequence.as_ref().len())
        .max()
        .unwrap_or(0);

    (0..longest)
        .map(|index| {
            map(sequences, |sequence, _, _| {
                sequence.as_ref().get(index).cloned()
            })
        })
        .collect()
}

/// Values of the first array that appear in every array
///
/// Output follows the first array's order; repeated values appear once.
/// No input arrays yields an empty result.
pub fn intersection<T, S>(arrays: &[S]) -> Vec<T>
where
    T: Clone + PartialEq,
    S: AsRef<[T]>,
{
    let Some((first, rest)) = arrays.split_first() else {
        return Vec::new();
    };

    let mut shared: Vec<T> = Vec::new();
    each(first.as_ref(), |item, _, _| {
        if !contains(&shared, item) && rest.iter().all(|other| contains(other.as_ref(), item)) {
            shared.push(item.clone());
        }
    });
    shared
}

/// Elements of `array` that appear in none of `others`, in original order
pub fn difference<T, S>(array: &[T], others: &[S]) -> Vec<T>
where
    T: Clone + PartialEq,
    S: AsRef<[T]>,
{
    reject(array, |item| {
        others.iter().any(|other| contains(other.as_ref(), item))
    })
}

/// Random permutation of `array` using the thread-local generator
pub fn shuffle<T: Clone>(array: &[T]) -> Vec<T> {
    shuffle_with(array, &mut rand::rng())
}

/// Fisher–Yates shuffle with a caller-supplied generator
///
/// For `i` from `len - 1` down to `1`, swaps position `i` with a position
/// drawn uniformly from `0..=i`.
pub fn shuffle_with<T, R>(array: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng,
{
    let mut shuffled = array.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// First element of `array`
pub fn first<T>(array: &[T]) -> Option<&T> {
    array.first()
}

/// First `n` elements; the whole array when `n` exceeds its length
pub fn first_n<T>(array: &[T], n: usize) -> &[T] {
    &array[..n.min(array.len())]
}

/// Last element of `array`
pub fn last<T>(array: &[T]) -> Option<&T> {
    array.last()
}

/// Last `n` elements; the whole array when `n` exceeds its length
pub fn last_n<T>(array: &[T], n: usize) -> &[T] {
    &array[array.len() - n.min(array.len())..]
}
