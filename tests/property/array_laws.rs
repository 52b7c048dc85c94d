// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Array-Set Algorithms
//!
//! These tests verify that the set-like operations behave like sets where
//! they should (uniq, intersection, difference) and that shuffle and flatten
//! neither lose nor invent elements.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use underbar::arrays::{difference, flatten, intersection, shuffle_with, uniq, zip, Nested};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate integer vectors with plenty of duplicates
fn crowded() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0i32..10, 0..30)
}

/// Generate arbitrarily nested sequences of small integers
fn nested() -> impl Strategy<Value = Nested<i32>> {
    let leaf = (0i32..100).prop_map(Nested::Item);
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Nested::Seq)
    })
}

/// Reference flattening used to check the real one
fn leaves(node: &Nested<i32>, out: &mut Vec<i32>) {
    match node {
        Nested::Item(value) => out.push(*value),
        Nested::Seq(children) => children.iter().for_each(|child| leaves(child, out)),
    }
}

fn sorted(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable();
    values
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: uniq is idempotent and keeps first occurrences
    #[test]
    fn prop_uniq_idempotent(values in crowded()) {
        let once = uniq(&values, false);
        let twice = uniq(&once, false);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.iter().collect::<HashSet<_>>().len(), once.len());

        let mut seen = HashSet::new();
        let first_occurrences: Vec<i32> =
            values.iter().copied().filter(|value| seen.insert(*value)).collect();
        prop_assert_eq!(once, first_occurrences);
    }

    /// Property: shuffle is a permutation and leaves the input untouched
    #[test]
    fn prop_shuffle_is_permutation(values in crowded(), seed in any::<u64>()) {
        let before = values.clone();
        let shuffled = shuffle_with(&values, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(&values, &before);
        prop_assert_eq!(sorted(shuffled), sorted(values));
    }

    /// Property: flatten of an already flat sequence is the identity
    #[test]
    fn prop_flatten_flat_is_identity(values in crowded()) {
        let flat_input: Vec<Nested<i32>> = values.iter().copied().map(Nested::Item).collect();

        prop_assert_eq!(flatten(&flat_input), values);
    }

    /// Property: flatten visits leaves depth-first, left to right
    #[test]
    fn prop_flatten_depth_first(tree in prop::collection::vec(nested(), 0..6)) {
        let mut expected = Vec::new();
        tree.iter().for_each(|node| leaves(node, &mut expected));

        prop_assert_eq!(flatten(&tree), expected);
    }

    /// Property: every intersected value is in all inputs, exactly once
    #[test]
    fn prop_intersection_members(left in crowded(), right in crowded()) {
        let shared: Vec<i32> = intersection(&[left.clone(), right.clone()]);

        prop_assert!(shared.iter().all(|value| left.contains(value) && right.contains(value)));
        prop_assert_eq!(shared.iter().collect::<HashSet<_>>().len(), shared.len());
        prop_assert!(left.iter().filter(|value| right.contains(*value)).all(|value| shared.contains(value)));
    }

    /// Property: difference and intersection split the first array's values
    #[test]
    fn prop_difference_complements_intersection(left in crowded(), right in crowded()) {
        let remaining = difference(&left, &[right.clone()]);
        let shared: Vec<i32> = intersection(&[left.clone(), right.clone()]);

        prop_assert!(remaining.iter().all(|value| !right.contains(value)));
        prop_assert!(remaining.iter().all(|value| !shared.contains(value)));
        prop_assert_eq!(
            remaining.len() + left.iter().filter(|value| right.contains(*value)).count(),
            left.len()
        );
    }

    /// Property: zip is as long as its longest input and pads with None
    #[test]
    fn prop_zip_shape(left in crowded(), right in crowded()) {
        let zipped: Vec<Vec<Option<i32>>> = zip(&[left.clone(), right.clone()]);

        prop_assert_eq!(zipped.len(), left.len().max(right.len()));
        for (index, row) in zipped.iter().enumerate() {
            prop_assert_eq!(row.len(), 2);
            prop_assert_eq!(row[0], left.get(index).copied());
            prop_assert_eq!(row[1], right.get(index).copied());
        }
    }
}
