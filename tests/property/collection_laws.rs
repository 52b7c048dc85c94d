// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Higher-Order Operations
//!
//! These tests prove the laws that tie the operations together: filter and
//! reject partition a collection, some is the dual of every, and map keeps
//! length and order.

use proptest::prelude::*;
use std::collections::BTreeMap;

use underbar::functional::{
    contains, every, filter, fold, index_of, map, reduce, reject, some,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate small integer vectors
fn numbers() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..40)
}

/// Generate small ordered maps
fn scores() -> impl Strategy<Value = BTreeMap<String, i32>> {
    prop::collection::btree_map("[a-z]{1,6}", -50i32..50, 0..20)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: filter and reject partition the collection
    ///
    /// Every element lands in exactly one side, and the combined size equals
    /// the input size.
    #[test]
    fn prop_filter_reject_partition(values in numbers(), divisor in 1i32..5) {
        let kept = filter(&values, |n| n % divisor == 0);
        let dropped = reject(&values, |n| n % divisor == 0);

        prop_assert_eq!(kept.len() + dropped.len(), values.len());
        prop_assert!(kept.iter().all(|n| n % divisor == 0));
        prop_assert!(dropped.iter().all(|n| n % divisor != 0));
    }

    /// Property: some is the dual of every
    ///
    /// some(p) == !every(!p) for any predicate.
    #[test]
    fn prop_some_every_duality(values in numbers(), threshold in -50i32..50) {
        let any_above = some(&values, |n| *n > threshold);
        let none_above = every(&values, |n| *n <= threshold);

        prop_assert_eq!(any_above, !none_above);
    }

    /// Property: map preserves length and order
    #[test]
    fn prop_map_preserves_order(values in numbers()) {
        let doubled = map(&values, |n, _, _| n * 2);
        let indexes = map(&values, |_, index, _| index);

        prop_assert_eq!(doubled.len(), values.len());
        prop_assert_eq!(indexes, (0..values.len()).collect::<Vec<_>>());
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(doubled[index], value * 2);
        }
    }

    /// Property: seeded reduce agrees with a plain sum
    #[test]
    fn prop_reduce_sums(values in numbers()) {
        let total = reduce(&values, |total, n| total + n, Some(0)).unwrap();

        prop_assert_eq!(total, values.iter().sum::<i32>());
    }

    /// Property: unseeded reduce equals seeding with the first element
    #[test]
    fn prop_unseeded_reduce_uses_first_element(values in prop::collection::vec(-50i32..50, 1..40)) {
        let unseeded = reduce(&values[..], |total, n| total.max(*n), None).unwrap();
        let seeded = reduce(&values[1..], |total, n| total.max(*n), Some(values[0])).unwrap();

        prop_assert_eq!(unseeded, seeded);
    }

    /// Property: contains agrees with index_of
    #[test]
    fn prop_contains_matches_index_of(values in numbers(), target in -50i32..50) {
        let position = index_of(&values, &target);

        prop_assert_eq!(contains(&values, &target), position.is_some());
        if let Some(index) = position {
            prop_assert_eq!(values[index], target);
            prop_assert!(!values[..index].contains(&target));
        }
    }

    /// Property: operations over maps see every value exactly once
    #[test]
    fn prop_map_collections_visit_each_value(table in scores()) {
        let count = fold(&table, 0usize, |count, _| count + 1);
        let values = map(&table, |value, _, _| *value);

        prop_assert_eq!(count, table.len());
        prop_assert_eq!(values, table.values().copied().collect::<Vec<_>>());
    }
}
