//! Property-based tests for entry filtering.
//!
//! These tests use proptest to generate arbitrary entry lists and verify
//! the filter's ordering and selection properties.

#![allow(clippy::expect_used)]

use arcsift_core::FilterCriteria;
use arcsift_core::filter_entries;
use proptest::prelude::*;

fn entry_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("([a-z]{1,8}/){0,3}[a-zA-Z0-9_]{1,10}(\\.[a-zA-Z]{1,4})?", 0..40)
}

/// Returns true if `subset` appears in `full` in the same relative order.
fn is_ordered_subsequence(subset: &[String], full: &[String]) -> bool {
    let mut remaining = full.iter();
    subset.iter().all(|item| remaining.any(|candidate| candidate == item))
}

proptest! {
    /// Empty criteria keep every entry in its original order.
    #[test]
    fn prop_empty_criteria_is_identity(entries in entry_list()) {
        let selected = filter_entries(&entries, &FilterCriteria::default())
            .expect("empty criteria never fails");
        prop_assert_eq!(selected, entries);
    }

    /// Any selection is an order-preserving subsequence of the input.
    #[test]
    fn prop_selection_preserves_order(
        entries in entry_list(),
        types in prop::collection::vec("\\.[a-z]{1,3}", 0..3),
        patterns in prop::collection::vec("[a-z]{1,2}", 0..3),
        exclusive in any::<bool>(),
    ) {
        let criteria = FilterCriteria::default()
            .with_types(types)
            .with_patterns(patterns)
            .with_exclusive(exclusive);
        let selected = filter_entries(&entries, &criteria).expect("patterns are valid");

        prop_assert!(selected.len() <= entries.len());
        prop_assert!(is_ordered_subsequence(&selected, &entries));
    }

    /// Exclusive mode never selects more than inclusive mode.
    #[test]
    fn prop_exclusive_narrows(
        entries in entry_list(),
        patterns in prop::collection::vec("[a-z]{1,2}", 1..4),
    ) {
        let inclusive = FilterCriteria::default().with_patterns(patterns);
        let exclusive = inclusive.clone().with_exclusive(true);

        let wide = filter_entries(&entries, &inclusive).expect("patterns are valid");
        let narrow = filter_entries(&entries, &exclusive).expect("patterns are valid");

        prop_assert!(is_ordered_subsequence(&narrow, &wide));
    }

    /// File names select the same entries as the equivalent patterns.
    #[test]
    fn prop_files_match_like_patterns(
        entries in entry_list(),
        names in prop::collection::vec("[a-z.]{1,3}", 1..3),
        exclusive in any::<bool>(),
    ) {
        let by_name = FilterCriteria::default()
            .with_files(names.clone())
            .with_exclusive(exclusive);
        let by_pattern = FilterCriteria::default()
            .with_patterns(names)
            .with_exclusive(exclusive);

        let named = filter_entries(&entries, &by_name).expect("names are valid");
        let patterned = filter_entries(&entries, &by_pattern).expect("patterns are valid");
        prop_assert_eq!(named, patterned);
    }

    /// A plain entry name always selects itself.
    #[test]
    fn prop_file_names_select_themselves(entries in entry_list()) {
        prop_assume!(!entries.is_empty());
        let criteria = FilterCriteria::default().with_files(vec![entries[0].clone()]);
        let selected = filter_entries(&entries, &criteria).expect("generated names are valid");
        prop_assert!(selected.contains(&entries[0]));
    }
}
