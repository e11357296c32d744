//! Tests for the pure ordered-collection utilities.

use crate::domain::{OrderingError, reorder, transfer};
use rstest::rstest;

#[rstest]
#[case(0, 2, vec!["b", "c", "a", "d"])]
#[case(3, 0, vec!["d", "a", "b", "c"])]
#[case(1, 2, vec!["a", "c", "b", "d"])]
fn reorder_moves_element_to_target_slot(
    #[case] from: usize,
    #[case] to: usize,
    #[case] expected: Vec<&str>,
) {
    let mut list = vec!["a", "b", "c", "d"];
    reorder(&mut list, from, to).expect("indices are valid");
    assert_eq!(list, expected);
}

#[rstest]
fn reorder_preserves_length_and_multiset() {
    let mut list = vec![3, 1, 4, 1, 5];
    reorder(&mut list, 4, 1).expect("indices are valid");

    assert_eq!(list.len(), 5);
    let mut sorted = list.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 1, 3, 4, 5]);
}

#[rstest]
fn reorder_followed_by_inverse_restores_original() {
    let original = vec!["a", "b", "c", "d", "e"];
    let mut list = original.clone();
    reorder(&mut list, 1, 3).expect("indices are valid");
    reorder(&mut list, 3, 1).expect("indices are valid");
    assert_eq!(list, original);
}

#[rstest]
#[case(5, 0)]
#[case(0, 3)]
fn reorder_rejects_out_of_range_index(#[case] from: usize, #[case] to: usize) {
    let mut list = vec!["a", "b", "c"];
    let result = reorder(&mut list, from, to);

    assert!(matches!(
        result,
        Err(OrderingError::IndexOutOfRange { len: 3, .. })
    ));
    assert_eq!(list, vec!["a", "b", "c"]);
}

#[rstest]
fn transfer_moves_element_between_lists() {
    let mut source = vec!["t1", "t2", "t3"];
    let mut destination = vec!["u1", "u2"];

    transfer(&mut source, &mut destination, 0, 1).expect("indices are valid");

    assert_eq!(source, vec!["t2", "t3"]);
    assert_eq!(destination, vec!["u1", "t1", "u2"]);
}

#[rstest]
fn transfer_adjusts_lengths_and_places_element_at_target() {
    let mut source = vec![10, 20, 30, 40];
    let mut destination = vec![50];

    transfer(&mut source, &mut destination, 2, 0).expect("indices are valid");

    assert_eq!(source.len(), 3);
    assert_eq!(destination.len(), 2);
    assert_eq!(destination.first(), Some(&30));
}

#[rstest]
fn transfer_allows_appending_at_destination_length() {
    let mut source = vec!["a"];
    let mut destination = vec!["x", "y"];

    transfer(&mut source, &mut destination, 0, 2).expect("append slot is valid");

    assert!(source.is_empty());
    assert_eq!(destination, vec!["x", "y", "a"]);
}

#[rstest]
fn transfer_rejects_source_index_out_of_range() {
    let mut source = vec!["a"];
    let mut destination = vec!["x"];

    let result = transfer(&mut source, &mut destination, 1, 0);

    assert_eq!(result, Err(OrderingError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(source, vec!["a"]);
    assert_eq!(destination, vec!["x"]);
}

#[rstest]
fn transfer_rejects_destination_slot_beyond_append() {
    let mut source = vec!["a"];
    let mut destination = vec!["x"];

    let result = transfer(&mut source, &mut destination, 0, 2);

    assert_eq!(result, Err(OrderingError::IndexOutOfRange { index: 2, len: 1 }));
    assert_eq!(source, vec!["a"]);
    assert_eq!(destination, vec!["x"]);
}
