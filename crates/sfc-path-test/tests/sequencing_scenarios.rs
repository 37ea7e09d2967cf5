//! Hop sequencing scenarios
//!
//! Ordering, renumbering and re-indexing of stored, corrected and
//! augmented paths

use pretty_assertions::assert_eq;
use sfc_path_test::{
    fixtures::scenarios, hop_names, hop_numbers, service_indexes, verify_permutation,
    verify_sequenced, verify_sorted_by_hop_number,
};
use sfc_pathmgr::{sequencer, PathMgrError};

/// Stored hop numbers give back the traversal order
#[test]
fn test_order_unordered_path() {
    let before = scenarios::unordered();
    let mut path = before.clone();

    sequencer::order_hops_by_hop_number(&mut path);

    assert_eq!(hop_names(&path), vec!["sf1", "sf2", "sf3"]);
    assert_eq!(hop_numbers(&path), vec![Some(0), Some(1), Some(2)]);
    assert_eq!(service_indexes(&path), vec![3, 2, 1]);
    assert_eq!(path.starting_index, Some(3));
    verify_sorted_by_hop_number(&path).expect("hops not sorted");
    verify_permutation(&before, &path).expect("hops changed");
}

/// Renumbering derives hop numbers from list order, not old hop numbers
#[test]
fn test_renumber_unordered_path() {
    let mut path = scenarios::unordered();

    sequencer::update_hops_order(&mut path).expect("renumber failed");

    assert_eq!(hop_names(&path), vec!["sf1", "sf3", "sf2"]);
    assert_eq!(hop_numbers(&path), vec![Some(0), Some(1), Some(2)]);
    assert_eq!(service_indexes(&path), vec![3, 2, 1]);
    verify_sequenced(&path).expect("path not sequenced");
}

/// A starting index too small for the hop list is corrected
#[test]
fn test_reindex_bad_starting_index() {
    let mut path = scenarios::bad_starting_index();

    sequencer::update_starting_index(&mut path).expect("reindex failed");

    assert_eq!(path.starting_index, Some(3));
    assert_eq!(service_indexes(&path), vec![3, 2, 1]);
    verify_sequenced(&path).expect("path not sequenced");
}

/// Hops inserted without hop numbers are absorbed by renumber + reindex
#[test]
fn test_renumber_then_reindex_augmented_path() {
    let mut path = scenarios::augmented();

    sequencer::update_hops_order(&mut path).expect("renumber failed");
    assert_eq!(hop_numbers(&path), (0..5).map(Some).collect::<Vec<_>>());
    assert_eq!(service_indexes(&path), vec![3, 2, 1, 1, 1]);

    sequencer::update_starting_index(&mut path).expect("reindex failed");

    assert_eq!(path.starting_index, Some(5));
    assert_eq!(hop_names(&path), vec!["sf1", "sf4", "sf2", "sf5", "sf3"]);
    assert_eq!(hop_numbers(&path), (0..5).map(Some).collect::<Vec<_>>());
    assert_eq!(service_indexes(&path), vec![5, 4, 3, 2, 1]);
    verify_sequenced(&path).expect("path not sequenced");
}

/// Forwarder hops inherit the index of the hop before them
#[test]
fn test_forwarder_hops_inherit_index() {
    let mut path = scenarios::with_forwarders(255);

    sequencer::update_hops_order(&mut path).expect("renumber failed");

    assert_eq!(service_indexes(&path), vec![255, 254, 254, 253, 253]);
    verify_sequenced(&path).expect("path not sequenced");

    sequencer::update_starting_index(&mut path).expect("reindex failed");
    assert_eq!(path.starting_index, Some(3));
    assert_eq!(service_indexes(&path), vec![3, 2, 2, 1, 1]);
}

/// More service functions than the starting index allows bottom out at 1
#[test]
fn test_saturation_at_floor() {
    let mut path = scenarios::long(3, 40);

    sequencer::update_hops_order(&mut path).expect("renumber failed");

    let indexes = service_indexes(&path);
    assert_eq!(&indexes[..4], &[3, 2, 1, 1]);
    assert!(indexes.iter().all(|&si| si >= 1));
    assert!(indexes.windows(2).all(|pair| pair[0] >= pair[1]));
    verify_sequenced(&path).expect("path not sequenced");
}

/// The starting index is validated before any hop is touched
#[test]
fn test_invalid_starting_index() {
    let mut path = scenarios::augmented();
    path.starting_index = Some(-1);
    let before = path.clone();

    let err = sequencer::update_hops_order(&mut path).unwrap_err();

    assert!(matches!(err, PathMgrError::InvalidArgument { .. }));
    assert!(err.is_argument_error());
    assert_eq!(path, before);
}

/// The count helper only sees service function hops
#[test]
fn test_count_service_function_hops() {
    assert_eq!(sequencer::count_service_function_hops(&scenarios::augmented()), 5);
    assert_eq!(
        sequencer::count_service_function_hops(&scenarios::with_forwarders(9)),
        3
    );
}
