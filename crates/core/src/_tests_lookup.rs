#![cfg(test)]

use super::lookup::{find, k_distance, ModeQuery, DEFAULT_FREQ_TOLERANCE};
use super::store::ModeStore;
use super::test_support::{assert_close, record};

fn sample_store() -> ModeStore {
    [
        record(1, [0.5, 0.0, 0.0], 0.30, "te"),
        record(2, [0.5, 0.0, 0.0], 0.315, "te"),
        record(1, [0.5, 0.0, 0.0], 0.30, "tm"),
        record(1, [0.0, 0.5, 0.0], 0.30, "te"),
        record(3, [0.5, 0.0, 0.0], 0.305, "te"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn default_tolerance_is_one_hundredth() {
    let query = ModeQuery::new("te", [0.0; 3], 0.1);
    assert_eq!(query.freq_tolerance, DEFAULT_FREQ_TOLERANCE);
    assert!(query.k_max_distance.is_none());
}

#[test]
fn finds_matches_in_store_order() {
    let store = sample_store();
    let found = store.find(&ModeQuery::new("te", [0.5, 0.0, 0.0], 0.30));
    let bands: Vec<usize> = found.iter().map(|m| m.band()).collect();
    assert_eq!(bands, vec![1, 3]);
}

#[test]
fn tolerance_bound_is_inclusive() {
    let k = [0.5, 0.0, 0.0];
    let store: ModeStore = [
        record(1, k, 0.25, "te"),
        record(2, k, 0.375, "te"),
        record(3, k, 0.5, "te"),
        record(4, k, 0.5 + 1.0 / 1024.0, "te"),
    ]
    .into_iter()
    .collect();
    let query = ModeQuery::new("te", k, 0.375).with_freq_tolerance(0.125);
    let bands: Vec<usize> = store.find(&query).iter().map(|m| m.band()).collect();
    assert_eq!(bands, vec![1, 2, 3]);
}

#[test]
fn polarization_must_match_exactly() {
    let store = sample_store();
    let found = store.find(&ModeQuery::new("TE", [0.5, 0.0, 0.0], 0.30));
    assert!(found.is_empty());
    let found = store.find(&ModeQuery::new("tm", [0.5, 0.0, 0.0], 0.30));
    assert_eq!(found.len(), 1);
}

#[test]
fn no_match_is_an_empty_result() {
    let store = sample_store();
    assert!(store.find(&ModeQuery::new("te", [0.5, 0.0, 0.0], 0.9)).is_empty());
    assert!(find(&[], &ModeQuery::new("te", [0.0; 3], 0.1)).is_empty());
}

#[test]
fn exact_wavevector_comparison_misses_interpolated_values() {
    let k = [0.1 + 0.2, 0.0, 0.0];
    let store: ModeStore = [record(1, k, 0.2, "te")].into_iter().collect();
    assert!(store.find(&ModeQuery::new("te", [0.3, 0.0, 0.0], 0.2)).is_empty());

    let near = ModeQuery::new("te", [0.3, 0.0, 0.0], 0.2).with_k_max_distance(1e-9);
    assert_eq!(store.find(&near).len(), 1);
}

#[test]
fn k_distance_is_euclidean() {
    assert_close(k_distance([0.0; 3], [0.3, 0.4, 0.0]), 0.5, 1e-12);
    assert_eq!(k_distance([0.1, 0.2, 0.3], [0.1, 0.2, 0.3]), 0.0);
}
