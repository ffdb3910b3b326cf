//! Read-path specs
//!
//! Verify positional reads, scans, searches, slices, and the
//! unsupported-mutator surface.

use crate::prelude::*;
use seqfile_storage::{IndexedRecord, StoreError};

#[test]
fn string_store_worked_example() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));

    store.append(s("a")).unwrap();
    store.append(s("b")).unwrap();
    store.append(s("c")).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(1).unwrap(), "b");
    assert_eq!(store.index_of(&s("c")).unwrap(), Some(2));

    store.clear().unwrap();
    assert_eq!(store.len(), 0);
    assert!(matches!(store.get(0), Err(StoreError::OutOfRange { .. })));
}

#[test]
fn full_slice_returns_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));

    let records: Vec<String> = (0..10).map(|i| format!("record-{i}")).collect();
    store.append_all(records.clone()).unwrap();

    assert_eq!(store.slice(0, store.len()).unwrap(), records);
}

#[test]
fn scans_started_before_an_append_do_not_observe_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));
    store.append(s("first")).unwrap();

    let early = store.iter().unwrap();
    store.append(s("second")).unwrap();

    let early: Vec<String> = early.map(|r| r.unwrap()).collect();
    assert_eq!(early, vec!["first"]);

    let fresh: Vec<String> = store.iter().unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(fresh, vec!["first", "second"]);
}

#[test]
fn indexed_scan_numbers_records_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));
    store.append_all(["x", "y", "z"].map(String::from)).unwrap();

    let indexed: Vec<IndexedRecord<String>> =
        store.indexed_iter().unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(indexed.len(), 3);
    assert_eq!(indexed[0].index, 0);
    assert_eq!(indexed[2].index, 2);
    assert_eq!(indexed[2].record, "z");
}

#[test]
fn searches_use_value_equality_over_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));
    store
        .append_all(["dup", "other", "dup"].map(String::from))
        .unwrap();

    assert!(store.contains(&s("other")).unwrap());
    assert!(!store.contains(&s("missing")).unwrap());
    assert_eq!(store.index_of(&s("dup")).unwrap(), Some(0));
    assert_eq!(store.last_index_of(&s("dup")).unwrap(), Some(2));
}

#[test]
fn unsupported_mutations_fail_in_any_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir.path().join("records.jsonl"));

    // Empty store
    assert!(matches!(
        store.remove(0),
        Err(StoreError::Unsupported { .. })
    ));
    assert!(matches!(
        store.set(0, s("x")),
        Err(StoreError::Unsupported { .. })
    ));

    // Populated store
    store.append(s("a")).unwrap();
    assert!(matches!(
        store.insert(0, s("x")),
        Err(StoreError::Unsupported { .. })
    ));
    assert!(matches!(
        store.remove_value(&s("a")),
        Err(StoreError::Unsupported { .. })
    ));
    assert!(matches!(
        store.retain(&[s("a")]),
        Err(StoreError::Unsupported { .. })
    ));
}
