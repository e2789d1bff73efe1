//! Store properties checked against real directories.

use blobdir_core::{BlobDir, Config, InMemoryStore, ObjectId, StoreError, LOCK_FILE};
use blobdir_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn created_ids_strictly_increase(blobs in prop::collection::vec(blob_strategy(), 1..20)) {
        let dir = TestDir::new();
        let mut store = dir.open();

        let mut previous = store.last_used_id();
        for blob in &blobs {
            let id = store.create(blob).unwrap();
            prop_assert!(id > previous);
            previous = id;
        }
        store.close().unwrap();
    }

    #[test]
    fn reopen_continues_after_highest(ids in id_set_strategy()) {
        let seeded: Vec<u64> = ids.iter().copied().collect();
        let dir = TestDir::with_objects(&seeded);
        let mut store = dir.open();

        let expected = ids.iter().copied().max().unwrap_or(0).max(1) + 1;
        prop_assert_eq!(store.create(b"next").unwrap(), ObjectId::new(expected));
        store.close().unwrap();
    }

    #[test]
    fn save_then_load_is_exact(id in object_id_strategy(), blob in blob_strategy()) {
        let dir = TestDir::new();
        let store = dir.open();

        store.save(id, &blob).unwrap();
        prop_assert_eq!(store.load(id).unwrap(), blob);
        store.close().unwrap();
    }

    #[test]
    fn stray_entry_is_reported(ids in id_set_strategy(), name in stray_name_strategy()) {
        let seeded: Vec<u64> = ids.iter().copied().collect();
        let dir = TestDir::with_objects(&seeded);
        let store = dir.open();
        dir.write_entry(&name, b"stray");

        match store.load_all() {
            Err(StoreError::Corrupted { path, .. }) => prop_assert_eq!(path, dir.entry(&name)),
            other => prop_assert!(false, "expected corruption, got {:?}", other),
        }
        store.close().unwrap();
    }

    #[test]
    fn directory_store_matches_model(ops in store_ops_strategy(40)) {
        let dir = TestDir::new();
        let mut harness = ModelHarness::new(dir.open());
        for op in &ops {
            harness.apply(op);
        }
        harness.verify_all();
    }

    #[test]
    fn memory_store_matches_model(ops in store_ops_strategy(80)) {
        let mut harness = ModelHarness::new(InMemoryStore::new());
        for op in &ops {
            harness.apply(op);
        }
        harness.verify_all();
    }
}

#[test]
fn reopen_over_gaps_yields_eight() {
    let dir = TestDir::with_objects(&[1, 3, 7]);
    let mut store = dir.open();

    assert_eq!(store.create(b"x").unwrap(), ObjectId::new(8));
}

#[test]
fn ids_not_reused_after_delete() {
    with_temp_store(|store| {
        let a = store.create(b"a").unwrap();
        let b = store.create(b"b").unwrap();
        store.delete(b).unwrap();
        store.delete(a).unwrap();

        assert!(store.create(b"c").unwrap() > b);
    });
}

#[test]
fn foreign_holder_cannot_open() {
    let dir = TestDir::with_objects(&[2, 5]);
    dir.lock_as(100);
    let before = dir.snapshot();

    let result = BlobDir::open_with_config(dir.path(), Config::new().holder_id(200));

    assert!(matches!(result, Err(StoreError::DifferentOwner { holder: 100 })));
    assert_eq!(dir.snapshot(), before);
}

#[test]
fn second_holder_blocked_until_first_closes() {
    let dir = TestDir::new();
    let first = dir.open_as(1);

    let blocked = BlobDir::open_with_config(dir.path(), Config::new().holder_id(2));
    assert!(blocked.unwrap_err().is_ownership_conflict());

    first.close().unwrap();
    assert!(!dir.is_locked());

    let second = dir.open_as(2);
    assert_eq!(second.holder(), 2);
}

#[test]
fn empty_blob_round_trips() {
    with_temp_store(|store| {
        let id = store.create(b"").unwrap();
        assert_eq!(store.load(id).unwrap(), b"");
    });
}

#[test]
fn delete_then_load_is_not_found() {
    with_temp_store(|store| {
        let id = store.create(b"short lived").unwrap();
        store.delete(id).unwrap();

        assert!(matches!(store.load(id), Err(StoreError::NotFound(missing)) if missing == id));
    });
}

#[test]
fn load_all_excludes_lock_token() {
    let dir = TestDir::with_objects(&[1, 2]);
    let store = dir.open();
    assert!(dir.is_locked());

    let mut ids: Vec<u64> = store
        .load_all()
        .unwrap()
        .iter()
        .map(|item| item.id.as_u64())
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn reserved_entries_are_ignored() {
    let dir = TestDir::with_objects(&[4]);
    dir.write_entry(".metadata", b"future use");
    let store = dir.open();

    assert_eq!(store.load_all().unwrap().len(), 1);
    assert_eq!(store.verify().unwrap().objects, 1);
}

#[test]
fn closed_store_cannot_be_verified_by_sibling_handle() {
    let dir = TestDir::new();
    let mut first = dir.open();
    let sibling = dir.open();
    let id = first.create(b"a").unwrap();

    first.close().unwrap();

    assert!(matches!(sibling.load(id), Err(StoreError::Unowned { .. })));
    assert!(matches!(sibling.save(id, b"b"), Err(StoreError::Unowned { .. })));
    assert!(matches!(sibling.delete(id), Err(StoreError::Unowned { .. })));
    assert!(matches!(sibling.load_all(), Err(StoreError::Unowned { .. })));
}

#[test]
fn lock_file_name_is_reserved() {
    assert!(LOCK_FILE.starts_with(blobdir_core::RESERVED_PREFIX));
}
