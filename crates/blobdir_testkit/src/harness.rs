//! Model-based test harness.
//!
//! Drives any [`BlobStore`] alongside a plain map and checks after every
//! operation that the two agree.

use crate::generators::StoreOp;
use blobdir_core::{BlobStore, ObjectId};
use std::collections::BTreeMap;

/// A store paired with the model it must agree with.
pub struct ModelHarness<S: BlobStore> {
    /// The store under test.
    pub store: S,
    model: BTreeMap<ObjectId, Vec<u8>>,
    created: Vec<ObjectId>,
}

impl<S: BlobStore> ModelHarness<S> {
    /// Wraps `store`, which must start out empty.
    pub fn new(store: S) -> Self {
        Self {
            store,
            model: BTreeMap::new(),
            created: Vec::new(),
        }
    }

    /// Applies one operation to both store and model and compares results.
    ///
    /// Positional operations pick a live object modulo the live count and
    /// are skipped when nothing is stored.
    pub fn apply(&mut self, op: &StoreOp) {
        match op {
            StoreOp::Create(blob) => {
                let id = self.store.create(blob).expect("Failed to create object");
                if let Some(&last) = self.created.last() {
                    assert!(id > last, "id {id} not greater than previous {last}");
                }
                self.created.push(id);
                self.model.insert(id, blob.clone());
            }
            StoreOp::Save(index, blob) => {
                let Some(id) = self.pick(*index) else { return };
                self.store.save(id, blob).expect("Failed to save object");
                self.model.insert(id, blob.clone());
            }
            StoreOp::Delete(index) => {
                let Some(id) = self.pick(*index) else { return };
                self.store.delete(id).expect("Failed to delete object");
                self.model.remove(&id);
                let err = self.store.load(id).expect_err("Deleted object still loads");
                assert!(err.is_not_found(), "unexpected error: {err}");
            }
            StoreOp::Load(index) => {
                let Some(id) = self.pick(*index) else { return };
                let blob = self.store.load(id).expect("Failed to load object");
                assert_eq!(Some(&blob), self.model.get(&id), "content mismatch for {id}");
            }
        }
    }

    /// Checks that a full load returns exactly the model's content.
    pub fn verify_all(&self) {
        let mut items = self.store.load_all().expect("Failed to load all objects");
        items.sort_by_key(|item| item.id);

        let actual: Vec<(ObjectId, Vec<u8>)> =
            items.into_iter().map(|item| (item.id, item.blob)).collect();
        let expected: Vec<(ObjectId, Vec<u8>)> = self
            .model
            .iter()
            .map(|(id, blob)| (*id, blob.clone()))
            .collect();
        assert_eq!(actual, expected);
    }

    /// Returns every id handed out by `create`, in order.
    pub fn created(&self) -> &[ObjectId] {
        &self.created
    }

    /// Returns the number of live objects in the model.
    pub fn live_count(&self) -> usize {
        self.model.len()
    }

    fn pick(&self, index: usize) -> Option<ObjectId> {
        if self.model.is_empty() {
            return None;
        }
        self.model.keys().nth(index % self.model.len()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobdir_core::InMemoryStore;

    #[test]
    fn harness_tracks_memory_store() {
        let mut harness = ModelHarness::new(InMemoryStore::new());

        harness.apply(&StoreOp::Create(b"a".to_vec()));
        harness.apply(&StoreOp::Create(b"b".to_vec()));
        harness.apply(&StoreOp::Save(0, b"c".to_vec()));
        harness.apply(&StoreOp::Delete(1));
        harness.apply(&StoreOp::Load(0));

        assert_eq!(harness.created(), &[ObjectId::new(2), ObjectId::new(3)]);
        assert_eq!(harness.live_count(), 1);
        harness.verify_all();
    }

    #[test]
    fn positional_ops_skip_empty_store() {
        let mut harness = ModelHarness::new(InMemoryStore::new());

        harness.apply(&StoreOp::Delete(3));
        harness.apply(&StoreOp::Load(0));

        assert_eq!(harness.live_count(), 0);
    }
}
