//! In-memory blob store for testing.

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobStore;
use crate::types::{Blob, Item, ObjectId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io;

/// An in-memory blob store.
///
/// Allocates identifiers exactly like [`crate::BlobDir`]: the counter starts
/// at the floor value 1, so the first created identifier is 2, and deleted
/// identifiers are never handed out again.
///
/// # Example
///
/// ```rust
/// use blobdir_core::{BlobStore, InMemoryStore};
///
/// let mut store = InMemoryStore::new();
/// let id = store.create(b"test data").unwrap();
/// assert_eq!(id.as_u64(), 2);
/// assert_eq!(store.load(id).unwrap(), b"test data");
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    blobs: RwLock<BTreeMap<ObjectId, Blob>>,
    last_used_id: ObjectId,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `items`, seeding the counter from them.
    ///
    /// Useful for testing reopen scenarios.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        let blobs: BTreeMap<ObjectId, Blob> =
            items.into_iter().map(|item| (item.id, item.blob)).collect();
        let highest = blobs.keys().next_back().copied().unwrap_or(ObjectId::NULL);
        Self {
            blobs: RwLock::new(blobs),
            last_used_id: highest.max(ObjectId::new(1)),
        }
    }

    /// Returns the last identifier handed out (or the seeded floor).
    #[must_use]
    pub fn last_used_id(&self) -> ObjectId {
        self.last_used_id
    }

    /// Returns the number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl BlobStore for InMemoryStore {
    fn create(&mut self, blob: &[u8]) -> StoreResult<ObjectId> {
        let id = self
            .last_used_id
            .next()
            .ok_or(StoreError::IdSpaceExhausted(self.last_used_id))?;
        self.save(id, blob)?;
        self.last_used_id = id;
        Ok(id)
    }

    fn load(&self, id: ObjectId) -> StoreResult<Blob> {
        self.blobs
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn load_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self
            .blobs
            .read()
            .iter()
            .map(|(id, blob)| Item::new(*id, blob.clone()))
            .collect())
    }

    fn save(&self, id: ObjectId, blob: &[u8]) -> StoreResult<()> {
        self.blobs.write().insert(id, blob.to_vec());
        Ok(())
    }

    fn delete(&self, id: ObjectId) -> StoreResult<()> {
        match self.blobs.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(io::Error::from(io::ErrorKind::NotFound).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_two() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.create(b"a").unwrap(), ObjectId::new(2));
        assert_eq!(store.create(b"b").unwrap(), ObjectId::new(3));
    }

    #[test]
    fn seeded_from_items() {
        let items = vec![
            Item::new(ObjectId::new(1), b"x".to_vec()),
            Item::new(ObjectId::new(7), b"y".to_vec()),
        ];
        let mut store = InMemoryStore::with_items(items);

        assert_eq!(store.last_used_id(), ObjectId::new(7));
        assert_eq!(store.create(b"z").unwrap(), ObjectId::new(8));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn deleted_ids_not_reused() {
        let mut store = InMemoryStore::new();
        let id = store.create(b"a").unwrap();
        store.delete(id).unwrap();

        assert!(store.is_empty());
        assert!(store.load(id).unwrap_err().is_not_found());
        assert!(store.create(b"b").unwrap() > id);
    }

    #[test]
    fn delete_missing_is_io_not_found() {
        let store = InMemoryStore::new();
        let err = store.delete(ObjectId::new(9)).unwrap_err();

        assert!(matches!(err, StoreError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
