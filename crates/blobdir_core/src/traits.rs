//! Blob store trait definition.

use crate::error::StoreResult;
use crate::types::{Blob, Item, ObjectId};

/// A keyed store of opaque blobs.
///
/// Blob stores never interpret the bytes they hold. Higher layers own the
/// encoding of objects into blobs.
///
/// # Invariants
///
/// - `create` returns identifiers in strictly increasing order and never
///   hands out an identifier twice
/// - `load` returns exactly the bytes last written under that identifier
/// - A failed `create` does not consume an identifier
/// - Deleted identifiers are not reused
///
/// # Implementors
///
/// - [`crate::BlobDir`] - one file per blob in an owned directory
/// - [`crate::InMemoryStore`] - for testing
pub trait BlobStore {
    /// Stores `blob` under a newly allocated identifier and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be persisted; the identifier is
    /// not consumed in that case.
    fn create(&mut self, blob: &[u8]) -> StoreResult<ObjectId>;

    /// Reads the blob stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NotFound`] if nothing is stored under `id`.
    fn load(&self, id: ObjectId) -> StoreResult<Blob>;

    /// Reads every stored blob. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored entry is invalid or unreadable; no
    /// partial result is returned.
    fn load_all(&self) -> StoreResult<Vec<Item>>;

    /// Stores `blob` under `id`, replacing any previous content.
    fn save(&self, id: ObjectId, blob: &[u8]) -> StoreResult<()>;

    /// Removes the blob stored under `id`.
    ///
    /// # Errors
    ///
    /// Removing an absent identifier is an error.
    fn delete(&self, id: ObjectId) -> StoreResult<()>;
}
