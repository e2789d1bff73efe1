//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use blobdir_core::{BlobDir, ObjectId};
use rand::Rng;
use tempfile::TempDir;

/// Generate random blob data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Open a store on a fresh temporary directory holding `count` blobs of
/// `payload_size` bytes.
///
/// Returns the directory guard, the open store and the created ids.
pub fn populated_store(count: usize, payload_size: usize) -> (TempDir, BlobDir, Vec<ObjectId>) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let mut store = BlobDir::open(temp.path()).expect("Failed to open store");
    let ids = (0..count)
        .map(|_| {
            store
                .create(&random_data(payload_size))
                .expect("Failed to create blob")
        })
        .collect();
    (temp, store, ids)
}
