//! CLI command implementations.

pub mod list;
pub mod lock;
pub mod objects;
pub mod verify;

use blobdir_core::{BlobDir, Config, StoreResult};
use std::path::Path;

/// Opens the store at `path`, creating the directory if needed, runs `op`
/// and closes the store again.
pub fn with_store<T>(
    path: &Path,
    op: impl FnOnce(&mut BlobDir) -> StoreResult<T>,
) -> StoreResult<T> {
    with_store_config(path, Config::default(), op)
}

/// Like [`with_store`], but fails instead of creating a missing directory.
pub fn with_existing_store<T>(
    path: &Path,
    op: impl FnOnce(&mut BlobDir) -> StoreResult<T>,
) -> StoreResult<T> {
    with_store_config(path, Config::new().create_if_missing(false), op)
}

/// The store is closed even if `op` fails; the error of `op` wins.
fn with_store_config<T>(
    path: &Path,
    config: Config,
    op: impl FnOnce(&mut BlobDir) -> StoreResult<T>,
) -> StoreResult<T> {
    let mut store = BlobDir::open_with_config(path, config)?;
    let result = op(&mut store);
    let closed = store.close();
    let value = result?;
    closed?;
    Ok(value)
}
