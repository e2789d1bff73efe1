//! Directory scanning.
//!
//! A store directory is flat. Every entry must be one of:
//!
//! - the lock token ([`LOCK_FILE`]),
//! - a reserved entry whose name starts with [`RESERVED_PREFIX`] (ignored),
//! - a regular file named by the decimal form of an [`ObjectId`].
//!
//! Anything else, including any subdirectory, is corruption. A scan stops at
//! the first violating entry and reports it; entries visited before it are
//! discarded by the caller.

use crate::error::{StoreError, StoreResult};
use crate::lease::LOCK_FILE;
use crate::types::{Item, ObjectId};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Names starting with this character are reserved and skipped by scans.
pub const RESERVED_PREFIX: char = '.';

/// Result of a scan that does not read blob contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Number of object entries found.
    pub objects: usize,
    /// Highest identifier found, if any.
    pub highest_id: Option<ObjectId>,
}

/// Returns the highest identifier stored in `dir`, if any.
pub fn highest_id(dir: &Path) -> StoreResult<Option<ObjectId>> {
    Ok(summarize(dir)?.highest_id)
}

/// Counts the objects in `dir` and finds the highest identifier.
pub fn summarize(dir: &Path) -> StoreResult<ScanSummary> {
    let mut summary = ScanSummary::default();
    walk(dir, |id, _| {
        summary.objects += 1;
        summary.highest_id = summary.highest_id.max(Some(id));
        Ok(())
    })?;
    Ok(summary)
}

/// Reads every object in `dir` in directory order.
///
/// An object file that cannot be read is reported as corruption.
pub fn read_items(dir: &Path) -> StoreResult<Vec<Item>> {
    let mut items = Vec::new();
    walk(dir, |id, path| {
        let blob = fs::read(path)
            .map_err(|e| StoreError::corrupted(path, format!("unreadable object: {e}")))?;
        items.push(Item::new(id, blob));
        Ok(())
    })?;
    Ok(items)
}

/// Visits each object entry of `dir`, aborting at the first invalid entry.
fn walk<F>(dir: &Path, mut visit: F) -> StoreResult<()>
where
    F: FnMut(ObjectId, &Path) -> StoreResult<()>,
{
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            return Err(abort(&path, "subdirectory"));
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            return Err(abort(&path, "file name is not valid UTF-8"));
        };
        if name == LOCK_FILE || name.starts_with(RESERVED_PREFIX) {
            continue;
        }

        let Some(id) = ObjectId::from_file_name(&name) else {
            return Err(abort(&path, "not an object name"));
        };
        if !file_type.is_file() {
            return Err(abort(&path, "object is not a regular file"));
        }

        visit(id, &path)?;
    }
    Ok(())
}

fn abort(path: &Path, reason: &str) -> StoreError {
    warn!(path = %path.display(), reason, "corrupted store content");
    StoreError::corrupted(path, reason)
}
