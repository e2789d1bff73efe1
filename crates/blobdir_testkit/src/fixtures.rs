//! Test fixtures and store helpers.
//!
//! Provides temporary store directories that can be seeded with objects,
//! stray entries and foreign lock tokens before a store is opened on them.

use blobdir_core::{BlobDir, Config, Lease, ObjectId, LOCK_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary store directory with automatic cleanup.
pub struct TestDir {
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestDir {
    /// Creates a new empty directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a directory holding objects with the given ids.
    ///
    /// Each object's content is its id in decimal.
    pub fn with_objects(ids: &[u64]) -> Self {
        let dir = Self::new();
        for &id in ids {
            dir.write_object(ObjectId::new(id), id.to_string().as_bytes());
        }
        dir
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Returns the path of `name` inside the directory.
    pub fn entry(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Writes an object file directly, bypassing any store.
    pub fn write_object(&self, id: ObjectId, blob: &[u8]) {
        fs::write(self.entry(&id.file_name()), blob).expect("Failed to write object");
    }

    /// Writes an arbitrary entry directly.
    pub fn write_entry(&self, name: &str, content: &[u8]) {
        fs::write(self.entry(name), content).expect("Failed to write entry");
    }

    /// Installs a lock token naming `holder`.
    pub fn lock_as(&self, holder: u32) {
        Lease::new(self.path(), holder)
            .acquire()
            .expect("Failed to install lock");
    }

    /// Returns true if a lock token exists.
    pub fn is_locked(&self) -> bool {
        self.entry(LOCK_FILE).exists()
    }

    /// Opens a store with the default configuration.
    pub fn open(&self) -> BlobDir {
        BlobDir::open(self.path()).expect("Failed to open store")
    }

    /// Opens a store as `holder`, simulating another process.
    pub fn open_as(&self, holder: u32) -> BlobDir {
        BlobDir::open_with_config(self.path(), Config::new().holder_id(holder))
            .expect("Failed to open store")
    }

    /// Returns every entry as `(name, content)`, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        let mut entries: Vec<(String, Vec<u8>)> = fs::read_dir(self.path())
            .expect("Failed to read directory")
            .map(|entry| {
                let entry = entry.expect("Failed to read entry");
                let content = fs::read(entry.path()).unwrap_or_default();
                (entry.file_name().to_string_lossy().into_owned(), content)
            })
            .collect();
        entries.sort();
        entries
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test with a store opened on a fresh temporary directory.
///
/// The store is closed afterwards and must still be owned at that point.
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut BlobDir) -> R,
{
    let dir = TestDir::new();
    let mut store = dir.open();
    let result = f(&mut store);
    store.close().expect("Failed to close store");
    result
}
