//! Blob directory handle.
//!
//! A [`BlobDir`] owns a store directory for the lifetime of the handle:
//!
//! ```text
//! <store>/
//! ├─ .lock     # holder id of the owning process
//! ├─ 2         # blob bytes
//! ├─ 3
//! └─ 9         # gaps left by deletions are permanent
//! ```
//!
//! Every operation verifies that the lock token still names this handle's
//! holder before touching anything else.

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::lease::Lease;
use crate::scan::{self, ScanSummary};
use crate::traits::BlobStore;
use crate::types::{Blob, Item, ObjectId};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lowest value the identifier counter is seeded with.
const ID_FLOOR: ObjectId = ObjectId::new(1);

/// An open, owned blob directory.
///
/// # Thread Safety
///
/// The handle keeps its identifier counter without internal locking.
/// [`BlobDir::create`] takes `&mut self`, so allocations on one handle are
/// serialized by the borrow checker; the other operations only read.
///
/// # Example
///
/// ```rust,no_run
/// use blobdir_core::BlobDir;
/// use std::path::Path;
///
/// let mut store = BlobDir::open(Path::new("objects"))?;
/// let id = store.create(b"hello")?;
/// assert_eq!(store.load(id)?, b"hello");
/// store.close()?;
/// # Ok::<(), blobdir_core::StoreError>(())
/// ```
pub struct BlobDir {
    path: PathBuf,
    config: Config,
    lease: Lease,
    last_used_id: ObjectId,
    released: bool,
}

impl BlobDir {
    /// Opens the store at `path` with the default configuration.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens the store at `path`.
    ///
    /// Ownership is established first: a lock token naming this holder is
    /// accepted, a missing token is claimed when
    /// [`Config::claim_if_unlocked`] is set, and anything else fails without
    /// touching the directory. The directory is then scanned to seed the
    /// identifier counter. If the scan fails, a claim made by this call is
    /// released again.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DifferentOwner`] if another holder owns the directory
    /// - [`StoreError::Unowned`] if there is no token and claiming is disabled
    /// - [`StoreError::Corrupted`] if the directory holds invalid entries
    /// - [`StoreError::InvalidDirectory`] if `path` is not a usable directory
    pub fn open_with_config(path: &Path, config: Config) -> StoreResult<Self> {
        prepare_directory(path, config.create_if_missing)?;

        let lease = Lease::new(path, config.resolved_holder());
        let claimed = establish_ownership(&lease, config.claim_if_unlocked)?;

        let highest = match scan::highest_id(path) {
            Ok(highest) => highest,
            Err(e) => {
                if claimed {
                    if let Err(release_err) = lease.release() {
                        warn!(error = %release_err, "failed to drop claim after open failure");
                    }
                }
                return Err(e);
            }
        };
        let last_used_id = highest.unwrap_or(ObjectId::NULL).max(ID_FLOOR);

        debug!(
            path = %path.display(),
            holder = lease.holder(),
            claimed,
            %last_used_id,
            "store opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            config,
            lease,
            last_used_id,
            released: false,
        })
    }

    /// Closes the store, releasing ownership of the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock token cannot be released. With
    /// [`Config::verify_on_release`] a token that no longer names this
    /// holder is left in place and reported.
    pub fn close(mut self) -> StoreResult<()> {
        self.released = true;
        self.release()
    }

    /// Returns the store directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration the store was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the holder id this handle owns the directory as.
    #[must_use]
    pub fn holder(&self) -> u32 {
        self.lease.holder()
    }

    /// Returns true if the lock token still names this handle's holder.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.lease.is_owned()
    }

    /// Returns the last identifier handed out (or the seeded floor).
    #[must_use]
    pub fn last_used_id(&self) -> ObjectId {
        self.last_used_id
    }

    /// Returns the identifier the next successful [`BlobDir::create`] will use.
    pub fn next_id(&self) -> StoreResult<ObjectId> {
        self.last_used_id
            .next()
            .ok_or(StoreError::IdSpaceExhausted(self.last_used_id))
    }

    /// Stores `blob` under a new identifier and returns it.
    ///
    /// The counter advances only once the blob is written, so a failed
    /// create does not consume an identifier. A failed write may still leave
    /// a partial entry behind.
    pub fn create(&mut self, blob: &[u8]) -> StoreResult<ObjectId> {
        self.lease.check_owned_by_me()?;
        let id = self.next_id()?;
        self.save(id, blob)?;
        self.last_used_id = id;
        Ok(id)
    }

    /// Reads the blob stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if there is no entry for `id`; other
    /// I/O failures are returned as they are.
    pub fn load(&self, id: ObjectId) -> StoreResult<Blob> {
        self.lease.check_owned_by_me()?;
        match fs::read(self.object_path(id)) {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `blob` under `id`, creating or overwriting the entry.
    ///
    /// The entry is overwritten in place; a crash mid-write can leave it
    /// partially written.
    pub fn save(&self, id: ObjectId, blob: &[u8]) -> StoreResult<()> {
        self.lease.check_owned_by_me()?;
        let mut file = open_for_write(&self.object_path(id))?;
        file.write_all(blob)?;
        if self.config.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Removes the entry for `id`.
    ///
    /// # Errors
    ///
    /// A missing entry surfaces as the underlying I/O error
    /// ([`io::ErrorKind::NotFound`]), not as [`StoreError::NotFound`].
    pub fn delete(&self, id: ObjectId) -> StoreResult<()> {
        self.lease.check_owned_by_me()?;
        fs::remove_file(self.object_path(id))?;
        Ok(())
    }

    /// Reads every stored blob in directory order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] naming the first invalid entry.
    pub fn load_all(&self) -> StoreResult<Vec<Item>> {
        self.lease.check_owned_by_me()?;
        scan::read_items(&self.path)
    }

    /// Validates the directory layout without reading blob contents.
    pub fn verify(&self) -> StoreResult<ScanSummary> {
        self.lease.check_owned_by_me()?;
        scan::summarize(&self.path)
    }

    fn object_path(&self, id: ObjectId) -> PathBuf {
        self.path.join(id.file_name())
    }

    fn release(&self) -> StoreResult<()> {
        if self.config.verify_on_release {
            self.lease.release()
        } else {
            self.lease.release_unchecked()
        }
    }
}

impl BlobStore for BlobDir {
    fn create(&mut self, blob: &[u8]) -> StoreResult<ObjectId> {
        BlobDir::create(self, blob)
    }

    fn load(&self, id: ObjectId) -> StoreResult<Blob> {
        BlobDir::load(self, id)
    }

    fn load_all(&self) -> StoreResult<Vec<Item>> {
        BlobDir::load_all(self)
    }

    fn save(&self, id: ObjectId, blob: &[u8]) -> StoreResult<()> {
        BlobDir::save(self, id, blob)
    }

    fn delete(&self, id: ObjectId) -> StoreResult<()> {
        BlobDir::delete(self, id)
    }
}

impl std::fmt::Debug for BlobDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobDir")
            .field("path", &self.path)
            .field("holder", &self.lease.holder())
            .field("last_used_id", &self.last_used_id)
            .finish_non_exhaustive()
    }
}

impl Drop for BlobDir {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.release() {
            warn!(path = %self.path.display(), error = %e, "failed to release store on drop");
        }
    }
}

fn prepare_directory(path: &Path, create_if_missing: bool) -> StoreResult<()> {
    if !path.exists() {
        if create_if_missing {
            fs::create_dir_all(path)?;
        } else {
            return Err(StoreError::invalid_directory(format!(
                "store directory does not exist: {}",
                path.display()
            )));
        }
    }

    if !path.is_dir() {
        return Err(StoreError::invalid_directory(format!(
            "path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Makes sure the lease owns the directory. Returns true if this call
/// installed the lock token.
fn establish_ownership(lease: &Lease, claim_if_unlocked: bool) -> StoreResult<bool> {
    let current = lease.current_holder().map_err(|e| match e {
        StoreError::Io(_) => StoreError::Unowned {
            path: lease.lock_path().to_path_buf(),
        },
        other => other,
    })?;

    match current {
        Some(holder) if holder == lease.holder() => Ok(false),
        Some(holder) => {
            warn!(holder = lease.holder(), owner = holder, "store is owned by another holder");
            Err(StoreError::DifferentOwner { holder })
        }
        None if claim_if_unlocked => {
            // Fails if a racing claimant installed its token first.
            lease.acquire_exclusive()?;
            Ok(true)
        }
        None => Err(StoreError::Unowned {
            path: lease.lock_path().to_path_buf(),
        }),
    }
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
