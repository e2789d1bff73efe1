//! Directory ownership lease.
//!
//! A store directory is mutated by a single holder at a time. Ownership is
//! recorded in a lock token, an entry named [`LOCK_FILE`] whose content is the
//! decimal holder id (the process id unless configured otherwise):
//!
//! ```text
//! <store>/
//! ├─ .lock          # "4242"
//! └─ .tmplockXXXX   # only while a claim is in flight
//! ```
//!
//! The token is installed by writing a temporary entry and renaming it over
//! the lock name, so an observer sees either the old token or the complete
//! new one. The scheme is advisory: nothing stops an outside process from
//! deleting or rewriting the token.

use crate::error::{StoreError, StoreResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Name of the lock token inside a store directory.
pub const LOCK_FILE: &str = ".lock";

/// Prefix of the temporary entry used while installing the token.
const TEMP_LOCK_PREFIX: &str = ".tmplock";

/// An ownership claim on a store directory by one holder.
#[derive(Debug, Clone)]
pub struct Lease {
    holder: u32,
    dir: PathBuf,
    lock_path: PathBuf,
}

impl Lease {
    /// Creates a lease record for `holder` over the directory at `dir`.
    ///
    /// Nothing is written until [`Lease::acquire`] is called.
    #[must_use]
    pub fn new(dir: &Path, holder: u32) -> Self {
        Self {
            holder,
            dir: dir.to_path_buf(),
            lock_path: dir.join(LOCK_FILE),
        }
    }

    /// Returns the holder id this lease writes and checks for.
    #[must_use]
    pub fn holder(&self) -> u32 {
        self.holder
    }

    /// Returns the path of the lock token.
    #[must_use]
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Reads the holder currently named by the lock token.
    ///
    /// Returns `None` if there is no token.
    pub fn current_holder(&self) -> StoreResult<Option<u32>> {
        read_holder(&self.lock_path)
    }

    /// Verifies that the lock token names this lease's holder.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Unowned`] if the token is absent or unreadable
    /// - [`StoreError::MalformedLock`] if it holds no integer
    /// - [`StoreError::DifferentOwner`] if it names another holder
    pub fn check_owned_by_me(&self) -> StoreResult<()> {
        let bytes = fs::read(&self.lock_path).map_err(|_| StoreError::Unowned {
            path: self.lock_path.clone(),
        })?;
        let current = parse_holder(&self.lock_path, &bytes)?;
        if current != self.holder {
            debug!(holder = self.holder, owner = current, "store owned by another holder");
            return Err(StoreError::DifferentOwner { holder: current });
        }
        Ok(())
    }

    /// Returns true if the lock token currently names this holder.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.check_owned_by_me().is_ok()
    }

    /// Installs a lock token naming this holder.
    ///
    /// The id is written to a fresh temporary entry which is then renamed
    /// over the token. Any existing token is replaced. If a step before the
    /// rename fails, the temporary entry is removed and the lock is unchanged.
    /// An error is only returned if the new token was not installed.
    pub fn acquire(&self) -> StoreResult<()> {
        let temp = self.write_temp_token()?;
        // Dropping the failed temp file removes it.
        temp.persist(&self.lock_path).map_err(|e| e.error)?;
        self.installed();
        Ok(())
    }

    /// Installs a lock token naming this holder only if there is none.
    ///
    /// Of several holders claiming an unlocked directory at once, exactly one
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DifferentOwner`] if a token naming another
    /// holder appeared first.
    pub fn acquire_exclusive(&self) -> StoreResult<()> {
        let temp = self.write_temp_token()?;
        match temp.persist_noclobber(&self.lock_path) {
            Ok(_) => {
                self.installed();
                Ok(())
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                drop(e);
                match self.current_holder()? {
                    Some(holder) if holder == self.holder => Ok(()),
                    Some(holder) => Err(StoreError::DifferentOwner { holder }),
                    None => Err(StoreError::Unowned {
                        path: self.lock_path.clone(),
                    }),
                }
            }
            Err(e) => Err(e.error.into()),
        }
    }

    fn write_temp_token(&self) -> StoreResult<NamedTempFile> {
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_LOCK_PREFIX)
            .tempfile_in(&self.dir)?;
        temp.write_all(self.holder.to_string().as_bytes())?;
        temp.as_file().sync_all()?;
        Ok(temp)
    }

    /// The token is in place once renamed; a failed directory sync only
    /// weakens durability across a crash.
    fn installed(&self) {
        if let Err(e) = sync_directory(&self.dir) {
            warn!(path = %self.dir.display(), error = %e, "failed to sync store directory");
        }
        debug!(holder = self.holder, path = %self.lock_path.display(), "lock acquired");
    }

    /// Removes the lock token if it still names this holder.
    ///
    /// A token naming another holder, or a missing token, is reported and
    /// left untouched.
    pub fn release(&self) -> StoreResult<()> {
        self.check_owned_by_me()?;
        self.release_unchecked()
    }

    /// Removes the lock token without checking who holds it.
    pub fn release_unchecked(&self) -> StoreResult<()> {
        fs::remove_file(&self.lock_path)?;
        debug!(holder = self.holder, path = %self.lock_path.display(), "lock released");
        Ok(())
    }
}

/// Returns the holder named by the lock token of the store at `dir`.
///
/// Returns `None` if the directory has no lock token.
pub fn current_holder(dir: &Path) -> StoreResult<Option<u32>> {
    read_holder(&dir.join(LOCK_FILE))
}

/// Removes the lock token of the store at `dir` regardless of its holder.
///
/// Meant for clearing a stale token left by a crashed holder. Returns whether
/// a token was removed.
pub fn break_lock(dir: &Path) -> StoreResult<bool> {
    let lock_path = dir.join(LOCK_FILE);
    match fs::remove_file(&lock_path) {
        Ok(()) => {
            warn!(path = %lock_path.display(), "lock broken");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn read_holder(lock_path: &Path) -> StoreResult<Option<u32>> {
    match fs::read(lock_path) {
        Ok(bytes) => parse_holder(lock_path, &bytes).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_holder(lock_path: &Path, bytes: &[u8]) -> StoreResult<u32> {
    let content = String::from_utf8_lossy(bytes);
    content
        .trim()
        .parse()
        .map_err(|_| StoreError::MalformedLock {
            path: lock_path.to_path_buf(),
            content: content.into_owned(),
        })
}

/// Syncs the directory so the rename of the token is durable.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> StoreResult<()> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> StoreResult<()> {
    Ok(())
}
