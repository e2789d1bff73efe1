//! Error types for blob directory operations.

use crate::types::ObjectId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in blob store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The lock token names a different holder.
    #[error("owned by holder {holder}")]
    DifferentOwner {
        /// The holder id found in the lock token.
        holder: u32,
    },

    /// The lock token is absent or unreadable, so ownership cannot be verified.
    #[error("ownership unavailable: no readable lock at {}", path.display())]
    Unowned {
        /// Path of the expected lock token.
        path: PathBuf,
    },

    /// The lock token exists but does not contain a holder id.
    #[error("malformed lock at {}: {content:?}", path.display())]
    MalformedLock {
        /// Path of the lock token.
        path: PathBuf,
        /// The raw token content.
        content: String,
    },

    /// No blob is stored under the requested identifier.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The directory holds an entry that violates the store layout.
    #[error("corrupted content at {}: {reason}", path.display())]
    Corrupted {
        /// The offending entry.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// The store path cannot be used as a store directory.
    #[error("invalid store directory: {message}")]
    InvalidDirectory {
        /// Description of the problem.
        message: String,
    },

    /// The identifier counter cannot advance any further.
    #[error("identifier space exhausted after {0}")]
    IdSpaceExhausted(ObjectId),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Creates a corrupted content error.
    pub fn corrupted(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid directory error.
    pub fn invalid_directory(message: impl Into<String>) -> Self {
        Self::InvalidDirectory {
            message: message.into(),
        }
    }

    /// Returns true if the error means the caller does not own the store.
    #[must_use]
    pub fn is_ownership_conflict(&self) -> bool {
        matches!(
            self,
            Self::DifferentOwner { .. } | Self::Unowned { .. } | Self::MalformedLock { .. }
        )
    }

    /// Returns true for a missing object on a point read.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the directory content violates the store layout.
    #[must_use]
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(StoreError::DifferentOwner { holder: 7 }.is_ownership_conflict());
        assert!(StoreError::Unowned {
            path: PathBuf::from(".lock")
        }
        .is_ownership_conflict());
        assert!(StoreError::NotFound(ObjectId::new(3)).is_not_found());
        assert!(StoreError::corrupted("x/abc", "not an object name").is_corrupted());
        assert!(!StoreError::Io(io::Error::from(io::ErrorKind::NotFound)).is_not_found());
    }

    #[test]
    fn messages_carry_context() {
        let err = StoreError::DifferentOwner { holder: 4242 };
        assert_eq!(err.to_string(), "owned by holder 4242");

        let err = StoreError::corrupted("store/notes", "not an object name");
        assert!(err.to_string().contains("store/notes"));
    }
}
