//! # BlobDir Core
//!
//! Directory-backed blob store with single-owner locking.
//!
//! A store maps positive integer identifiers to opaque byte payloads, one
//! file per payload, inside a directory that only one holder (by default, one
//! process) may use at a time.
//!
//! This crate provides:
//! - [`BlobDir`], the owned directory handle with create/load/save/delete and
//!   full loads
//! - [`Lease`], the lock token protocol used to claim and verify ownership
//! - Directory scanning that seeds identifier allocation and validates layout
//! - [`InMemoryStore`] for tests, behind the same [`BlobStore`] trait
//!
//! ## Example
//!
//! ```rust
//! use blobdir_core::{BlobDir, ObjectId};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let mut store = BlobDir::open(temp.path()).unwrap();
//!
//! let id = store.create(b"hello").unwrap();
//! assert_eq!(id, ObjectId::new(2));
//! assert_eq!(store.load(id).unwrap(), b"hello");
//!
//! store.close().unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dir;
mod error;
mod lease;
mod memory;
mod scan;
mod traits;
mod types;

pub use config::Config;
pub use dir::BlobDir;
pub use error::{StoreError, StoreResult};
pub use lease::{break_lock, current_holder, Lease, LOCK_FILE};
pub use memory::InMemoryStore;
pub use scan::{ScanSummary, RESERVED_PREFIX};
pub use traits::BlobStore;
pub use types::{Blob, Item, ObjectId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
