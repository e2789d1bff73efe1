//! # BlobDir Testkit
//!
//! Test utilities for BlobDir.
//!
//! This crate provides:
//! - Temporary store directories with seeding helpers
//! - Property-based test generators using proptest
//! - A model harness checking any [`blobdir_core::BlobStore`] against a map
//!
//! ## Usage
//!
//! ```rust
//! use blobdir_testkit::prelude::*;
//!
//! let dir = TestDir::with_objects(&[1, 3, 7]);
//! let mut store = dir.open();
//! assert_eq!(store.create(b"next").unwrap().as_u64(), 8);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::harness::*;
}

pub use fixtures::*;
pub use generators::*;
pub use harness::*;
