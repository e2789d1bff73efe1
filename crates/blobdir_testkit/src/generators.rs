//! Property-based test generators using proptest.
//!
//! Provides strategies for generating blobs, identifier sets and store
//! operation sequences.

use blobdir_core::ObjectId;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::collections::BTreeSet;

/// Strategy for generating blobs (arbitrary bytes, possibly empty).
pub fn blob_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..1024)
}

/// Strategy for generating valid object ids.
pub fn object_id_strategy() -> impl Strategy<Value = ObjectId> {
    (1u64..10_000).prop_map(ObjectId::new)
}

/// Strategy for generating sets of distinct ids to seed a directory with.
pub fn id_set_strategy() -> impl Strategy<Value = BTreeSet<u64>> {
    prop::collection::btree_set(1u64..10_000, 0..16)
}

/// Strategy for generating names that are not valid store entries.
///
/// Names are non-empty, not all digits and do not start with the reserved
/// prefix.
pub fn stray_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_-]{0,15}").expect("Invalid regex")
}

/// A store operation for model-based testing.
#[derive(Debug, Clone)]
pub enum StoreOp {
    /// Create a new object.
    Create(Vec<u8>),
    /// Overwrite the object at this position among live objects.
    Save(usize, Vec<u8>),
    /// Delete the object at this position among live objects.
    Delete(usize),
    /// Load the object at this position among live objects.
    Load(usize),
}

/// Strategy for generating a single store operation.
pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => blob_strategy().prop_map(StoreOp::Create),
        2 => (any::<usize>(), blob_strategy()).prop_map(|(i, blob)| StoreOp::Save(i, blob)),
        1 => any::<usize>().prop_map(StoreOp::Delete),
        2 => any::<usize>().prop_map(StoreOp::Load),
    ]
}

/// Strategy for generating operation sequences.
pub fn store_ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(), 0..max_len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    ///
    /// Filesystem-backed properties use this to keep runs short.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
