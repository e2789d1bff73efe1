//! Core type definitions for blob directories.

use std::fmt;

/// Opaque blob payload. Stored and returned byte-for-byte.
pub type Blob = Vec<u8>;

/// Identifier of a stored blob.
///
/// Identifiers are positive integers, allocated in increasing order and never
/// reused by a handle. On disk an identifier is the plain decimal name of the
/// file holding its blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The "no identifier" value, returned by failed creations.
    pub const NULL: Self = Self(0);

    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true for [`ObjectId::NULL`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the identifier that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the file name this identifier is stored under.
    #[must_use]
    pub fn file_name(self) -> String {
        self.0.to_string()
    }

    /// Parses a file name produced by [`ObjectId::file_name`].
    ///
    /// Only the canonical form is accepted: ASCII digits, no sign, and no
    /// leading zeros except for `"0"` itself.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if name.len() > 1 && name.starts_with('0') {
            return None;
        }
        name.parse().ok().map(Self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A blob paired with its identifier, produced by a full load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Identifier the blob is stored under.
    pub id: ObjectId,
    /// The stored bytes.
    pub blob: Blob,
}

impl Item {
    /// Creates an item.
    #[must_use]
    pub fn new(id: ObjectId, blob: Blob) -> Self {
        Self { id, blob }
    }
}
