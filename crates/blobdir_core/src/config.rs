//! Store configuration.

/// Configuration for opening a blob directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to create the directory (and its parents) if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether `open` claims ownership of a directory that has no lock token.
    ///
    /// When disabled, an unclaimed directory fails to open with
    /// [`crate::StoreError::Unowned`].
    pub claim_if_unlocked: bool,

    /// Whether releasing the lock first checks that it still names us.
    pub verify_on_release: bool,

    /// Whether every saved blob is synced to disk before `save` returns.
    pub sync_writes: bool,

    /// Holder id written to the lock token. `None` uses the process id.
    pub holder_id: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            claim_if_unlocked: true,
            verify_on_release: true,
            sync_writes: false,
            holder_id: None,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to claim an unlocked directory on open.
    #[must_use]
    pub const fn claim_if_unlocked(mut self, value: bool) -> Self {
        self.claim_if_unlocked = value;
        self
    }

    /// Sets whether release checks ownership before removing the lock.
    #[must_use]
    pub const fn verify_on_release(mut self, value: bool) -> Self {
        self.verify_on_release = value;
        self
    }

    /// Sets whether saved blobs are synced to disk.
    #[must_use]
    pub const fn sync_writes(mut self, value: bool) -> Self {
        self.sync_writes = value;
        self
    }

    /// Overrides the holder id written to the lock token.
    #[must_use]
    pub const fn holder_id(mut self, holder: u32) -> Self {
        self.holder_id = Some(holder);
        self
    }

    /// Returns the holder id this configuration resolves to.
    #[must_use]
    pub fn resolved_holder(&self) -> u32 {
        self.holder_id.unwrap_or_else(std::process::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.create_if_missing);
        assert!(config.claim_if_unlocked);
        assert!(config.verify_on_release);
        assert!(!config.sync_writes);
        assert_eq!(config.resolved_holder(), std::process::id());
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .create_if_missing(false)
            .claim_if_unlocked(false)
            .sync_writes(true)
            .holder_id(77);

        assert!(!config.create_if_missing);
        assert!(!config.claim_if_unlocked);
        assert!(config.sync_writes);
        assert_eq!(config.resolved_holder(), 77);
    }
}
