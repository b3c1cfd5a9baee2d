//! Reconfigurable handle to the current ignore set.
//!
//! Ignore sets are never mutated once shared. Reconfiguring builds a fresh
//! set and swaps the reference; readers keep using the snapshot they loaded
//! until they drop it, and the old set is freed with its last reader.
//!
//! [`SharedIgnoreSet::check`] takes the read lock for the duration of one
//! lookup. Crawl workers checking a whole directory listing should `load()`
//! once and run the batch against that snapshot.

use std::sync::Arc;

use parking_lot::RwLock;
use vigil_config::{log_ignore_info, IgnoreConfig};

use crate::error::Result;
use crate::set::IgnoreSet;
use crate::IgnoreCheck;

#[derive(Debug, Default)]
pub struct SharedIgnoreSet {
    current: RwLock<Arc<IgnoreSet>>,
}

impl SharedIgnoreSet {
    pub fn new(set: IgnoreSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    pub fn from_config(config: &IgnoreConfig) -> Result<Self> {
        Ok(Self::new(IgnoreSet::from_config(config)?))
    }

    /// Snapshot of the current set. The lock is held only while cloning the `Arc`.
    pub fn load(&self) -> Arc<IgnoreSet> {
        self.current.read().clone()
    }

    /// Swap in a new set, returning the previous one.
    pub fn store(&self, set: IgnoreSet) -> Arc<IgnoreSet> {
        std::mem::replace(&mut *self.current.write(), Arc::new(set))
    }

    /// Rebuild from `config` and swap. On error the current set stays in place.
    pub fn reload(&self, config: &IgnoreConfig) -> Result<()> {
        let set = IgnoreSet::from_config(config)?;
        let dirs = set.dir_count();
        let vcs_roots = set.vcs_root_count();
        self.store(set);
        log_ignore_info!("Ignore set swapped", dirs = dirs, vcs_roots = vcs_roots);
        Ok(())
    }

    /// One-off check against the current set, under the read lock.
    pub fn check(&self, path: impl AsRef<[u8]>) -> bool {
        self.current.read().check(path)
    }
}

impl IgnoreCheck for SharedIgnoreSet {
    fn is_ignored(&self, path: &[u8]) -> bool {
        self.check(path)
    }
}
