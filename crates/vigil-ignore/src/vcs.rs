//! VCS metadata directories.
//!
//! A registered root (`.hg`, `.git`, ...) is ignored below, but the root
//! itself stays visible, and so do the reserved sub-paths configured for it
//! (working-copy state files such as a lock file).
//!
//! Registering a root seeds it with its [`DEFAULT_RESERVED`] sub-paths;
//! anything further comes from configuration through `add_exception`.

use std::collections::{HashMap, HashSet};

use crate::error::{IgnoreError, Result};
use crate::trie::PrefixTrie;
use crate::IgnoreCheck;

/// Sub-paths reserved for a root as soon as it is registered.
///
/// Mercurial's working-copy lock must stay observable while the store is ignored.
pub const DEFAULT_RESERVED: &[(&str, &[&str])] = &[(".hg", &["wlock"])];

/// Default reserved sub-paths for `root`, if any
pub fn default_reserved(root: &[u8]) -> &'static [&'static str] {
    DEFAULT_RESERVED
        .iter()
        .find(|(name, _)| name.as_bytes() == root)
        .map(|(_, reserved)| *reserved)
        .unwrap_or(&[])
}

#[derive(Debug, Default)]
pub struct VcsPolicy {
    roots: PrefixTrie,
    /// Reserved sub-paths, keyed by root
    exceptions: HashMap<Vec<u8>, HashSet<Vec<u8>>>,
}

impl VcsPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a VCS metadata directory. Returns `Ok(false)` if it was
    /// already registered.
    pub fn add_vcs_root(&mut self, name: &[u8]) -> Result<bool> {
        if name.is_empty() {
            return Err(IgnoreError::EmptyVcsRoot);
        }
        let added = self.roots.insert(name)?;
        let reserved = self.exceptions.entry(name.to_vec()).or_default();
        if added {
            reserved.extend(default_reserved(name).iter().map(|sub| sub.as_bytes().to_vec()));
        }
        Ok(added)
    }

    /// Keep `root/sub_path` visible. Registers `root` if needed.
    pub fn add_exception(&mut self, root: &[u8], sub_path: &[u8]) -> Result<bool> {
        if sub_path.is_empty() {
            return Err(IgnoreError::EmptyException {
                root: String::from_utf8_lossy(root).into_owned(),
            });
        }
        self.add_vcs_root(root)?;
        Ok(self
            .exceptions
            .entry(root.to_vec())
            .or_default()
            .insert(sub_path.to_vec()))
    }

    /// True if `query` lies strictly beneath a registered root and is not
    /// one of that root's reserved sub-paths.
    pub fn check_vcs(&self, query: &[u8]) -> bool {
        let Some(root_len) = self.roots.ignored_ancestor_len(query) else {
            return false;
        };
        if root_len == query.len() {
            return false;
        }

        let suffix = &query[root_len + 1..];
        match self.exceptions.get(&query[..root_len]) {
            Some(reserved) => !reserved.contains(suffix),
            None => true,
        }
    }

    /// Registered roots with their reserved sub-paths
    pub fn roots(&self) -> impl Iterator<Item = (&[u8], &HashSet<Vec<u8>>)> {
        self.exceptions
            .iter()
            .map(|(root, reserved)| (root.as_slice(), reserved))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl IgnoreCheck for VcsPolicy {
    fn is_ignored(&self, path: &[u8]) -> bool {
        self.check_vcs(path)
    }
}
