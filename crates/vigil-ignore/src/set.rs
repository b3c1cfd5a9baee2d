//! Ignore set for one watch root.
//!
//! Built once during watch-root setup (`new` + repeated `add`), then shared
//! read-only with the crawl workers and the event loop, which only call
//! `check`.

use std::path::Path;

use vigil_config::{log_ignore_debug, log_ignore_info, log_ignore_warn, IgnoreConfig};

use crate::error::Result;
use crate::trie::{PrefixTrie, SEPARATOR};
use crate::vcs::VcsPolicy;
use crate::IgnoreCheck;

#[derive(Debug, Default)]
pub struct IgnoreSet {
    dirs: PrefixTrie,
    vcs: VcsPolicy,
}

impl IgnoreSet {
    /// Empty set; nothing is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the ignore rules of a watch root.
    ///
    /// Trailing separators are stripped from configured entries; entries
    /// that end up empty are skipped with a warning.
    pub fn from_config(config: &IgnoreConfig) -> Result<Self> {
        let mut set = Self::new();

        for dir in &config.ignore_dirs {
            match trim_trailing_separators(dir.as_bytes()) {
                [] => log_ignore_warn!("Skipping empty ignore_dirs entry", entry = %dir),
                entry => {
                    set.add(entry, false)?;
                }
            }
        }

        for root in &config.ignore_vcs {
            match trim_trailing_separators(root.as_bytes()) {
                [] => log_ignore_warn!("Skipping empty ignore_vcs entry", entry = %root),
                root => {
                    set.add(root, true)?;
                }
            }
        }

        for (root, reserved) in &config.vcs_exceptions {
            let root_bytes = trim_trailing_separators(root.as_bytes());
            if root_bytes.is_empty() {
                log_ignore_warn!("Skipping exceptions for empty VCS root", root = %root);
                continue;
            }
            for sub_path in reserved {
                match trim_separators(sub_path.as_bytes()) {
                    [] => log_ignore_warn!(
                        "Skipping empty VCS exception",
                        root = %root,
                        sub_path = %sub_path
                    ),
                    sub => {
                        set.add_vcs_exception(root_bytes, sub)?;
                    }
                }
            }
        }

        log_ignore_info!(
            "Ignore set built",
            dirs = set.dirs.len(),
            vcs_roots = set.vcs.len(),
            nodes = set.dirs.node_count()
        );
        Ok(set)
    }

    /// Add an ignored directory, or a VCS metadata directory when `is_vcs`.
    ///
    /// Returns `Ok(false)` if the entry was already present.
    pub fn add(&mut self, path: impl AsRef<[u8]>, is_vcs: bool) -> Result<bool> {
        let path = path.as_ref();
        if is_vcs {
            self.vcs.add_vcs_root(path)
        } else {
            self.dirs.insert(path)
        }
    }

    /// Keep `root/sub_path` visible even though `root` is a VCS directory.
    pub fn add_vcs_exception(
        &mut self,
        root: impl AsRef<[u8]>,
        sub_path: impl AsRef<[u8]>,
    ) -> Result<bool> {
        self.vcs.add_exception(root.as_ref(), sub_path.as_ref())
    }

    /// True if `path` should be skipped by the watcher.
    #[inline]
    pub fn check(&self, path: impl AsRef<[u8]>) -> bool {
        let path = path.as_ref();
        self.dirs.matches_ignored_ancestor(path) || self.vcs.check_vcs(path)
    }

    /// `check` for callers holding a `Path` relative to the watch root.
    #[cfg(unix)]
    pub fn should_ignore(&self, path: &Path) -> bool {
        use std::os::unix::ffi::OsStrExt;
        self.check(path.as_os_str().as_bytes())
    }

    /// `check` for callers holding a `Path` relative to the watch root.
    #[cfg(not(unix))]
    pub fn should_ignore(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.check(normalized.as_bytes())
    }

    /// Release everything. Callers must make sure no reader still holds the set.
    pub fn destroy(self) {
        log_ignore_debug!(
            "Destroying ignore set",
            dirs = self.dirs.len(),
            vcs_roots = self.vcs.len()
        );
        drop(self);
    }

    /// Number of ordinary ignored directories
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Number of VCS roots
    pub fn vcs_root_count(&self) -> usize {
        self.vcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.vcs.is_empty()
    }

    pub fn dirs(&self) -> &PrefixTrie {
        &self.dirs
    }

    pub fn vcs(&self) -> &VcsPolicy {
        &self.vcs
    }
}

impl IgnoreCheck for IgnoreSet {
    fn is_ignored(&self, path: &[u8]) -> bool {
        self.check(path)
    }
}

fn trim_trailing_separators(mut bytes: &[u8]) -> &[u8] {
    while let [rest @ .., SEPARATOR] = bytes {
        bytes = rest;
    }
    bytes
}

fn trim_separators(mut bytes: &[u8]) -> &[u8] {
    while let [SEPARATOR, rest @ ..] = bytes {
        bytes = rest;
    }
    trim_trailing_separators(bytes)
}
