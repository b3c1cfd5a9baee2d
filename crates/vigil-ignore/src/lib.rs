//! # vigil-ignore
//!
//! Ignore-path matcher for the vigil filesystem watcher.
//!
//! ## Architecture
//!
//! Every path produced by a directory crawl or a kernel change event is run
//! through [`IgnoreSet::check`] to decide whether it falls inside an ignored
//! subtree:
//! - Ordinary entries (`build`, `buck-out`, `baz/build`) live in a byte-wise
//!   [`PrefixTrie`]; an entry matches itself and everything below it, and
//!   only on a directory boundary (`build` never matches `builda`).
//! - VCS metadata directories (`.hg`, `.git`, `.svn`) are handled by the
//!   [`VcsPolicy`]: the directory itself and its reserved sub-paths stay
//!   visible, everything else below it is ignored.
//!
//! ## Lifecycle
//!
//! A set is built once per watch root ([`IgnoreSet::new`] + [`IgnoreSet::add`],
//! or [`IgnoreSet::from_config`]) and then only read, from any number of
//! threads. Reconfiguration goes through [`SharedIgnoreSet`], which swaps in
//! a freshly built set instead of mutating the shared one.

pub mod error;
pub mod set;
pub mod shared;
pub mod trie;
pub mod vcs;

pub use error::{IgnoreError, Result};
pub use set::IgnoreSet;
pub use shared::SharedIgnoreSet;
pub use trie::{PrefixTrie, SEPARATOR};
pub use vcs::{default_reserved, VcsPolicy, DEFAULT_RESERVED};

/// Anything that can decide whether a path is ignored.
pub trait IgnoreCheck {
    fn is_ignored(&self, path: &[u8]) -> bool;
}

impl<T: IgnoreCheck + ?Sized> IgnoreCheck for &T {
    fn is_ignored(&self, path: &[u8]) -> bool {
        (**self).is_ignored(path)
    }
}

impl<T: IgnoreCheck + ?Sized> IgnoreCheck for std::sync::Arc<T> {
    fn is_ignored(&self, path: &[u8]) -> bool {
        (**self).is_ignored(path)
    }
}
