//! Errors raised while building an ignore set.
//!
//! Lookups never fail; only configuration can be rejected.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IgnoreError {
    #[error("ignore entry must not be empty")]
    EmptyEntry,

    #[error("VCS root name must not be empty")]
    EmptyVcsRoot,

    #[error("reserved sub-path for VCS root {root:?} must not be empty")]
    EmptyException { root: String },
}

pub type Result<T> = std::result::Result<T, IgnoreError>;
