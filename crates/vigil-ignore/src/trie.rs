//! Byte-wise prefix trie over ignored directory paths.
//!
//! Lookups stop at the first terminal node that sits on a directory
//! boundary of the query, so the cost of a lookup is bounded by the length
//! of the shortest ignored ancestor, not by the number of stored entries.

use crate::error::{IgnoreError, Result};
use crate::IgnoreCheck;

/// The only path separator recognised by the matcher
pub const SEPARATOR: u8 = b'/';

#[derive(Debug, Default)]
struct TrieNode {
    /// Sorted by byte
    children: Vec<(u8, TrieNode)>,
    terminal: bool,
}

impl TrieNode {
    #[inline]
    fn child(&self, byte: u8) -> Option<&TrieNode> {
        self.children
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|idx| &self.children[idx].1)
    }

    fn child_or_insert(&mut self, byte: u8, created: &mut usize) -> &mut TrieNode {
        let idx = match self.children.binary_search_by_key(&byte, |(b, _)| *b) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, (byte, TrieNode::default()));
                *created += 1;
                idx
            }
        };
        &mut self.children[idx].1
    }
}

/// Prefix tree of ignored paths.
///
/// The root represents the empty path and is never terminal.
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    entries: usize,
    nodes: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path`, marking its final node terminal.
    ///
    /// Returns `Ok(false)` if the entry was already present; nothing changes
    /// in that case.
    pub fn insert(&mut self, path: &[u8]) -> Result<bool> {
        if path.is_empty() {
            return Err(IgnoreError::EmptyEntry);
        }

        let mut created = 0;
        let mut node = &mut self.root;
        for &byte in path {
            node = node.child_or_insert(byte, &mut created);
        }
        self.nodes += created;

        if node.terminal {
            return Ok(false);
        }
        node.terminal = true;
        self.entries += 1;
        Ok(true)
    }

    /// True if `query` is a stored entry or lies beneath one.
    #[inline]
    pub fn matches_ignored_ancestor(&self, query: &[u8]) -> bool {
        self.ignored_ancestor_len(query).is_some()
    }

    /// Length of the shortest stored entry that is `query` itself or one of
    /// its ancestor directories.
    pub fn ignored_ancestor_len(&self, query: &[u8]) -> Option<usize> {
        let mut node = &self.root;
        for (idx, &byte) in query.iter().enumerate() {
            node = node.child(byte)?;
            let consumed = idx + 1;
            if node.terminal && (consumed == query.len() || query[consumed] == SEPARATOR) {
                return Some(consumed);
            }
        }
        None
    }

    /// Exact lookup, without the ancestor rule
    pub fn contains(&self, path: &[u8]) -> bool {
        let mut node = &self.root;
        for &byte in path {
            match node.child(byte) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.terminal
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of nodes, not counting the root
    pub fn node_count(&self) -> usize {
        self.nodes
    }
}

impl IgnoreCheck for PrefixTrie {
    fn is_ignored(&self, path: &[u8]) -> bool {
        self.matches_ignored_ancestor(path)
    }
}

impl Drop for PrefixTrie {
    // Tear down iteratively; a recursive drop would use one stack frame per
    // byte of the longest entry.
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = std::mem::take(&mut self.root.children)
            .into_iter()
            .map(|(_, child)| child)
            .collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}
