//! B-tree node: a sorted run of entries plus, for internal nodes, one more
//! child than entries.
//!
//! Nodes know nothing about their parent or siblings. All shape-changing
//! algorithms live in the tree modules (`insert` and `delete`); this type
//! only stores data and answers occupancy questions.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::index::btree::Entry;

/// A single B-tree node.
///
/// # Layout
/// ```text
///            entries:   [ e0 ][ e1 ][ e2 ]
///            children: c0    c1    c2    c3
///
///   keys(c0) < e0 < keys(c1) < e1 < keys(c2) < e2 < keys(c3)
/// ```
///
/// A node is a leaf iff it has no children. Occupancy predicates take the
/// tree's minimum degree `t` as an argument; the degree is owned by the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, P> {
    pub(crate) entries: Vec<Entry<K, P>>,
    pub(crate) children: Vec<Node<K, P>>,
}

impl<K, P> Node<K, P> {
    /// Create an empty leaf.
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty leaf with room for a full node of degree `degree`.
    ///
    /// One extra slot covers the transient state during a split.
    pub(crate) fn with_degree(degree: usize) -> Self {
        Self {
            entries: Vec::with_capacity(2 * degree),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the node holds `2t - 1` entries and must be split before
    /// an insert may pass through it.
    #[inline]
    pub fn is_full(&self, degree: usize) -> bool {
        self.entries.len() == 2 * degree - 1
    }

    /// `true` when the node holds exactly `t - 1` entries and must be
    /// topped up before a delete may descend into it.
    #[inline]
    pub fn is_at_minimum(&self, degree: usize) -> bool {
        self.entries.len() == degree - 1
    }

    /// Entries in ascending key order.
    #[inline]
    pub fn entries(&self) -> &[Entry<K, P>] {
        &self.entries
    }

    /// Child subtrees; empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[Node<K, P>] {
        &self.children
    }

    /// Locate `key` within this node.
    ///
    /// Returns `Ok(i)` if `entries[i]` holds the key, otherwise `Err(i)`
    /// where `i` is the smallest index with `key < entries[i].key`
    /// (the child to descend into, or the insertion point in a leaf).
    pub(crate) fn find<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries
            .binary_search_by(|entry| entry.key().borrow().cmp(key))
    }

    /// Compare `key` against the entry at `index`.
    #[inline]
    pub(crate) fn cmp_at<Q>(&self, index: usize, key: &Q) -> Ordering
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        key.cmp(self.entries[index].key().borrow())
    }
}

impl<K, P> Default for Node<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
