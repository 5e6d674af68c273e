//! The B-tree itself: construction, search and read-only accessors.
//!
//! Insert lives in `insert.rs`, delete in `delete.rs`, traversal in
//! `traverse.rs` and the invariant checker in `validate.rs`. They all
//! extend the same [`BTree`] type.

use std::borrow::Borrow;

use crate::common::{BTreeOptions, Result};
use crate::index::btree::{Entry, Node, TreeStats};

/// An in-memory B-tree of minimum degree `t`.
///
/// # Structure
/// ```text
///                      ┌────────────┐
///        height 1      │  10 │ 20   │          root: 0..=2t-1 entries
///                      └──┬────┬───┬┘
///            ┌────────────┘    │   └──────────┐
///      ┌─────┴─────┐     ┌─────┴────┐     ┌───┴───┐
///      │ 5 │ 6 │ 7 │     │ 12 │ 17  │     │  30   │   height 2
///      └───────────┘     └──────────┘     └───────┘
///                  other nodes: t-1..=2t-1 entries
/// ```
///
/// Every node is exclusively owned by its parent and the root by the tree,
/// so dropping a node during a merge or root collapse drops its whole
/// subtree. There are no parent pointers and no sharing.
///
/// # Concurrency
/// `BTree` is a plain single-threaded structure: mutation needs `&mut self`.
/// Wrap it in [`SharedBTree`](crate::SharedBTree) (or any lock) to share it
/// between threads.
///
/// # Usage
/// ```
/// use btree_ds::{BTree, Error};
///
/// let mut tree = BTree::new(2)?;
/// tree.insert(10, "ten")?;
/// tree.insert(20, "twenty")?;
///
/// assert_eq!(tree.get(&10), Some(&"ten"));
/// assert_eq!(tree.insert(10, "again"), Err(Error::DuplicateKey));
///
/// let removed = tree.delete(&10)?;
/// assert_eq!(removed.into_parts(), (10, "ten"));
/// assert!(tree.search(&10).is_none());
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K, P> {
    pub(crate) root: Node<K, P>,

    /// Minimum degree `t` (immutable after construction).
    pub(crate) degree: usize,

    /// Number of levels; every leaf sits at depth `height`.
    pub(crate) height: usize,

    /// Total entries across all nodes.
    pub(crate) len: usize,

    pub(crate) stats: TreeStats,
}

impl<K, P> BTree<K, P> {
    /// Create an empty tree with minimum degree `degree`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < 2`
    pub fn new(degree: usize) -> Result<Self> {
        Self::with_options(BTreeOptions::default().with_degree(degree))
    }

    /// Create an empty tree from [`BTreeOptions`].
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if the options name a degree below 2
    pub fn with_options(options: BTreeOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            root: Node::with_degree(options.degree),
            degree: options.degree,
            height: 1,
            len: 0,
            stats: TreeStats::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of levels. An empty tree has height 1 (a single empty leaf).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the root node, for inspecting the tree's shape.
    #[inline]
    pub fn root(&self) -> &Node<K, P> {
        &self.root
    }

    /// Rebalancing counters since construction or the last [`reset_stats`].
    ///
    /// [`reset_stats`]: BTree::reset_stats
    #[inline]
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Drop every entry, leaving an empty root leaf of height 1.
    ///
    /// The degree is kept. Statistics are not reset.
    pub fn clear(&mut self) {
        self.root = Node::with_degree(self.degree);
        self.height = 1;
        self.len = 0;
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<&Entry<K, P>> {
        let mut node = &self.root;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.entries.first()
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<&Entry<K, P>> {
        let mut node = &self.root;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.entries.last()
    }
}

impl<K: Ord, P> BTree<K, P> {
    // ========================================================================
    // Search
    // ========================================================================

    /// Find the entry holding `key`.
    ///
    /// Walks down from the root, binary-searching each node's entries.
    /// Costs O(height) node visits with O(log t) comparisons per node.
    pub fn search<Q>(&self, key: &Q) -> Option<&Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = &self.root;
        loop {
            match node.find(key) {
                Ok(index) => return Some(&node.entries[index]),
                Err(_) if node.is_leaf() => return None,
                Err(index) => node = &node.children[index],
            }
        }
    }

    /// Payload stored under `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&P>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(Entry::payload)
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }
}

impl<K, P> Default for BTree<K, P> {
    fn default() -> Self {
        let degree = BTreeOptions::default().degree;
        Self {
            root: Node::with_degree(degree),
            degree,
            height: 1,
            len: 0,
            stats: TreeStats::new(),
        }
    }
}
