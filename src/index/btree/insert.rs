//! Insertion with proactive (top-down) node splitting.
//!
//! Any full node met on the way down is split before the descent enters it,
//! so the leaf that finally receives the entry always has room and no split
//! ever has to travel back up. The root is the only node whose split adds
//! a level.

use std::cmp::Ordering;

use crate::common::{Error, Result};
use crate::index::btree::{BTree, Entry, Node, TreeStats};

impl<K: Ord, P> BTree<K, P> {
    /// Insert `key` with `payload`.
    ///
    /// Existing keys are never overwritten. The duplicate check runs before
    /// any split, so a rejected insert leaves the tree untouched.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present
    pub fn insert(&mut self, key: K, payload: P) -> Result<()> {
        if self.contains_key(&key) {
            tracing::debug!(len = self.len, "insert rejected: duplicate key");
            return Err(Error::DuplicateKey);
        }

        if self.root.is_full(self.degree) {
            self.grow();
        }

        insert_non_full(
            &mut self.root,
            Entry::new(key, payload),
            self.degree,
            &mut self.stats,
        );
        self.len += 1;

        Ok(())
    }

    /// Split a full root under a fresh empty root. Height grows by one.
    fn grow(&mut self) {
        let old_root = std::mem::replace(&mut self.root, Node::with_degree(self.degree));
        self.root.children.push(old_root);
        split_child(&mut self.root, 0, self.degree, &mut self.stats);

        self.height += 1;
        self.stats.height_increases += 1;
        tracing::debug!(height = self.height, "root split, tree grew");
    }
}

/// Insert `entry` into the subtree rooted at `node`, which must not be full.
fn insert_non_full<K: Ord, P>(
    mut node: &mut Node<K, P>,
    entry: Entry<K, P>,
    degree: usize,
    stats: &mut TreeStats,
) {
    loop {
        let mut index = node.entries.partition_point(|e| e.key() < entry.key());

        if node.is_leaf() {
            node.entries.insert(index, entry);
            return;
        }

        if node.children[index].is_full(degree) {
            split_child(node, index, degree, stats);
            // The promoted median now sits at `index`; pick its side.
            if node.cmp_at(index, entry.key()) == Ordering::Greater {
                index += 1;
            }
        }

        node = &mut node.children[index];
    }
}

/// Split the full child at `index` of `parent`.
///
/// ```text
///   before:   parent [ .. a   b .. ]
///                          │
///                   child [ l0 .. l(t-2) │ m │ u0 .. u(t-2) ]
///
///   after:    parent [ .. a   m   b .. ]
///                          │     │
///               [ l0 .. l(t-2) ] [ u0 .. u(t-2) ]
/// ```
///
/// Both halves end with exactly `t - 1` entries; an internal child also
/// hands its upper `t` children to the new sibling.
pub(crate) fn split_child<K, P>(
    parent: &mut Node<K, P>,
    index: usize,
    degree: usize,
    stats: &mut TreeStats,
) {
    let child = &mut parent.children[index];
    debug_assert!(child.is_full(degree), "split_child on a non-full node");

    let mut upper = child.entries.split_off(degree - 1);
    let median = upper.remove(0);
    let upper_children = if child.is_leaf() {
        Vec::new()
    } else {
        child.children.split_off(degree)
    };

    let mut sibling = Node::with_degree(degree);
    sibling.entries.extend(upper);
    sibling.children = upper_children;

    tracing::trace!(
        target: "btree::split",
        index,
        left = child.entry_count(),
        right = sibling.entry_count(),
        leaf = sibling.is_leaf(),
        "split full child"
    );

    parent.entries.insert(index, median);
    parent.children.insert(index + 1, sibling);
    stats.splits += 1;
}
