//! Deletion with top-down rebalancing.
//!
//! Before the descent steps into a child, that child is topped up to at
//! least `t` entries (by borrowing from a sibling or by merging with one),
//! so removing a single entry further down can never leave a non-root node
//! under `t - 1`. The pass never backtracks. The root is the only node
//! allowed to run empty; it is collapsed once the pass returns.

use std::borrow::Borrow;

use crate::common::{Error, Result};
use crate::index::btree::{BTree, Entry, Node, TreeStats};

impl<K: Ord, P> BTree<K, P> {
    /// Remove the entry holding `key` and return it.
    ///
    /// Existence is checked before any rebalancing starts, so a rejected
    /// delete leaves the tree untouched.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is not present
    pub fn delete<Q>(&mut self, key: &Q) -> Result<Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            tracing::debug!(len = self.len, "delete rejected: key not found");
            return Err(Error::KeyNotFound);
        }

        let mut rebalancer = Rebalancer {
            degree: self.degree,
            stats: &mut self.stats,
        };
        let removed = rebalancer.delete_from(&mut self.root, key);
        self.shrink();

        let removed = removed.ok_or(Error::KeyNotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Replace an empty internal root with its only child.
    fn shrink(&mut self) {
        if self.root.entry_count() > 0 || self.root.is_leaf() {
            return;
        }
        if let Some(child) = self.root.children.pop() {
            self.root = child;
            self.height -= 1;
            self.stats.height_decreases += 1;
            tracing::debug!(height = self.height, "root emptied, tree shrank");
        }
    }
}

/// Carries the degree and stats through the recursive descent.
struct Rebalancer<'a> {
    degree: usize,
    stats: &'a mut TreeStats,
}

impl Rebalancer<'_> {
    /// Remove `key` from the subtree at `node`.
    ///
    /// `node` is either the root or holds at least `t` entries.
    fn delete_from<K, P, Q>(&mut self, node: &mut Node<K, P>, key: &Q) -> Option<Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match node.find(key) {
            Ok(index) if node.is_leaf() => Some(node.entries.remove(index)),
            Ok(index) => self.delete_internal_entry(node, index, key),
            Err(_) if node.is_leaf() => None,
            Err(index) => {
                let index = self.fill_child(node, index);
                self.delete_from(&mut node.children[index], key)
            }
        }
    }

    /// Remove `entries[index]` of an internal node.
    fn delete_internal_entry<K, P, Q>(
        &mut self,
        node: &mut Node<K, P>,
        index: usize,
        key: &Q,
    ) -> Option<Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if node.children[index].entry_count() >= self.degree {
            let predecessor = self.remove_max(&mut node.children[index])?;
            return Some(std::mem::replace(&mut node.entries[index], predecessor));
        }

        if node.children[index + 1].entry_count() >= self.degree {
            let successor = self.remove_min(&mut node.children[index + 1])?;
            return Some(std::mem::replace(&mut node.entries[index], successor));
        }

        // Both neighbours at t - 1: the key becomes the median of the merge.
        self.merge_children(node, index);
        self.delete_from(&mut node.children[index], key)
    }

    /// Remove the rightmost entry of the subtree at `node` (in-order predecessor).
    fn remove_max<K, P>(&mut self, node: &mut Node<K, P>) -> Option<Entry<K, P>> {
        if node.is_leaf() {
            return node.entries.pop();
        }
        let last = node.children.len() - 1;
        let index = self.fill_child(node, last);
        self.remove_max(&mut node.children[index])
    }

    /// Remove the leftmost entry of the subtree at `node` (in-order successor).
    fn remove_min<K, P>(&mut self, node: &mut Node<K, P>) -> Option<Entry<K, P>> {
        if node.is_leaf() {
            if node.entries.is_empty() {
                return None;
            }
            return Some(node.entries.remove(0));
        }
        let index = self.fill_child(node, 0);
        self.remove_min(&mut node.children[index])
    }

    /// Make sure `children[index]` holds at least `t` entries before the
    /// descent enters it.
    ///
    /// Returns the index the child lives at afterwards: merging with the
    /// left sibling shifts it one slot left.
    fn fill_child<K, P>(&mut self, parent: &mut Node<K, P>, index: usize) -> usize {
        if !parent.children[index].is_at_minimum(self.degree) {
            return index;
        }

        let min = self.degree - 1;
        if index > 0 && parent.children[index - 1].entry_count() > min {
            self.rotate_right(parent, index);
            index
        } else if index + 1 < parent.children.len()
            && parent.children[index + 1].entry_count() > min
        {
            self.rotate_left(parent, index);
            index
        } else if index > 0 {
            self.merge_children(parent, index - 1);
            index - 1
        } else {
            self.merge_children(parent, index);
            index
        }
    }

    /// Move one entry from the left sibling through the parent into
    /// `children[index]`.
    ///
    /// ```text
    ///   parent [ .. s .. ]            parent [ .. x .. ]
    ///          /      \       =>             /      \
    ///   [ .. w x ]  [ a b ]           [ .. w ]  [ s a b ]
    /// ```
    fn rotate_right<K, P>(&mut self, parent: &mut Node<K, P>, index: usize) {
        let (head, tail) = parent.children.split_at_mut(index);
        let left = &mut head[index - 1];
        let child = &mut tail[0];

        let Some(borrowed) = left.entries.pop() else {
            return;
        };
        let separator = std::mem::replace(&mut parent.entries[index - 1], borrowed);
        child.entries.insert(0, separator);
        if let Some(grandchild) = left.children.pop() {
            child.children.insert(0, grandchild);
        }

        self.stats.rotations += 1;
        tracing::trace!(
            target: "btree::rotate",
            index,
            direction = "right",
            donor = left.entry_count(),
            "borrowed from left sibling"
        );
    }

    /// Move one entry from the right sibling through the parent into
    /// `children[index]`. Mirror image of [`rotate_right`](Self::rotate_right).
    fn rotate_left<K, P>(&mut self, parent: &mut Node<K, P>, index: usize) {
        let (head, tail) = parent.children.split_at_mut(index + 1);
        let child = &mut head[index];
        let right = &mut tail[0];

        if right.entries.is_empty() {
            return;
        }
        let borrowed = right.entries.remove(0);
        let separator = std::mem::replace(&mut parent.entries[index], borrowed);
        child.entries.push(separator);
        if !right.is_leaf() {
            child.children.push(right.children.remove(0));
        }

        self.stats.rotations += 1;
        tracing::trace!(
            target: "btree::rotate",
            index,
            direction = "left",
            donor = right.entry_count(),
            "borrowed from right sibling"
        );
    }

    /// Fold `entries[index]` and `children[index + 1]` into `children[index]`.
    ///
    /// Both children hold `t - 1` entries, so the result holds exactly
    /// `2t - 1`. The right child is dropped.
    fn merge_children<K, P>(&mut self, parent: &mut Node<K, P>, index: usize) {
        let right = parent.children.remove(index + 1);
        let separator = parent.entries.remove(index);

        let left = &mut parent.children[index];
        left.entries.push(separator);
        left.entries.extend(right.entries);
        left.children.extend(right.children);

        self.stats.merges += 1;
        tracing::trace!(
            target: "btree::merge",
            index,
            merged = left.entry_count(),
            parent = parent.entries.len(),
            "merged sibling pair"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(node: &Node<u32, ()>) -> Vec<u32> {
        node.entries().iter().map(|e| *e.key()).collect()
    }

    fn leaf(keys: &[u32]) -> Node<u32, ()> {
        Node {
            entries: keys.iter().map(|&k| Entry::new(k, ())).collect(),
            children: Vec::new(),
        }
    }

    fn internal(keys: &[u32], children: Vec<Node<u32, ()>>) -> Node<u32, ()> {
        Node {
            entries: keys.iter().map(|&k| Entry::new(k, ())).collect(),
            children,
        }
    }

    #[test]
    fn test_rotate_right_moves_separator_down() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let mut parent = internal(&[20], vec![leaf(&[5, 10]), leaf(&[30])]);

        r.rotate_right(&mut parent, 1);

        assert_eq!(keys(&parent), vec![10]);
        assert_eq!(keys(&parent.children[0]), vec![5]);
        assert_eq!(keys(&parent.children[1]), vec![20, 30]);
        assert_eq!(stats.rotations, 1);
    }

    #[test]
    fn test_rotate_left_moves_separator_down() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let mut parent = internal(&[20], vec![leaf(&[5]), leaf(&[30, 40])]);

        r.rotate_left(&mut parent, 0);

        assert_eq!(keys(&parent), vec![30]);
        assert_eq!(keys(&parent.children[0]), vec![5, 20]);
        assert_eq!(keys(&parent.children[1]), vec![40]);
    }

    #[test]
    fn test_rotate_moves_grandchild() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let left = internal(&[10, 30], vec![leaf(&[5]), leaf(&[20]), leaf(&[40])]);
        let child = internal(&[70], vec![leaf(&[60]), leaf(&[80])]);
        let mut parent = internal(&[50], vec![left, child]);

        r.rotate_right(&mut parent, 1);

        assert_eq!(keys(&parent), vec![30]);
        let left = &parent.children[0];
        assert_eq!(keys(left), vec![10]);
        assert_eq!(left.children.len(), 2);
        let child = &parent.children[1];
        assert_eq!(keys(child), vec![50, 70]);
        assert_eq!(child.children.len(), 3);
        assert_eq!(keys(&child.children[0]), vec![40]);
    }

    #[test]
    fn test_merge_children() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let mut parent = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);

        r.merge_children(&mut parent, 1);

        assert_eq!(keys(&parent), vec![10]);
        assert_eq!(parent.children.len(), 2);
        assert_eq!(keys(&parent.children[1]), vec![15, 20, 25]);
        assert_eq!(stats.merges, 1);
    }

    #[test]
    fn test_fill_child_prefers_left_merge() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let mut parent = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);

        let index = r.fill_child(&mut parent, 1);

        assert_eq!(index, 0);
        assert_eq!(keys(&parent.children[0]), vec![5, 10, 15]);
        assert_eq!(keys(&parent), vec![20]);
    }

    #[test]
    fn test_fill_child_skips_child_with_spare() {
        let mut stats = TreeStats::new();
        let mut r = Rebalancer { degree: 2, stats: &mut stats };
        let mut parent = internal(&[10], vec![leaf(&[5]), leaf(&[15, 17])]);
        let before = parent.clone();

        assert_eq!(r.fill_child(&mut parent, 1), 1);
        assert_eq!(parent, before);
        assert_eq!(stats.rebalances(), 0);
    }

    #[test]
    fn test_delete_from_leaf_root() {
        let mut tree = BTree::new(3).unwrap();
        for key in [3u32, 1, 2] {
            tree.insert(key, ()).unwrap();
        }
        let removed = tree.delete(&2).unwrap();
        assert_eq!(*removed.key(), 2);
        assert_eq!(keys(tree.root()), vec![1, 3]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_delete_missing_key_leaves_tree_untouched() {
        let mut tree = BTree::new(2).unwrap();
        for key in 0..20u32 {
            tree.insert(key, ()).unwrap();
        }
        let before = tree.root().clone();
        let stats = tree.stats();

        assert_eq!(tree.delete(&100).unwrap_err(), Error::KeyNotFound);

        assert_eq!(tree.root(), &before);
        assert_eq!(tree.stats(), stats);
        assert_eq!(tree.len(), 20);
    }

    #[test]
    fn test_successor_taken_from_right_subtree() {
        // t = 2: root [10] over [5] and [15, 20, 30]; left at minimum.
        let mut tree = BTree::new(2).unwrap();
        for key in [10u32, 20, 5, 30, 15] {
            tree.insert(key, ()).unwrap();
        }
        assert_eq!(keys(tree.root()), vec![10]);
        assert_eq!(keys(&tree.root().children()[0]), vec![5]);
        assert_eq!(keys(&tree.root().children()[1]), vec![15, 20, 30]);

        tree.delete(&10).unwrap();

        assert_eq!(keys(tree.root()), vec![15]);
        assert_eq!(keys(&tree.root().children()[0]), vec![5]);
        assert_eq!(keys(&tree.root().children()[1]), vec![20, 30]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_everything() {
        let mut tree = BTree::new(3).unwrap();
        for key in 0..200u32 {
            tree.insert(key, ()).unwrap();
        }
        for key in (0..200u32).step_by(2).chain((1..200u32).step_by(2)) {
            tree.delete(&key).unwrap();
            tree.check_invariants().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().entry_count(), 0);
    }
}
