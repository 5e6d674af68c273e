//! Structural invariant checker.
//!
//! Checked rules:
//! 1. Entries in a node are strictly ascending; no key appears twice.
//! 2. An internal node with `k` entries has exactly `k + 1` children.
//! 3. Keys in `children[i]` are below `entries[i]`, keys in
//!    `children[i + 1]` above it.
//! 4. Every leaf sits at depth `height`.
//! 5. Every non-root node holds between `t - 1` and `2t - 1` entries; the
//!    root holds at most `2t - 1`, and is only empty when it is a leaf.
//!
//! The tracked length must also match the number of entries present.

use crate::common::{Error, Result};
use crate::index::btree::{BTree, Node};

impl<K: Ord, P> BTree<K, P> {
    /// Verify every structural invariant of the tree.
    ///
    /// Walks the whole tree, so this is O(n). Meant for tests and debugging.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken rule found
    pub fn check_invariants(&self) -> Result<()> {
        if self.height == 0 {
            return Err(violation("height is 0".to_string()));
        }
        if self.root.entry_count() == 0 && !self.root.is_leaf() {
            return Err(violation("internal root has no entries".to_string()));
        }

        let checker = Checker {
            degree: self.degree,
            height: self.height,
        };
        let count = checker.check_node(&self.root, 1, None, None)?;

        if count != self.len {
            return Err(violation(format!(
                "tracked length {} but tree holds {} entries",
                self.len, count
            )));
        }
        Ok(())
    }
}

fn violation(reason: String) -> Error {
    Error::InvariantViolation(reason)
}

struct Checker {
    degree: usize,
    height: usize,
}

impl Checker {
    /// Check the subtree at `node`, whose keys must lie strictly between
    /// `lower` and `upper`. Returns the number of entries in the subtree.
    fn check_node<K: Ord, P>(
        &self,
        node: &Node<K, P>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize> {
        let count = node.entry_count();
        let max = 2 * self.degree - 1;

        if count > max {
            return Err(violation(format!(
                "node at depth {depth} holds {count} entries, max is {max}"
            )));
        }
        if depth > 1 && count < self.degree - 1 {
            return Err(violation(format!(
                "node at depth {depth} holds {count} entries, min is {}",
                self.degree - 1
            )));
        }

        for pair in node.entries.windows(2) {
            if pair[0].key() >= pair[1].key() {
                return Err(violation(format!(
                    "entries at depth {depth} are not strictly ascending"
                )));
            }
        }
        if let (Some(lower), Some(first)) = (lower, node.entries.first()) {
            if first.key() <= lower {
                return Err(violation(format!(
                    "key at depth {depth} is not above its left separator"
                )));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.entries.last()) {
            if last.key() >= upper {
                return Err(violation(format!(
                    "key at depth {depth} is not below its right separator"
                )));
            }
        }

        if node.is_leaf() {
            if depth != self.height {
                return Err(violation(format!(
                    "leaf at depth {depth} but height is {}",
                    self.height
                )));
            }
            return Ok(count);
        }

        if node.children.len() != count + 1 {
            return Err(violation(format!(
                "internal node at depth {depth} has {count} entries and {} children",
                node.children.len()
            )));
        }

        let mut total = count;
        for (i, child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 {
                lower
            } else {
                Some(node.entries[i - 1].key())
            };
            let child_upper = node.entries.get(i).map(|e| e.key()).or(upper);
            total += self.check_node(child, depth + 1, child_lower, child_upper)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::Entry;

    fn leaf(keys: &[u32]) -> Node<u32, ()> {
        Node {
            entries: keys.iter().map(|&k| Entry::new(k, ())).collect(),
            children: Vec::new(),
        }
    }

    fn tree_with_root(root: Node<u32, ()>, height: usize, len: usize) -> BTree<u32, ()> {
        let mut tree = BTree::new(2).unwrap();
        tree.root = root;
        tree.height = height;
        tree.len = len;
        tree
    }

    fn assert_violation(tree: &BTree<u32, ()>, needle: &str) {
        match tree.check_invariants() {
            Err(Error::InvariantViolation(reason)) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}")
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_trees_pass() {
        let tree: BTree<u32, ()> = BTree::new(2).unwrap();
        tree.check_invariants().unwrap();

        let root = Node {
            entries: vec![Entry::new(10, ())],
            children: vec![leaf(&[5]), leaf(&[15, 20])],
        };
        tree_with_root(root, 2, 4).check_invariants().unwrap();
    }

    #[test]
    fn test_detects_unsorted_entries() {
        assert_violation(&tree_with_root(leaf(&[3, 1]), 1, 2), "strictly ascending");
        assert_violation(&tree_with_root(leaf(&[3, 3]), 1, 2), "strictly ascending");
    }

    #[test]
    fn test_detects_overfull_node() {
        assert_violation(&tree_with_root(leaf(&[1, 2, 3, 4]), 1, 4), "max is 3");
    }

    #[test]
    fn test_detects_underfull_child() {
        let root = Node {
            entries: vec![Entry::new(10, ())],
            children: vec![leaf(&[]), leaf(&[15])],
        };
        assert_violation(&tree_with_root(root, 2, 2), "min is 1");
    }

    #[test]
    fn test_detects_misplaced_key() {
        let root = Node {
            entries: vec![Entry::new(10, ())],
            children: vec![leaf(&[12]), leaf(&[15])],
        };
        assert_violation(&tree_with_root(root, 2, 3), "right separator");
    }

    #[test]
    fn test_detects_child_count_mismatch() {
        let root = Node {
            entries: vec![Entry::new(10, ()), Entry::new(20, ())],
            children: vec![leaf(&[5]), leaf(&[15])],
        };
        assert_violation(&tree_with_root(root, 2, 4), "children");
    }

    #[test]
    fn test_detects_wrong_height() {
        let root = Node {
            entries: vec![Entry::new(10, ())],
            children: vec![leaf(&[5]), leaf(&[15])],
        };
        assert_violation(&tree_with_root(root, 3, 3), "height is 3");
    }

    #[test]
    fn test_detects_length_drift() {
        assert_violation(&tree_with_root(leaf(&[1, 2]), 1, 5), "tracked length 5");
    }

    #[test]
    fn test_detects_empty_internal_root() {
        let root = Node {
            entries: Vec::new(),
            children: vec![leaf(&[5])],
        };
        assert_violation(&tree_with_root(root, 2, 1), "internal root");
    }
}
