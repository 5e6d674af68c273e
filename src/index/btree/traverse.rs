//! Lazy, depth-annotated walks over the tree.
//!
//! [`Traverse`] yields structural events in key order, which is all a
//! presentation layer needs to draw the tree (indentation, box glyphs, ...).
//! [`Iter`] is the same walk filtered down to entries.

use std::iter::FusedIterator;

use crate::index::btree::{BTree, Entry, Node};

/// One step of a [`Traverse`] walk.
///
/// Depth is 1-based: the root is at depth 1 and every leaf at depth
/// [`BTree::height`].
#[derive(Debug, PartialEq, Eq)]
pub enum TraversalEvent<'a, K, P> {
    /// The walk entered a node.
    EnterNode {
        depth: usize,
        entry_count: usize,
        is_leaf: bool,
    },

    /// An entry of the current node, emitted between its neighbouring
    /// child subtrees.
    Entry {
        depth: usize,
        index: usize,
        entry: &'a Entry<K, P>,
    },

    /// The walk left a node; every event of its subtree came before this.
    ExitNode { depth: usize },
}

impl<K, P> Clone for TraversalEvent<'_, K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, P> Copy for TraversalEvent<'_, K, P> {}

impl<K, P> TraversalEvent<'_, K, P> {
    pub fn depth(&self) -> usize {
        match *self {
            Self::EnterNode { depth, .. } | Self::Entry { depth, .. } | Self::ExitNode { depth } => {
                depth
            }
        }
    }
}

/// A node being walked and how far through it the walk is.
///
/// For a node with `k` entries, `cursor` runs over `2k + 1` slots:
/// even slots descend into child `cursor / 2`, odd slots emit entry
/// `cursor / 2`. Leaves only have the `k` entry slots.
struct Frame<'a, K, P> {
    node: &'a Node<K, P>,
    depth: usize,
    cursor: usize,
}

/// Iterator over the structural events of an in-order walk.
///
/// For an internal node with `k` entries the order is:
///
/// ```text
/// EnterNode, <child 0>, Entry 0, <child 1>, Entry 1, ... Entry k-1, <child k>, ExitNode
/// ```
///
/// and for a leaf: `EnterNode, Entry 0, ..., Entry k-1, ExitNode`.
///
/// Created by [`BTree::traverse`]. Uses an explicit stack bounded by the
/// tree height.
pub struct Traverse<'a, K, P> {
    start: Option<&'a Node<K, P>>,
    stack: Vec<Frame<'a, K, P>>,
}

impl<'a, K, P> Traverse<'a, K, P> {
    fn new(root: &'a Node<K, P>, height: usize) -> Self {
        Self {
            start: Some(root),
            stack: Vec::with_capacity(height),
        }
    }

    fn enter(&mut self, node: &'a Node<K, P>, depth: usize) -> TraversalEvent<'a, K, P> {
        self.stack.push(Frame {
            node,
            depth,
            cursor: 0,
        });
        TraversalEvent::EnterNode {
            depth,
            entry_count: node.entry_count(),
            is_leaf: node.is_leaf(),
        }
    }
}

impl<'a, K, P> Iterator for Traverse<'a, K, P> {
    type Item = TraversalEvent<'a, K, P>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.start.take() {
            return Some(self.enter(root, 1));
        }

        let frame = self.stack.last_mut()?;
        let node = frame.node;
        let depth = frame.depth;
        let cursor = frame.cursor;
        frame.cursor += 1;

        if node.is_leaf() {
            if let Some(entry) = node.entries.get(cursor) {
                return Some(TraversalEvent::Entry {
                    depth,
                    index: cursor,
                    entry,
                });
            }
        } else if cursor <= 2 * node.entry_count() {
            let index = cursor / 2;
            if cursor % 2 == 0 {
                return Some(self.enter(&node.children[index], depth + 1));
            }
            return Some(TraversalEvent::Entry {
                depth,
                index,
                entry: &node.entries[index],
            });
        }

        self.stack.pop();
        Some(TraversalEvent::ExitNode { depth })
    }
}

impl<K, P> FusedIterator for Traverse<'_, K, P> {}

/// In-order iterator over a tree's entries.
///
/// Created by [`BTree::iter`].
pub struct Iter<'a, K, P> {
    events: Traverse<'a, K, P>,
    remaining: usize,
}

impl<'a, K, P> Iterator for Iter<'a, K, P> {
    type Item = &'a Entry<K, P>;

    fn next(&mut self) -> Option<Self::Item> {
        for event in self.events.by_ref() {
            if let TraversalEvent::Entry { entry, .. } = event {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {}

impl<K, P> FusedIterator for Iter<'_, K, P> {}

impl<K, P> BTree<K, P> {
    /// Walk the whole tree, yielding enter/entry/exit events in key order.
    pub fn traverse(&self) -> Traverse<'_, K, P> {
        Traverse::new(&self.root, self.height)
    }

    /// Iterate over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            events: self.traverse(),
            remaining: self.len,
        }
    }
}

impl<'a, K, P> IntoIterator for &'a BTree<K, P> {
    type Item = &'a Entry<K, P>;
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
