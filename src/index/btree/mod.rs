//! B-tree index implementation.
//!
//! A classic B-tree of minimum degree `t` (Cormen et al., "Introduction to
//! Algorithms", ch. 18): every node other than the root holds `t - 1` to
//! `2t - 1` entries, internal nodes have one more child than entries, and
//! all leaves sit at the same depth.
//!
//! # Components
//! - [`Entry`] - Key/payload pair
//! - [`Node`] - Sorted entries plus owned children
//! - [`BTree`] - Search, insert (proactive split), delete (top-down rebalance)
//! - [`Traverse`] / [`Iter`] - Lazy structural walk and in-order iteration
//! - [`TreeStats`] - Split/merge/rotation counters
//! - [`SharedBTree`] - Lock-protected handle for multi-threaded callers
//!
//! Algorithms are split by operation: `tree.rs` (construction and search),
//! `insert.rs`, `delete.rs`, `traverse.rs` and `validate.rs` each add
//! methods to [`BTree`].

mod delete;
mod entry;
mod insert;
mod node;
mod shared;
mod stats;
mod traverse;
mod tree;
mod validate;

pub use entry::Entry;
pub use node::Node;
pub use shared::SharedBTree;
pub use stats::TreeStats;
pub use traverse::{Iter, TraversalEvent, Traverse};
pub use tree::BTree;
