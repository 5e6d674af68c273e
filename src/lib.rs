//! btree-ds - An in-memory B-tree with proactive splitting and top-down
//! rebalancing deletes.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Caller / presentation layer                  │
//! │      supplies keys + payloads, renders Traverse events          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SharedBTree (optional)   Arc<RwLock<BTree>>, one lock per op   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  BTree (index/btree/)                                           │
//! │    search · insert + split · delete + rotate/merge · traverse   │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  Node: Vec<Entry> + Vec<Node>  (exclusively owned)        │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use btree_ds::{BTree, TraversalEvent};
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key, key * 100).unwrap();
//! }
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.get(&12), Some(&1200));
//!
//! // Draw the tree: one line per entry, indented by depth.
//! for event in tree.traverse() {
//!     if let TraversalEvent::Entry { depth, entry, .. } = event {
//!         println!("{}{}", "    ".repeat(depth - 1), entry.key());
//!     }
//! }
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_DEGREE, MIN_DEGREE};
pub use common::{BTreeOptions, Error, Result};

pub use index::btree::{
    BTree, Entry, Iter, Node, SharedBTree, TraversalEvent, Traverse, TreeStats,
};
