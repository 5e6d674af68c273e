//! Index structures.
//!
//! - [`btree`] - In-memory B-tree (CLRS-style, minimum degree `t`)

pub mod btree;
