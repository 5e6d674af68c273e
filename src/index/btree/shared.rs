//! Thread-safe handle around a [`BTree`].
//!
//! The tree itself has no internal locking. `SharedBTree` supplies the
//! coarsest correct scheme: one reader-writer lock around the whole tree,
//! held for the duration of each operation.

use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::common::{BTreeOptions, Result};
use crate::index::btree::{BTree, Entry, TreeStats};

/// A cloneable, lock-protected B-tree.
///
/// # Thread Safety
/// - Lookups take the shared lock; any number may run at once.
/// - `insert`, `delete` and `clear` take the exclusive lock for the whole
///   operation, so every other thread sees the tree either before or after
///   a structural change, never in between.
///
/// Lookups return owned copies (`K: Clone`, `P: Clone`) so no guard escapes.
/// Use [`read`](Self::read) to borrow into the tree under the lock instead.
///
/// # Usage
/// ```
/// use btree_ds::SharedBTree;
/// use std::thread;
///
/// let tree = SharedBTree::new(3).unwrap();
/// let handles: Vec<_> = (0..4u32)
///     .map(|t| {
///         let tree = tree.clone();
///         thread::spawn(move || {
///             for i in 0..100 {
///                 tree.insert(t * 1000 + i, i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
#[derive(Debug)]
pub struct SharedBTree<K, P> {
    inner: Arc<RwLock<BTree<K, P>>>,
}

impl<K, P> Clone for SharedBTree<K, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, P> SharedBTree<K, P> {
    /// Create an empty shared tree with minimum degree `degree`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < 2`
    pub fn new(degree: usize) -> Result<Self> {
        BTree::new(degree).map(Self::from)
    }

    /// Create an empty shared tree from [`BTreeOptions`].
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if the options name a degree below 2
    pub fn with_options(options: BTreeOptions) -> Result<Self> {
        BTree::with_options(options).map(Self::from)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    pub fn degree(&self) -> usize {
        self.inner.read().degree()
    }

    pub fn stats(&self) -> TreeStats {
        self.inner.read().stats()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Run `f` against the tree under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&BTree<K, P>) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` against the tree under the exclusive lock.
    ///
    /// Use this to make several operations atomic with respect to other
    /// handles.
    pub fn write<R>(&self, f: impl FnOnce(&mut BTree<K, P>) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

impl<K: Ord, P> SharedBTree<K, P> {
    /// Insert under the exclusive lock. See [`BTree::insert`].
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present
    pub fn insert(&self, key: K, payload: P) -> Result<()> {
        self.inner.write().insert(key, payload)
    }

    /// Delete under the exclusive lock. See [`BTree::delete`].
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is not present
    pub fn delete<Q>(&self, key: &Q) -> Result<Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// See [`BTree::check_invariants`].
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken rule found
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.read().check_invariants()
    }
}

impl<K: Ord + Clone, P: Clone> SharedBTree<K, P> {
    /// Copy of the entry holding `key`.
    pub fn search<Q>(&self, key: &Q) -> Option<Entry<K, P>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().search(key).cloned()
    }

    /// Copy of the payload stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<P>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().get(key).cloned()
    }
}

impl<K, P> From<BTree<K, P>> for SharedBTree<K, P> {
    fn from(tree: BTree<K, P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }
}
