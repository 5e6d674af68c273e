//! Key/payload pair stored in tree nodes.

/// A key and the payload carried alongside it.
///
/// Entries are immutable once created. They move between nodes during
/// splits, rotations and merges but are never edited in place.
///
/// Two entries are equal when both their keys and payloads are equal.
///
/// # Example
/// ```
/// use btree_ds::Entry;
///
/// let entry = Entry::new(7, "seven");
/// assert_eq!(*entry.key(), 7);
/// assert_eq!(*entry.payload(), "seven");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry<K, P> {
    key: K,
    payload: P,
}

impl<K, P> Entry<K, P> {
    /// Create a new entry.
    #[inline]
    pub fn new(key: K, payload: P) -> Self {
        Self { key, payload }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the entry, returning `(key, payload)`.
    #[inline]
    pub fn into_parts(self) -> (K, P) {
        (self.key, self.payload)
    }
}

impl<K, P> From<(K, P)> for Entry<K, P> {
    fn from((key, payload): (K, P)) -> Self {
        Self::new(key, payload)
    }
}
