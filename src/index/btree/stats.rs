//! Structural statistics for a tree.

use std::fmt;

/// Counters for the rebalancing work a tree has done.
///
/// The tree is single-threaded, so these are plain integers updated in
/// place by the insert and delete paths. `TreeStats` is `Copy`: the value
/// returned by [`BTree::stats`](crate::BTree::stats) is a point-in-time
/// snapshot.
///
/// # Example
/// ```
/// use btree_ds::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in [1, 2, 3, 4] {
///     tree.insert(key, ()).unwrap();
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.splits, 1);
/// assert_eq!(stats.height_increases, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Full nodes split around their median (root splits included).
    pub splits: u64,

    /// Sibling pairs folded together with their separator.
    pub merges: u64,

    /// Entries borrowed from a sibling through the parent.
    pub rotations: u64,

    /// Root splits that added a level.
    pub height_increases: u64,

    /// Empty internal roots replaced by their only child.
    pub height_decreases: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rebalancing steps of any kind.
    pub fn rebalances(&self) -> u64 {
        self.splits + self.merges + self.rotations
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, rotations: {}, grew: {}, shrank: {} }}",
            self.splits,
            self.merges,
            self.rotations,
            self.height_increases,
            self.height_decreases
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.merges, 0);
        assert_eq!(stats.rebalances(), 0);
    }

    #[test]
    fn test_stats_rebalances() {
        let stats = TreeStats {
            splits: 4,
            merges: 2,
            rotations: 3,
            ..TreeStats::default()
        };
        assert_eq!(stats.rebalances(), 9);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = TreeStats {
            splits: 100,
            height_increases: 3,
            ..TreeStats::default()
        };

        stats.reset();

        assert_eq!(stats, TreeStats::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats {
            splits: 8,
            merges: 2,
            rotations: 5,
            height_increases: 1,
            height_decreases: 0,
        };
        let display = format!("{}", stats);

        assert!(display.contains("splits: 8"));
        assert!(display.contains("merges: 2"));
        assert!(display.contains("rotations: 5"));
        assert!(display.contains("grew: 1"));
    }
}
