//! Configuration for B-tree construction.

use crate::common::{Error, Result};

/// Smallest legal minimum degree `t`.
///
/// With `t = 2` every non-root node holds 1 to 3 entries (a 2-3-4 tree).
/// Anything smaller cannot be split around a median.
pub const MIN_DEGREE: usize = 2;

/// Degree used by [`BTreeOptions::default`].
pub const DEFAULT_DEGREE: usize = 3;

/// Construction options for a [`BTree`](crate::BTree).
///
/// The degree is fixed for the lifetime of a tree.
///
/// # Example
/// ```
/// use btree_ds::BTreeOptions;
///
/// let opts = BTreeOptions::default().with_degree(4);
/// assert_eq!(opts.max_entries(), 7);
/// assert_eq!(opts.min_entries(), 3);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeOptions {
    /// Minimum degree `t`.
    pub degree: usize,
}

impl BTreeOptions {
    /// Set the minimum degree.
    #[inline]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Most entries any node may hold (`2t - 1`).
    #[inline]
    pub fn max_entries(&self) -> usize {
        (2 * self.degree).saturating_sub(1)
    }

    /// Fewest entries a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_entries(&self) -> usize {
        self.degree.saturating_sub(1)
    }

    /// Check the options before a tree is built from them.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if the degree is below [`MIN_DEGREE`]
    pub fn validate(&self) -> Result<()> {
        if self.degree < MIN_DEGREE {
            return Err(Error::InvalidDegree {
                degree: self.degree,
                min: MIN_DEGREE,
            });
        }
        Ok(())
    }
}

impl Default for BTreeOptions {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }
}
