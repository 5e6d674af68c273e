//! Error types for the B-tree.

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors returned by the tree.
///
/// Every variant is a recoverable, value-level outcome. A call that returns
/// one of these has not modified the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested minimum degree is too small to split around a median.
    #[error("B-tree degree must be at least {min}, got {degree}")]
    InvalidDegree { degree: usize, min: usize },

    /// Insert found the key already present.
    ///
    /// Inserts never overwrite: delete the old entry first.
    #[error("Key already exists in the tree")]
    DuplicateKey,

    /// Delete could not find the key.
    #[error("Key not found in the tree")]
    KeyNotFound,

    /// A structural invariant does not hold.
    ///
    /// Only [`BTree::check_invariants`](crate::BTree::check_invariants)
    /// produces this. Seeing it indicates a bug in the tree algorithms.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDegree { degree: 1, min: 2 };
        assert_eq!(format!("{}", err), "B-tree degree must be at least 2, got 1");

        assert_eq!(format!("{}", Error::DuplicateKey), "Key already exists in the tree");
        assert_eq!(format!("{}", Error::KeyNotFound), "Key not found in the tree");

        let err = Error::InvariantViolation("leaf depth 3 != height 2".into());
        assert_eq!(
            format!("{}", err),
            "B-tree invariant violated: leaf depth 3 != height 2"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&Error::KeyNotFound);
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail(fail: bool) -> Result<u32> {
            if fail {
                Err(Error::KeyNotFound)
            } else {
                Ok(42)
            }
        }

        assert_eq!(might_fail(false).unwrap(), 42);
        assert_eq!(might_fail(true), Err(Error::KeyNotFound));
    }
}
