//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised by `OrderedTree` mutations.
///
/// Lookups never fail: absence is reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("item not found in tree")]
    NotFound,

    #[error("ordered append after a general mutation; clear the tree before starting a new ordered build")]
    OrderedAppendInterleaved,

    #[error("ordered append received an item smaller than the previously appended one")]
    OutOfOrder,

    #[error("replacement value would break the search order")]
    OrderViolation,

    #[error("internal tree invariant violated: {0}")]
    Internal(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
