use std::{error::Error, fmt::Display, ops::Range};

use common::BpError;

/// Everything that can go wrong when using a [SegmentTree](crate::SegmentTree).
/// Apart from the growth failures these are violated preconditions of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// A query range that is empty, reversed or reaches beyond the stored elements.
    InvalidRange {
        /// the offending range
        range: Range<usize>,
        /// number of elements in the tree
        len: usize,
    },
    /// A position that does not address an element (or insertion point) of the tree.
    IndexOutOfBounds {
        /// the offending position
        index: usize,
        /// number of elements in the tree
        len: usize,
    },
    /// Doubling a buffer of `tree_len` slots would overflow usize.
    CapacityOverflow {
        /// current number of slots
        tree_len: usize,
    },
    /// A buffer of `tree_len` slots could not be allocated.
    AllocationFailed {
        /// requested number of slots
        tree_len: usize,
    },
    /// A snapshot which does not describe a consistent tree.
    InvalidSnapshot(String),
}

/// Result type going with [SegmentTreeError].
pub type SegmentTreeResult<O> = Result<O, SegmentTreeError>;

impl Display for SegmentTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentTreeError::InvalidRange { range, len } => write!(
                f,
                "SegmentTree: invalid query range {:?} for {} elements",
                range, len
            ),
            SegmentTreeError::IndexOutOfBounds { index, len } => write!(
                f,
                "SegmentTree: index {} is out of bounds for {} elements",
                index, len
            ),
            SegmentTreeError::CapacityOverflow { tree_len } => write!(
                f,
                "SegmentTree: can not grow beyond {} slots",
                tree_len
            ),
            SegmentTreeError::AllocationFailed { tree_len } => write!(
                f,
                "SegmentTree: failed to allocate {} slots",
                tree_len
            ),
            SegmentTreeError::InvalidSnapshot(reason) => {
                write!(f, "SegmentTree: invalid snapshot, {}", reason)
            }
        }
    }
}

impl Error for SegmentTreeError {}

impl From<SegmentTreeError> for BpError {
    fn from(other: SegmentTreeError) -> Self {
        BpError::OtherBpError(Box::new(other))
    }
}
