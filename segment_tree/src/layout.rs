//! Index arithmetic of the implicit tree layout.
//! Slot 0 holds the neutral value, slot 1 is the root and the node at `i` has
//! its children at `2i` and `2i + 1`. Leaves fill the second half of the buffer.

use derive_more::{From, Into};

/// The smallest buffer a tree ever uses: slot 0, the root and two leaves.
pub const MIN_TREE_LEN: usize = 4;

// An index into the node buffer of a SegmentTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct NodeIdx(usize);

impl NodeIdx {
    pub const ROOT: NodeIdx = NodeIdx(1);

    pub fn left(self) -> Self {
        Self(2 * self.0)
    }

    pub fn right(self) -> Self {
        Self(2 * self.0 + 1)
    }

    // must not be called on the root
    pub fn parent(self) -> Self {
        debug_assert!(self.0 > 1);
        Self(self.0 / 2)
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub fn into_usize(self) -> usize {
        self.0
    }
}

/// Gives the number of slots a tree needs to hold `leaf_count` leaves.
/// This is the smallest power of two `n` with `n / 2 >= leaf_count`, but at least [MIN_TREE_LEN].
/// # Panics
/// If the result does not fit into usize.
pub fn tree_len_for(leaf_count: usize) -> usize {
    leaf_count
        .checked_next_power_of_two()
        .and_then(|leaves| leaves.checked_mul(2))
        .unwrap_or_else(|| panic!("A segment tree can not hold {} leaves", leaf_count))
        .max(MIN_TREE_LEN)
}
