//! This module contains the configuration of a [SegmentTree](crate::SegmentTree).
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Decides which internal nodes get recomputed after an element was inserted
/// in the middle of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertRebuild {
    /// Recompute every internal node.
    Full,
    /// Recompute only the ancestors of the shifted leaves.
    /// Falls back to [InsertRebuild::Full] when the insertion grew the tree.
    Affected,
}

impl Default for InsertRebuild {
    fn default() -> Self {
        Self::Full
    }
}

/// Configures a [SegmentTree](crate::SegmentTree).
/// # Example
/// ```
/// # use segment_tree::{InsertRebuild, SegmentTree, SegmentTreeConfigBuilder};
/// let config = SegmentTreeConfigBuilder::default()
///     .initial_capacity(100)
///     .insert_rebuild(InsertRebuild::Affected)
///     .build()
///     .unwrap();
/// let tree = SegmentTree::with_config(vec![1, 2, 3], |a: &i32, b: &i32| a + b, 0, config);
/// assert_eq!(tree.capacity(), 128);
/// ```
#[derive(Clone, Debug, Default, Builder, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentTreeConfig {
    /// The tree is sized for at least this many elements on construction,
    /// so appending up to this many elements never grows the buffer.
    #[builder(default)]
    pub initial_capacity: usize,
    /// How inserts in the middle of the tree restore the tree invariant.
    #[builder(default)]
    pub insert_rebuild: InsertRebuild,
}
