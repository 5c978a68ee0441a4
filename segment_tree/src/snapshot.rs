//! This module contains [SegmentTreeSnapshot], a serializable copy of a tree buffer.
use common::{BpError, BpResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use typed_index_collections::TiVec;

use crate::{
    config::InsertRebuild,
    error::{SegmentTreeError, SegmentTreeResult},
    layout::MIN_TREE_LEN,
    SegmentTree,
};

/// The buffer and element count of a [SegmentTree].
/// The combine function is code and therefore not part of a snapshot,
/// it has to be supplied again when restoring the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentTreeSnapshot<T> {
    /// number of stored elements
    pub count: usize,
    /// the complete buffer as returned by [SegmentTree::tree]
    pub nodes: Vec<T>,
}

impl<T: Serialize> SegmentTreeSnapshot<T> {
    /// Encodes this snapshot as json.
    pub fn to_json(&self) -> BpResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DeserializeOwned> SegmentTreeSnapshot<T> {
    /// Decodes a snapshot from json. This does not check the tree invariants,
    /// [SegmentTree::from_snapshot] does.
    pub fn from_json(json: &str) -> BpResult<Self> {
        serde_json::from_str(json)
            .map_err(BpError::from)
            .map_err(BpError::rethrow_with("Could not parse segment tree snapshot"))
    }
}

impl<T: Clone, F> SegmentTree<T, F> {
    /// Copies the buffer and element count of this tree.
    pub fn snapshot(&self) -> SegmentTreeSnapshot<T> {
        SegmentTreeSnapshot {
            count: self.count,
            nodes: self.data.raw.clone(),
        }
    }
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone + PartialEq,
    F: Fn(&T, &T) -> T,
{
    /// Restores a tree from a snapshot, keeping the buffer exactly as it was.
    /// # Returns
    /// [SegmentTreeError::InvalidSnapshot] if the snapshot could not have been taken
    /// from a tree with this combine function and neutral value, i.e. if
    /// - the buffer length is no power of two of at least four (an empty buffer
    ///   is accepted for an empty tree),
    /// - there are more elements than leaves,
    /// - slot 0 or an unused leaf is not `neutral`,
    /// - an internal node is not the combination of its children.
    /// # Runtime
    /// `O(n)` calls of `combine`.
    pub fn from_snapshot(
        snapshot: SegmentTreeSnapshot<T>,
        combine: F,
        neutral: T,
    ) -> SegmentTreeResult<Self> {
        let SegmentTreeSnapshot { count, nodes } = snapshot;
        let invalid = |reason: String| Err(SegmentTreeError::InvalidSnapshot(reason));
        let tree_len = nodes.len();

        if tree_len == 0 && count != 0 {
            return invalid(format!("{} elements without any nodes", count));
        }
        if tree_len != 0 {
            if !tree_len.is_power_of_two() || tree_len < MIN_TREE_LEN {
                return invalid(format!("{} is no valid number of nodes", tree_len));
            }
            let first_leaf = tree_len / 2;
            if count > first_leaf {
                return invalid(format!("{} elements in {} leaves", count, first_leaf));
            }
            if nodes[0] != neutral {
                return invalid("slot 0 does not hold the neutral value".to_string());
            }
            if let Some(offset) = nodes[first_leaf + count..]
                .iter()
                .position(|node| *node != neutral)
            {
                return invalid(format!(
                    "unused leaf {} does not hold the neutral value",
                    first_leaf + count + offset
                ));
            }
            if let Some(node) =
                (1..first_leaf).find(|&i| combine(&nodes[2 * i], &nodes[2 * i + 1]) != nodes[i])
            {
                return invalid(format!(
                    "node {} is not the combination of its children",
                    node
                ));
            }
        }

        Ok(Self {
            data: TiVec::from(nodes),
            count,
            combine,
            neutral,
            insert_rebuild: InsertRebuild::default(),
        })
    }

    /// Restores a tree from a json encoded [SegmentTreeSnapshot].
    /// # Example
    /// ```
    /// # use segment_tree::SegmentTree;
    /// fn max(a: &u32, b: &u32) -> u32 {
    ///     *a.max(b)
    /// }
    /// let tree = SegmentTree::new(vec![3, 1, 4, 1, 5], max, 0);
    /// let json = tree.snapshot().to_json().unwrap();
    ///
    /// let restored = SegmentTree::from_json(&json, max, 0).unwrap();
    /// assert_eq!(restored.tree(), tree.tree());
    /// assert_eq!(restored.query(0..3), 4);
    /// ```
    pub fn from_json(json: &str, combine: F, neutral: T) -> BpResult<Self>
    where
        T: DeserializeOwned,
    {
        let snapshot = SegmentTreeSnapshot::from_json(json)?;
        Ok(Self::from_snapshot(snapshot, combine, neutral)?)
    }
}
