use std::{
    fmt::{self, Debug},
    mem,
    ops::{Index, Range},
};

use typed_index_collections::TiVec;

use crate::{
    config::{InsertRebuild, SegmentTreeConfig},
    error::{SegmentTreeError, SegmentTreeResult},
    layout::{self, NodeIdx, MIN_TREE_LEN},
};

/// A segment tree over a growable sequence of elements.
///
/// The whole tree lives in one buffer whose length is a power of two.
/// Slot 0 holds the neutral value, slot 1 is the root and the node at `i` combines
/// its children at `2i` and `2i + 1`. The element at position `k` is stored in the
/// leaf `tree_len() / 2 + k`, unused leaves hold the neutral value.
///
/// `combine` must be associative and `neutral` must be its identity.
/// Commutativity is not required, every fold happens from left to right.
/// Neither property can be checked, violating them gives meaningless query results.
///
/// # Costs
/// - [query](SegmentTree::query), [update](SegmentTree::update) and
///   [push_back](SegmentTree::push_back): `O(log n)` (amortized for `push_back`)
/// - [insert](SegmentTree::insert): `O(n)`, as every later element moves
///
/// # Example
/// ```
/// # use segment_tree::SegmentTree;
/// let mut tree = SegmentTree::new(vec![5, 8, 4, 3, 7, 2, 1, 6], |a: &i64, b: &i64| a + b, 0);
/// assert_eq!(tree.query(2..6), 16);
///
/// tree.update(4, 10);
/// assert_eq!(*tree.fold_all(), 39);
///
/// tree.insert(0, 1);
/// assert_eq!(tree[0], 1);
/// assert_eq!(tree.query(0..3), 14);
/// ```
pub struct SegmentTree<T, F> {
    pub(crate) data: TiVec<NodeIdx, T>,
    pub(crate) count: usize,
    pub(crate) combine: F,
    pub(crate) neutral: T,
    pub(crate) insert_rebuild: InsertRebuild,
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Builds a tree holding `elements` in order.
    /// The buffer gets the smallest power of two length whose second half fits all elements,
    /// but at least four slots.
    /// # Runtime
    /// `O(n)` calls of `combine`.
    pub fn new(elements: impl IntoIterator<Item = T>, combine: F, neutral: T) -> Self {
        Self::with_config(elements, combine, neutral, SegmentTreeConfig::default())
    }

    /// Like [new](SegmentTree::new), but honors the given [SegmentTreeConfig].
    pub fn with_config(
        elements: impl IntoIterator<Item = T>,
        combine: F,
        neutral: T,
        config: SegmentTreeConfig,
    ) -> Self {
        let leaves: Vec<T> = elements.into_iter().collect();
        let count = leaves.len();
        let tree_len = layout::tree_len_for(count.max(config.initial_capacity));

        let mut nodes = Vec::with_capacity(tree_len);
        nodes.resize(tree_len / 2, neutral.clone());
        nodes.extend(leaves);
        nodes.resize(tree_len, neutral.clone());

        let mut tree = Self {
            data: nodes.into(),
            count,
            combine,
            neutral,
            insert_rebuild: config.insert_rebuild,
        };
        tree.rebuild_all();
        tree
    }

    /// Combines the elements in `range` from left to right.
    /// # Runtime
    /// `O(log n)`
    /// # Panics
    /// If `range` is empty or reaches beyond the stored elements.
    /// See [try_query](SegmentTree::try_query) for a non panicking version.
    pub fn query(&self, range: Range<usize>) -> T {
        self.try_query(range).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Combines the elements in `range` from left to right.
    /// # Returns
    /// [SegmentTreeError::InvalidRange] unless `range.start < range.end <= self.len()`.
    pub fn try_query(&self, range: Range<usize>) -> SegmentTreeResult<T> {
        if range.start >= range.end || range.end > self.count {
            return Err(SegmentTreeError::InvalidRange {
                range,
                len: self.count,
            });
        }

        let first_leaf = self.first_leaf();
        // both borders are inclusive
        let mut left_idx = first_leaf + range.start;
        let mut right_idx = first_leaf + range.end - 1;
        let mut left_value = self.neutral.clone();
        let mut right_value = self.neutral.clone();

        while left_idx <= right_idx {
            // a right child is not covered by the parent of left_idx
            if left_idx % 2 == 1 {
                left_value = (self.combine)(&left_value, &self.data[NodeIdx::from(left_idx)]);
            }
            // likewise for a left child on the right border
            if right_idx % 2 == 0 {
                right_value = (self.combine)(&self.data[NodeIdx::from(right_idx)], &right_value);
            }

            left_idx = (left_idx + 1) / 2;
            right_idx = (right_idx - 1) / 2;
        }

        Ok((self.combine)(&left_value, &right_value))
    }

    /// Replaces the element at `index` and recomputes its ancestors.
    /// # Runtime
    /// `O(log n)`, this never grows the tree.
    /// # Panics
    /// If `index >= self.len()`.
    pub fn update(&mut self, index: usize, value: T) {
        self.try_update(index, value).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Replaces the element at `index` and recomputes its ancestors.
    /// # Returns
    /// [SegmentTreeError::IndexOutOfBounds] if `index >= self.len()`.
    pub fn try_update(&mut self, index: usize, value: T) -> SegmentTreeResult<()> {
        if index >= self.count {
            return Err(SegmentTreeError::IndexOutOfBounds {
                index,
                len: self.count,
            });
        }

        let leaf = self.leaf(index);
        self.data[leaf] = value;
        self.rebuild_ancestors(leaf);
        Ok(())
    }

    /// Inserts `value` at `index`, moving all later elements one position to the right.
    /// The buffer doubles if all leaves are in use.
    /// # Runtime
    /// `O(n)`, prefer [push_back](SegmentTree::push_back) for appending.
    /// # Panics
    /// If `index > self.len()` or growing the buffer fails.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Inserts `value` at `index`, moving all later elements one position to the right.
    /// # Returns
    /// [SegmentTreeError::IndexOutOfBounds] if `index > self.len()`,
    /// or the reason growing the buffer failed. The tree is unchanged on error.
    pub fn try_insert(&mut self, index: usize, value: T) -> SegmentTreeResult<()> {
        if index > self.count {
            return Err(SegmentTreeError::IndexOutOfBounds {
                index,
                len: self.count,
            });
        }

        let grown = self.reserve_leaf()?;
        let first_leaf = self.first_leaf();
        let target = first_leaf + index;
        let last = first_leaf + self.count;

        // the unused leaf at `last` wraps around to `target` and gets overwritten
        self.data.raw[target..=last].rotate_right(1);
        self.data.raw[target] = value;
        self.count += 1;

        match self.insert_rebuild {
            InsertRebuild::Affected if !grown => {
                log::trace!("Rebuilding ancestors of leaves {}..={}", target, last);
                self.rebuild_affected(target.into(), last.into());
            }
            _ => self.rebuild_all(),
        }
        Ok(())
    }

    /// Appends `value` after the last element.
    /// # Runtime
    /// `O(log n)` amortized. If all leaves are in use, the buffer doubles and
    /// every internal node is recomputed.
    /// # Panics
    /// If growing the buffer fails.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Appends `value` after the last element.
    /// # Returns
    /// The reason growing the buffer failed. The tree is unchanged on error.
    pub fn try_push_back(&mut self, value: T) -> SegmentTreeResult<()> {
        let grown = self.reserve_leaf()?;
        let leaf = self.leaf(self.count);
        self.data[leaf] = value;
        self.count += 1;

        if grown {
            self.rebuild_all();
        } else {
            self.rebuild_ancestors(leaf);
        }
        Ok(())
    }

    /// Moves the contents of this tree into a new one.
    /// `self` is left without any elements and without a buffer, i.e.
    /// `self.len() == 0` and `self.tree()` is empty.
    /// It keeps its combine function, so pushing to it starts over with a minimal tree.
    pub fn take(&mut self) -> Self
    where
        F: Clone,
    {
        let emptied = Self {
            data: TiVec::new(),
            count: 0,
            combine: self.combine.clone(),
            neutral: self.neutral.clone(),
            insert_rebuild: self.insert_rebuild,
        };
        mem::replace(self, emptied)
    }

    // Makes sure there is an unused leaf, returns whether the buffer had to grow.
    fn reserve_leaf(&mut self) -> SegmentTreeResult<bool> {
        if self.count < self.capacity() {
            return Ok(false);
        }
        self.grow()?;
        Ok(true)
    }

    // Doubles the buffer. The old leaf row becomes the left half of the new leaf row,
    // all other slots are neutral. Internal nodes have to be rebuilt afterwards.
    fn grow(&mut self) -> SegmentTreeResult<()> {
        let old_len = self.data.len();
        let tree_len = old_len
            .checked_mul(2)
            .ok_or(SegmentTreeError::CapacityOverflow { tree_len: old_len })?
            .max(MIN_TREE_LEN);

        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(tree_len)
            .map_err(|_| SegmentTreeError::AllocationFailed { tree_len })?;
        nodes.resize(tree_len / 2, self.neutral.clone());
        nodes.extend(self.data.raw[old_len / 2..].iter().cloned());
        nodes.resize(tree_len, self.neutral.clone());

        log::debug!(
            "Growing segment tree with {} elements from {} to {} slots",
            self.count,
            old_len,
            tree_len
        );
        self.data = nodes.into();
        Ok(())
    }

    fn recompute(&mut self, node: NodeIdx) {
        let value = (self.combine)(&self.data[node.left()], &self.data[node.right()]);
        self.data[node] = value;
    }

    // Children always have higher indices than their parents,
    // so a single backwards sweep sees finished children only.
    fn rebuild_all(&mut self) {
        for node in (1..self.first_leaf()).rev() {
            self.recompute(node.into());
        }
    }

    fn rebuild_ancestors(&mut self, mut node: NodeIdx) {
        while !node.is_root() {
            node = node.parent();
            self.recompute(node);
        }
    }

    // Recomputes the ancestors of the leaves `first..=last`, one level at a time.
    fn rebuild_affected(&mut self, mut first: NodeIdx, mut last: NodeIdx) {
        while !first.is_root() {
            first = first.parent();
            last = last.parent();
            for node in first.into_usize()..=last.into_usize() {
                self.recompute(node.into());
            }
        }
    }
}

impl<T, F> SegmentTree<T, F> {
    /// Gives the number of stored elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Gives the number of elements the tree can hold before its buffer has to grow.
    pub fn capacity(&self) -> usize {
        self.first_leaf()
    }

    /// Gives the element at `index`, or None if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.count {
            Some(&self.data[self.leaf(index)])
        } else {
            None
        }
    }

    /// Iterates over the stored elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let first_leaf = self.first_leaf();
        self.data.raw[first_leaf..first_leaf + self.count].iter()
    }

    /// Gives the combination of all elements, which is the value of the root.
    /// For an empty tree this is the neutral value.
    pub fn fold_all(&self) -> &T {
        self.data.get(NodeIdx::ROOT).unwrap_or(&self.neutral)
    }

    /// Gives the neutral value of this tree.
    pub fn neutral(&self) -> &T {
        &self.neutral
    }

    /// Gives the whole buffer: slot 0, the internal nodes and the leaves.
    /// Empty after [take](SegmentTree::take).
    pub fn tree(&self) -> &[T] {
        &self.data.raw
    }

    /// Gives the length of the buffer returned by [tree](SegmentTree::tree).
    pub fn tree_len(&self) -> usize {
        self.data.len()
    }

    /// Gives the strategy used to restore the tree after [insert](SegmentTree::insert).
    pub fn insert_rebuild(&self) -> InsertRebuild {
        self.insert_rebuild
    }

    fn first_leaf(&self) -> usize {
        self.data.len() / 2
    }

    fn leaf(&self, index: usize) -> NodeIdx {
        NodeIdx::from(self.first_leaf() + index)
    }
}

impl<T, F> Index<usize> for SegmentTree<T, F> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).unwrap_or_else(|| {
            panic!(
                "{}",
                SegmentTreeError::IndexOutOfBounds {
                    index,
                    len: self.count
                }
            )
        })
    }
}

impl<T, F> Extend<T> for SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Clone, F: Clone> Clone for SegmentTree<T, F> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            count: self.count,
            combine: self.combine.clone(),
            neutral: self.neutral.clone(),
            insert_rebuild: self.insert_rebuild,
        }
    }

    // reuses the allocation of self where possible
    fn clone_from(&mut self, source: &Self) {
        self.data.raw.clone_from(&source.data.raw);
        self.count = source.count;
        self.combine = source.combine.clone();
        self.neutral.clone_from(&source.neutral);
        self.insert_rebuild = source.insert_rebuild;
    }
}

impl<T: Debug, F> Debug for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("count", &self.count)
            .field("insert_rebuild", &self.insert_rebuild)
            .field("tree", &self.data.raw)
            .finish()
    }
}
