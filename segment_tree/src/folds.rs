//! Segment trees for the most common folds.
use std::ops::Add;

use num::{Bounded, Zero};

use crate::SegmentTree;

/// The combine function of the trees built in this module.
pub type FoldFn<T> = fn(&T, &T) -> T;

fn add<T: Clone + Add<Output = T>>(a: &T, b: &T) -> T {
    a.clone() + b.clone()
}

fn min<T: Clone + PartialOrd>(a: &T, b: &T) -> T {
    if b < a {
        b.clone()
    } else {
        a.clone()
    }
}

fn max<T: Clone + PartialOrd>(a: &T, b: &T) -> T {
    if a < b {
        b.clone()
    } else {
        a.clone()
    }
}

impl<T: Clone + Zero> SegmentTree<T, FoldFn<T>> {
    /// Builds a tree whose queries give the sum of a range.
    /// # Example
    /// ```
    /// # use segment_tree::SegmentTree;
    /// let tree = SegmentTree::sum(vec![5, 8, 4, 3]);
    /// assert_eq!(tree.query(1..3), 12);
    /// ```
    pub fn sum(elements: impl IntoIterator<Item = T>) -> Self {
        SegmentTree::new(elements, add as FoldFn<T>, T::zero())
    }
}

impl<T: Clone + Bounded + PartialOrd> SegmentTree<T, FoldFn<T>> {
    /// Builds a tree whose queries give the minimum of a range.
    /// Unused leaves hold `T::max_value()`.
    /// On ties the leftmost element wins.
    pub fn min(elements: impl IntoIterator<Item = T>) -> Self {
        SegmentTree::new(elements, min as FoldFn<T>, T::max_value())
    }

    /// Builds a tree whose queries give the maximum of a range.
    /// Unused leaves hold `T::min_value()`.
    /// On ties the leftmost element wins.
    pub fn max(elements: impl IntoIterator<Item = T>) -> Self {
        SegmentTree::new(elements, max as FoldFn<T>, T::min_value())
    }
}
