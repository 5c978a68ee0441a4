#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]
//! This crate contains stuff that's really helpful for tests.
use itertools::Itertools;
use proptest::prelude::*;
use std::ops::Range;

mod affine;
pub use affine::Affine;

/// The elements used by most tests: `[5, 8, 4, 3, 7, 2, 1, 6]`.
/// Summed up as a segment tree of 16 slots this gives
/// ```text
///                  36
///           20            16
///       13      7      9      7
///     5    8  4   3  7   2  1   6
/// ```
pub const EIGHT_ELEMENTS: [i64; 8] = [5, 8, 4, 3, 7, 2, 1, 6];

/// Folds `items` from left to right, starting with `neutral`.
/// This is the linear reference every range query is checked against.
pub fn naive_fold<T: Clone>(items: &[T], neutral: &T, combine: impl Fn(&T, &T) -> T) -> T {
    items
        .iter()
        .fold(neutral.clone(), |acc, item| combine(&acc, item))
}

/// Gives every non empty range `l..r` with `r <= len`.
pub fn all_ranges(len: usize) -> impl Iterator<Item = Range<usize>> {
    (0..=len).tuple_combinations().map(|(l, r)| l..r)
}

/// Gives a strategy generating small signed numbers, whose sums never overflow.
pub fn element() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

/// Gives a strategy generating vectors of up to `max_len` [element]s.
pub fn elements(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(element(), 0..=max_len)
}

/// Gives a strategy generating arbitrary [Affine] maps.
pub fn affine() -> impl Strategy<Value = Affine> {
    (any::<u64>(), any::<u64>()).prop_map(|(a, b)| Affine::new(a, b))
}

/// Gives a strategy generating vectors of up to `max_len` [Affine] maps.
pub fn affine_maps(max_len: usize) -> impl Strategy<Value = Vec<Affine>> {
    prop::collection::vec(affine(), 0..=max_len)
}

prop_compose! {
    /// Gives up to `max_len` elements together with a position in `0..=len`,
    /// i.e. a valid place to insert a new element.
    pub fn elements_with_insert_position(max_len: usize)(
        items in elements(max_len)
    )(
        position in 0..=items.len(),
        items in Just(items),
    ) -> (Vec<i64>, usize) {
        (items, position)
    }
}

prop_compose! {
    /// Gives at least one element together with a position in `0..len`,
    /// i.e. an element which may be updated.
    pub fn elements_with_position(max_len: usize)(
        items in prop::collection::vec(element(), 1..=max_len.max(1))
    )(
        position in 0..items.len(),
        items in Just(items),
    ) -> (Vec<i64>, usize) {
        (items, position)
    }
}
