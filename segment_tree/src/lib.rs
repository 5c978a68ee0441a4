#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains an array backed, growable [SegmentTree].
//!
//! A segment tree answers "combine all elements in `l..r`" for any associative
//! combine function in `O(log n)` and supports point updates in `O(log n)`.
//! Appending is cheap as well, inserting in the middle costs `O(n)`.
//! ```
//! # use segment_tree::SegmentTree;
//! let mut tree = SegmentTree::new(
//!     vec!["a".to_string(), "b".to_string()],
//!     |l: &String, r: &String| format!("{}{}", l, r),
//!     String::new(),
//! );
//! tree.push_back("c".to_string());
//! tree.insert(1, "x".to_string());
//! assert_eq!(tree.query(0..4), "axbc");
//! assert_eq!(tree.query(1..3), "xb");
//! ```

mod config;
pub use config::{InsertRebuild, SegmentTreeConfig, SegmentTreeConfigBuilder};

mod error;
pub use error::{SegmentTreeError, SegmentTreeResult};

mod folds;
pub use folds::FoldFn;

mod layout;

mod snapshot;
pub use snapshot::SegmentTreeSnapshot;

mod tree;
pub use tree::SegmentTree;

#[cfg(test)]
mod tests;
