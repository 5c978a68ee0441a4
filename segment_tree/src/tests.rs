use std::fmt::Debug;

use common::logging::init_test_logging;
use proptest::prelude::*;
use test_helpers::*;

use crate::{
    layout::tree_len_for, InsertRebuild, SegmentTree, SegmentTreeConfig,
    SegmentTreeConfigBuilder,
};

type Add = fn(&i64, &i64) -> i64;
type Compose = fn(&Affine, &Affine) -> Affine;

fn add(a: &i64, b: &i64) -> i64 {
    a + b
}

fn config(insert_rebuild: InsertRebuild) -> SegmentTreeConfig {
    SegmentTreeConfigBuilder::default()
        .insert_rebuild(insert_rebuild)
        .build()
        .unwrap()
}

// Checks the buffer layout: slot 0 and unused leaves are neutral,
// every internal node combines its children.
fn check_invariants<T, F>(tree: &SegmentTree<T, F>) -> Result<(), TestCaseError>
where
    T: Clone + PartialEq + Debug,
    F: Fn(&T, &T) -> T,
{
    let nodes = tree.tree();
    let first_leaf = nodes.len() / 2;
    prop_assert!(nodes.len().is_power_of_two());
    prop_assert!(tree.len() <= first_leaf);
    prop_assert_eq!(&nodes[0], tree.neutral());
    for i in 1..first_leaf {
        let combined = (tree.combine)(&nodes[2 * i], &nodes[2 * i + 1]);
        prop_assert_eq!(&nodes[i], &combined, "node {}", i);
    }
    for leaf in &nodes[first_leaf + tree.len()..] {
        prop_assert_eq!(leaf, tree.neutral());
    }
    Ok(())
}

macro_rules! segment_tree_properties {
    ($ident: ident, $insert_rebuild: expr) => {
        mod $ident {
            use super::*;

            fn sum_tree(items: Vec<i64>) -> SegmentTree<i64, Add> {
                SegmentTree::with_config(items, add as Add, 0, config($insert_rebuild))
            }

            fn affine_tree(maps: Vec<Affine>) -> SegmentTree<Affine, Compose> {
                SegmentTree::with_config(
                    maps,
                    Affine::then as Compose,
                    Affine::identity(),
                    config($insert_rebuild),
                )
            }

            proptest! {
                #[test]
                fn build_is_consistent(items in elements(70)) {
                    let tree = sum_tree(items.clone());
                    check_invariants(&tree)?;
                    prop_assert_eq!(tree.tree_len(), tree_len_for(items.len()));
                    prop_assert_eq!(tree.len(), items.len());
                    prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), items);
                }

                #[test]
                fn query_matches_naive_fold(items in elements(40)) {
                    let tree = sum_tree(items.clone());
                    for range in all_ranges(items.len()) {
                        let expected = naive_fold(&items[range.clone()], &0, add);
                        prop_assert_eq!(tree.query(range.clone()), expected, "range {:?}", range);
                    }
                }

                #[test]
                fn query_keeps_order_of_non_commutative_combine(maps in affine_maps(24)) {
                    let tree = affine_tree(maps.clone());
                    for range in all_ranges(maps.len()) {
                        let expected = naive_fold(&maps[range.clone()], &Affine::identity(), Affine::then);
                        prop_assert_eq!(tree.query(range.clone()), expected, "range {:?}", range);
                    }
                }

                #[test]
                fn update_changes_leaf_and_ancestors_only(
                    (items, position) in elements_with_position(64),
                    value in element(),
                ) {
                    let mut tree = sum_tree(items);
                    let before = tree.tree().to_vec();
                    tree.update(position, value);

                    let mut path = Vec::new();
                    let mut node = tree.tree_len() / 2 + position;
                    while node > 0 {
                        path.push(node);
                        node /= 2;
                    }
                    for (i, (old, new)) in before.iter().zip(tree.tree()).enumerate() {
                        if !path.contains(&i) {
                            prop_assert_eq!(old, new, "node {} changed", i);
                        }
                    }
                    prop_assert_eq!(tree.tree_len(), before.len());
                    prop_assert_eq!(tree[position], value);
                    check_invariants(&tree)?;
                }

                #[test]
                fn insert_shifts_later_elements(
                    (items, position) in elements_with_insert_position(64),
                    value in element(),
                ) {
                    let mut tree = sum_tree(items.clone());
                    tree.insert(position, value);

                    prop_assert_eq!(tree.len(), items.len() + 1);
                    for j in 0..position {
                        prop_assert_eq!(tree[j], items[j]);
                    }
                    prop_assert_eq!(tree[position], value);
                    for j in position..items.len() {
                        prop_assert_eq!(tree[j + 1], items[j]);
                    }
                    check_invariants(&tree)?;
                }

                #[test]
                fn insert_keeps_order_of_non_commutative_combine(
                    maps in affine_maps(20),
                    inserted in affine_maps(20),
                ) {
                    let mut tree = affine_tree(maps.clone());
                    let mut model = maps;
                    for (i, map) in inserted.into_iter().enumerate() {
                        let position = i * 7 % (model.len() + 1);
                        tree.insert(position, map);
                        model.insert(position, map);
                    }
                    prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), model.clone());
                    if !model.is_empty() {
                        let expected = naive_fold(&model, &Affine::identity(), Affine::then);
                        prop_assert_eq!(tree.query(0..model.len()), expected);
                    }
                    check_invariants(&tree)?;
                }

                #[test]
                fn push_back_equals_insert_at_end(items in elements(64), value in element()) {
                    let mut pushed = sum_tree(items.clone());
                    let mut inserted = sum_tree(items.clone());
                    pushed.push_back(value);
                    inserted.insert(items.len(), value);
                    prop_assert_eq!(pushed.tree(), inserted.tree());
                    prop_assert_eq!(pushed.len(), inserted.len());
                }

                #[test]
                fn grows_exactly_when_full(
                    items in elements(64),
                    values in prop::collection::vec(element(), 1..80),
                ) {
                    init_test_logging();
                    let mut tree = sum_tree(items);
                    for (step, value) in values.into_iter().enumerate() {
                        let tree_len = tree.tree_len();
                        let full = tree.len() == tree.capacity();
                        if step % 2 == 0 {
                            tree.push_back(value);
                        } else {
                            let position = value.rem_euclid(tree.len() as i64 + 1) as usize;
                            tree.insert(position, value);
                        }

                        if full {
                            prop_assert_eq!(tree.tree_len(), 2 * tree_len);
                        } else {
                            prop_assert_eq!(tree.tree_len(), tree_len);
                        }
                        check_invariants(&tree)?;
                    }
                }

                #[test]
                fn clones_are_independent(
                    (items, position) in elements_with_position(32),
                    value in element(),
                ) {
                    let original = sum_tree(items);
                    let before = original.tree().to_vec();

                    let mut copy = original.clone();
                    prop_assert_eq!(copy.tree(), original.tree());
                    copy.update(position, value);
                    copy.push_back(value);
                    copy.insert(0, value);

                    prop_assert_eq!(original.tree(), &before[..]);
                    check_invariants(&copy)?;
                }

                #[test]
                fn take_moves_everything(items in elements(32)) {
                    let mut tree = sum_tree(items.clone());
                    let before = tree.tree().to_vec();

                    let taken = tree.take();
                    prop_assert_eq!(taken.tree(), &before[..]);
                    prop_assert_eq!(taken.len(), items.len());
                    prop_assert_eq!(tree.len(), 0);
                    prop_assert_eq!(tree.tree_len(), 0);
                    prop_assert!(tree.try_query(0..1).is_err());
                }
            }
        }
    };
}

segment_tree_properties!(full_rebuild, InsertRebuild::Full);
segment_tree_properties!(affected_rebuild, InsertRebuild::Affected);

proptest! {
    #[test]
    fn rebuild_strategies_give_identical_buffers(
        items in elements(64),
        inserted in prop::collection::vec(element(), 0..64),
    ) {
        let mut full = SegmentTree::with_config(items.clone(), add, 0, config(InsertRebuild::Full));
        let mut affected = SegmentTree::with_config(items, add, 0, config(InsertRebuild::Affected));
        for value in inserted {
            let position = value.rem_euclid(full.len() as i64 + 1) as usize;
            full.insert(position, value);
            affected.insert(position, value);
            prop_assert_eq!(full.tree(), affected.tree());
        }
    }

    #[test]
    fn snapshots_restore_any_tree(items in elements(64)) {
        let tree = SegmentTree::sum(items);
        let json = tree.snapshot().to_json().unwrap();
        let restored = SegmentTree::from_json(&json, add, 0).unwrap();
        prop_assert_eq!(restored.tree(), tree.tree());
        prop_assert_eq!(restored.len(), tree.len());
    }
}

#[test]
fn concrete_scenario() {
    let mut tree = SegmentTree::sum(EIGHT_ELEMENTS.iter().copied());
    assert_eq!(tree.tree_len(), 16);
    assert_eq!(tree.fold_all(), &36);
    assert_eq!(tree.query(0..2), 13);
    assert_eq!(tree.query(2..6), 16);
    assert_eq!(tree.query(1..7), 25);

    let mut inserted = tree.clone();
    tree.update(4, 10);
    assert_eq!(tree.fold_all(), &39);
    assert_eq!(tree.tree()[6], 12);

    inserted.insert(3, 9);
    assert_eq!(inserted.tree_len(), 32);
    assert_eq!(inserted.fold_all(), &45);
}
