use std::collections::BTreeMap;

use avl_table::{AvlMap, Invariant, Rank, TableError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 1_000;

/// Keys drawn from a range narrow enough to collide often.
fn key_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

/// Height bound of an AVL tree holding `len` nodes: `1.44 * log2(len + 2)`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn avl_height_bound(len: usize) -> isize {
    (1.4405 * ((len + 2) as f64).log2()).floor() as isize
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TableOp {
    Insert(i64, i64),
    Put(i64, Option<i64>),
    Remove(i64),
    Get(i64),
    Floor(i64),
    Ceiling(i64),
    Rank(i64),
    DeleteMin,
    DeleteMax,
}

fn table_op_strategy() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| TableOp::Insert(k, v)),
        2 => (key_strategy(), proptest::option::of(value_strategy())).prop_map(|(k, v)| TableOp::Put(k, v)),
        3 => key_strategy().prop_map(TableOp::Remove),
        2 => key_strategy().prop_map(TableOp::Get),
        1 => key_strategy().prop_map(TableOp::Floor),
        1 => key_strategy().prop_map(TableOp::Ceiling),
        1 => key_strategy().prop_map(TableOp::Rank),
        1 => Just(TableOp::DeleteMin),
        1 => Just(TableOp::DeleteMax),
    ]
}

// ─── Randomized comparison against BTreeMap ──────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays a random sequence of operations on both AvlMap and BTreeMap, asserting
    /// identical results and a structurally valid tree after every mutation.
    #[test]
    fn table_ops_match_btreemap(ops in proptest::collection::vec(table_op_strategy(), TEST_SIZE)) {
        let mut table: AvlMap<i64, i64> = AvlMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            let mutated = match op {
                TableOp::Insert(k, v) => {
                    prop_assert_eq!(table.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                    true
                }
                TableOp::Put(k, v) => {
                    let expected = match v {
                        Some(v) => model.insert(*k, *v),
                        None => model.remove(k),
                    };
                    prop_assert_eq!(table.put(*k, *v), expected, "put({}, {:?})", k, v);
                    true
                }
                TableOp::Remove(k) => {
                    prop_assert_eq!(table.remove(k), model.remove(k), "remove({})", k);
                    true
                }
                TableOp::Get(k) => {
                    prop_assert_eq!(table.get(k), model.get(k), "get({})", k);
                    prop_assert_eq!(table.contains_key(k), model.contains_key(k));
                    false
                }
                TableOp::Floor(k) => {
                    prop_assert_eq!(table.floor(k), model.range(..=k).next_back().map(|(k, _)| k));
                    false
                }
                TableOp::Ceiling(k) => {
                    prop_assert_eq!(table.ceiling(k), model.range(k..).next().map(|(k, _)| k));
                    false
                }
                TableOp::Rank(k) => {
                    prop_assert_eq!(table.rank(k), model.range(..k).count(), "rank({})", k);
                    false
                }
                TableOp::DeleteMin => {
                    prop_assert_eq!(table.delete_min().ok(), model.pop_first());
                    true
                }
                TableOp::DeleteMax => {
                    prop_assert_eq!(table.delete_max().ok(), model.pop_last());
                    true
                }
            };

            if mutated {
                let validation = table.check();
                prop_assert!(validation.is_valid(), "after {:?}: {}", op, validation);
                prop_assert!(table.height() <= avl_height_bound(table.len()));
            }
            prop_assert_eq!(table.len(), model.len());
        }

        prop_assert!(table.iter().eq(model.iter()));
    }

    /// Every rank selects the key that reports that rank back.
    #[test]
    fn rank_and_select_are_inverse(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let table: AvlMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();

        for (rank, (key, value)) in model.iter().enumerate() {
            prop_assert_eq!(table.select(rank), Ok(key));
            prop_assert_eq!(table.select_entry(rank), Ok((key, value)));
            prop_assert_eq!(table.rank(key), rank);
            prop_assert_eq!(&table[Rank(rank)], value);
        }
        prop_assert_eq!(
            table.select(model.len()),
            Err(TableError::RankOutOfRange { rank: model.len(), len: model.len() })
        );
    }

    #[test]
    fn range_queries_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        bounds in proptest::collection::vec((key_strategy(), key_strategy()), 32),
    ) {
        let table: AvlMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();

        for (lo, hi) in bounds {
            let expected: Vec<i64> = if lo <= hi { model.range(lo..=hi).map(|(k, _)| *k).collect() } else { Vec::new() };
            prop_assert_eq!(table.keys_in_range(&lo, &hi).copied().collect::<Vec<_>>(), expected.clone());
            prop_assert_eq!(table.size_in_range(&lo, &hi), expected.len());

            if lo <= hi {
                let half_open = table.range(lo..hi);
                prop_assert_eq!(half_open.len(), model.range(lo..hi).count());
                prop_assert!(half_open.eq(model.range(lo..hi)));
            }
        }
    }

    #[test]
    fn level_order_holds_every_entry_once(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let table: AvlMap<i64, i64> = entries.into_iter().collect();
        let mut visited: Vec<i64> = table.keys_level_order().copied().collect();
        prop_assert_eq!(visited.len(), table.len());
        visited.sort_unstable();
        prop_assert!(visited.iter().eq(table.keys()));
    }
}

// ─── Worked scenarios ────────────────────────────────────────────────────────

#[test]
fn searching_example_keys_come_back_sorted() {
    let mut table = AvlMap::new();
    for (value, key) in ["S", "E", "A", "R", "C", "H"].into_iter().enumerate() {
        table.insert(key, value);
    }

    assert_eq!(table.keys().copied().collect::<Vec<_>>(), ["A", "C", "E", "H", "R", "S"]);
    assert_eq!(table.values().copied().collect::<Vec<_>>(), [2, 4, 1, 5, 3, 0]);
    assert!(table.height() <= 2);
    assert_eq!(table.len(), 6);
    assert!(table.check().is_valid());
}

#[test]
fn empty_table_reports_errors_not_panics() {
    let mut table: AvlMap<char, i32> = AvlMap::new();

    assert_eq!(table.delete_min(), Err(TableError::Empty));
    assert_eq!(table.delete_max(), Err(TableError::Empty));
    assert_eq!(table.min(), Err(TableError::Empty));
    assert_eq!(table.max(), Err(TableError::Empty));
    assert_eq!(table.select(0), Err(TableError::RankOutOfRange { rank: 0, len: 0 }));
    assert_eq!(table.len(), 0);
    assert_eq!(table.height(), -1);
    assert!(table.is_empty());
    assert_eq!(table.floor(&'a'), None);
    assert_eq!(table.ceiling(&'a'), None);
    assert_eq!(table.rank(&'a'), 0);
    assert_eq!(table.keys_in_range(&'a', &'z').count(), 0);
    assert_eq!(table.level_order().count(), 0);
    assert!(table.check().is_valid());
}

#[test]
fn ascending_inserts_are_rebalanced() {
    let table: AvlMap<i32, ()> = (1..=7).map(|k| (k, ())).collect();

    assert_eq!(table.height(), 2);
    assert_eq!(table.keys_level_order().copied().collect::<Vec<_>>(), [4, 2, 6, 1, 3, 5, 7]);
    assert!(table.is_avl());
}

#[test]
fn three_keys_answer_order_queries() {
    let table = AvlMap::from([(10, "ten"), (20, "twenty"), (30, "thirty")]);

    assert_eq!(table.rank(&20), 1);
    assert_eq!(table.select(1), Ok(&20));
    assert_eq!(table.floor(&25), Some(&20));
    assert_eq!(table.ceiling(&25), Some(&30));
    assert_eq!(table.min(), Ok(&10));
    assert_eq!(table.max(), Ok(&30));
    assert_eq!(table.size_in_range(&15, &30), 2);
}

#[test]
fn deleting_from_the_alphabet_keeps_every_invariant() {
    let mut table: AvlMap<char, u32> = ('A'..='Z').zip(0..).collect();
    assert_eq!(table.remove(&'M'), Some(12));

    assert!(!table.contains_key(&'M'));
    assert_eq!(table.len(), 25);
    let validation = table.check();
    assert!(validation.is_valid(), "{validation}");
    for invariant in Invariant::ALL {
        assert!(!validation.is_violated(invariant));
    }
    assert_eq!(table.floor(&'M'), Some(&'L'));
    assert_eq!(table.ceiling(&'M'), Some(&'N'));
    assert_eq!(table.rank(&'N'), 12);
}

// ─── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn insert_overwrites_without_growing() {
    let mut table = AvlMap::new();
    assert_eq!(table.insert("k", 1), None);
    assert_eq!(table.insert("k", 2), Some(1));
    assert_eq!(table.len(), 1);
    assert_eq!(table[&"k"], 2);
}

#[test]
fn put_without_a_value_deletes() {
    let mut table = AvlMap::from([(1, 'a'), (2, 'b')]);
    assert_eq!(table.put(1, None), Some('a'));
    assert_eq!(table.put(9, None), None);
    assert_eq!(table.put(3, Some('c')), None);
    assert_eq!(table.keys().copied().collect::<Vec<_>>(), [2, 3]);
}

#[test]
fn removing_an_absent_key_is_a_no_op() {
    let mut table: AvlMap<i32, i32> = (0..10).map(|k| (k * 2, k)).collect();
    let before = table.clone();
    assert_eq!(table.remove(&5), None);
    assert_eq!(table, before);
    assert_eq!(table.keys_level_order().collect::<Vec<_>>(), before.keys_level_order().collect::<Vec<_>>());
}

#[test]
fn draining_from_both_ends_empties_the_table() {
    let mut table: AvlMap<i32, i32> = (0..100).map(|k| (k, -k)).collect();
    for k in 0..50 {
        assert_eq!(table.delete_min(), Ok((k, -k)));
        assert_eq!(table.delete_max(), Ok((99 - k, k - 99)));
        assert!(table.check().is_valid());
    }
    assert!(table.is_empty());
    assert_eq!(table.height(), -1);
}

#[test]
fn rank_indexing_allows_mutation() {
    let mut table: AvlMap<&str, i32> = AvlMap::from([("b", 2), ("a", 1), ("c", 3)]);
    table[Rank(1)] *= 10;
    assert_eq!(table.get(&"b"), Some(&20));
    if let Ok((key, value)) = table.select_entry_mut(2) {
        assert_eq!(*key, "c");
        *value = 0;
    }
    assert_eq!(table[&"c"], 0);
    assert_eq!(
        table.select_entry_mut(3).map(|(k, _)| *k),
        Err(TableError::RankOutOfRange { rank: 3, len: 3 })
    );
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_past_the_last_rank_panics() {
    let table = AvlMap::from([(1, 'a')]);
    let _value = table[Rank(1)];
}

#[test]
fn clear_and_reuse() {
    let mut table = AvlMap::with_capacity(16);
    table.extend((0..16).map(|k| (k, k)));
    assert!(table.capacity() >= 16);
    table.clear();
    assert!(table.is_empty());
    table.insert(7, 7);
    assert_eq!(table.first_key_value(), Some((&7, &7)));
    assert_eq!(table.last_key_value(), Some((&7, &7)));
}

#[test]
fn error_messages_are_readable() {
    assert_eq!(TableError::Empty.to_string(), "operation requires a non-empty table");
    assert_eq!(
        TableError::RankOutOfRange { rank: 4, len: 2 }.to_string(),
        "rank 4 is out of range for a table of 2 entries"
    );
}
