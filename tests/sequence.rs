use std::cell::Cell;
use std::rc::Rc;

use avl_collections::{Cursor, OutOfRange, Sequence};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SeqOp {
    Push(i64),
    PushClone(usize),
    Set(usize, i64),
    At(usize),
    Clear,
}

fn seq_op_strategy() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        8 => any::<i64>().prop_map(SeqOp::Push),
        2 => (0usize..64).prop_map(SeqOp::PushClone),
        2 => (0usize..64, any::<i64>()).prop_map(|(i, v)| SeqOp::Set(i, v)),
        3 => (0usize..64).prop_map(SeqOp::At),
        1 => Just(SeqOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Replays random operations on both Sequence and Vec and asserts identical
    /// contents at every step.
    #[test]
    fn sequence_ops_match_vec(ops in proptest::collection::vec(seq_op_strategy(), 0..2_000)) {
        let mut values: Sequence<i64> = Sequence::new();
        let mut model: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                SeqOp::Push(v) => {
                    values.push(v);
                    model.push(v);
                }
                SeqOp::PushClone(i) => {
                    if let Ok(value) = values.at(i) {
                        let copy = *value;
                        values.push(copy);
                        model.push(model[i]);
                    }
                }
                SeqOp::Set(i, v) => {
                    match values.at_mut(i) {
                        Ok(value) => *value = v,
                        Err(error) => {
                            prop_assert_eq!(error, OutOfRange { index: i, len: model.len() });
                        }
                    }
                    if let Some(value) = model.get_mut(i) {
                        *value = v;
                    }
                }
                SeqOp::At(i) => {
                    prop_assert_eq!(values.at(i).ok(), model.get(i));
                }
                SeqOp::Clear => {
                    values.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(values.as_slice(), model.as_slice());
            prop_assert!(values.len() <= values.capacity());
        }
    }

    /// After `n` pushes every element is where it was appended, across every growth step.
    #[test]
    fn growth_preserves_order(n in 0usize..3_000) {
        let mut values = Sequence::new();
        for i in 0..n {
            values.push(i);
        }

        prop_assert_eq!(values.len(), n);
        for i in 0..n {
            prop_assert_eq!(values[i], i);
        }
        let expected_capacity = if n == 0 { 0 } else { n.next_power_of_two().max(2) };
        prop_assert_eq!(values.capacity(), expected_capacity);
    }

    /// `at` succeeds exactly below the length.
    #[test]
    fn bounds_check(len in 0usize..100, index in 0usize..200) {
        let values: Sequence<usize> = (0..len).collect();
        match values.at(index) {
            Ok(value) => {
                prop_assert!(index < len);
                prop_assert_eq!(*value, index);
            }
            Err(error) => {
                prop_assert!(index >= len);
                prop_assert_eq!(error, OutOfRange { index, len });
            }
        }
    }

    /// Mutating a copy never touches the source.
    #[test]
    fn copies_are_independent(source in proptest::collection::vec(any::<i32>(), 1..100), replacement: i32) {
        let original: Sequence<i32> = source.iter().copied().collect();
        let mut copy = original.clone();
        for value in &mut copy {
            *value = replacement;
        }
        copy.push(replacement);

        prop_assert_eq!(original.as_slice(), source.as_slice());
        prop_assert_eq!(copy.len(), source.len() + 1);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn copy_then_modify() {
    let mut original = Sequence::new();
    original.push(10);
    original.push(20);

    let mut copy = original.clone();
    copy[0] = 99;

    assert_eq!(original[0], 10);
    assert_eq!(copy[0], 99);
    assert_eq!(copy[1], 20);
}

#[test]
fn move_leaves_source_empty() {
    let mut original = Sequence::from([String::from("a"), String::from("b")]);
    let moved = original.take();

    assert_eq!(original.len(), 0);
    assert_eq!(original.capacity(), 0);
    assert!(original.at(0).is_err());
    assert_eq!(moved.as_slice(), ["a", "b"]);

    original.push(String::from("c"));
    assert_eq!(original.as_slice(), ["c"]);
}

/// Counts how many times values carrying the same tally were dropped.
#[derive(Clone, Debug)]
struct Counted {
    id: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn counted(ids: &[u32], drops: &Rc<Cell<usize>>) -> Sequence<Counted> {
    ids.iter()
        .map(|&id| Counted {
            id,
            drops: Rc::clone(drops),
        })
        .collect()
}

fn ids(values: &Sequence<Counted>) -> Vec<u32> {
    values.iter().map(|value| value.id).collect()
}

#[test]
fn copy_assign_drops_previous_elements() {
    let target_drops = Rc::new(Cell::new(0));
    let source_drops = Rc::new(Cell::new(0));

    let source = counted(&[7, 8], &source_drops);
    let mut target = counted(&[1, 2, 3], &target_drops);
    assert_eq!(ids(&target), [1, 2, 3]);

    target = source.clone();
    assert_eq!(target_drops.get(), 3);
    assert_eq!(source_drops.get(), 0);
    assert_eq!(ids(&target), [7, 8]);
    assert_eq!(ids(&source), [7, 8]);

    target.clone_from(&counted(&[9], &source_drops));
    // The two replaced clones plus the temporary passed to `clone_from`.
    assert_eq!(source_drops.get(), 3);
    assert_eq!(ids(&target), [9]);
    assert_eq!(ids(&source), [7, 8]);

    drop(target);
    drop(source);
    assert_eq!(target_drops.get(), 3);
    assert_eq!(source_drops.get(), 6);
}

#[test]
fn move_assign_drops_previous_elements() {
    let target_drops = Rc::new(Cell::new(0));
    let source_drops = Rc::new(Cell::new(0));

    let mut source = counted(&[4, 5, 6], &source_drops);
    let mut target = counted(&[1, 2], &target_drops);
    assert_eq!(ids(&target), [1, 2]);

    target = source.take();
    assert_eq!(target_drops.get(), 2);
    assert_eq!(source_drops.get(), 0);
    assert_eq!(ids(&target), [4, 5, 6]);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);

    drop(source);
    assert_eq!(source_drops.get(), 0);
    drop(target);
    assert_eq!(source_drops.get(), 3);
    assert_eq!(target_drops.get(), 2);
}

#[test]
fn out_of_range_message() {
    let values = Sequence::from([1, 2, 3]);
    let error = values.at(3).unwrap_err();
    assert_eq!(error.to_string(), "index 3 out of range for sequence of length 3");
}

#[test]
#[should_panic(expected = "index 5 out of range for sequence of length 2")]
fn index_out_of_range_panics() {
    let values = Sequence::from([1, 2]);
    let _value = values[5];
}

#[test]
fn cursor_walk_visits_every_element() {
    let mut values: Sequence<u32> = (1..=5).collect();

    let mut cursor = values.begin();
    while cursor != values.end() {
        values[cursor] *= 10;
        cursor += 1;
    }
    assert_eq!(values.as_slice(), [10, 20, 30, 40, 50]);

    let last = values.end() - 1;
    assert_eq!(values[last], 50);
    assert_eq!(values.end() - values.begin(), values.len());
}

#[test]
fn fresh_cursors_after_growth() {
    let mut values = Sequence::with_capacity(2);
    values.push('a');
    values.push('b');
    values.push('c');

    let first = values.begin();
    assert_eq!(values[first + 2], 'c');
    assert_eq!(values[Cursor::from_offset(1)], 'b');
}

#[test]
fn empty_sequence() {
    let values: Sequence<u8> = Sequence::default();
    assert!(values.is_empty());
    assert_eq!(values.capacity(), 0);
    assert_eq!(values.begin(), values.end());
    assert_eq!(format!("{values:?}"), "[]");
}
