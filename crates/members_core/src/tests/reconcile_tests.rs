use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    label: &'static str,
}

impl ListEntry for Row {
    type StableId = u32;

    fn stable_id(&self) -> u32 {
        self.id
    }
}

fn rows(pairs: &[(u32, &'static str)]) -> Vec<Row> {
    pairs.iter()
        .map(|(id, label)| Row { id: *id, label })
        .collect()
}

fn assert_applies(previous: &[Row], next: &[Row]) -> Vec<Operation<Row>> {
    let operations = reconcile(previous, next).expect("reconcile");
    let mut list = previous.to_vec();
    apply(&mut list, &operations).expect("apply");
    assert_eq!(list, next);
    operations
}

#[test]
fn identical_lists_produce_no_operations() {
    let list = rows(&[(1, "a"), (2, "b"), (3, "c")]);
    assert!(reconcile(&list, &list).expect("reconcile").is_empty());
}

#[test]
fn growth_from_empty_is_inserts_in_ascending_order() {
    let next = rows(&[(1, "a"), (2, "b")]);
    let operations = assert_applies(&[], &next);
    assert_eq!(
        operations,
        vec![
            Operation::Insert {
                index: 0,
                entry: next[0].clone()
            },
            Operation::Insert {
                index: 1,
                entry: next[1].clone()
            },
        ]
    );
}

#[test]
fn removals_run_highest_index_first() {
    let previous = rows(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
    let next = rows(&[(2, "b"), (4, "d")]);
    let operations = assert_applies(&previous, &next);
    assert_eq!(
        operations,
        vec![Operation::Remove { index: 2 }, Operation::Remove { index: 0 }]
    );
}

#[test]
fn content_change_in_place_is_an_update() {
    let previous = rows(&[(1, "a"), (2, "b")]);
    let next = rows(&[(1, "a"), (2, "b-edited")]);
    let operations = assert_applies(&previous, &next);
    assert_eq!(
        operations,
        vec![Operation::Update {
            index: 1,
            entry: next[1].clone()
        }]
    );
}

#[test]
fn rows_shifted_by_an_insert_do_not_move() {
    let previous = rows(&[(1, "a"), (2, "b")]);
    let next = rows(&[(0, "z"), (1, "a"), (2, "b")]);
    let operations = assert_applies(&previous, &next);
    assert_eq!(operations.len(), 1);
    assert!(matches!(operations[0], Operation::Insert { index: 0, .. }));
}

#[test]
fn rotating_first_row_to_the_end_is_a_single_move() {
    let previous = rows(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
    let next = rows(&[(2, "b"), (3, "c"), (4, "d"), (1, "a")]);
    let operations = assert_applies(&previous, &next);
    assert_eq!(operations, vec![Operation::Move { from: 0, to: 3 }]);
}

#[test]
fn moved_row_with_new_content_is_moved_then_updated() {
    let previous = rows(&[(1, "a"), (2, "b"), (3, "c")]);
    let next = rows(&[(3, "c2"), (1, "a"), (2, "b")]);
    let operations = assert_applies(&previous, &next);
    assert_eq!(
        operations,
        vec![
            Operation::Move { from: 2, to: 0 },
            Operation::Update {
                index: 0,
                entry: next[0].clone()
            },
        ]
    );
}

#[test]
fn mixed_transition_applies_cleanly() {
    let previous = rows(&[(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")]);
    let next = rows(&[(5, "e"), (6, "f"), (2, "b2"), (4, "d"), (7, "g"), (1, "a")]);
    assert_applies(&previous, &next);
}

#[test]
fn duplicate_stable_ids_are_rejected() {
    let previous = rows(&[(1, "a")]);
    let next = rows(&[(2, "b"), (2, "c")]);
    let err = reconcile(&previous, &next).expect_err("duplicate");
    assert!(matches!(
        err,
        ReconcileError::DuplicateStableId {
            side: ListSide::Next,
            ..
        }
    ));
}

#[test]
fn apply_rejects_out_of_bounds_operations() {
    let mut list = rows(&[(1, "a")]);
    let err = apply(&mut list, &[Operation::Remove { index: 3 }]).expect_err("bounds");
    assert_eq!(err, ReconcileError::OutOfBounds { index: 3, len: 1 });
    assert_eq!(list.len(), 1);
}

#[test]
fn longest_increasing_subsequence_picks_a_maximal_run() {
    let values = [3, 0, 1, 2];
    let positions = longest_increasing_subsequence(&values);
    let picked: Vec<usize> = positions.iter().map(|p| values[*p]).collect();
    assert_eq!(picked, vec![0, 1, 2]);
}

#[test]
fn map_entry_keeps_indices() {
    let op = Operation::Update {
        index: 4,
        entry: Row { id: 9, label: "x" },
    };
    assert_eq!(
        op.map_entry(|row| row.id),
        Operation::Update { index: 4, entry: 9 }
    );
}

#[test]
fn operations_serialize_with_op_tag() {
    let ops: Vec<Operation<u32>> = vec![
        Operation::Move { from: 2, to: 0 },
        Operation::Insert { index: 1, entry: 7 },
    ];
    let json = serde_json::to_value(&ops).expect("json");
    assert_eq!(
        json,
        serde_json::json!([
            { "op": "move", "from": 2, "to": 0 },
            { "op": "insert", "index": 1, "entry": 7 },
        ])
    );
}
