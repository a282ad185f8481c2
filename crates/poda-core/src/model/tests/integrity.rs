//! Cross-index integrity under arbitrary deletion sequences.

use super::support::small_model;
use crate::model::Model;
use crate::types::{Bound, ColumnKind, RowSense};

#[derive(Clone, Copy)]
enum Op {
    Row(usize),
    Column(usize),
}

fn dense_model(rows: usize, columns: usize) -> Model {
    let mut model = Model::new("dense");
    for r in 0..rows {
        model
            .add_row(
                format!("r{}", r),
                RowSense::Equal,
                Bound::Finite(0.0),
                Bound::Finite(0.0),
            )
            .unwrap();
    }
    for c in 0..columns {
        model
            .add_column(
                format!("x{}", c),
                ColumnKind::Continuous,
                Bound::NegInf,
                Bound::PosInf,
            )
            .unwrap();
    }
    for r in 0..rows {
        for c in 0..columns {
            model.add_element(r, c, (r + 1) as f64 * (c + 1) as f64).unwrap();
        }
    }
    model
}

fn run_sequence(mut model: Model, ops: &[Op]) {
    model.check_integrity().unwrap();
    for (step, op) in ops.iter().enumerate() {
        match op {
            Op::Row(index) => model.delete_row(*index).unwrap(),
            Op::Column(index) => model.delete_column(*index).unwrap(),
        }
        if let Err(violation) = model.check_integrity() {
            panic!("integrity lost at step {}: {}", step, violation);
        }
    }
}

#[test]
fn test_integrity_row_then_column_sweeps() {
    run_sequence(
        dense_model(4, 4),
        &[Op::Row(0), Op::Row(2), Op::Column(3), Op::Row(0), Op::Column(0)],
    );
}

#[test]
fn test_integrity_deleting_tail_owners_first() {
    // The last row owns the global element tail, so every one of its
    // elements collides with the tail cursor during migration.
    run_sequence(
        dense_model(4, 3),
        &[Op::Row(3), Op::Row(2), Op::Row(1), Op::Row(0)],
    );
}

#[test]
fn test_integrity_interleaved_from_both_ends() {
    run_sequence(
        dense_model(5, 5),
        &[
            Op::Column(4),
            Op::Row(0),
            Op::Column(0),
            Op::Row(3),
            Op::Column(2),
            Op::Row(0),
            Op::Row(1),
        ],
    );
}

#[test]
fn test_integrity_single_cell_model() {
    let mut model = dense_model(1, 1);
    model.delete_row(0).unwrap();
    assert_eq!(model.num_rows(), 0);
    assert_eq!(model.num_elements(), 0);
    assert_eq!(model.num_columns(), 1);
    assert!(model.columns()[0].elements.is_empty());
    model.check_integrity().unwrap();
}

#[test]
fn test_integrity_sparse_fixture() {
    let mut model = small_model();
    model.delete_column(0).unwrap();
    model.check_integrity().unwrap();
    model.delete_row(1).unwrap();
    model.check_integrity().unwrap();
    model.delete_row(0).unwrap();
    model.check_integrity().unwrap();
    assert_eq!(model.num_rows(), 1);
    assert_eq!(model.num_columns(), 1);
}

#[test]
fn test_integrity_exhaustive_small_orders() {
    // Every deletion order of a 3-row store, with a column deletion mixed in.
    let orders: [[usize; 3]; 6] = [
        [0, 0, 0],
        [0, 1, 0],
        [1, 0, 0],
        [1, 1, 0],
        [2, 0, 0],
        [2, 1, 0],
    ];
    for order in orders {
        let mut model = dense_model(3, 2);
        for &row in &order {
            model.delete_row(row).unwrap();
            model.check_integrity().unwrap();
        }
        model.delete_column(1).unwrap();
        model.check_integrity().unwrap();
    }
}
