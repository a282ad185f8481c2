//! Shared fixtures for model tests.

use crate::model::Model;
use crate::types::{Bound, ColumnKind, RowSense};

/// `min x + y` subject to `2x = 6` and `x + y >= 5`, with `x, y >= 0`.
pub fn small_model() -> Model {
    let mut model = Model::new("small");
    let obj = model
        .add_row("obj", RowSense::NonBinding, Bound::Finite(0.0), Bound::Finite(0.0))
        .unwrap();
    let c1 = model
        .add_row("c1", RowSense::Equal, Bound::Finite(6.0), Bound::Finite(6.0))
        .unwrap();
    let c2 = model
        .add_row("c2", RowSense::GreaterEqual, Bound::Finite(5.0), Bound::PosInf)
        .unwrap();
    let x = model
        .add_column("x", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
        .unwrap();
    let y = model
        .add_column("y", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
        .unwrap();
    model.add_element(obj, x, 1.0).unwrap();
    model.add_element(obj, y, 1.0).unwrap();
    model.add_element(c1, x, 2.0).unwrap();
    model.add_element(c2, x, 1.0).unwrap();
    model.add_element(c2, y, 1.0).unwrap();
    model.set_objective_row(Some(obj)).unwrap();
    model
}
