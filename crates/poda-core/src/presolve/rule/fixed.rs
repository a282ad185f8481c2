//! Fixed variable removal.

use crate::model::Model;
use crate::presolve::ledger::{ReductionKind, ReductionLedger};
use crate::presolve::PresolveError;
use crate::types::{Bound, ItemState};

/// Remove every active column whose finite lower and upper bounds coincide.
///
/// The fixed value times each hosting coefficient is subtracted from every
/// finite right-hand-side of the hosting rows; infinite sides are left
/// untouched. Returns the number of columns deleted.
pub(crate) fn delete_fixed_variables(
    model: &mut Model,
    ledger: &mut ReductionLedger,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "fixed_variables",
        "Looking for fixed variables"
    );

    for index in 0..model.num_columns() {
        if !model.columns[index].state.is_active() {
            continue;
        }
        let (Bound::Finite(lower), Bound::Finite(upper)) =
            (model.columns[index].lower, model.columns[index].upper)
        else {
            continue;
        };
        if lower != upper {
            continue;
        }

        ledger.record(ReductionKind::FixedVariable, model, None, Some(index));
        model.columns[index].state = ItemState::Delete;
        tracing::debug!(
            component = "presolve",
            operation = "fixed_variables",
            column = %model.columns[index].name,
            value = lower,
            "Tagged fixed variable"
        );

        let hosts: Vec<(usize, f64)> = model.columns[index]
            .elements
            .iter()
            .map(|&e| {
                let element = &model.elements[e];
                (element.row, element.value)
            })
            .collect();
        for (row, coef) in hosts {
            model.rows[row].rhs_lower = model.rows[row].rhs_lower.shifted(-(lower * coef));
            model.rows[row].rhs_upper = model.rows[row].rhs_upper.shifted(-(upper * coef));
        }
    }

    let deleted = model
        .delete_tagged_columns()
        .map_err(|source| PresolveError::Store {
            kernel: "fixed_variables",
            source,
        })?;
    if deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "fixed_variables",
            deleted,
            "Deleted fixed variables"
        );
    }
    Ok(deleted)
}
