//! Empty row and empty column removal.

use crate::model::Model;
use crate::presolve::ledger::{ReductionKind, ReductionLedger};
use crate::presolve::PresolveError;
use crate::types::{Bound, ItemState};

/// Remove every active row with no elements.
///
/// A finite nonzero right-hand side on an empty row cannot be satisfied by
/// the zero left-hand side; it is reported and the row is removed anyway.
/// Returns the number of rows deleted.
pub(crate) fn delete_empty_rows(
    model: &mut Model,
    ledger: &mut ReductionLedger,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "empty_rows",
        "Looking for empty rows"
    );

    for index in 0..model.num_rows() {
        if model.objective_row() == Some(index) {
            continue;
        }
        let row = &model.rows[index];
        if !row.state.is_active() || !row.elements.is_empty() {
            continue;
        }

        let suspicious = matches!(row.rhs_lower, Bound::Finite(v) if v != 0.0)
            || matches!(row.rhs_upper, Bound::Finite(v) if v != 0.0);
        if suspicious {
            tracing::warn!(
                component = "presolve",
                operation = "empty_rows",
                row = %row.name,
                lower = %row.rhs_lower,
                upper = %row.rhs_upper,
                "Empty row has bounds a zero left-hand side cannot meet"
            );
        }

        ledger.record(ReductionKind::EmptyRow, model, Some(index), None);
        model.rows[index].state = ItemState::Delete;
        tracing::debug!(
            component = "presolve",
            operation = "empty_rows",
            row = %model.rows[index].name,
            "Tagged empty row"
        );
    }

    let deleted = model
        .delete_tagged_rows()
        .map_err(|source| PresolveError::Store {
            kernel: "empty_rows",
            source,
        })?;
    if deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "empty_rows",
            deleted,
            "Deleted empty rows"
        );
    }
    Ok(deleted)
}

/// Remove every active column with no elements.
///
/// The post-solve default value for such a column is zero; bounds that
/// exclude zero are reported before removal. Returns the number of columns
/// deleted.
pub(crate) fn delete_empty_columns(
    model: &mut Model,
    ledger: &mut ReductionLedger,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "empty_columns",
        "Looking for empty columns"
    );

    for index in 0..model.num_columns() {
        let column = &model.columns[index];
        if !column.state.is_active() || !column.elements.is_empty() {
            continue;
        }

        let suspicious = matches!(column.lower, Bound::Finite(v) if v > 0.0)
            || matches!(column.upper, Bound::Finite(v) if v < 0.0);
        if suspicious {
            tracing::warn!(
                component = "presolve",
                operation = "empty_columns",
                column = %column.name,
                lower = %column.lower,
                upper = %column.upper,
                "Empty column has bounds that exclude zero"
            );
        }

        ledger.record(ReductionKind::EmptyColumn, model, None, Some(index));
        model.columns[index].state = ItemState::Delete;
        tracing::debug!(
            component = "presolve",
            operation = "empty_columns",
            column = %model.columns[index].name,
            "Tagged empty column"
        );
    }

    let deleted = model
        .delete_tagged_columns()
        .map_err(|source| PresolveError::Store {
            kernel: "empty_columns",
            source,
        })?;
    if deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "empty_columns",
            deleted,
            "Deleted empty columns"
        );
    }
    Ok(deleted)
}
