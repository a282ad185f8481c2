//! Non-binding row removal.

use crate::model::Model;
use crate::presolve::ledger::{ReductionKind, ReductionLedger};
use crate::presolve::PresolveError;
use crate::types::{ItemState, RowSense};

/// Remove every active non-binding row except the objective row.
///
/// Returns the number of rows deleted.
pub(crate) fn delete_nonbinding_rows(
    model: &mut Model,
    ledger: &mut ReductionLedger,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "nonbinding_rows",
        "Looking for non-binding rows"
    );

    for index in 0..model.num_rows() {
        if !model.rows[index].state.is_active() {
            continue;
        }
        if model.rows[index].sense != RowSense::NonBinding {
            continue;
        }
        if model.objective_row() == Some(index) {
            continue;
        }
        ledger.record(ReductionKind::NonBindingRow, model, Some(index), None);
        model.rows[index].state = ItemState::Delete;
        tracing::debug!(
            component = "presolve",
            operation = "nonbinding_rows",
            row = %model.rows[index].name,
            "Tagged non-binding row"
        );
    }

    let deleted = model
        .delete_tagged_rows()
        .map_err(|source| PresolveError::Store {
            kernel: "nonbinding_rows",
            source,
        })?;
    if deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "nonbinding_rows",
            deleted,
            "Deleted non-binding rows"
        );
    }
    Ok(deleted)
}
