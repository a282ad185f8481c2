//! Row singleton and free column singleton removal.

use crate::model::Model;
use crate::presolve::ledger::{ReductionKind, ReductionLedger};
use crate::presolve::PresolveError;
use crate::types::{Bound, ItemState, RowSense};

enum Pin {
    Both,
    LowerOnly,
    UpperOnly,
}

/// Remove every active row with exactly one element, pinning its variable.
///
/// An equality row pins both bounds of the variable to `rhs / a` and the
/// pinned value is substituted into every other hosting row's finite
/// right-hand sides. With `allow_inequalities`, `G` and `L` rows are also
/// accepted and update only the matching bound side. A zero coefficient in
/// the singleton element aborts the kernel. Returns the number of rows plus
/// columns deleted.
pub(crate) fn delete_row_singletons(
    model: &mut Model,
    ledger: &mut ReductionLedger,
    allow_inequalities: bool,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "row_singletons",
        "Looking for singleton rows"
    );

    for index in 0..model.num_rows() {
        if !model.rows[index].state.is_active() {
            continue;
        }
        if model.rows[index].elements.len() != 1 {
            continue;
        }
        let pin = match model.rows[index].sense {
            RowSense::Equal => Pin::Both,
            RowSense::GreaterEqual if allow_inequalities => Pin::LowerOnly,
            RowSense::LessEqual if allow_inequalities => Pin::UpperOnly,
            _ => continue,
        };

        let element = model.rows[index].elements[0];
        let column = model.elements[element].column;
        let coef = model.elements[element].value;
        if !model.columns[column].state.is_active() {
            continue;
        }
        if coef == 0.0 {
            return Err(PresolveError::DegenerateCoefficient {
                row: model.rows[index].name.clone(),
                column: model.columns[column].name.clone(),
            });
        }

        let rhs = match pin {
            Pin::Both | Pin::LowerOnly => model.rows[index].rhs_lower,
            Pin::UpperOnly => model.rows[index].rhs_upper,
        };
        let Some(rhs) = rhs.finite() else {
            tracing::warn!(
                component = "presolve",
                operation = "row_singletons",
                row = %model.rows[index].name,
                "Singleton row has no finite right-hand side, skipping"
            );
            continue;
        };
        let pinned = rhs / coef;

        match pin {
            Pin::Both => {
                model.columns[column].lower = Bound::Finite(pinned);
                model.columns[column].upper = Bound::Finite(pinned);
            }
            Pin::LowerOnly => model.columns[column].lower = Bound::Finite(pinned),
            Pin::UpperOnly => model.columns[column].upper = Bound::Finite(pinned),
        }

        if matches!(pin, Pin::Both) {
            let hosts: Vec<(usize, f64)> = model.columns[column]
                .elements
                .iter()
                .map(|&e| {
                    let el = &model.elements[e];
                    (el.row, el.value)
                })
                .collect();
            for (host, host_coef) in hosts {
                if host == index {
                    continue;
                }
                model.rows[host].rhs_lower =
                    model.rows[host].rhs_lower.shifted(-(pinned * host_coef));
                model.rows[host].rhs_upper =
                    model.rows[host].rhs_upper.shifted(-(pinned * host_coef));
            }

            model.rows[index].state = ItemState::Delete;
            model.columns[column].state = ItemState::Delete;
            ledger.record(ReductionKind::RowSingleton, model, Some(index), Some(column));
            tracing::debug!(
                component = "presolve",
                operation = "row_singletons",
                row = %model.rows[index].name,
                column = %model.columns[column].name,
                value = pinned,
                "Tagged singleton row and its column"
            );
        } else {
            // One-sided pins keep the variable; the row itself is spent.
            model.rows[index].state = ItemState::Delete;
            ledger.record(ReductionKind::RowSingleton, model, Some(index), Some(column));
            tracing::debug!(
                component = "presolve",
                operation = "row_singletons",
                row = %model.rows[index].name,
                column = %model.columns[column].name,
                bound = pinned,
                "Tagged one-sided singleton row"
            );
        }
    }

    let rows_deleted = model
        .delete_tagged_rows()
        .map_err(|source| PresolveError::Store {
            kernel: "row_singletons",
            source,
        })?;
    let columns_deleted = model
        .delete_tagged_columns()
        .map_err(|source| PresolveError::Store {
            kernel: "row_singletons",
            source,
        })?;
    if rows_deleted + columns_deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "row_singletons",
            rows_deleted,
            columns_deleted,
            "Deleted singleton rows"
        );
    }
    Ok(rows_deleted + columns_deleted)
}

/// Remove every active free column whose single non-objective occurrence is
/// in an active row, together with that row.
///
/// Returns the number of rows plus columns deleted.
pub(crate) fn delete_free_column_singletons(
    model: &mut Model,
    ledger: &mut ReductionLedger,
) -> Result<usize, PresolveError> {
    tracing::debug!(
        component = "presolve",
        operation = "free_column_singletons",
        "Looking for free column singletons"
    );

    for index in 0..model.num_columns() {
        if !model.columns[index].state.is_active() {
            continue;
        }
        if model.columns[index].lower != Bound::NegInf
            || model.columns[index].upper != Bound::PosInf
        {
            continue;
        }

        let mut host = None;
        let mut occurrences = 0;
        for &e in &model.columns[index].elements {
            let row = model.elements[e].row;
            if model.objective_row() == Some(row) {
                continue;
            }
            occurrences += 1;
            host = Some(row);
        }
        let Some(host) = host.filter(|_| occurrences == 1) else {
            if occurrences == 0 && !model.columns[index].elements.is_empty() {
                tracing::debug!(
                    component = "presolve",
                    operation = "free_column_singletons",
                    column = %model.columns[index].name,
                    "Free variable appears only in the objective, keeping"
                );
            }
            continue;
        };
        if !model.rows[host].state.is_active() {
            continue;
        }

        ledger.record(
            ReductionKind::FreeColumnSingleton,
            model,
            Some(host),
            Some(index),
        );
        model.columns[index].state = ItemState::Delete;
        model.rows[host].state = ItemState::Delete;
        tracing::debug!(
            component = "presolve",
            operation = "free_column_singletons",
            row = %model.rows[host].name,
            column = %model.columns[index].name,
            "Tagged free column singleton and its row"
        );
    }

    let rows_deleted = model
        .delete_tagged_rows()
        .map_err(|source| PresolveError::Store {
            kernel: "free_column_singletons",
            source,
        })?;
    let columns_deleted = model
        .delete_tagged_columns()
        .map_err(|source| PresolveError::Store {
            kernel: "free_column_singletons",
            source,
        })?;
    if rows_deleted + columns_deleted != 0 {
        tracing::info!(
            component = "presolve",
            operation = "free_column_singletons",
            rows_deleted,
            columns_deleted,
            "Deleted free column singletons"
        );
    }
    Ok(rows_deleted + columns_deleted)
}
