//! Iterative model reduction.
//!
//! The driver runs the reduction kernels in a fixed order, sweep after
//! sweep, until a sweep removes nothing or the iteration cap is reached.
//! Kernels mutate the store through the maintenance primitives and append
//! to the reduction ledger as they go.
//!
//! # Module Organization
//!
//! - [`control`]: the [`ReduceControl`] record selecting kernels and paths
//! - [`ledger`]: the append-only [`ReductionLedger`] and its text format
//! - [`tighten`]: activity-based bound tightening
//! - `rule`: the individual reduction kernels

mod control;
mod error;
pub mod ledger;
mod rule;
mod tighten;

use serde::Serialize;

use crate::model::Model;
use crate::presolve::ledger::ReductionLedger;

pub use control::ReduceControl;
pub use error::PresolveError;
pub use tighten::tighten_bounds;

/// What a reduction run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReduceSummary {
    /// Number of sweeps executed.
    pub sweeps: usize,
    /// Total rows and columns removed.
    pub items_removed: usize,
}

/// Run reduction sweeps over the model until a fixed point or the cap.
///
/// Each sweep conditionally applies, in order: bound tightening with
/// non-binding row removal, fixed-variable removal (mandatory once
/// non-binding removal runs, which turns tightened rows into fixed
/// variables), row-singleton removal, and free-column-singleton removal.
/// Empty rows and columns are always cleaned up at the end of a sweep.
///
/// A kernel error aborts the run; reductions from completed sweeps persist
/// in the store and the ledger.
pub fn reduce(
    model: &mut Model,
    ledger: &mut ReductionLedger,
    control: &ReduceControl,
) -> Result<ReduceSummary, PresolveError> {
    control.validate()?;

    let mut summary = ReduceSummary {
        sweeps: 0,
        items_removed: 0,
    };

    for sweep in 1..=control.max_iter {
        summary.sweeps = sweep;
        let mut removed = 0;

        tracing::info!(
            component = "presolve",
            operation = "sweep",
            sweep,
            rows = model.num_rows(),
            columns = model.num_columns(),
            elements = model.num_elements(),
            "Starting reduction sweep"
        );

        if control.del_row_nonbinding {
            tighten_bounds(model, control.max_iter).map_err(|e| sweep_error(sweep, e))?;
            removed += rule::delete_nonbinding_rows(model, ledger)
                .map_err(|e| sweep_error(sweep, e))?;
        }

        if control.del_fixed_vars || control.del_row_nonbinding {
            removed += rule::delete_fixed_variables(model, ledger)
                .map_err(|e| sweep_error(sweep, e))?;
        }

        if control.del_row_singleton {
            removed +=
                rule::delete_row_singletons(model, ledger, control.singleton_inequalities)
                    .map_err(|e| sweep_error(sweep, e))?;
        }

        if control.del_col_singleton {
            removed += rule::delete_free_column_singletons(model, ledger)
                .map_err(|e| sweep_error(sweep, e))?;
        }

        removed += rule::delete_empty_rows(model, ledger).map_err(|e| sweep_error(sweep, e))?;
        removed +=
            rule::delete_empty_columns(model, ledger).map_err(|e| sweep_error(sweep, e))?;

        summary.items_removed += removed;
        if removed == 0 {
            tracing::info!(
                component = "presolve",
                operation = "reduce",
                status = "success",
                sweeps = sweep,
                items_removed = summary.items_removed,
                "Reduction reached a fixed point"
            );
            break;
        }
    }

    Ok(summary)
}

fn sweep_error(sweep: usize, source: PresolveError) -> PresolveError {
    PresolveError::Sweep {
        sweep,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bound, ColumnKind, RowSense};

    fn fixture() -> Model {
        // min x + y subject to 2x = 6 and x + y >= 5.
        let mut model = Model::new("driver");
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

    fn singleton_only() -> ReduceControl {
        ReduceControl {
            del_row_nonbinding: false,
            del_fixed_vars: false,
            del_col_singleton: false,
            ..ReduceControl::default()
        }
    }

    #[test]
    fn test_singleton_sweep_reduces_fixture() {
        let mut model = fixture();
        let mut ledger = ReductionLedger::new();
        let summary = reduce(&mut model, &mut ledger, &singleton_only()).unwrap();

        assert_eq!(summary.items_removed, 2);
        assert!(model.find_row("c1").is_none());
        assert!(model.find_column("x").is_none());
        let c2 = model.find_row("c2").unwrap();
        assert_eq!(model.rows()[c2].rhs_lower, Bound::Finite(2.0));
        assert_eq!(ledger.len(), 1);
        model.check_integrity().unwrap();
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut model = fixture();
        let mut ledger = ReductionLedger::new();
        reduce(&mut model, &mut ledger, &singleton_only()).unwrap();
        let entries = ledger.len();

        let summary = reduce(&mut model, &mut ledger, &singleton_only()).unwrap();
        assert_eq!(summary.items_removed, 0);
        assert_eq!(summary.sweeps, 1);
        assert_eq!(ledger.len(), entries);
    }

    #[test]
    fn test_sweep_stops_at_cap() {
        let mut model = fixture();
        let mut ledger = ReductionLedger::new();
        let control = ReduceControl {
            max_iter: 1,
            ..singleton_only()
        };
        let summary = reduce(&mut model, &mut ledger, &control).unwrap();
        assert_eq!(summary.sweeps, 1);
    }

    #[test]
    fn test_full_control_empties_fixture() {
        let mut model = fixture();
        let mut ledger = ReductionLedger::new();
        let summary = reduce(&mut model, &mut ledger, &ReduceControl::default()).unwrap();

        // Tightening pins x and proves both constraints redundant; they go
        // out as non-binding rows, x goes out as a fixed variable, and y
        // survives through its objective coefficient.
        assert_eq!(summary.items_removed, 3);
        assert_eq!(model.find_row("obj"), model.objective_row());
        assert!(model.find_row("c1").is_none());
        assert!(model.find_row("c2").is_none());
        assert!(model.find_column("x").is_none());
        assert!(model.find_column("y").is_some());
        model.check_integrity().unwrap();

        // Ledger completeness: one record per removal, joint removals once.
        assert_eq!(ledger.len(), summary.items_removed - joint_records(&ledger));
    }

    fn joint_records(ledger: &ReductionLedger) -> usize {
        ledger
            .records()
            .iter()
            .filter(|record| record.row.is_some() && record.column.is_some())
            .count()
    }

    #[test]
    fn test_kernel_error_carries_sweep_context() {
        let mut model = Model::new("t");
        model
            .add_row("bad", RowSense::Equal, Bound::Finite(1.0), Bound::Finite(1.0))
            .unwrap();
        model
            .add_column("x", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
            .unwrap();
        model.add_element(0, 0, 0.0).unwrap();

        let mut ledger = ReductionLedger::new();
        let err = reduce(&mut model, &mut ledger, &singleton_only()).unwrap_err();
        assert_eq!(err.code(), "DEGENERATE_COEFFICIENT");
        assert!(err.to_string().contains("sweep 1"));
    }

    #[test]
    fn test_infeasible_model_aborts() {
        let mut model = Model::new("t");
        model
            .add_row("c", RowSense::LessEqual, Bound::NegInf, Bound::Finite(1.0))
            .unwrap();
        model
            .add_column("x", ColumnKind::Continuous, Bound::Finite(2.0), Bound::Finite(5.0))
            .unwrap();
        model.add_element(0, 0, 1.0).unwrap();

        let mut ledger = ReductionLedger::new();
        let err = reduce(&mut model, &mut ledger, &ReduceControl::default()).unwrap_err();
        assert_eq!(err.code(), "INCONSISTENT_BOUNDS");
    }
}
