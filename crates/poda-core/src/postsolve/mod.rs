//! Lifting a reduced-problem solution back onto the original model.
//!
//! The engine walks the reduction ledger in reverse, reconstructing the
//! variables and constraints each reduction removed. Values the external
//! solver cannot have produced (slacks, duals, reduced costs of removed
//! entities) are reported as zero with status [`STATUS_NOT_AVAILABLE`].

mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::presolve::ledger::{RecordedColumn, RecordedRow, ReductionKind, ReductionLedger};
use crate::types::{Bound, RowSense};

pub use error::PostsolveError;

/// Status tag for values no solver produced.
pub const STATUS_NOT_AVAILABLE: &str = "NA";

/// Per-constraint solution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintResult {
    /// Reserved; currently always [`STATUS_NOT_AVAILABLE`].
    pub status: String,
    pub sense: RowSense,
    pub rhs: f64,
    pub scale_factor: f64,
    pub pi: f64,
    pub slack: f64,
    pub dual: f64,
}

/// Per-variable solution record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableResult {
    /// Reserved; currently always [`STATUS_NOT_AVAILABLE`].
    pub status: String,
    pub value: f64,
    pub scale_factor: f64,
    pub reduced_cost: f64,
}

/// Name-keyed constraint and variable results, as merged from the solver
/// and the reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionMaps {
    pub constraints: BTreeMap<String, ConstraintResult>,
    pub variables: BTreeMap<String, VariableResult>,
}

impl SolutionMaps {
    /// Insert a solved variable value with no solver-provided extras.
    pub fn insert_variable(&mut self, name: &str, value: f64, scale_factor: f64) {
        self.variables.insert(
            name.to_string(),
            VariableResult {
                status: STATUS_NOT_AVAILABLE.to_string(),
                value,
                scale_factor,
                reduced_cost: 0.0,
            },
        );
    }
}

/// The complete original-problem solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoredSolution {
    pub objective_value: f64,
    pub constraints: BTreeMap<String, ConstraintResult>,
    pub variables: BTreeMap<String, VariableResult>,
    pub rows_removed: usize,
    pub columns_removed: usize,
    pub elements_removed: usize,
}

/// Rewind the ledger, filling `maps` with the entities each reduction
/// removed.
///
/// Walks last-in-first-out so that a variable solved by a later reduction
/// is available to the rows an earlier reduction recorded.
pub fn postsolve(ledger: &ReductionLedger, maps: &mut SolutionMaps) -> Result<(), PostsolveError> {
    for record in ledger.records().iter().rev() {
        match record.kind {
            ReductionKind::NonBindingRow | ReductionKind::EmptyRow => {
                // Retained for reporting only; the original-row restore pass
                // reinstates the constraint record.
            }

            ReductionKind::EmptyColumn => {
                let Some(column) = record.column.as_ref() else {
                    continue;
                };
                maps.insert_variable(&column.name, feasible_default(column), column.scale_factor);
            }

            ReductionKind::FixedVariable => {
                let Some(column) = record.column.as_ref() else {
                    continue;
                };
                maps.insert_variable(
                    &column.name,
                    column.lower.finite_or(0.0),
                    column.scale_factor,
                );
            }

            ReductionKind::FreeColumnSingleton => {
                let (Some(row), Some(column)) = (record.row.as_ref(), record.column.as_ref())
                else {
                    continue;
                };
                let mut coef = 0.0;
                let mut partial = 0.0;
                for entry in &row.coefficients {
                    if entry.column == column.name {
                        coef = entry.value;
                    } else {
                        let solved = maps.variables.get(&entry.column).ok_or_else(|| {
                            PostsolveError::NameNotFound {
                                name: entry.column.clone(),
                            }
                        })?;
                        partial += solved.value * entry.value;
                    }
                }
                if coef == 0.0 {
                    return Err(PostsolveError::DegenerateCoefficient {
                        row: row.name.clone(),
                        column: column.name.clone(),
                    });
                }
                maps.insert_variable(&column.name, (row.rhs - partial) / coef, column.scale_factor);
                insert_reconstructed_row(maps, row);
            }

            ReductionKind::RowSingleton => {
                let (Some(row), Some(column)) = (record.row.as_ref(), record.column.as_ref())
                else {
                    continue;
                };
                let coef = row
                    .coefficients
                    .iter()
                    .find(|entry| entry.column == column.name)
                    .map(|entry| entry.value)
                    .unwrap_or(0.0);
                if coef == 0.0 {
                    return Err(PostsolveError::DegenerateCoefficient {
                        row: row.name.clone(),
                        column: column.name.clone(),
                    });
                }
                maps.insert_variable(&column.name, row.rhs / coef, column.scale_factor);
                insert_reconstructed_row(maps, row);
            }
        }
    }

    tracing::debug!(
        component = "postsolve",
        operation = "rewind",
        status = "success",
        records = ledger.len(),
        variables = maps.variables.len(),
        constraints = maps.constraints.len(),
        "Rewound reduction ledger"
    );
    Ok(())
}

/// A value inside the recorded bounds, zero whenever zero is feasible.
fn feasible_default(column: &RecordedColumn) -> f64 {
    match (column.lower, column.upper) {
        (Bound::Finite(lower), _) if lower > 0.0 => lower,
        (_, Bound::Finite(upper)) if upper < 0.0 => upper,
        _ => 0.0,
    }
}

fn insert_reconstructed_row(maps: &mut SolutionMaps, row: &RecordedRow) {
    maps.constraints.insert(
        row.name.clone(),
        ConstraintResult {
            status: STATUS_NOT_AVAILABLE.to_string(),
            sense: row.sense,
            rhs: row.rhs,
            scale_factor: row.scale_factor,
            pi: 0.0,
            slack: 0.0,
            dual: 0.0,
        },
    );
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::presolve::ledger::ReductionLedger;
    use crate::types::{Bound, ColumnKind, RowSense};

    fn ledger_with(f: impl FnOnce(&mut Model, &mut ReductionLedger)) -> ReductionLedger {
        let mut model = Model::new("t");
        let mut ledger = ReductionLedger::new();
        f(&mut model, &mut ledger);
        ledger
    }

    #[test]
    fn test_fixed_variable_restored_at_bound() {
        let ledger = ledger_with(|model, ledger| {
            model
                .add_column("z", ColumnKind::Continuous, Bound::Finite(4.0), Bound::Finite(4.0))
                .unwrap();
            ledger.record(ReductionKind::FixedVariable, model, None, Some(0));
        });

        let mut maps = SolutionMaps::default();
        postsolve(&ledger, &mut maps).unwrap();
        let z = &maps.variables["z"];
        assert_eq!(z.value, 4.0);
        assert_eq!(z.reduced_cost, 0.0);
        assert_eq!(z.status, STATUS_NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_column_restored_inside_bounds() {
        let ledger = ledger_with(|model, ledger| {
            model
                .add_column("a", ColumnKind::Continuous, Bound::Finite(2.0), Bound::Finite(9.0))
                .unwrap();
            model
                .add_column("b", ColumnKind::Continuous, Bound::NegInf, Bound::Finite(-1.0))
                .unwrap();
            model
                .add_column("c", ColumnKind::Continuous, Bound::Finite(-3.0), Bound::PosInf)
                .unwrap();
            ledger.record(ReductionKind::EmptyColumn, model, None, Some(0));
            ledger.record(ReductionKind::EmptyColumn, model, None, Some(1));
            ledger.record(ReductionKind::EmptyColumn, model, None, Some(2));
        });

        let mut maps = SolutionMaps::default();
        postsolve(&ledger, &mut maps).unwrap();
        assert_eq!(maps.variables["a"].value, 2.0);
        assert_eq!(maps.variables["b"].value, -1.0);
        assert_eq!(maps.variables["c"].value, 0.0);
    }

    #[test]
    fn test_row_singleton_solved_from_record() {
        let ledger = ledger_with(|model, ledger| {
            let r = model
                .add_row("c1", RowSense::Equal, Bound::Finite(6.0), Bound::Finite(6.0))
                .unwrap();
            let x = model
                .add_column("x", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
                .unwrap();
            model.add_element(r, x, 2.0).unwrap();
            ledger.record(ReductionKind::RowSingleton, model, Some(r), Some(x));
        });

        let mut maps = SolutionMaps::default();
        postsolve(&ledger, &mut maps).unwrap();
        assert_eq!(maps.variables["x"].value, 3.0);
        let c1 = &maps.constraints["c1"];
        assert_eq!(c1.slack, 0.0);
        assert_eq!(c1.dual, 0.0);
        assert_eq!(c1.sense, RowSense::Equal);
    }

    #[test]
    fn test_row_singleton_missing_coefficient_is_fatal() {
        let ledger = ledger_with(|model, ledger| {
            let r = model
                .add_row("c1", RowSense::Equal, Bound::Finite(6.0), Bound::Finite(6.0))
                .unwrap();
            model
                .add_column("x", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
                .unwrap();
            // The recorded row has no elements, so the column's coefficient
            // cannot be found.
            ledger.record(ReductionKind::RowSingleton, model, Some(r), Some(0));
        });

        let mut maps = SolutionMaps::default();
        let err = postsolve(&ledger, &mut maps).unwrap_err();
        assert_eq!(err.code(), "DEGENERATE_COEFFICIENT");
    }

    #[test]
    fn test_free_column_uses_other_solved_values() {
        let ledger = ledger_with(|model, ledger| {
            let r = model
                .add_row("c1", RowSense::Equal, Bound::Finite(7.0), Bound::Finite(7.0))
                .unwrap();
            let x = model
                .add_column("x", ColumnKind::Continuous, Bound::NegInf, Bound::PosInf)
                .unwrap();
            let y = model
                .add_column("y", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
                .unwrap();
            model.add_element(r, x, 1.0).unwrap();
            model.add_element(r, y, 1.0).unwrap();
            ledger.record(ReductionKind::FreeColumnSingleton, model, Some(r), Some(x));
        });

        let mut maps = SolutionMaps::default();
        maps.insert_variable("y", 2.0, 1.0);
        postsolve(&ledger, &mut maps).unwrap();
        assert_eq!(maps.variables["x"].value, 5.0);
        assert!(maps.constraints.contains_key("c1"));
    }

    #[test]
    fn test_free_column_missing_sibling_is_fatal() {
        let ledger = ledger_with(|model, ledger| {
            let r = model
                .add_row("c1", RowSense::Equal, Bound::Finite(7.0), Bound::Finite(7.0))
                .unwrap();
            let x = model
                .add_column("x", ColumnKind::Continuous, Bound::NegInf, Bound::PosInf)
                .unwrap();
            let y = model
                .add_column("y", ColumnKind::Continuous, Bound::Finite(0.0), Bound::PosInf)
                .unwrap();
            model.add_element(r, x, 1.0).unwrap();
            model.add_element(r, y, 1.0).unwrap();
            ledger.record(ReductionKind::FreeColumnSingleton, model, Some(r), Some(x));
        });

        let mut maps = SolutionMaps::default();
        let err = postsolve(&ledger, &mut maps).unwrap_err();
        assert_eq!(err.code(), "NAME_NOT_FOUND");
    }

    #[test]
    fn test_reverse_order_resolves_dependencies() {
        // First reduction removes c1 (x + w = 7) as a free singleton on x;
        // a later reduction fixes w. The reverse walk must solve w before x.
        let ledger = ledger_with(|model, ledger| {
            let r = model
                .add_row("c1", RowSense::Equal, Bound::Finite(7.0), Bound::Finite(7.0))
                .unwrap();
            let x = model
                .add_column("x", ColumnKind::Continuous, Bound::NegInf, Bound::PosInf)
                .unwrap();
            let w = model
                .add_column("w", ColumnKind::Continuous, Bound::Finite(3.0), Bound::Finite(3.0))
                .unwrap();
            model.add_element(r, x, 1.0).unwrap();
            model.add_element(r, w, 2.0).unwrap();
            ledger.record(ReductionKind::FreeColumnSingleton, model, Some(r), Some(x));
            ledger.record(ReductionKind::FixedVariable, model, None, Some(w));
        });

        let mut maps = SolutionMaps::default();
        postsolve(&ledger, &mut maps).unwrap();
        assert_eq!(maps.variables["w"].value, 3.0);
        assert_eq!(maps.variables["x"].value, 7.0 - 2.0 * 3.0);
    }

    #[test]
    fn test_reporting_only_records_touch_nothing() {
        let ledger = ledger_with(|model, ledger| {
            model
                .add_row("n", RowSense::NonBinding, Bound::Finite(0.0), Bound::Finite(0.0))
                .unwrap();
            ledger.record(ReductionKind::NonBindingRow, model, Some(0), None);
            ledger.record(ReductionKind::EmptyRow, model, Some(0), None);
        });

        let mut maps = SolutionMaps::default();
        postsolve(&ledger, &mut maps).unwrap();
        assert!(maps.constraints.is_empty());
        assert!(maps.variables.is_empty());
    }
}
