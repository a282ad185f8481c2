//! Name-keyed solver results and their conversion into solution maps.

use std::collections::BTreeMap;

use poda_core::{
    ConstraintResult, PostsolveError, RowSense, SolutionMaps, VariableResult,
    STATUS_NOT_AVAILABLE,
};

use crate::SolverStatus;

/// Per-row results from a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedRow {
    pub name: String,
    pub slack: f64,
    pub pi: f64,
    pub dual: f64,
}

/// Per-column results from a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedColumn {
    pub name: String,
    pub value: f64,
    pub reduced_cost: f64,
}

/// Everything a backend reports about a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub objective_value: f64,
    pub status: SolverStatus,
    pub rows: Vec<SolvedRow>,
    pub columns: Vec<SolvedColumn>,
}

impl SolverOutcome {
    /// Merge these results into the name-keyed maps post-solve consumes.
    ///
    /// `column_scales` supplies the original-model scale factor for every
    /// solved column; a column the session never saw is a ledger/solver
    /// mismatch. Constraint senses and right-hand sides are placeholders
    /// here; the session's restore pass overwrites them from its
    /// pre-reduction captures.
    pub fn into_solution_maps(
        self,
        column_scales: &BTreeMap<String, f64>,
    ) -> Result<SolutionMaps, PostsolveError> {
        let mut maps = SolutionMaps::default();

        for column in self.columns {
            let scale = column_scales
                .get(&column.name)
                .copied()
                .ok_or_else(|| PostsolveError::NameNotFound {
                    name: column.name.clone(),
                })?;
            maps.variables.insert(
                column.name,
                VariableResult {
                    status: STATUS_NOT_AVAILABLE.to_string(),
                    value: column.value,
                    scale_factor: scale,
                    reduced_cost: column.reduced_cost,
                },
            );
        }

        for row in self.rows {
            maps.constraints.insert(
                row.name,
                ConstraintResult {
                    status: STATUS_NOT_AVAILABLE.to_string(),
                    sense: RowSense::NonBinding,
                    rhs: 0.0,
                    scale_factor: 1.0,
                    pi: row.pi,
                    slack: row.slack,
                    dual: row.dual,
                },
            );
        }

        Ok(maps)
    }
}
