//! Solver status types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a backend's solve ended.
///
/// Post-solve only distinguishes "there are values to lift" from "there are
/// not", so limit-style terminations collapse into [`SolverStatus::Feasible`]
/// when the backend kept an incumbent and [`SolverStatus::Aborted`] when it
/// did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Proven optimal.
    Optimal,
    /// Stopped at a limit holding an incumbent solution.
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// Proven unbounded.
    Unbounded,
    /// Stopped without anything usable.
    Aborted,
}

impl SolverStatus {
    /// Whether the backend proved optimality.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Whether the backend produced values worth lifting back.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Aborted => "aborted",
        })
    }
}
