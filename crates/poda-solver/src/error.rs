//! Solver and translation error types.

use poda_core::ModelError;

use crate::SolverStatus;

/// Errors raised by the schema translators and by solver backends.
#[derive(Debug)]
pub enum SolverError {
    /// The model has no rows.
    EmptyRows,
    /// The model has no columns.
    EmptyColumns,
    /// The model has no elements.
    EmptyElements,
    /// No objective row is designated.
    MissingObjective,
    /// The schema carried a sense tag the translator does not know.
    UnsupportedSense { row: String, code: char },
    /// The schema carried a column type tag the translator does not know.
    UnsupportedColumnType { column: String, code: char },
    /// A row cannot be expressed in the solver schema.
    UntranslatableRow { row: String },
    /// Building the core model from schema data failed.
    Build { source: ModelError },
    /// The backend finished without a usable solution.
    SolveFailure { status: SolverStatus },
    /// A backend-specific failure not covered by the other variants.
    SolverSpecific(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyRows => "SOLVER_EMPTY_ROWS",
            SolverError::EmptyColumns => "SOLVER_EMPTY_COLUMNS",
            SolverError::EmptyElements => "SOLVER_EMPTY_ELEMENTS",
            SolverError::MissingObjective => "SOLVER_MISSING_OBJECTIVE",
            SolverError::UnsupportedSense { .. } => "UNSUPPORTED_SENSE",
            SolverError::UnsupportedColumnType { .. } => "UNSUPPORTED_COLUMN_TYPE",
            SolverError::UntranslatableRow { .. } => "UNTRANSLATABLE_ROW",
            SolverError::Build { .. } => "MODEL_BUILD_FAILED",
            SolverError::SolveFailure { .. } => "SOLVER_SOLVE_FAILURE",
            SolverError::SolverSpecific(_) => "SOLVER_SPECIFIC",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyRows => write!(f, "[{}] Model has no rows", self.code()),
            SolverError::EmptyColumns => write!(f, "[{}] Model has no columns", self.code()),
            SolverError::EmptyElements => write!(f, "[{}] Model has no elements", self.code()),
            SolverError::MissingObjective => {
                write!(f, "[{}] Model has no objective row", self.code())
            }
            SolverError::UnsupportedSense { row, code } => write!(
                f,
                "[{}] Unexpected sense {:?} in row {}",
                self.code(),
                code,
                row
            ),
            SolverError::UnsupportedColumnType { column, code } => write!(
                f,
                "[{}] Unexpected type {:?} in column {}",
                self.code(),
                code,
                column
            ),
            SolverError::UntranslatableRow { row } => write!(
                f,
                "[{}] Row {} cannot be expressed for the solver",
                self.code(),
                row
            ),
            SolverError::Build { source } => {
                write!(f, "[{}] {}", self.code(), source)
            }
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] Solve failed with status: {}", self.code(), status)
            }
            SolverError::SolverSpecific(message) => {
                write!(f, "[{}] Solver error: {}", self.code(), message)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Build { source } => Some(source),
            _ => None,
        }
    }
}
