//! Reduction control record.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::presolve::PresolveError;

/// Selects which reductions run, caps the sweep count, and names the files
/// the orchestration layer reads and writes.
///
/// The file paths and `run_solver` are consumed by the orchestration layer,
/// not by the driver itself; they are validated here so a misconfigured run
/// fails before any work is done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceControl {
    /// Maximum number of reduction sweeps.
    pub max_iter: usize,
    /// Remove non-binding rows (runs bound tightening first).
    pub del_row_nonbinding: bool,
    /// Remove singleton rows.
    pub del_row_singleton: bool,
    /// Remove free column singletons.
    pub del_col_singleton: bool,
    /// Remove fixed variables.
    pub del_fixed_vars: bool,
    /// Also apply the singleton-row rule to `G`/`L` rows.
    ///
    /// The inequality branches perform only a one-sided bound update and are
    /// off by default.
    pub singleton_inequalities: bool,
    /// Ask the orchestration layer to invoke the external solver afterwards.
    pub run_solver: bool,
    /// MPS input path, if the model is read from file.
    pub mps_input: Option<PathBuf>,
    /// Reduced-model MPS output path.
    pub reduced_mps_output: Option<PathBuf>,
    /// Solver solution output path.
    pub solution_output: Option<PathBuf>,
    /// Reduction-ledger text output path.
    pub ledger_output: Option<PathBuf>,
}

impl Default for ReduceControl {
    fn default() -> Self {
        Self {
            max_iter: 10,
            del_row_nonbinding: true,
            del_row_singleton: true,
            del_col_singleton: true,
            del_fixed_vars: true,
            singleton_inequalities: false,
            run_solver: false,
            mps_input: None,
            reduced_mps_output: None,
            solution_output: None,
            ledger_output: None,
        }
    }
}

impl ReduceControl {
    /// Check that no output path would overwrite the MPS input.
    pub fn validate(&self) -> Result<(), PresolveError> {
        let Some(input) = &self.mps_input else {
            return Ok(());
        };
        let outputs: [(&'static str, &Option<PathBuf>); 3] = [
            ("reduced MPS", &self.reduced_mps_output),
            ("solution", &self.solution_output),
            ("ledger", &self.ledger_output),
        ];
        for (label, output) in outputs {
            if let Some(path) = output {
                if path == input {
                    return Err(PresolveError::FileOverwriteRejected {
                        output: label,
                        path: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_control() {
        let control = ReduceControl::default();
        assert_eq!(control.max_iter, 10);
        assert!(control.del_row_nonbinding);
        assert!(control.del_row_singleton);
        assert!(control.del_col_singleton);
        assert!(control.del_fixed_vars);
        assert!(!control.singleton_inequalities);
        assert!(!control.run_solver);
        assert!(control.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_distinct_paths() {
        let control = ReduceControl {
            mps_input: Some(PathBuf::from("model.mps")),
            reduced_mps_output: Some(PathBuf::from("model-reduced.mps")),
            ledger_output: Some(PathBuf::from("model.psop")),
            ..ReduceControl::default()
        };
        assert!(control.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overwrite() {
        let control = ReduceControl {
            mps_input: Some(PathBuf::from("model.mps")),
            solution_output: Some(PathBuf::from("model.mps")),
            ..ReduceControl::default()
        };
        let err = control.validate().unwrap_err();
        assert_eq!(err.code(), "FILE_OVERWRITE_REJECTED");
    }

    #[test]
    fn test_validate_without_input_is_ok() {
        let control = ReduceControl {
            reduced_mps_output: Some(PathBuf::from("anything")),
            ..ReduceControl::default()
        };
        assert!(control.validate().is_ok());
    }
}
