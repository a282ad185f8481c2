//! Presolve error types.

use std::path::PathBuf;

use crate::model::ModelError;

/// Errors that can occur while reducing a model.
#[derive(Debug)]
pub enum PresolveError {
    /// Bound tightening proved the model infeasible.
    InconsistentBounds { entity: &'static str, name: String },
    /// A kernel found a zero coefficient where a nonzero was required.
    DegenerateCoefficient { row: String, column: String },
    /// An output path would overwrite the MPS input file.
    FileOverwriteRejected { output: &'static str, path: PathBuf },
    /// A maintenance primitive failed inside a kernel.
    Store {
        kernel: &'static str,
        source: ModelError,
    },
    /// A kernel failed during the given sweep.
    Sweep {
        sweep: usize,
        source: Box<PresolveError>,
    },
}

impl PresolveError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            PresolveError::InconsistentBounds { .. } => "INCONSISTENT_BOUNDS",
            PresolveError::DegenerateCoefficient { .. } => "DEGENERATE_COEFFICIENT",
            PresolveError::FileOverwriteRejected { .. } => "FILE_OVERWRITE_REJECTED",
            PresolveError::Store { .. } => "STORE_ERROR",
            PresolveError::Sweep { source, .. } => source.code(),
        }
    }
}

impl std::fmt::Display for PresolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresolveError::InconsistentBounds { entity, name } => write!(
                f,
                "[{}] Bound tightening proved infeasibility at {} {}",
                self.code(),
                entity,
                name
            ),
            PresolveError::DegenerateCoefficient { row, column } => write!(
                f,
                "[{}] Unexpected zero coefficient at row {}, column {}",
                self.code(),
                row,
                column
            ),
            PresolveError::FileOverwriteRejected { output, path } => write!(
                f,
                "[{}] {} output would overwrite the MPS input {}",
                self.code(),
                output,
                path.display()
            ),
            PresolveError::Store { kernel, source } => {
                write!(f, "[{}] Kernel {} failed: {}", self.code(), kernel, source)
            }
            PresolveError::Sweep { sweep, source } => {
                write!(f, "sweep {}: {}", sweep, source)
            }
        }
    }
}

impl std::error::Error for PresolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresolveError::Store { source, .. } => Some(source),
            PresolveError::Sweep { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_inconsistent_bounds() {
        let err = PresolveError::InconsistentBounds {
            entity: "row",
            name: "cap".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("INCONSISTENT_BOUNDS"));
        assert!(msg.contains("row cap"));
    }

    #[test]
    fn test_display_degenerate_coefficient() {
        let err = PresolveError::DegenerateCoefficient {
            row: "c1".to_string(),
            column: "x".to_string(),
        };
        assert!(err.to_string().contains("DEGENERATE_COEFFICIENT"));
        assert!(err.to_string().contains("row c1"));
    }

    #[test]
    fn test_display_file_overwrite() {
        let err = PresolveError::FileOverwriteRejected {
            output: "ledger",
            path: PathBuf::from("model.mps"),
        };
        assert!(err.to_string().contains("FILE_OVERWRITE_REJECTED"));
        assert!(err.to_string().contains("model.mps"));
    }

    #[test]
    fn test_sweep_wraps_and_keeps_code() {
        let inner = PresolveError::DegenerateCoefficient {
            row: "c1".to_string(),
            column: "x".to_string(),
        };
        let err = PresolveError::Sweep {
            sweep: 3,
            source: Box::new(inner),
        };
        assert_eq!(err.code(), "DEGENERATE_COEFFICIENT");
        assert!(err.to_string().starts_with("sweep 3:"));
        assert!(err.source().is_some());
    }
}
