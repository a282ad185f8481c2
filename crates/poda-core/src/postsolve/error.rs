//! Post-solve error types.

/// Errors that can occur while lifting a reduced solution back to the
/// original model. All of them are fatal; a partial reconstruction is never
/// returned.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsolveError {
    /// A variable or constraint name expected from the solver (or from an
    /// earlier reconstruction step) is missing from the maps.
    NameNotFound { name: String },
    /// A recorded row is missing the nonzero coefficient of its recorded
    /// column.
    DegenerateCoefficient { row: String, column: String },
}

impl PostsolveError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            PostsolveError::NameNotFound { .. } => "NAME_NOT_FOUND",
            PostsolveError::DegenerateCoefficient { .. } => "DEGENERATE_COEFFICIENT",
        }
    }
}

impl std::fmt::Display for PostsolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostsolveError::NameNotFound { name } => {
                write!(f, "[{}] No solved value for {}", self.code(), name)
            }
            PostsolveError::DegenerateCoefficient { row, column } => write!(
                f,
                "[{}] Recorded row {} has no usable coefficient for column {}",
                self.code(),
                row,
                column
            ),
        }
    }
}

impl std::error::Error for PostsolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_not_found() {
        let err = PostsolveError::NameNotFound {
            name: "x7".to_string(),
        };
        assert!(err.to_string().contains("NAME_NOT_FOUND"));
        assert!(err.to_string().contains("x7"));
    }

    #[test]
    fn test_display_degenerate_coefficient() {
        let err = PostsolveError::DegenerateCoefficient {
            row: "c1".to_string(),
            column: "x".to_string(),
        };
        assert!(err.to_string().contains("DEGENERATE_COEFFICIENT"));
        assert!(err.to_string().contains("c1"));
    }
}
