//! Model error types.

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// An index into the row, column, or element list is out of range.
    IndexOutOfRange {
        entity: &'static str,
        index: usize,
        len: usize,
    },
    /// A row with this name already exists.
    DuplicateRowName(String),
    /// A column with this name already exists.
    DuplicateColumnName(String),
    /// Row and column names must be non-empty.
    EmptyName,
    /// Lower bound above upper bound, or an inverted infinity.
    InvalidBounds { name: String, lower: f64, upper: f64 },
    /// An evaluation point does not match the row's element count.
    PointArityMismatch {
        row: String,
        expected: usize,
        actual: usize,
    },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            ModelError::DuplicateRowName(_) => "ROW_DUPLICATE_NAME",
            ModelError::DuplicateColumnName(_) => "COLUMN_DUPLICATE_NAME",
            ModelError::EmptyName => "EMPTY_NAME",
            ModelError::InvalidBounds { .. } => "INVALID_BOUNDS",
            ModelError::PointArityMismatch { .. } => "POINT_ARITY_MISMATCH",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::IndexOutOfRange { entity, index, len } => write!(
                f,
                "[{}] {} index {} out of range (len {})",
                self.code(),
                entity,
                index,
                len
            ),
            ModelError::DuplicateRowName(name) => {
                write!(f, "[{}] Row name {:?} already in use", self.code(), name)
            }
            ModelError::DuplicateColumnName(name) => {
                write!(f, "[{}] Column name {:?} already in use", self.code(), name)
            }
            ModelError::EmptyName => {
                write!(f, "[{}] Row and column names must be non-empty", self.code())
            }
            ModelError::InvalidBounds { name, lower, upper } => write!(
                f,
                "[{}] Bounds of {} invalid: lower ({}) > upper ({})",
                self.code(),
                name,
                lower,
                upper
            ),
            ModelError::PointArityMismatch {
                row,
                expected,
                actual,
            } => write!(
                f,
                "[{}] Point for row {} has {} values, expected {}",
                self.code(),
                row,
                actual,
                expected
            ),
        }
    }
}

impl std::error::Error for ModelError {}
