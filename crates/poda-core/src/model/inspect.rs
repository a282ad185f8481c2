//! Model statistics snapshots.

use serde::Serialize;

use crate::model::Model;
use crate::types::{ColumnKind, RowSense};

/// Aggregate counts describing the current shape of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub elements: usize,
    pub less_equal_rows: usize,
    pub greater_equal_rows: usize,
    pub equal_rows: usize,
    pub range_rows: usize,
    pub non_binding_rows: usize,
    pub continuous_columns: usize,
    pub integer_columns: usize,
    /// Fraction of the row-by-column grid that is populated.
    pub density: f64,
}

impl Model {
    /// Take a statistics snapshot of the model.
    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            name: self.name.clone(),
            rows: self.rows.len(),
            columns: self.columns.len(),
            elements: self.elements.len(),
            less_equal_rows: 0,
            greater_equal_rows: 0,
            equal_rows: 0,
            range_rows: 0,
            non_binding_rows: 0,
            continuous_columns: 0,
            integer_columns: 0,
            density: 0.0,
        };
        for row in &self.rows {
            match row.sense {
                RowSense::LessEqual => stats.less_equal_rows += 1,
                RowSense::GreaterEqual => stats.greater_equal_rows += 1,
                RowSense::Equal => stats.equal_rows += 1,
                RowSense::Range => stats.range_rows += 1,
                RowSense::NonBinding => stats.non_binding_rows += 1,
            }
        }
        for column in &self.columns {
            match column.kind {
                ColumnKind::Continuous => stats.continuous_columns += 1,
                ColumnKind::Integer => stats.integer_columns += 1,
            }
        }
        let cells = stats.rows * stats.columns;
        if cells > 0 {
            stats.density = stats.elements as f64 / cells as f64;
        }
        stats
    }
}
