//! The cross-indexed sparse model store.
//!
//! This module provides the core [`Model`] type: three parallel lists of
//! rows, columns, and nonzero elements, where every element is referenced
//! from exactly one slot of its row's element list and one slot of its
//! column's element list. All index changes go through the maintenance
//! primitives, which repair the cross-references in place.
//!
//! # Module Organization
//!
//! - [`error`]: store error types
//! - [`maintenance`]: swap-to-end and tagged-deletion primitives
//! - [`eval`]: constraint LHS and violation evaluation
//! - [`inspect`]: statistics snapshots

mod error;
mod eval;
mod inspect;
mod maintenance;

use crate::types::{Bound, ColumnKind, ItemState, RowSense};

pub use error::ModelError;
pub use inspect::ModelStats;

/// A constraint or objective row.
#[derive(Debug, Clone)]
pub struct Row {
    pub name: String,
    pub sense: RowSense,
    pub rhs_lower: Bound,
    pub rhs_upper: Bound,
    pub scale_factor: f64,
    pub state: ItemState,
    /// Global indices of the elements in this row.
    pub elements: Vec<usize>,
}

/// A decision variable.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub lower: Bound,
    pub upper: Bound,
    pub scale_factor: f64,
    pub state: ItemState,
    /// Global indices of the elements in this column.
    pub elements: Vec<usize>,
}

/// A nonzero coefficient, cross-referenced from its row and column.
#[derive(Debug, Clone, Copy)]
pub struct Element {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

/// The sparse model: rows, columns, elements, and the objective row.
///
/// The store exclusively owns its rows, columns, and elements; anything that
/// must outlive a reduction (ledger records, pre-reduction snapshots) is
/// copied out by value, keyed by name rather than index.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub(crate) rows: Vec<Row>,
    pub(crate) columns: Vec<Column>,
    pub(crate) elements: Vec<Element>,
    pub(crate) objective_row: Option<usize>,
}

impl Model {
    /// Create a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            columns: Vec::new(),
            elements: Vec::new(),
            objective_row: None,
        }
    }

    /// Add a row. Returns its index.
    pub fn add_row(
        &mut self,
        name: impl Into<String>,
        sense: RowSense,
        rhs_lower: Bound,
        rhs_upper: Bound,
    ) -> Result<usize, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.find_row(&name).is_some() {
            return Err(ModelError::DuplicateRowName(name));
        }
        check_bounds(&name, rhs_lower, rhs_upper)?;

        let index = self.rows.len();
        self.rows.push(Row {
            name,
            sense,
            rhs_lower,
            rhs_upper,
            scale_factor: 1.0,
            state: ItemState::Active,
            elements: Vec::new(),
        });
        tracing::debug!(
            component = "model",
            operation = "add_row",
            status = "success",
            row = %self.rows[index].name,
            sense = %sense,
            "Added row"
        );
        Ok(index)
    }

    /// Add a column. Returns its index.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        kind: ColumnKind,
        lower: Bound,
        upper: Bound,
    ) -> Result<usize, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.find_column(&name).is_some() {
            return Err(ModelError::DuplicateColumnName(name));
        }
        check_bounds(&name, lower, upper)?;

        let index = self.columns.len();
        self.columns.push(Column {
            name,
            kind,
            lower,
            upper,
            scale_factor: 1.0,
            state: ItemState::Active,
            elements: Vec::new(),
        });
        tracing::debug!(
            component = "model",
            operation = "add_column",
            status = "success",
            column = %self.columns[index].name,
            kind = %kind,
            "Added column"
        );
        Ok(index)
    }

    /// Add a nonzero element at the intersection of a row and a column.
    /// Returns its global index.
    pub fn add_element(
        &mut self,
        row: usize,
        column: usize,
        value: f64,
    ) -> Result<usize, ModelError> {
        if row >= self.rows.len() {
            return Err(self.row_range_error(row));
        }
        if column >= self.columns.len() {
            return Err(self.column_range_error(column));
        }

        let index = self.elements.len();
        self.elements.push(Element { row, column, value });
        self.rows[row].elements.push(index);
        self.columns[column].elements.push(index);
        tracing::trace!(
            component = "model",
            operation = "add_element",
            row,
            column,
            value,
            "Added element"
        );
        Ok(index)
    }

    /// Designate a row as the objective, or clear the designation.
    pub fn set_objective_row(&mut self, index: Option<usize>) -> Result<(), ModelError> {
        if let Some(i) = index {
            if i >= self.rows.len() {
                return Err(self.row_range_error(i));
            }
        }
        self.objective_row = index;
        Ok(())
    }

    /// The objective row index, if one is designated.
    pub fn objective_row(&self) -> Option<usize> {
        self.objective_row
    }

    /// Move the objective row to the front of the row list.
    ///
    /// Reductions and translators expect the objective at index 0, where
    /// swap-to-end deletion can never displace it.
    pub fn promote_objective(&mut self) -> Result<(), ModelError> {
        if let Some(index) = self.objective_row {
            if index != 0 {
                tracing::debug!(
                    component = "model",
                    operation = "promote_objective",
                    row = %self.rows[index].name,
                    from = index,
                    "Moving objective row to front"
                );
                self.swap_rows(0, index)?;
            }
        }
        Ok(())
    }

    /// Set the scale factor of a row.
    pub fn set_row_scale(&mut self, index: usize, scale: f64) -> Result<(), ModelError> {
        if index >= self.rows.len() {
            return Err(self.row_range_error(index));
        }
        self.rows[index].scale_factor = scale;
        Ok(())
    }

    /// Set the scale factor of a column.
    pub fn set_column_scale(&mut self, index: usize, scale: f64) -> Result<(), ModelError> {
        if index >= self.columns.len() {
            return Err(self.column_range_error(index));
        }
        self.columns[index].scale_factor = scale;
        Ok(())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All elements.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Result<&Row, ModelError> {
        self.rows.get(index).ok_or_else(|| self.row_range_error(index))
    }

    /// Get a column by index.
    pub fn column(&self, index: usize) -> Result<&Column, ModelError> {
        self.columns
            .get(index)
            .ok_or_else(|| self.column_range_error(index))
    }

    /// Look up a row index by name.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.name == name)
    }

    /// Look up a column index by name.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Whether any column is integer-restricted.
    pub fn is_mip(&self) -> bool {
        self.columns
            .iter()
            .any(|column| column.kind != ColumnKind::Continuous)
    }

    /// Verify the cross-reference invariants of the store.
    ///
    /// Checks that every element is listed exactly once by its row and its
    /// column, that every list entry points back at its owner, that names are
    /// unique, and that the objective index is valid. Returns a description
    /// of the first violation found.
    pub fn check_integrity(&self) -> Result<(), String> {
        for (i, element) in self.elements.iter().enumerate() {
            let row = self
                .rows
                .get(element.row)
                .ok_or_else(|| format!("element {} references row {} out of range", i, element.row))?;
            let column = self.columns.get(element.column).ok_or_else(|| {
                format!("element {} references column {} out of range", i, element.column)
            })?;
            if row.elements.iter().filter(|&&e| e == i).count() != 1 {
                return Err(format!(
                    "row {} does not list element {} exactly once",
                    row.name, i
                ));
            }
            if column.elements.iter().filter(|&&e| e == i).count() != 1 {
                return Err(format!(
                    "column {} does not list element {} exactly once",
                    column.name, i
                ));
            }
        }
        for (r, row) in self.rows.iter().enumerate() {
            for &e in &row.elements {
                let element = self
                    .elements
                    .get(e)
                    .ok_or_else(|| format!("row {} lists element {} out of range", row.name, e))?;
                if element.row != r {
                    return Err(format!(
                        "row {} lists element {} which belongs to row {}",
                        row.name, e, element.row
                    ));
                }
            }
        }
        for (c, column) in self.columns.iter().enumerate() {
            for &e in &column.elements {
                let element = self.elements.get(e).ok_or_else(|| {
                    format!("column {} lists element {} out of range", column.name, e)
                })?;
                if element.column != c {
                    return Err(format!(
                        "column {} lists element {} which belongs to column {}",
                        column.name, e, element.column
                    ));
                }
            }
        }
        let mut names = std::collections::BTreeSet::new();
        for row in &self.rows {
            if !names.insert(row.name.as_str()) {
                return Err(format!("duplicate row name {}", row.name));
            }
        }
        names.clear();
        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(format!("duplicate column name {}", column.name));
            }
        }
        if let Some(index) = self.objective_row {
            if index >= self.rows.len() {
                return Err(format!("objective row {} out of range", index));
            }
        }
        Ok(())
    }

    pub(crate) fn row_range_error(&self, index: usize) -> ModelError {
        ModelError::IndexOutOfRange {
            entity: "row",
            index,
            len: self.rows.len(),
        }
    }

    pub(crate) fn column_range_error(&self, index: usize) -> ModelError {
        ModelError::IndexOutOfRange {
            entity: "column",
            index,
            len: self.columns.len(),
        }
    }
}

fn check_bounds(name: &str, lower: Bound, upper: Bound) -> Result<(), ModelError> {
    let inverted = matches!(lower, Bound::PosInf)
        || matches!(upper, Bound::NegInf)
        || matches!((lower, upper), (Bound::Finite(lo), Bound::Finite(up)) if lo > up);
    if inverted {
        return Err(ModelError::InvalidBounds {
            name: name.to_string(),
            lower: lower.to_f64(),
            upper: upper.to_f64(),
        });
    }
    Ok(())
}
