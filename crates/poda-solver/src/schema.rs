//! The array-shaped model schema solver backends consume.
//!
//! Tags are single characters, the way solver C APIs spell them; the
//! translators in this crate are the only place the core's closed enums
//! meet these free-form codes. The objective is carried separately from the
//! constraint rows, as backends expect.

/// A constraint row in solver form.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverRow {
    pub name: String,
    /// `L`, `G`, `E`, or `R`.
    pub sense: char,
    pub rhs: f64,
    /// Width of an `R` row's interval above `rhs`; zero otherwise.
    pub range: f64,
}

/// A column in solver form. Infinite bounds are IEEE infinities.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverColumn {
    pub name: String,
    /// `C` continuous, `I` integer, `B` binary, `S` semi-continuous.
    pub kind: char,
    pub lower: f64,
    pub upper: f64,
}

/// A nonzero coefficient in solver form, indexing into the schema's own
/// row and column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverElement {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

/// A nonzero objective coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveCoefficient {
    pub column: usize,
    pub value: f64,
}

/// The complete solver-facing model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverModel {
    pub name: String,
    pub rows: Vec<SolverRow>,
    pub columns: Vec<SolverColumn>,
    pub elements: Vec<SolverElement>,
    pub objective: Vec<ObjectiveCoefficient>,
}
