//! Constraint evaluation against a candidate point.

use crate::model::{Model, ModelError};
use crate::types::{Bound, RowSense};

impl Model {
    /// Evaluate the left-hand side of a row at `point`.
    ///
    /// `point` supplies one value per element of the row, in the row's
    /// element enumeration order. The sum is scaled by the row's scale
    /// factor.
    pub fn calc_lhs(&self, row: usize, point: &[f64]) -> Result<f64, ModelError> {
        let r = self.row(row)?;
        if point.len() != r.elements.len() {
            return Err(ModelError::PointArityMismatch {
                row: r.name.clone(),
                expected: r.elements.len(),
                actual: point.len(),
            });
        }

        let mut lhs = 0.0;
        for (value, &e) in point.iter().zip(&r.elements) {
            lhs += self.elements[e].value * value;
        }
        Ok(lhs * r.scale_factor)
    }

    /// Evaluate how far a row is from being satisfied at `point`.
    ///
    /// `L` and `G` rows report the non-negative overshoot; `E` rows report
    /// the signed deviation from the right-hand side; `R` rows report the
    /// signed distance to the nearer violated endpoint, zero when inside;
    /// `N` rows are never violated.
    pub fn calc_violation(&self, row: usize, point: &[f64]) -> Result<f64, ModelError> {
        let lhs = self.calc_lhs(row, point)?;
        let r = &self.rows[row];

        let violation = match r.sense {
            RowSense::LessEqual => match r.rhs_upper {
                Bound::Finite(up) => (lhs - up).max(0.0),
                _ => 0.0,
            },
            RowSense::GreaterEqual => match r.rhs_lower {
                Bound::Finite(lo) => (lo - lhs).max(0.0),
                _ => 0.0,
            },
            RowSense::Equal => lhs - r.rhs_lower.finite_or(0.0),
            RowSense::Range => match (r.rhs_lower, r.rhs_upper) {
                (Bound::Finite(lo), _) if lhs < lo => lhs - lo,
                (_, Bound::Finite(up)) if lhs > up => lhs - up,
                _ => 0.0,
            },
            RowSense::NonBinding => 0.0,
        };
        Ok(violation)
    }
}
