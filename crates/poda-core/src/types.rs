//! Shared scalar types for the sparse model.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A bound value: finite, or one of the two infinities.
///
/// All bound arithmetic goes through the methods on this type so that finite
/// updates never mix with infinities: shifting an infinite bound is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Negative infinity.
    NegInf,
    /// A finite value.
    Finite(f64),
    /// Positive infinity.
    PosInf,
}

impl Bound {
    /// Whether the bound is finite.
    pub fn is_finite(self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    /// The finite value, if any.
    pub fn finite(self) -> Option<f64> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// The finite value, or `default` when infinite.
    pub fn finite_or(self, default: f64) -> f64 {
        self.finite().unwrap_or(default)
    }

    /// Shift a finite bound by `delta`; infinite bounds are left untouched.
    #[must_use]
    pub fn shifted(self, delta: f64) -> Bound {
        match self {
            Bound::Finite(value) => Bound::Finite(value + delta),
            infinite => infinite,
        }
    }

    /// Convert to a plain `f64`, mapping the infinities to IEEE infinities.
    ///
    /// Only intended for the boundary with external solver schemas.
    pub fn to_f64(self) -> f64 {
        match self {
            Bound::Finite(value) => value,
            Bound::NegInf => f64::NEG_INFINITY,
            Bound::PosInf => f64::INFINITY,
        }
    }

    /// Convert from a plain `f64`, mapping IEEE infinities to the tagged forms.
    pub fn from_f64(value: f64) -> Bound {
        if value == f64::INFINITY {
            Bound::PosInf
        } else if value == f64::NEG_INFINITY {
            Bound::NegInf
        } else {
            Bound::Finite(value)
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Bound::NegInf, Bound::NegInf) => Some(Ordering::Equal),
            (Bound::NegInf, _) => Some(Ordering::Less),
            (_, Bound::NegInf) => Some(Ordering::Greater),
            (Bound::PosInf, Bound::PosInf) => Some(Ordering::Equal),
            (Bound::PosInf, _) => Some(Ordering::Greater),
            (_, Bound::PosInf) => Some(Ordering::Less),
            (Bound::Finite(a), Bound::Finite(b)) => a.partial_cmp(b),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(value) => write!(f, "{}", value),
            Bound::NegInf => write!(f, "-inf"),
            Bound::PosInf => write!(f, "+inf"),
        }
    }
}

/// Sense of a row: constraint relation, range, or non-binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowSense {
    /// `lhs <= rhs_upper`
    LessEqual,
    /// `lhs >= rhs_lower`
    GreaterEqual,
    /// `lhs == rhs_lower == rhs_upper`
    Equal,
    /// `rhs_lower <= lhs <= rhs_upper`
    Range,
    /// No binding relation; the objective row carries this sense.
    NonBinding,
}

impl RowSense {
    /// The single-character code used in ledger output and solver schemas.
    pub fn as_code(self) -> char {
        match self {
            RowSense::LessEqual => 'L',
            RowSense::GreaterEqual => 'G',
            RowSense::Equal => 'E',
            RowSense::Range => 'R',
            RowSense::NonBinding => 'N',
        }
    }
}

impl fmt::Display for RowSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Kind of a column: continuous or integer-restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// A continuous variable.
    Continuous,
    /// An integer variable.
    Integer,
}

impl ColumnKind {
    /// The single-character code used in ledger output and solver schemas.
    pub fn as_code(self) -> char {
        match self {
            ColumnKind::Continuous => 'C',
            ColumnKind::Integer => 'I',
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Lifecycle state of a row or column.
///
/// Items enter `Delete` when a reduction tags them; the tagged-deletion sweep
/// truncates them. `Locked` is reserved; kernels treat it like `Delete` when
/// deciding what to skip, but locked items are never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Active,
    Locked,
    Delete,
}

impl ItemState {
    /// Whether a kernel may consider this item.
    pub fn is_active(self) -> bool {
        matches!(self, ItemState::Active)
    }
}
