//! The append-only reduction ledger and its text serialization.
//!
//! Every kernel that removes a row or column appends one record holding
//! copies of what it removed. Coefficient lists reference columns by name,
//! because live indices shift as the store shrinks. The ledger is consumed
//! last-in-first-out during post-solve, and can be written out as a
//! line-oriented text report.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::Model;
use crate::types::{Bound, ColumnKind, RowSense};

/// Kind of reduction a ledger record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReductionKind {
    FreeColumnSingleton,
    FixedVariable,
    RowSingleton,
    NonBindingRow,
    EmptyRow,
    EmptyColumn,
}

impl ReductionKind {
    /// Three-letter tag used in the ledger text format.
    pub fn tag(self) -> &'static str {
        match self {
            ReductionKind::FreeColumnSingleton => "FCS",
            ReductionKind::FixedVariable => "FXV",
            ReductionKind::RowSingleton => "RSG",
            ReductionKind::NonBindingRow => "NBR",
            ReductionKind::EmptyRow => "MTR",
            ReductionKind::EmptyColumn => "MTC",
        }
    }

    /// Human-readable operation name.
    pub fn label(self) -> &'static str {
        match self {
            ReductionKind::FreeColumnSingleton => "Free Column Singleton",
            ReductionKind::FixedVariable => "Fixed Variable",
            ReductionKind::RowSingleton => "Row Singleton",
            ReductionKind::NonBindingRow => "Non-binding Row",
            ReductionKind::EmptyRow => "Empty Row",
            ReductionKind::EmptyColumn => "Empty Column",
        }
    }
}

/// One coefficient of a recorded row, keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCoefficient {
    pub column: String,
    pub value: f64,
}

/// Copy of a removed (or about-to-be-removed) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedRow {
    pub name: String,
    pub sense: RowSense,
    pub rhs: f64,
    pub scale_factor: f64,
    pub coefficients: Vec<RecordedCoefficient>,
}

impl RecordedRow {
    /// Copy the row at `index` out of the store, resolving element indices
    /// to column names.
    pub(crate) fn capture(model: &Model, index: usize) -> Self {
        let row = &model.rows[index];
        let rhs = match row.sense {
            RowSense::LessEqual => row.rhs_upper.finite_or(0.0),
            _ => row.rhs_lower.finite_or(0.0),
        };
        let coefficients = row
            .elements
            .iter()
            .map(|&e| {
                let element = &model.elements[e];
                RecordedCoefficient {
                    column: model.columns[element.column].name.clone(),
                    value: element.value,
                }
            })
            .collect();
        Self {
            name: row.name.clone(),
            sense: row.sense,
            rhs,
            scale_factor: row.scale_factor,
            coefficients,
        }
    }
}

/// Copy of a removed column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedColumn {
    pub name: String,
    pub kind: ColumnKind,
    pub lower: Bound,
    pub upper: Bound,
    pub scale_factor: f64,
}

impl RecordedColumn {
    pub(crate) fn capture(model: &Model, index: usize) -> Self {
        let column = &model.columns[index];
        Self {
            name: column.name.clone(),
            kind: column.kind,
            lower: column.lower,
            upper: column.upper,
            scale_factor: column.scale_factor,
        }
    }
}

/// One reduction: the kind tag plus copies of what was removed.
#[derive(Debug, Clone, Serialize)]
pub struct ReductionRecord {
    pub kind: ReductionKind,
    pub row: Option<RecordedRow>,
    pub column: Option<RecordedColumn>,
}

/// Append-only log of reductions, rewound in reverse during post-solve.
#[derive(Debug, Clone, Default)]
pub struct ReductionLedger {
    records: Vec<ReductionRecord>,
}

impl ReductionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[ReductionRecord] {
        &self.records
    }

    /// Capture the given row and/or column and append a record.
    pub(crate) fn record(
        &mut self,
        kind: ReductionKind,
        model: &Model,
        row: Option<usize>,
        column: Option<usize>,
    ) {
        self.records.push(ReductionRecord {
            kind,
            row: row.map(|index| RecordedRow::capture(model, index)),
            column: column.map(|index| RecordedColumn::capture(model, index)),
        });
    }

    /// Write the ledger as a line-oriented text report.
    ///
    /// `coef_per_line` controls the coefficient name/value pairs of each
    /// recorded row: negative writes all pairs on one line, zero omits them,
    /// and a positive `n` wraps after every `n` pairs.
    pub fn write_text(
        &self,
        problem: &str,
        coef_per_line: i32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let print_pairs = coef_per_line != 0;
        let wrap = usize::try_from(coef_per_line).ok().filter(|&n| n > 0);
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        out.write_all(RULE.as_bytes())?;
        writeln!(out, "# poda record of pre-solve operations")?;
        writeln!(out, "# Problem name: {}", problem)?;
        writeln!(out, "# Created at:   {} (unix seconds)", created)?;
        writeln!(out, "#")?;
        writeln!(
            out,
            "# Col format:   COL:  Name  Type  LowerBound  UpperBound  ScaleFactor"
        )?;
        writeln!(out, "# Row format:   ROW:  Name  Type  Rhs  ScaleFactor")?;
        if print_pairs {
            writeln!(
                out,
                "# Followed by:  CoefName CoefValue (up to {} pairs/line)",
                coef_per_line.unsigned_abs()
            )?;
        } else {
            writeln!(out, "# Coefficient name/value pairs for rows are not printed.")?;
        }
        writeln!(out, "#")?;

        for (sequence, record) in self.records.iter().enumerate() {
            out.write_all(RULE.as_bytes())?;
            writeln!(out, "# {}", record.kind.label())?;
            writeln!(out, "PSOP: {} {:5}", record.kind.tag(), sequence)?;

            if let Some(column) = &record.column {
                writeln!(
                    out,
                    "COL:  {}   {} {} {} {}",
                    column.name,
                    column.kind,
                    sci_bound(column.lower),
                    sci_bound(column.upper),
                    sci(column.scale_factor)
                )?;
            }

            if let Some(row) = &record.row {
                writeln!(
                    out,
                    "ROW:  {}   {} {} {}",
                    row.name,
                    row.sense,
                    sci(row.rhs),
                    sci(row.scale_factor)
                )?;
                if print_pairs && !row.coefficients.is_empty() {
                    for (index, coef) in row.coefficients.iter().enumerate() {
                        write!(out, "{:>15} {}", coef.column, sci(coef.value))?;
                        if let Some(n) = wrap {
                            if (index + 1) % n == 0 {
                                writeln!(out)?;
                            }
                        }
                    }
                    match wrap {
                        Some(n) if row.coefficients.len() % n == 0 => {}
                        _ => writeln!(out)?,
                    }
                }
            }
        }

        tracing::info!(
            component = "presolve",
            operation = "write_ledger",
            status = "success",
            records = self.records.len(),
            "Wrote reduction ledger"
        );
        Ok(())
    }

    /// Write the text report to a file, replacing any existing content.
    pub fn write_to_path(
        &self,
        problem: &str,
        coef_per_line: i32,
        path: &Path,
    ) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_text(problem, coef_per_line, &mut out)?;
        out.flush()
    }
}

const RULE: &str =
    "#------------------------------------------------------------------------------\n";

fn sci(value: f64) -> String {
    format!("{:>15}", format!("{:.6e}", value))
}

fn sci_bound(bound: Bound) -> String {
    match bound {
        Bound::Finite(value) => sci(value),
        Bound::NegInf => format!("{:>15}", "-inf"),
        Bound::PosInf => format!("{:>15}", "+inf"),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::types::{Bound, ColumnKind, RowSense};

    fn fixture() -> (Model, ReductionLedger) {
        let mut model = Model::new("fixture");
        let r = model
            .add_row("cap", RowSense::LessEqual, Bound::NegInf, Bound::Finite(8.0))
            .unwrap();
        let x = model
            .add_column("x", ColumnKind::Continuous, Bound::Finite(0.0), Bound::Finite(2.0))
            .unwrap();
        let y = model
            .add_column("y", ColumnKind::Integer, Bound::Finite(0.0), Bound::PosInf)
            .unwrap();
        model.add_element(r, x, 3.0).unwrap();
        model.add_element(r, y, -1.0).unwrap();
        (model, ReductionLedger::new())
    }

    #[test]
    fn test_record_captures_by_name() {
        let (model, mut ledger) = fixture();
        ledger.record(ReductionKind::RowSingleton, &model, Some(0), Some(0));
        assert_eq!(ledger.len(), 1);
        let record = &ledger.records()[0];
        let row = record.row.as_ref().unwrap();
        assert_eq!(row.name, "cap");
        assert_eq!(row.rhs, 8.0);
        assert_eq!(row.coefficients.len(), 2);
        assert_eq!(row.coefficients[0].column, "x");
        assert_eq!(row.coefficients[1].column, "y");
        assert_eq!(row.coefficients[1].value, -1.0);
        let column = record.column.as_ref().unwrap();
        assert_eq!(column.name, "x");
        assert_eq!(column.upper, Bound::Finite(2.0));
    }

    #[test]
    fn test_rhs_side_follows_sense() {
        let mut model = Model::new("t");
        model
            .add_row("ge", RowSense::GreaterEqual, Bound::Finite(3.0), Bound::PosInf)
            .unwrap();
        model
            .add_row("le", RowSense::LessEqual, Bound::NegInf, Bound::Finite(7.0))
            .unwrap();
        assert_eq!(RecordedRow::capture(&model, 0).rhs, 3.0);
        assert_eq!(RecordedRow::capture(&model, 1).rhs, 7.0);
    }

    #[test]
    fn test_text_report_layout() {
        let (model, mut ledger) = fixture();
        ledger.record(ReductionKind::NonBindingRow, &model, Some(0), None);
        ledger.record(ReductionKind::EmptyColumn, &model, None, Some(1));

        let mut out = Vec::new();
        ledger.write_text("fixture", 2, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("# Problem name: fixture"));
        assert!(text.contains("# Non-binding Row"));
        assert!(text.contains("PSOP: NBR     0"));
        assert!(text.contains("PSOP: MTC     1"));
        assert!(text.contains("ROW:  cap   L"));
        assert!(text.contains("COL:  y   I"));
        assert!(text.contains("+inf"));
        // Two pairs per line puts both coefficients on one wrapped line.
        let coef_line = text
            .lines()
            .find(|line| line.contains("x ") && line.contains("y "))
            .expect("coefficient line");
        assert!(coef_line.contains("3.000000e0"));
    }

    #[test]
    fn test_text_report_suppresses_pairs() {
        let (model, mut ledger) = fixture();
        ledger.record(ReductionKind::NonBindingRow, &model, Some(0), None);

        let mut out = Vec::new();
        ledger.write_text("fixture", 0, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("pairs for rows are not printed"));
        assert!(!text.lines().any(|line| line.trim_start().starts_with('x')));
    }

    #[test]
    fn test_text_report_single_line_pairs() {
        let (model, mut ledger) = fixture();
        ledger.record(ReductionKind::RowSingleton, &model, Some(0), Some(0));

        let mut out = Vec::new();
        ledger.write_text("fixture", -1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let coef_lines: Vec<&str> = text
            .lines()
            .filter(|line| line.contains("3.000000e0") && line.contains("-1.000000e0"))
            .collect();
        assert_eq!(coef_lines.len(), 1);
    }

    #[test]
    fn test_wrap_boundary_has_no_blank_line() {
        let (model, mut ledger) = fixture();
        ledger.record(ReductionKind::NonBindingRow, &model, Some(0), None);

        let mut out = Vec::new();
        // Two coefficients with n = 1 wrap after each pair; no extra newline.
        ledger.write_text("fixture", 1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("\n\n"));
    }
}
