//! A reduction session: the store, its ledger, and the pre-reduction
//! captures needed to restore a complete solution.
//!
//! The session pins down the happens-before chain of a run: capture the
//! original shape, reduce, hand the reduced model to an external solver,
//! then lift the solver's answer back. The model must not be mutated
//! between [`Session::reduce`] and [`Session::restore`].

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::model::{Model, ModelError};
use crate::postsolve::{
    postsolve, ConstraintResult, PostsolveError, RestoredSolution, SolutionMaps,
    STATUS_NOT_AVAILABLE,
};
use crate::presolve::ledger::{RecordedRow, ReductionLedger};
use crate::presolve::{reduce, PresolveError, ReduceControl, ReduceSummary};

/// Owns a model through reduction and post-solve.
#[derive(Debug)]
pub struct Session {
    model: Model,
    ledger: ReductionLedger,
    original_rows: Vec<RecordedRow>,
    objective: Option<RecordedRow>,
    objective_constant: f64,
    column_scales: BTreeMap<String, f64>,
    initial_rows: usize,
    initial_columns: usize,
    initial_elements: usize,
}

impl Session {
    /// Capture the model's pre-reduction shape and take ownership of it.
    ///
    /// The objective row is moved to the front of the row list, and copies
    /// of every row, the objective, and the column scale factors are taken
    /// while all indices are still pristine.
    pub fn new(mut model: Model) -> Result<Self, ModelError> {
        model.promote_objective()?;

        let original_rows: Vec<RecordedRow> = (0..model.num_rows())
            .map(|index| RecordedRow::capture(&model, index))
            .collect();
        let objective = model
            .objective_row()
            .map(|index| RecordedRow::capture(&model, index));
        let objective_constant = objective.as_ref().map(|row| row.rhs).unwrap_or(0.0);
        let column_scales = model
            .columns()
            .iter()
            .map(|column| (column.name.clone(), column.scale_factor))
            .collect();

        tracing::debug!(
            component = "session",
            operation = "new",
            status = "success",
            rows = model.num_rows(),
            columns = model.num_columns(),
            elements = model.num_elements(),
            "Captured pre-reduction model"
        );

        Ok(Self {
            initial_rows: model.num_rows(),
            initial_columns: model.num_columns(),
            initial_elements: model.num_elements(),
            original_rows,
            objective,
            objective_constant,
            column_scales,
            ledger: ReductionLedger::new(),
            model,
        })
    }

    /// The (possibly reduced) model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The reduction ledger.
    pub fn ledger(&self) -> &ReductionLedger {
        &self.ledger
    }

    /// Scale factors of the original columns, keyed by name.
    pub fn column_scales(&self) -> &BTreeMap<String, f64> {
        &self.column_scales
    }

    /// Rows removed so far.
    pub fn rows_removed(&self) -> usize {
        self.initial_rows - self.model.num_rows()
    }

    /// Columns removed so far.
    pub fn columns_removed(&self) -> usize {
        self.initial_columns - self.model.num_columns()
    }

    /// Elements removed so far.
    pub fn elements_removed(&self) -> usize {
        self.initial_elements - self.model.num_elements()
    }

    /// Run the reduction driver over the owned model.
    pub fn reduce(&mut self, control: &ReduceControl) -> Result<ReduceSummary, PresolveError> {
        reduce(&mut self.model, &mut self.ledger, control)
    }

    /// Write the ledger's text report for this session's model.
    pub fn write_ledger(&self, coef_per_line: i32, out: &mut dyn Write) -> io::Result<()> {
        self.ledger.write_text(&self.model.name, coef_per_line, out)
    }

    /// Lift a reduced-problem solution back onto the original model.
    ///
    /// `maps` holds the solver's per-name results for the surviving rows and
    /// columns; passing empty maps restores a model that was reduced away
    /// entirely. The returned solution spans every original row and column,
    /// with the objective recomputed from the pre-reduction objective row.
    pub fn restore(&self, mut maps: SolutionMaps) -> Result<RestoredSolution, PostsolveError> {
        postsolve(&self.ledger, &mut maps)?;

        for row in &self.original_rows {
            maps.constraints
                .entry(row.name.clone())
                .and_modify(|constraint| {
                    constraint.sense = row.sense;
                    constraint.rhs = row.rhs;
                    constraint.scale_factor = row.scale_factor;
                })
                .or_insert_with(|| ConstraintResult {
                    status: STATUS_NOT_AVAILABLE.to_string(),
                    sense: row.sense,
                    rhs: row.rhs,
                    scale_factor: row.scale_factor,
                    pi: 0.0,
                    slack: 0.0,
                    dual: 0.0,
                });
        }

        let objective_value = match &self.objective {
            Some(objective) => {
                let mut lhs = 0.0;
                for coef in &objective.coefficients {
                    let variable = maps.variables.get(&coef.column).ok_or_else(|| {
                        PostsolveError::NameNotFound {
                            name: coef.column.clone(),
                        }
                    })?;
                    lhs += variable.value * coef.value;
                }
                lhs * objective.scale_factor - self.objective_constant
            }
            None => 0.0,
        };

        tracing::info!(
            component = "session",
            operation = "restore",
            status = "success",
            objective = objective_value,
            rows_removed = self.rows_removed(),
            columns_removed = self.columns_removed(),
            "Restored original-problem solution"
        );

        Ok(RestoredSolution {
            objective_value,
            constraints: maps.constraints,
            variables: maps.variables,
            rows_removed: self.rows_removed(),
            columns_removed: self.columns_removed(),
            elements_removed: self.elements_removed(),
        })
    }
}
