//! Translators between the core store and the solver schema.

use poda_core::{Bound, ColumnKind, Model, ModelError, RowSense};

use crate::schema::{ObjectiveCoefficient, SolverColumn, SolverElement, SolverModel, SolverRow};
use crate::SolverError;

/// Translate a (reduced) model into solver form.
///
/// The objective row is split out into the objective coefficient list and
/// the remaining row indices are compacted around it. A surviving
/// non-binding row is downgraded to a one-sided inequality on its finite
/// side; one with no finite side cannot be expressed.
pub fn to_solver_model(model: &Model) -> Result<SolverModel, SolverError> {
    if model.num_rows() == 0 {
        return Err(SolverError::EmptyRows);
    }
    if model.num_columns() == 0 {
        return Err(SolverError::EmptyColumns);
    }
    if model.num_elements() == 0 {
        return Err(SolverError::EmptyElements);
    }
    let Some(objective) = model.objective_row() else {
        return Err(SolverError::MissingObjective);
    };

    let columns = model
        .columns()
        .iter()
        .map(|column| SolverColumn {
            name: column.name.clone(),
            kind: column.kind.as_code(),
            lower: column.lower.to_f64(),
            upper: column.upper.to_f64(),
        })
        .collect();

    let mut rows = Vec::new();
    let mut elements = Vec::new();
    let mut objective_coefficients = Vec::new();
    let mut solver_row = 0;

    for (index, row) in model.rows().iter().enumerate() {
        if index == objective {
            for &e in &row.elements {
                let element = &model.elements()[e];
                objective_coefficients.push(ObjectiveCoefficient {
                    column: element.column,
                    value: element.value,
                });
            }
            continue;
        }

        let (sense, rhs, range) = match row.sense {
            RowSense::LessEqual => ('L', row.rhs_upper.to_f64(), 0.0),
            RowSense::GreaterEqual => ('G', row.rhs_lower.to_f64(), 0.0),
            RowSense::Equal => ('E', row.rhs_lower.to_f64(), 0.0),
            RowSense::Range => {
                let (Some(lower), Some(upper)) =
                    (row.rhs_lower.finite(), row.rhs_upper.finite())
                else {
                    return Err(SolverError::UntranslatableRow {
                        row: row.name.clone(),
                    });
                };
                ('R', lower, upper - lower)
            }
            RowSense::NonBinding => {
                if let Some(upper) = row.rhs_upper.finite() {
                    ('L', upper, 0.0)
                } else if let Some(lower) = row.rhs_lower.finite() {
                    ('G', lower, 0.0)
                } else {
                    return Err(SolverError::UntranslatableRow {
                        row: row.name.clone(),
                    });
                }
            }
        };
        rows.push(SolverRow {
            name: row.name.clone(),
            sense,
            rhs,
            range,
        });

        for &e in &row.elements {
            let element = &model.elements()[e];
            elements.push(SolverElement {
                row: solver_row,
                column: element.column,
                value: element.value,
            });
        }
        solver_row += 1;
    }

    tracing::debug!(
        component = "translate",
        operation = "to_solver_model",
        status = "success",
        rows = rows.len(),
        columns = model.num_columns(),
        elements = elements.len(),
        objective_terms = objective_coefficients.len(),
        "Translated model to solver form"
    );

    Ok(SolverModel {
        name: model.name.clone(),
        rows,
        columns,
        elements,
        objective: objective_coefficients,
    })
}

/// Build a core model from solver-form data.
///
/// External sense and column-type tags are parsed here; unknown tags are
/// rejected. A nonempty objective coefficient list becomes a non-binding
/// row, promoted to the front of the row list.
pub fn build_model(input: &SolverModel, objective_name: Option<&str>) -> Result<Model, SolverError> {
    if input.rows.is_empty() {
        return Err(SolverError::EmptyRows);
    }
    if input.columns.is_empty() {
        return Err(SolverError::EmptyColumns);
    }
    if input.elements.is_empty() {
        return Err(SolverError::EmptyElements);
    }

    let mut model = Model::new(input.name.clone());

    for column in &input.columns {
        let kind = match column.kind {
            'C' => ColumnKind::Continuous,
            'I' | 'B' => ColumnKind::Integer,
            'S' => {
                tracing::warn!(
                    component = "translate",
                    operation = "build_model",
                    column = %column.name,
                    "Only the integer part of a semi-continuous column is handled"
                );
                ColumnKind::Integer
            }
            'N' => ColumnKind::Integer,
            code => {
                return Err(SolverError::UnsupportedColumnType {
                    column: column.name.clone(),
                    code,
                })
            }
        };
        model
            .add_column(
                &column.name,
                kind,
                Bound::from_f64(column.lower),
                Bound::from_f64(column.upper),
            )
            .map_err(build_error)?;
    }

    for row in &input.rows {
        let (sense, lower, upper) = match row.sense {
            'L' => (RowSense::LessEqual, Bound::NegInf, Bound::Finite(row.rhs)),
            'E' => (
                RowSense::Equal,
                Bound::Finite(row.rhs),
                Bound::Finite(row.rhs),
            ),
            'G' => (RowSense::GreaterEqual, Bound::Finite(row.rhs), Bound::PosInf),
            'R' => (
                RowSense::Range,
                Bound::Finite(row.rhs),
                Bound::Finite(row.rhs + row.range),
            ),
            code => {
                return Err(SolverError::UnsupportedSense {
                    row: row.name.clone(),
                    code,
                })
            }
        };
        model.add_row(&row.name, sense, lower, upper).map_err(build_error)?;
    }

    for element in &input.elements {
        model
            .add_element(element.row, element.column, element.value)
            .map_err(build_error)?;
    }

    if !input.objective.is_empty() {
        let name = objective_name.filter(|n| !n.is_empty()).unwrap_or("ObjFunc");
        let index = model
            .add_row(name, RowSense::NonBinding, Bound::Finite(0.0), Bound::Finite(0.0))
            .map_err(build_error)?;
        for coefficient in &input.objective {
            model
                .add_element(index, coefficient.column, coefficient.value)
                .map_err(build_error)?;
        }
        model.set_objective_row(Some(index)).map_err(build_error)?;
        model.promote_objective().map_err(build_error)?;
    }

    tracing::debug!(
        component = "translate",
        operation = "build_model",
        status = "success",
        rows = model.num_rows(),
        columns = model.num_columns(),
        elements = model.num_elements(),
        "Built model from solver form"
    );
    Ok(model)
}

fn build_error(source: ModelError) -> SolverError {
    SolverError::Build { source }
}
