//! Activity-based bound tightening.
//!
//! For every active row the finite part of the minimum and maximum activity
//! is accumulated together with a count of unbounded contributions. A row
//! with a finite residual activity implies a bound on each of its columns;
//! implied bounds that improve on the declared ones are installed. Rows
//! whose activity interval fits entirely inside the declared right-hand-side
//! interval can never be violated and are marked non-binding. Crossing
//! bounds prove infeasibility.

use crate::model::Model;
use crate::presolve::PresolveError;
use crate::types::{Bound, ColumnKind, RowSense};

const TOLERANCE: f64 = 1e-9;

/// Finite activity sums with counts of unbounded contributions.
struct Activity {
    min_sum: f64,
    min_unbounded: usize,
    max_sum: f64,
    max_unbounded: usize,
}

fn row_activity(model: &Model, row: usize) -> Activity {
    let mut activity = Activity {
        min_sum: 0.0,
        min_unbounded: 0,
        max_sum: 0.0,
        max_unbounded: 0,
    };
    for &e in &model.rows()[row].elements {
        let element = &model.elements()[e];
        if element.value == 0.0 {
            continue;
        }
        let column = &model.columns()[element.column];
        let (min_side, max_side) = if element.value > 0.0 {
            (column.lower, column.upper)
        } else {
            (column.upper, column.lower)
        };
        match min_side {
            Bound::Finite(bound) => activity.min_sum += element.value * bound,
            _ => activity.min_unbounded += 1,
        }
        match max_side {
            Bound::Finite(bound) => activity.max_sum += element.value * bound,
            _ => activity.max_unbounded += 1,
        }
    }
    activity
}

/// The row's minimum activity with column `skip` taken out, when finite.
fn residual_min(model: &Model, activity: &Activity, skip: usize, coef: f64) -> Option<f64> {
    let column = &model.columns()[skip];
    let own = if coef > 0.0 { column.lower } else { column.upper };
    match own {
        Bound::Finite(bound) if activity.min_unbounded == 0 => {
            Some(activity.min_sum - coef * bound)
        }
        Bound::Finite(_) => None,
        _ if activity.min_unbounded == 1 => Some(activity.min_sum),
        _ => None,
    }
}

/// The row's maximum activity with column `skip` taken out, when finite.
fn residual_max(model: &Model, activity: &Activity, skip: usize, coef: f64) -> Option<f64> {
    let column = &model.columns()[skip];
    let own = if coef > 0.0 { column.upper } else { column.lower };
    match own {
        Bound::Finite(bound) if activity.max_unbounded == 0 => {
            Some(activity.max_sum - coef * bound)
        }
        Bound::Finite(_) => None,
        _ if activity.max_unbounded == 1 => Some(activity.max_sum),
        _ => None,
    }
}

/// Iterate bound tightening until a fixed point or the iteration cap.
///
/// Returns the number of iterations executed. Marks rows that can never be
/// violated as non-binding. Fails with `InconsistentBounds` if any row's
/// activity proves the declared right-hand side unreachable, or a column's
/// bounds cross.
pub fn tighten_bounds(model: &mut Model, max_iter: usize) -> Result<usize, PresolveError> {
    let mut iterations = 0;

    while iterations < max_iter {
        iterations += 1;
        let mut changed = false;

        for row in 0..model.num_rows() {
            if !model.rows()[row].state.is_active() {
                continue;
            }
            if model.rows()[row].sense == RowSense::NonBinding {
                continue;
            }
            if model.objective_row() == Some(row) {
                continue;
            }

            let activity = row_activity(model, row);
            let (rhs_lower, rhs_upper) = {
                let r = &model.rows()[row];
                (r.rhs_lower, r.rhs_upper)
            };

            if let Bound::Finite(up) = rhs_upper {
                if activity.min_unbounded == 0 && activity.min_sum > up + TOLERANCE {
                    return Err(PresolveError::InconsistentBounds {
                        entity: "row",
                        name: model.rows()[row].name.clone(),
                    });
                }
            }
            if let Bound::Finite(lo) = rhs_lower {
                if activity.max_unbounded == 0 && activity.max_sum < lo - TOLERANCE {
                    return Err(PresolveError::InconsistentBounds {
                        entity: "row",
                        name: model.rows()[row].name.clone(),
                    });
                }
            }

            let entries: Vec<(usize, f64)> = model.rows()[row]
                .elements
                .iter()
                .map(|&e| {
                    let element = &model.elements()[e];
                    (element.column, element.value)
                })
                .filter(|&(_, coef)| coef != 0.0)
                .collect();

            for (column, coef) in entries {
                if !model.columns()[column].state.is_active() {
                    continue;
                }

                if let Bound::Finite(up) = rhs_upper {
                    if let Some(residual) = residual_min(model, &activity, column, coef) {
                        let implied = (up - residual) / coef;
                        if coef > 0.0 {
                            changed |= install_upper(model, row, column, implied)?;
                        } else {
                            changed |= install_lower(model, row, column, implied)?;
                        }
                    }
                }
                if let Bound::Finite(lo) = rhs_lower {
                    if let Some(residual) = residual_max(model, &activity, column, coef) {
                        let implied = (lo - residual) / coef;
                        if coef > 0.0 {
                            changed |= install_lower(model, row, column, implied)?;
                        } else {
                            changed |= install_upper(model, row, column, implied)?;
                        }
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }

    let marked = mark_non_binding(model);
    tracing::info!(
        component = "presolve",
        operation = "tighten_bounds",
        iterations,
        marked_non_binding = marked,
        "Finished bound tightening"
    );
    Ok(iterations)
}

fn install_upper(
    model: &mut Model,
    row: usize,
    column: usize,
    implied: f64,
) -> Result<bool, PresolveError> {
    let implied = if model.columns()[column].kind == ColumnKind::Integer {
        (implied + TOLERANCE).floor()
    } else {
        implied
    };
    let current = model.columns()[column].upper;
    if Bound::Finite(implied) >= current || !improves(current.finite(), implied) {
        return Ok(false);
    }
    if let Bound::Finite(lower) = model.columns()[column].lower {
        if implied < lower - TOLERANCE {
            return Err(PresolveError::InconsistentBounds {
                entity: "column",
                name: model.columns()[column].name.clone(),
            });
        }
    }
    let name = model.columns()[column].name.clone();
    model.columns[column].upper = Bound::Finite(implied);
    tracing::debug!(
        component = "presolve",
        operation = "tighten_bounds",
        row = %model.rows()[row].name,
        column = %name,
        upper = implied,
        "Tightened upper bound"
    );
    Ok(true)
}

fn install_lower(
    model: &mut Model,
    row: usize,
    column: usize,
    implied: f64,
) -> Result<bool, PresolveError> {
    let implied = if model.columns()[column].kind == ColumnKind::Integer {
        (implied - TOLERANCE).ceil()
    } else {
        implied
    };
    let current = model.columns()[column].lower;
    if Bound::Finite(implied) <= current || !improves(current.finite(), implied) {
        return Ok(false);
    }
    if let Bound::Finite(upper) = model.columns()[column].upper {
        if implied > upper + TOLERANCE {
            return Err(PresolveError::InconsistentBounds {
                entity: "column",
                name: model.columns()[column].name.clone(),
            });
        }
    }
    let name = model.columns()[column].name.clone();
    model.columns[column].lower = Bound::Finite(implied);
    tracing::debug!(
        component = "presolve",
        operation = "tighten_bounds",
        row = %model.rows()[row].name,
        column = %name,
        lower = implied,
        "Tightened lower bound"
    );
    Ok(true)
}

/// A new finite bound must move by more than the tolerance to count.
fn improves(current: Option<f64>, implied: f64) -> bool {
    match current {
        Some(value) => (value - implied).abs() > TOLERANCE,
        None => true,
    }
}

/// Mark every row whose activity interval fits inside its declared interval.
fn mark_non_binding(model: &mut Model) -> usize {
    let mut marked = 0;
    for row in 0..model.num_rows() {
        if !model.rows()[row].state.is_active() {
            continue;
        }
        if model.rows()[row].sense == RowSense::NonBinding {
            continue;
        }
        if model.objective_row() == Some(row) {
            continue;
        }

        let activity = row_activity(model, row);
        let lower_safe = match model.rows()[row].rhs_lower {
            Bound::NegInf => true,
            Bound::Finite(lo) => activity.min_unbounded == 0 && activity.min_sum >= lo - TOLERANCE,
            Bound::PosInf => false,
        };
        let upper_safe = match model.rows()[row].rhs_upper {
            Bound::PosInf => true,
            Bound::Finite(up) => activity.max_unbounded == 0 && activity.max_sum <= up + TOLERANCE,
            Bound::NegInf => false,
        };
        if lower_safe && upper_safe {
            tracing::debug!(
                component = "presolve",
                operation = "tighten_bounds",
                row = %model.rows()[row].name,
                "Row can never be violated, marking non-binding"
            );
            model.rows[row].sense = RowSense::NonBinding;
            marked += 1;
        }
    }
    marked
}
