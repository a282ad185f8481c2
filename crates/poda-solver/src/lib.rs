//! Shared solver abstractions for poda.
//!
//! This crate is the named boundary between the reduction engine and
//! external optimizers. It defines the array-shaped [`SolverModel`] schema
//! that solver bindings consume, translators between that schema and the
//! core store, and the [`Solve`] trait with its outcome types.
//!
//! # Overview
//!
//! - [`SolverModel`]: rows/columns/elements with single-character tags
//! - [`to_solver_model`] / [`build_model`]: schema translators
//! - [`SolverConfig`]: options handed to a backend with the reduced model
//! - [`SolverStatus`]: how a backend's solve ended
//! - [`SolverError`]: error types for translation and solving
//! - [`Solve`]: trait for solver implementations
//! - [`SolverOutcome`]: name-keyed results a backend returns

mod config;
mod error;
mod outcome;
mod schema;
mod status;
mod traits;
mod translate;

pub use config::SolverConfig;
pub use error::SolverError;
pub use outcome::{SolvedColumn, SolvedRow, SolverOutcome};
pub use schema::{ObjectiveCoefficient, SolverColumn, SolverElement, SolverModel, SolverRow};
pub use status::SolverStatus;
pub use traits::Solve;
pub use translate::{build_model, to_solver_model};
