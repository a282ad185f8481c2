//! The solver backend trait.

use crate::{SolverConfig, SolverError, SolverModel, SolverOutcome};

/// Trait implemented by solver backends.
///
/// A backend consumes the solver-form model and blocks until the solve
/// finishes; there is no retry policy at this layer, a failure surfaces
/// as-is.
pub trait Solve {
    /// Solve the model with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the model cannot be loaded or the
    /// backend finishes without a usable solution.
    fn solve(
        &mut self,
        model: &SolverModel,
        config: &SolverConfig,
    ) -> Result<SolverOutcome, SolverError>;
}
