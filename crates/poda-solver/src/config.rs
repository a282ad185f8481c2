//! Solver configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options handed to a backend along with the reduced model.
///
/// By the time a backend sees the model, the reduction engine has already
/// shrunk it, so the backend's own presolve is off unless asked for.
/// Anything a field does not cover travels in `raw_options`, which a
/// backend interprets as its own parameter name/value pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget for the solve, in seconds. `None` runs to
    /// completion.
    pub time_limit_seconds: Option<f64>,
    /// Relative gap at which a mixed-integer solve may stop early. `None`
    /// uses the backend default.
    pub mip_gap: Option<f64>,
    /// Let the backend presolve the already-reduced model again.
    pub backend_presolve: bool,
    /// Suppress backend log output.
    pub quiet: bool,
    /// Backend-specific parameters, passed through untouched.
    pub raw_options: BTreeMap<String, String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: None,
            mip_gap: None,
            backend_presolve: false,
            quiet: true,
            raw_options: BTreeMap::new(),
        }
    }
}

impl SolverConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a backend-specific parameter.
    pub fn set_raw_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.raw_options.insert(name.into(), value.into());
    }
}
