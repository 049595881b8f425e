//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during a search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations that completed and were backpropagated.
    pub iterations: u32,

    /// Iterations aborted by a rules-engine error (never backpropagated).
    pub aborted_iterations: u32,

    /// Nodes held across all trees when the search finished.
    pub nodes: usize,

    /// Total wall time (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Completed iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
