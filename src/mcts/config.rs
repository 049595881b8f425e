//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Search configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// UCB1 exploration constant (default: sqrt(2)).
    /// Higher values favor exploration over exploitation.
    pub exploration: f64,

    /// Seed for the search RNG. Same seed, same search.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Set the exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
