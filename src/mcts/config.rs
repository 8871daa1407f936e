//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Simulations per decision.
    ///
    /// Injectable so tests and tuning can trade quality for time; 0 is
    /// legal and degenerates to picking the first playable card.
    pub simulations: u32,

    /// UCB1 exploration constant. Higher values favor under-visited
    /// children over known-good ones.
    pub exploration: f64,

    /// Seed for the search RNG. Same seed, same search.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            exploration: 0.1,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Set the simulation count.
    #[must_use]
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations;
        self
    }

    /// Set the exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
