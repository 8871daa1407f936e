//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected over one decision's search.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed simulations (select + expand + rollout + backpropagate).
    pub simulations: u32,

    /// Nodes added to the tree.
    pub expansions: u32,

    /// Hypothetical rounds resolved during rollouts.
    pub rollout_steps: u64,

    /// Wall time spent searching, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    /// Reset every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Simulations per second over the measured wall time.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.simulations) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
