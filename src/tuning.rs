//! Game balance knobs
//!
//! Everything here is compiled in; `Tuning::default()` mirrors [`crate::consts`].
//! A non-default tuning is only built by tests and tooling that want to push
//! the core into corners (a starved layout budget, a cramped board).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Holes requested from the layout generator
    pub slot_count: usize,
    /// Minimum distance between hole centers
    pub min_separation: f32,
    /// Rejection-sampling budget for the layout generator
    pub layout_attempts: u32,
    /// First spawn after the game starts
    pub initial_spawn_delay: Duration,
    /// Fixed gap added after a wave's visible time
    pub spawn_gap_base: Duration,
    /// Upper bound (exclusive) of the random extra gap
    pub spawn_gap_jitter: Duration,
    /// Per-hole debounce after a successful whack
    pub hit_cooldown: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            slot_count: SLOT_COUNT,
            min_separation: MIN_SEPARATION,
            layout_attempts: LAYOUT_ATTEMPTS,
            initial_spawn_delay: INITIAL_SPAWN_DELAY,
            spawn_gap_base: SPAWN_GAP_BASE,
            spawn_gap_jitter: SPAWN_GAP_JITTER,
            hit_cooldown: HIT_COOLDOWN,
        }
    }
}

impl Tuning {
    /// Delay before the next spawn cycle, given this cycle's visible time and
    /// a uniform sample in [0, 1)
    pub fn next_cycle_delay(&self, visible: Duration, unit: f32) -> Duration {
        visible + self.spawn_gap_base + self.spawn_gap_jitter.mul_f32(unit.clamp(0.0, 1.0))
    }
}
