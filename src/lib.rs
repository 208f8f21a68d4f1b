//! Mole Rush - A browser whack-a-mole arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game core (layout, difficulty, spawn scheduling, taps)
//! - `tuning`: Compiled-in game balance gathered into one struct
//! - `web`: wasm-bindgen bridge for the host page
//!
//! Rendering lives in the host page; it reads [`sim::Snapshot`]s and forwards
//! taps back into [`sim::Session::on_tap`].

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{GameEvent, GamePhase, Session, Snapshot};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Number of holes on the board
    pub const SLOT_COUNT: usize = 6;

    /// Minimum distance between hole centers (percent of the play surface)
    pub const MIN_SEPARATION: f32 = 22.0;
    /// Candidate positions tried before the layout generator gives up
    pub const LAYOUT_ATTEMPTS: u32 = 500;

    /// Playable sub-rectangle, in percent. Holes never land in the margins.
    pub const LAYOUT_MIN_X: f32 = 10.0;
    pub const LAYOUT_SPAN_X: f32 = 75.0;
    pub const LAYOUT_MIN_Y: f32 = 10.0;
    pub const LAYOUT_SPAN_Y: f32 = 70.0;

    /// Delay between entering Playing and the first spawn cycle
    pub const INITIAL_SPAWN_DELAY: Duration = Duration::from_millis(500);
    /// Fixed part of the gap between a wave hiding and the next wave
    pub const SPAWN_GAP_BASE: Duration = Duration::from_millis(200);
    /// Random extra gap, uniform in [0, SPAWN_GAP_JITTER)
    pub const SPAWN_GAP_JITTER: Duration = Duration::from_millis(400);

    /// How long a whacked hole ignores further taps
    pub const HIT_COOLDOWN: Duration = Duration::from_millis(300);
}

/// Distance between two hole centers
#[inline]
pub fn separation(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
