//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the host feeds elapsed time in)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod layout;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod timers;

pub use difficulty::{Difficulty, Milestone, difficulty_for, milestone_for};
pub use layout::{Position, generate_layout, generate_layout_with, in_play_area};
pub use scheduler::{SchedulerState, SpawnScheduler, Wave};
pub use session::{Session, Snapshot};
pub use state::{ActiveSet, GameEvent, GamePhase, GameState, HitCooldowns};
pub use timers::{Fired, TimerEvent, TimerHandle, TimerQueue};
