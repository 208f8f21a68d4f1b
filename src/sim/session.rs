//! Game session: start/reset lifecycle, tap handling and timer dispatch
//!
//! The session is the only owner of mutable game state. Timer callbacks and
//! taps are applied one at a time, each running to completion, so the
//! scheduler's read of the score and a tap's increment never interleave.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::difficulty::{Difficulty, Milestone, difficulty_for, milestone_for};
use super::layout::generate_layout_with;
use super::scheduler::SpawnScheduler;
use super::state::{ActiveSet, GameEvent, GamePhase, GameState};
use super::timers::{Fired, TimerEvent, TimerQueue};
use crate::tuning::Tuning;

/// One game board and everything that drives it
#[derive(Debug)]
pub struct Session {
    state: GameState,
    timers: TimerQueue,
    scheduler: SpawnScheduler,
    rng: Pcg32,
    tuning: Tuning,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle session. The board is laid out immediately so the
    /// start overlay has holes to sit on.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let holes = generate_layout_with(
            &mut rng,
            tuning.slot_count,
            tuning.min_separation,
            tuning.layout_attempts,
        );
        Self {
            state: GameState::new(seed, holes),
            timers: TimerQueue::new(),
            scheduler: SpawnScheduler::new(),
            rng,
            tuning,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn active(&self) -> ActiveSet {
        self.state.active
    }

    pub fn shown_milestone(&self) -> Option<Milestone> {
        self.state.shown_milestone
    }

    /// Tier the next spawn cycle will use
    pub fn difficulty(&self) -> Difficulty {
        difficulty_for(self.state.score)
    }

    /// Virtual time since the session was created
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// True while the chained spawn timer is armed
    pub fn is_spawning(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    pub fn is_tappable(&self, slot: usize) -> bool {
        self.state.phase == GamePhase::Playing && self.state.is_tappable(slot)
    }

    /// Begin a new game on a fresh board. Starting while already playing
    /// restarts the run.
    pub fn start_game(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.teardown();
        }
        self.new_board();
        self.state.phase = GamePhase::Playing;
        self.scheduler
            .start(&mut self.timers, self.tuning.initial_spawn_delay);

        log::info!(
            "Game started (seed {}, {} holes)",
            self.state.seed,
            self.state.slot_count()
        );
        self.events.push(GameEvent::GameStarted {
            seed: self.state.seed,
        });
    }

    /// Abort the current game and return to the start overlay
    pub fn reset_game(&mut self) {
        self.teardown();
        self.new_board();
        self.state.phase = GamePhase::Idle;

        log::info!("Game reset");
        self.events.push(GameEvent::GameReset);
    }

    /// Handle a tap on `slot`. Returns true if it scored.
    ///
    /// Taps on holes without a mole, holes still in their post-hit cooldown,
    /// or indices off the board are ignored.
    pub fn on_tap(&mut self, slot: usize) -> bool {
        if !self.is_tappable(slot) {
            log::trace!("Tap on slot {} ignored", slot);
            return false;
        }

        self.state.cooldowns.start(slot);
        self.timers.schedule(
            self.tuning.hit_cooldown,
            TimerEvent::HitCooldownEnd {
                slot,
                epoch: self.state.epoch,
            },
        );

        self.state.active.remove(slot);
        self.state.score += 1;
        let score = self.state.score;
        log::debug!("Whacked slot {} (score {})", slot, score);
        self.events.push(GameEvent::Whacked { slot, score });

        // Only a change of banner is announced
        if let Some(m) = milestone_for(score) {
            if self.state.shown_milestone != Some(m) {
                self.state.shown_milestone = Some(m);
                log::info!("Milestone at score {}: {}", score, m.banner());
                self.events.push(GameEvent::MilestoneReached(m));
            }
        }

        true
    }

    /// Let `elapsed` pass, firing every timer that comes due in order
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(fired) = self.timers.pop_due(until) {
            self.dispatch(fired);
        }
        self.timers.set_now(until);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current board as the presentation layer sees it
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            holes: self.state.holes.iter().map(|h| [h.x, h.y]).collect(),
            active: self.state.active.iter().collect(),
            tappable: (0..self.state.slot_count())
                .map(|slot| self.is_tappable(slot))
                .collect(),
            milestone: self.state.shown_milestone.map(|m| m.banner()),
        }
    }

    fn dispatch(&mut self, fired: Fired) {
        match fired.event {
            TimerEvent::SpawnCycle => {
                if self.state.phase != GamePhase::Playing {
                    return;
                }
                if let Some(wave) = self.scheduler.run_cycle(
                    fired.handle,
                    &mut self.state,
                    &mut self.timers,
                    &mut self.rng,
                    &self.tuning,
                ) {
                    self.events.push(GameEvent::MolesUp {
                        slots: wave.slots,
                        visible: wave.difficulty.visible,
                    });
                }
            }
            TimerEvent::ClearMoles { epoch } => {
                // Leftover from an earlier run
                if epoch != self.state.epoch || self.state.phase != GamePhase::Playing {
                    return;
                }
                self.state.active.clear();
                self.events.push(GameEvent::MolesDown);
            }
            TimerEvent::HitCooldownEnd { slot, epoch } => {
                if epoch == self.state.epoch {
                    self.state.cooldowns.end(slot);
                }
            }
        }
    }

    /// Cancel the spawn chain. Safe to call repeatedly.
    fn teardown(&mut self) {
        if self.scheduler.stop(&mut self.timers) {
            log::debug!("Spawn chain cancelled at {:?}", self.timers.now());
        }
    }

    fn new_board(&mut self) {
        let holes = generate_layout_with(
            &mut self.rng,
            self.tuning.slot_count,
            self.tuning.min_separation,
            self.tuning.layout_attempts,
        );
        self.state.reset_board(holes);
    }
}

/// Serializable view of the board for the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    /// Hole centers as [x, y] percentages
    pub holes: Vec<[f32; 2]>,
    /// Holes with a mole up
    pub active: Vec<usize>,
    /// Per-hole "tap would score" flags
    pub tappable: Vec<bool>,
    /// Banner text, if one is showing
    pub milestone: Option<&'static str>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
