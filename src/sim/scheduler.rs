//! Self-rescheduling spawn loop
//!
//! Each cycle raises a random wave of moles sized by the current difficulty
//! tier, arms a fire-and-forget clear for the wave, and re-arms itself after
//! the wave's visible time plus a jittered gap. Only the chained cycle timer
//! is tracked; stopping cancels it exactly once.

use std::time::Duration;

use rand::Rng;
use rand::seq::index;

use super::difficulty::{Difficulty, difficulty_for};
use super::state::{ActiveSet, GameState};
use super::timers::{TimerEvent, TimerHandle, TimerQueue};
use crate::tuning::Tuning;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    /// The next spawn cycle is pending on this timer
    Scheduled(TimerHandle),
}

/// Outcome of one spawn cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    /// Raised holes, ascending
    pub slots: Vec<usize>,
    /// Tier the wave was drawn from
    pub difficulty: Difficulty,
    /// Delay until the following cycle
    pub next_in: Duration,
}

/// Owner of the chained spawn timer
#[derive(Debug, Default)]
pub struct SpawnScheduler {
    state: SchedulerState,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, SchedulerState::Scheduled(_))
    }

    /// Arm the first cycle after `delay`. A pending cycle is cancelled first.
    pub fn start(&mut self, timers: &mut TimerQueue, delay: Duration) {
        self.stop(timers);
        let handle = timers.schedule(delay, TimerEvent::SpawnCycle);
        self.state = SchedulerState::Scheduled(handle);
    }

    /// Cancel the pending cycle. Returns false if nothing was scheduled.
    pub fn stop(&mut self, timers: &mut TimerQueue) -> bool {
        match std::mem::take(&mut self.state) {
            SchedulerState::Scheduled(handle) => {
                timers.cancel(handle);
                true
            }
            SchedulerState::Stopped => false,
        }
    }

    /// Run the cycle whose timer `fired`, publish the wave into `state` and
    /// re-arm. Returns `None` for a timer this scheduler no longer owns.
    pub fn run_cycle<R: Rng>(
        &mut self,
        fired: TimerHandle,
        state: &mut GameState,
        timers: &mut TimerQueue,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<Wave> {
        if self.state != SchedulerState::Scheduled(fired) {
            log::debug!("Ignoring stale spawn timer {:?}", fired);
            return None;
        }

        let difficulty = difficulty_for(state.score);
        let slots = pick_slots(rng, state.slot_count(), difficulty.max_concurrent);

        // Replaces the previous wave outright
        state.active = ActiveSet::from_slots(slots.iter().copied());

        timers.schedule(
            difficulty.visible,
            TimerEvent::ClearMoles { epoch: state.epoch },
        );

        let next_in = tuning.next_cycle_delay(difficulty.visible, rng.random::<f32>());
        let handle = timers.schedule(next_in, TimerEvent::SpawnCycle);
        self.state = SchedulerState::Scheduled(handle);

        log::debug!(
            "Spawn at score {}: {:?} up for {:?}, next in {:?}",
            state.score,
            slots,
            difficulty.visible,
            next_in
        );

        Some(Wave {
            slots,
            difficulty,
            next_in,
        })
    }
}

/// Choose between 1 and `max_concurrent` distinct holes out of `slot_count`
fn pick_slots<R: Rng>(rng: &mut R, slot_count: usize, max_concurrent: usize) -> Vec<usize> {
    if slot_count == 0 || max_concurrent == 0 {
        return Vec::new();
    }
    let wanted = max_concurrent.min(1 + rng.random_range(0..max_concurrent));
    let amount = wanted.min(slot_count);

    let mut slots = index::sample(rng, slot_count, amount).into_vec();
    slots.sort_unstable();
    slots
}
