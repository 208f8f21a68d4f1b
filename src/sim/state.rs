//! Game state and core simulation types
//!
//! Score, active moles and the shown milestone are owned here; the spawn
//! scheduler reads the score and the tap handler mutates it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::difficulty::Milestone;
use super::layout::Position;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No spawning, start overlay shown
    #[default]
    Idle,
    /// Spawn scheduler running
    Playing,
}

/// Holes with a mole currently up, as a bitset over slot indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActiveSet(u64);

impl ActiveSet {
    /// Largest slot index representable
    pub const CAPACITY: usize = u64::BITS as usize;

    pub fn new() -> Self {
        Self(0)
    }

    /// Build a set from slot indices; indices past capacity are dropped
    pub fn from_slots(slots: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new();
        for slot in slots {
            set.insert(slot);
        }
        set
    }

    pub fn contains(&self, slot: usize) -> bool {
        slot < Self::CAPACITY && self.0 & (1u64 << slot) != 0
    }

    pub fn insert(&mut self, slot: usize) {
        if slot < Self::CAPACITY {
            self.0 |= 1u64 << slot;
        }
    }

    /// Remove `slot`, returning whether it was present
    pub fn remove(&mut self, slot: usize) -> bool {
        let present = self.contains(slot);
        if present {
            self.0 &= !(1u64 << slot);
        }
        present
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Slot indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::CAPACITY).filter(|&slot| self.contains(slot))
    }
}

/// Per-hole post-hit debounce flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitCooldowns(ActiveSet);

impl HitCooldowns {
    pub fn is_cooling(&self, slot: usize) -> bool {
        self.0.contains(slot)
    }

    pub fn start(&mut self, slot: usize) {
        self.0.insert(slot);
    }

    pub fn end(&mut self, slot: usize) {
        self.0.remove(slot);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Something the presentation layer may want to animate or play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Playing with a fresh board
    GameStarted { seed: u64 },
    /// Playing -> Idle (or a reset from Idle)
    GameReset,
    /// A spawn cycle raised these holes for `visible`
    MolesUp { slots: Vec<usize>, visible: Duration },
    /// The cycle's clear timer hid every mole
    MolesDown,
    /// A tap landed on `slot`, bringing the score to `score`
    Whacked { slot: usize, score: u32 },
    /// A new milestone banner should be shown
    MilestoneReached(Milestone),
}

/// Everything the board shows, reset together on start and reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    /// Session generation, bumped on every start/reset
    pub epoch: u32,
    pub phase: GamePhase,
    /// Hole positions for this run; may be shorter than requested
    pub holes: Vec<Position>,
    pub active: ActiveSet,
    pub cooldowns: HitCooldowns,
    /// Successful whacks this run
    pub score: u32,
    /// Milestone banner currently on screen
    pub shown_milestone: Option<Milestone>,
}

impl GameState {
    /// Create an idle state with the given seed and holes
    pub fn new(seed: u64, holes: Vec<Position>) -> Self {
        Self {
            seed,
            epoch: 0,
            phase: GamePhase::Idle,
            holes,
            active: ActiveSet::new(),
            cooldowns: HitCooldowns::default(),
            score: 0,
            shown_milestone: None,
        }
    }

    /// Number of holes actually on the board
    pub fn slot_count(&self) -> usize {
        self.holes.len()
    }

    /// A hole accepts a tap when its mole is up and not mid-hit
    pub fn is_tappable(&self, slot: usize) -> bool {
        slot < self.slot_count() && self.active.contains(slot) && !self.cooldowns.is_cooling(slot)
    }

    /// Wipe score, moles and banner and lay out a new board
    pub fn reset_board(&mut self, holes: Vec<Position>) {
        self.epoch = self.epoch.wrapping_add(1);
        self.holes = holes;
        self.active.clear();
        self.cooldowns.clear();
        self.score = 0;
        self.shown_milestone = None;
    }
}
