//! Score-driven difficulty tiers and milestone banners
//!
//! Both tables use inclusive lower bounds checked from the top down, so a
//! score sitting exactly on a threshold gets the harder tier.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Spawn parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// How long a wave of moles stays up
    pub visible: Duration,
    /// Upper bound on moles in a single wave
    pub max_concurrent: usize,
}

impl Difficulty {
    const fn new(visible_ms: u64, max_concurrent: usize) -> Self {
        Self {
            visible: Duration::from_millis(visible_ms),
            max_concurrent,
        }
    }
}

/// (score threshold, tier), highest threshold first
const DIFFICULTY_TIERS: [(u32, Difficulty); 7] = [
    (60, Difficulty::new(400, 4)),
    (50, Difficulty::new(500, 4)),
    (40, Difficulty::new(600, 3)),
    (30, Difficulty::new(700, 3)),
    (20, Difficulty::new(800, 2)),
    (10, Difficulty::new(1000, 2)),
    (0, Difficulty::new(1200, 1)),
];

/// Difficulty tier for the given score
pub fn difficulty_for(score: u32) -> Difficulty {
    DIFFICULTY_TIERS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(DIFFICULTY_TIERS[DIFFICULTY_TIERS.len() - 1].1)
}

/// Celebration banners, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Milestone {
    HotHands,
    Unstoppable,
    MoleBuster,
    BeyondLimits,
    Champion,
    Inferno,
}

impl Milestone {
    /// Highest milestone first, paired with the score that unlocks it
    const TABLE: [(u32, Milestone); 6] = [
        (60, Milestone::Inferno),
        (50, Milestone::Champion),
        (40, Milestone::BeyondLimits),
        (30, Milestone::MoleBuster),
        (20, Milestone::Unstoppable),
        (10, Milestone::HotHands),
    ];

    /// Banner text shown by the presentation layer
    pub fn banner(&self) -> &'static str {
        match self {
            Milestone::HotHands => "🎉 手感火热！",
            Milestone::Unstoppable => "⚡ 无人能挡！",
            Milestone::MoleBuster => "🏆 地鼠克星！",
            Milestone::BeyondLimits => "🚀 超越极限！",
            Milestone::Champion => "👑 你是冠军！",
            Milestone::Inferno => "🔥 🔥 🔥",
        }
    }

    /// Score that unlocks this milestone
    pub fn threshold(&self) -> u32 {
        Self::TABLE
            .iter()
            .find(|(_, m)| m == self)
            .map(|(t, _)| *t)
            .unwrap_or(0)
    }
}

/// Milestone earned at the given score, if any
pub fn milestone_for(score: u32) -> Option<Milestone> {
    Milestone::TABLE
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, m)| *m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_table() {
        assert_eq!(difficulty_for(0), Difficulty::new(1200, 1));
        assert_eq!(difficulty_for(9), Difficulty::new(1200, 1));
        assert_eq!(difficulty_for(10), Difficulty::new(1000, 2));
        assert_eq!(difficulty_for(20), Difficulty::new(800, 2));
        assert_eq!(difficulty_for(30), Difficulty::new(700, 3));
        assert_eq!(difficulty_for(40), Difficulty::new(600, 3));
        assert_eq!(difficulty_for(1_000), Difficulty::new(400, 4));
    }

    #[test]
    fn test_difficulty_boundaries() {
        assert_eq!(difficulty_for(59), Difficulty::new(500, 4));
        assert_eq!(difficulty_for(50), Difficulty::new(500, 4));
        assert_eq!(difficulty_for(49), Difficulty::new(600, 3));
        assert_eq!(difficulty_for(60), Difficulty::new(400, 4));
    }

    #[test]
    fn test_milestones() {
        assert_eq!(milestone_for(0), None);
        assert_eq!(milestone_for(9), None);
        assert_eq!(milestone_for(10), Some(Milestone::HotHands));
        assert_eq!(milestone_for(19), Some(Milestone::HotHands));
        assert_eq!(milestone_for(20), Some(Milestone::Unstoppable));
        assert_eq!(milestone_for(55), Some(Milestone::Champion));
        assert_eq!(milestone_for(600), Some(Milestone::Inferno));
    }

    #[test]
    fn test_milestone_threshold_roundtrip() {
        for (threshold, milestone) in Milestone::TABLE {
            assert_eq!(milestone.threshold(), threshold);
            assert_eq!(milestone_for(threshold), Some(milestone));
            assert!(!milestone.banner().is_empty());
        }
    }

    proptest! {
        #[test]
        fn prop_difficulty_monotonic(a in 0u32..200, b in 0u32..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let easy = difficulty_for(lo);
            let hard = difficulty_for(hi);
            prop_assert!(hard.visible <= easy.visible);
            prop_assert!(hard.max_concurrent >= easy.max_concurrent);
        }

        #[test]
        fn prop_milestone_monotonic(a in 0u32..200, b in 0u32..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(milestone_for(hi) >= milestone_for(lo));
        }
    }
}
