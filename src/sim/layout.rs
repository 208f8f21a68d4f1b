//! Hole layout generation
//!
//! Holes are placed by rejection sampling inside the playable sub-rectangle.
//! The attempt budget is finite, so a crowded request can come back short;
//! callers treat the returned length as the real slot count.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::separation;

/// Where a hole sits on the play surface, in percent of width/height
pub type Position = Vec2;

/// Sample up to `count` holes with the default spacing and attempt budget
pub fn generate_layout<R: Rng>(rng: &mut R, count: usize) -> Vec<Position> {
    generate_layout_with(rng, count, MIN_SEPARATION, LAYOUT_ATTEMPTS)
}

/// Sample up to `count` holes, each at least `min_separation` from every
/// other accepted hole, spending at most `attempts` candidates.
///
/// Returns fewer than `count` holes when the budget runs out first.
pub fn generate_layout_with<R: Rng>(
    rng: &mut R,
    count: usize,
    min_separation: f32,
    attempts: u32,
) -> Vec<Position> {
    let mut holes: Vec<Position> = Vec::with_capacity(count);
    let mut tries = 0;

    while holes.len() < count && tries < attempts {
        let candidate = Vec2::new(
            LAYOUT_MIN_X + rng.random::<f32>() * LAYOUT_SPAN_X,
            LAYOUT_MIN_Y + rng.random::<f32>() * LAYOUT_SPAN_Y,
        );
        let too_close = holes
            .iter()
            .any(|&h| separation(h, candidate) < min_separation);
        if !too_close {
            holes.push(candidate);
        }
        tries += 1;
    }

    if holes.len() < count {
        log::warn!(
            "Layout budget exhausted after {} attempts: {} of {} holes placed",
            tries,
            holes.len(),
            count
        );
    }

    holes
}

/// True if `pos` lies inside the playable sub-rectangle
pub fn in_play_area(pos: Position) -> bool {
    (LAYOUT_MIN_X..=LAYOUT_MIN_X + LAYOUT_SPAN_X).contains(&pos.x)
        && (LAYOUT_MIN_Y..=LAYOUT_MIN_Y + LAYOUT_SPAN_Y).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_layout_is_full() {
        let mut rng = Pcg32::seed_from_u64(7);
        let holes = generate_layout(&mut rng, SLOT_COUNT);
        assert_eq!(holes.len(), SLOT_COUNT);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(generate_layout(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_tiny_budget_comes_back_short() {
        let mut rng = Pcg32::seed_from_u64(42);
        let holes = generate_layout_with(&mut rng, SLOT_COUNT, MIN_SEPARATION, 3);
        assert!(holes.len() <= 3);
        assert!(!holes.is_empty(), "first candidate is always accepted");
    }

    #[test]
    fn test_impossible_spacing_returns_single_hole() {
        // Nothing in the play area is 200 units from anything else
        let mut rng = Pcg32::seed_from_u64(3);
        let holes = generate_layout_with(&mut rng, SLOT_COUNT, 200.0, LAYOUT_ATTEMPTS);
        assert_eq!(holes.len(), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_layout(&mut Pcg32::seed_from_u64(99), SLOT_COUNT);
        let b = generate_layout(&mut Pcg32::seed_from_u64(99), SLOT_COUNT);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_layout_spacing_and_bounds(seed in any::<u64>(), count in 0usize..=SLOT_COUNT) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let holes = generate_layout(&mut rng, count);
            prop_assert!(holes.len() <= count);
            for (i, a) in holes.iter().enumerate() {
                prop_assert!(in_play_area(*a), "hole {} out of bounds: {:?}", i, a);
                for b in &holes[i + 1..] {
                    prop_assert!(separation(*a, *b) >= MIN_SEPARATION);
                }
            }
        }
    }
}
