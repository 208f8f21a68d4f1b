use std::time::Duration;

use mole_rush::Tuning;
use mole_rush::sim::{GameEvent, GamePhase, Milestone, Session, difficulty_for};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Advance 1ms at a time until `pred` matches an emitted event, returning the
/// virtual time it fired at
fn run_until(
    session: &mut Session,
    limit: Duration,
    pred: impl Fn(&GameEvent) -> bool,
) -> Option<Duration> {
    while session.now() < limit {
        session.advance(ms(1));
        if session.drain_events().iter().any(&pred) {
            return Some(session.now());
        }
    }
    None
}

/// Tap every mole that is up
fn whack_all(session: &mut Session) -> u32 {
    let up: Vec<usize> = session.active().iter().collect();
    up.into_iter().filter(|&slot| session.on_tap(slot)).count() as u32
}

#[test]
fn first_cycle_end_to_end() {
    let mut session = Session::new(2024);
    session.start_game();

    let up = run_until(&mut session, ms(1000), |e| {
        matches!(e, GameEvent::MolesUp { slots, visible }
            if slots.len() == 1 && *visible == ms(1200))
    });
    assert_eq!(up, Some(ms(500)));
    assert_eq!(session.active().len(), 1);

    let down = run_until(&mut session, ms(3000), |e| *e == GameEvent::MolesDown);
    assert_eq!(down, Some(ms(1700)));
    assert!(session.active().is_empty());

    let next = run_until(&mut session, ms(3000), |e| {
        matches!(e, GameEvent::MolesUp { .. })
    })
    .expect("second wave");
    assert!(next >= ms(1900) && next <= ms(2300), "next wave at {next:?}");
}

#[test]
fn stop_cancels_pending_cycle() {
    let mut session = Session::new(77);
    session.start_game();
    session.advance(ms(500));
    assert!(!session.active().is_empty());

    session.reset_game();
    assert_eq!(session.phase(), GamePhase::Idle);
    assert!(!session.is_spawning());
    assert!(session.active().is_empty());
    session.drain_events();

    // Well past where the next cycle and the old clear would have fired
    for _ in 0..100 {
        session.advance(ms(50));
        assert!(session.active().is_empty());
    }
    assert!(session.drain_events().is_empty());
}

#[test]
fn double_tap_scores_once() {
    let mut session = Session::new(5);
    session.start_game();
    session.advance(ms(500));
    let slot = session.active().iter().next().expect("a mole is up");

    assert!(session.on_tap(slot));
    assert!(!session.on_tap(slot));
    session.advance(ms(10));
    assert!(!session.on_tap(slot));
    assert_eq!(session.score(), 1);
}

#[test]
fn active_set_stays_within_tier_and_board() {
    let mut session = Session::new(31337);
    session.start_game();

    for step in 0..20_000u32 {
        session.advance(ms(7));
        let cap = difficulty_for(session.score()).max_concurrent;
        let active = session.active();
        assert!(active.len() <= cap, "step {step}: {} > {cap}", active.len());
        assert!(active.iter().all(|slot| slot < session.state().slot_count()));

        if step % 3 == 0 {
            whack_all(&mut session);
        }
    }
    assert!(session.score() > 60, "bot should reach the top tier");
}

#[test]
fn milestone_shown_on_crossing_only() {
    let mut session = Session::new(99);
    session.start_game();

    let mut banners = Vec::new();
    while session.score() < 25 {
        session.advance(ms(10));
        whack_all(&mut session);
        for event in session.drain_events() {
            if let GameEvent::MilestoneReached(m) = event {
                banners.push((session.score(), m));
            }
        }
    }

    let kinds: Vec<Milestone> = banners.iter().map(|(_, m)| *m).collect();
    assert_eq!(kinds, vec![Milestone::HotHands, Milestone::Unstoppable]);
    assert_eq!(session.shown_milestone(), Some(Milestone::Unstoppable));
}

#[test]
fn reset_clears_score_and_banner() {
    let mut session = Session::new(4);
    session.start_game();
    while session.score() < 12 {
        session.advance(ms(10));
        whack_all(&mut session);
    }
    assert!(session.shown_milestone().is_some());

    session.reset_game();
    assert_eq!(session.score(), 0);
    assert_eq!(session.shown_milestone(), None);
    assert_eq!(session.snapshot().milestone, None);

    session.start_game();
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn same_seed_same_game() {
    fn play(seed: u64) -> (u32, Vec<GameEvent>) {
        let mut session = Session::new(seed);
        session.start_game();
        let mut log = Vec::new();
        for step in 0..3_000u32 {
            session.advance(ms(13));
            if step % 4 == 0 {
                whack_all(&mut session);
            }
            log.extend(session.drain_events());
        }
        (session.score(), log)
    }

    assert_eq!(play(123), play(123));
}

#[test]
fn short_layout_is_tolerated() {
    let tuning = Tuning {
        layout_attempts: 2,
        ..Tuning::default()
    };
    let mut session = Session::with_tuning(8, tuning);
    session.start_game();
    let holes = session.state().slot_count();
    assert!((1..=2).contains(&holes));

    for _ in 0..500 {
        session.advance(ms(20));
        assert!(session.active().iter().all(|slot| slot < holes));
        whack_all(&mut session);
    }
}
