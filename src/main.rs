//! Mole Rush entry point
//!
//! On the web the library's `wasm_start` hook runs instead; natively this
//! plays a headless demo round with a simple bot and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mole Rush (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::Duration;

    use mole_rush::sim::{GameEvent, Session};

    /// Virtual length of the demo round
    const ROUND: Duration = Duration::from_secs(60);
    /// Bot reaction time between looks at the board
    const FRAME: Duration = Duration::from_millis(16);
    /// The bot whiffs on every n-th mole it sees
    const MISS_EVERY: u32 = 4;

    pub fn run(seed: u64) {
        let mut session = Session::new(seed);
        session.start_game();

        let mut seen = 0u32;
        let mut waves = 0u32;
        while session.now() < ROUND {
            session.advance(FRAME);

            let up: Vec<usize> = session.active().iter().collect();
            for slot in up {
                if !session.is_tappable(slot) {
                    continue;
                }
                seen += 1;
                if seen % MISS_EVERY != 0 {
                    session.on_tap(slot);
                }
            }

            for event in session.drain_events() {
                match event {
                    GameEvent::MolesUp { .. } => waves += 1,
                    GameEvent::MilestoneReached(m) => println!("{}", m.banner()),
                    _ => {}
                }
            }
        }

        let difficulty = session.difficulty();
        log::info!(
            "Round over: score {} after {} waves (tier: {:?} visible, up to {} moles)",
            session.score(),
            waves,
            difficulty.visible,
            difficulty.max_concurrent
        );

        match session.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }

        session.reset_game();
    }
}
