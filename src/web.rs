//! Browser bridge
//!
//! The host page owns rendering and input. It calls `frame` from its
//! `requestAnimationFrame` loop with `performance.now()`, forwards taps by
//! hole index, and redraws from the JSON snapshot.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::sim::{GameEvent, Session};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Mole Rush loaded");
}

/// One game board exposed to JavaScript
#[wasm_bindgen]
pub struct MoleRush {
    session: Session,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl MoleRush {
    /// Create an idle board seeded from the wall clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> MoleRush {
        let seed = js_sys::Date::now() as u64;
        log::info!("Session created with seed: {}", seed);
        MoleRush {
            session: Session::new(seed),
            last_time: None,
        }
    }

    /// Start (or restart) a game
    pub fn start(&mut self) {
        self.session.start_game();
    }

    /// Abort to the start overlay
    pub fn reset(&mut self) {
        self.session.reset_game();
    }

    /// Forward a tap on hole `slot`; true if it scored
    pub fn tap(&mut self, slot: usize) -> bool {
        self.session.on_tap(slot)
    }

    /// Advance the game clock to `now_ms` (a `performance.now()` reading)
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_time {
            Some(last) if now_ms > last => now_ms - last,
            _ => 0.0,
        };
        self.last_time = Some(now_ms);
        if dt > 0.0 {
            self.session.advance(Duration::from_secs_f64(dt / 1000.0));
        }
    }

    /// Board state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Banner text of milestones reached since the last call, as a JSON array
    pub fn take_banners(&mut self) -> Result<String, JsValue> {
        let banners: Vec<&str> = self
            .session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::MilestoneReached(m) => Some(m.banner()),
                _ => None,
            })
            .collect();
        serde_json::to_string(&banners).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for MoleRush {
    fn default() -> Self {
        Self::new()
    }
}
