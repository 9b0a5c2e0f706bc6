//! Browser bindings
//!
//! A thin wasm-bindgen wrapper so a JS page can pump frames, forward input
//! and read back what to draw. Drawing itself stays in JS.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{ControlCommand, Controls, FrameClock, Key, LocalStorageStore};
use crate::game::Game;
use crate::sim::{Diamond, Platform, PowerUpKind, RunPhase};
use crate::tuning::Tuning;

/// Everything the renderer needs for one frame
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    phase: RunPhase,
    player: [f32; 4],
    player_color: u32,
    platforms: &'a [Platform],
    diamonds: &'a [Diamond],
    score: f64,
    coins: u64,
    level: u32,
    diamonds_collected: u32,
    high_score: f64,
    boots: bool,
    jetpack: bool,
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
    clock: FrameClock,
    controls: Controls,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        WebGame {
            game: Game::new(LocalStorageStore::default(), Tuning::default(), seed),
            clock: FrameClock::new(),
            controls: Controls::default(),
        }
    }

    pub fn start_run(&mut self, width: f32, height: f32) {
        self.clock.reset();
        self.game.restart(width, height);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.set_viewport(width, height);
    }

    /// Call from `requestAnimationFrame` with its timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.frame(now_ms);
        self.game.tick(dt);
    }

    pub fn key_down(&mut self, key: &str) {
        match self.controls.key_down(Key::from_dom(key)) {
            Some(ControlCommand::Pause) => self.game.pause(),
            Some(ControlCommand::TogglePause) => self.game.toggle_pause(),
            None => {}
        }
        self.sync_input();
    }

    pub fn key_up(&mut self, key: &str) {
        self.controls.key_up(Key::from_dom(key));
        self.sync_input();
    }

    pub fn touch_start(&mut self, x: f32, screen_width: f32) {
        if self.game.phase() != RunPhase::Running {
            return;
        }
        self.controls.touch_start(x, screen_width);
        self.sync_input();
    }

    pub fn touch_end(&mut self) {
        self.controls.touch_end();
        self.sync_input();
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.clock.reset();
        self.game.resume();
    }

    /// Returns an error message, or an empty string on success
    pub fn buy(&mut self, item: &str) -> String {
        let kind = match item {
            "boots" => PowerUpKind::Boots,
            "jetpack" => PowerUpKind::Jetpack,
            _ => return format!("unknown item: {item}"),
        };
        match self.game.buy(kind) {
            Ok(()) => String::new(),
            Err(err) => err.to_string(),
        }
    }

    /// Returns the ticket code
    pub fn redeem(&mut self, player_id: &str) -> Result<String, JsValue> {
        let now = js_sys::Date::now() as u64;
        self.game
            .redeem(player_id, now)
            .map(|ticket| ticket.code)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Render state as JSON
    pub fn snapshot(&self) -> String {
        let player = self.game.player();
        let active = self.game.active_power_ups();
        let snapshot = Snapshot {
            phase: self.game.phase(),
            player: [player.pos.x, player.pos.y, player.size.x, player.size.y],
            player_color: player.color,
            platforms: self.game.platforms(),
            diamonds: self.game.diamonds(),
            score: self.game.score(),
            coins: self.game.coins(),
            level: self.game.level(),
            diamonds_collected: self.game.diamonds_collected(),
            high_score: self.game.high_score(),
            boots: active.boots,
            jetpack: active.jetpack,
        };
        serde_json::to_string(&snapshot).unwrap_or_default()
    }
}

impl WebGame {
    fn sync_input(&mut self) {
        let input = self.controls.tick_input();
        self.game.set_input(input.left, input.right);
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
