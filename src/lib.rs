//! Infinite Jump - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation, progression)
//! - `game`: Run lifecycle, economy and persistence on top of the simulation
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Saved progress with fault-tolerant load/save
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{Game, RedeemError, RedeemTicket, RunSummary, ShopError};
pub use tuning::Tuning;

/// Fixed cosmetic constants
pub mod consts {
    /// Player color (`#00ffff`)
    pub const PLAYER_COLOR: u32 = 0x00ffff;
    /// Color of the platform a run starts on
    pub const INITIAL_PLATFORM_COLOR: u32 = 0x00ffff;
    /// Generated platforms pick one of these at random
    pub const PLATFORM_PALETTE: [u32; 5] = [0x00ffff, 0x0080ff, 0x00ff80, 0xff00ff, 0xff8000];
    pub const DIAMOND_COLOR: u32 = 0xff3366;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Infinite Jump starting...");
}
