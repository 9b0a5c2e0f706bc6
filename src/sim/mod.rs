//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod generator;
pub mod physics;
pub mod progression;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use generator::{create_initial_run, create_platform, platform_x_range, prune_and_generate};
pub use state::{
    Diamond, GameEvent, GameState, Platform, Player, PowerUpKind, PowerUps, RunPhase, RunState,
    Viewport,
};
pub use tick::{TickInput, tick};
