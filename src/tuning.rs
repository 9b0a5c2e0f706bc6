//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed while a direction is held (px per tick)
    pub player_speed: f32,
    /// Upward velocity applied on landing (negative = up)
    pub jump_impulse: f32,
    /// Jump impulse when the boots power-up is owned
    pub boots_jump_impulse: f32,
    /// Player spawns this far above the bottom edge
    pub player_start_offset: f32,
    /// Per-tick horizontal velocity decay when no direction is held
    pub horizontal_damping: f32,
    pub gravity: f32,

    // === Jetpack ===
    /// Landings per jetpack boost
    pub jetpack_cadence: u32,
    pub jetpack_boost: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub initial_platforms: u32,
    pub initial_platform_gap: f32,
    pub min_platform_gap: f32,
    pub max_platform_gap: f32,
    pub gap_per_level: f32,
    /// Platforms never spawn closer than this to either screen edge
    pub edge_margin: f32,
    /// y coordinate of freshly generated platforms
    pub spawn_y: f32,
    /// Entities below `viewport height + despawn_margin` are recycled
    pub despawn_margin: f32,
    /// Vertical slack for the landing test (± px around the platform top)
    pub landing_tolerance: f32,

    // === Diamonds ===
    pub diamond_size: f32,
    /// Gap between a diamond's bottom and its platform's top
    pub diamond_lift: f32,
    pub diamond_chance: f64,
    pub diamond_coins: u64,

    // === Progression ===
    /// Scroll distance per reference frame at speed multiplier 1.0
    pub scroll_speed: f32,
    /// Frame duration the scroll speed is calibrated against
    pub reference_frame_ms: f32,
    /// Distance units per meter of score
    pub distance_per_meter: f64,
    pub meters_per_level: f64,
    pub speed_per_level: f32,
    pub milestone_meters: u64,
    pub milestone_coins: u64,

    // === Economy ===
    pub boots_cost: u64,
    pub jetpack_cost: u64,
    pub redeem_cost: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 35.0,
            player_height: 50.0,
            player_speed: 7.0,
            jump_impulse: -13.0,
            boots_jump_impulse: -16.9,
            player_start_offset: 150.0,
            horizontal_damping: 0.9,
            gravity: 0.4,

            jetpack_cadence: 3,
            jetpack_boost: 1.5,

            platform_width: 90.0,
            platform_height: 18.0,
            initial_platforms: 5,
            initial_platform_gap: 180.0,
            min_platform_gap: 140.0,
            max_platform_gap: 350.0,
            gap_per_level: 18.0,
            edge_margin: 40.0,
            spawn_y: -40.0,
            despawn_margin: 100.0,
            landing_tolerance: 5.0,

            diamond_size: 22.0,
            diamond_lift: 8.0,
            diamond_chance: 0.3,
            diamond_coins: 5,

            scroll_speed: 2.8,
            reference_frame_ms: 16.0,
            distance_per_meter: 10.0,
            meters_per_level: 500.0,
            speed_per_level: 0.08,
            milestone_meters: 100,
            milestone_coins: 2,

            boots_cost: 100,
            jetpack_cost: 250,
            redeem_cost: 1000,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("diamond_size", self.diamond_size),
            ("reference_frame_ms", self.reference_frame_ms),
            ("min_platform_gap", self.min_platform_gap),
            ("initial_platform_gap", self.initial_platform_gap),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if self.jump_impulse >= 0.0 || self.boots_jump_impulse >= 0.0 {
            return Err(TuningError::Invalid {
                field: "jump_impulse",
                reason: "jump impulses point upward and must be negative",
            });
        }
        if self.max_platform_gap < self.min_platform_gap {
            return Err(TuningError::Invalid {
                field: "max_platform_gap",
                reason: "must not be smaller than min_platform_gap",
            });
        }
        if !(0.0..=1.0).contains(&self.diamond_chance) {
            return Err(TuningError::Invalid {
                field: "diamond_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.jetpack_cadence == 0 {
            return Err(TuningError::Invalid {
                field: "jetpack_cadence",
                reason: "must be at least 1",
            });
        }
        if self.milestone_meters == 0 {
            return Err(TuningError::Invalid {
                field: "milestone_meters",
                reason: "must be at least 1",
            });
        }
        if !(self.distance_per_meter > 0.0 && self.meters_per_level > 0.0) {
            return Err(TuningError::Invalid {
                field: "distance_per_meter",
                reason: "distance and level scales must be positive",
            });
        }
        Ok(())
    }

    /// Platform gap for a given level
    pub fn platform_gap_for_level(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.min_platform_gap + steps * self.gap_per_level).min(self.max_platform_gap)
    }

    /// Scroll speed multiplier for a given level
    pub fn game_speed_for_level(&self, level: u32) -> f32 {
        1.0 + level.saturating_sub(1) as f32 * self.speed_per_level
    }
}
