//! Game state and core simulation types
//!
//! Entities are plain records; all behavior lives in the sibling modules.
//! Screen space: origin top-left, y grows downward.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run has been started yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Ticks are gated; entity state is frozen
    Paused,
    /// Player fell off the bottom; terminal until the next run
    Ended,
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Build a viewport, replacing negative or non-finite dimensions with zero
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let viewport = Self {
            width: sanitize(width),
            height: sanitize(height),
        };
        if viewport.width != width || viewport.height != height {
            log::warn!(
                "Degenerate viewport {}x{} clamped to {}x{}",
                width,
                height,
                viewport.width,
                viewport.height
            );
        }
        viewport
    }

    /// Entities whose y reaches this line are off-screen for good
    #[inline]
    pub fn despawn_line(&self, tuning: &Tuning) -> f32 {
        self.height + tuning.despawn_margin
    }
}

/// The bouncing player figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    /// Vertical velocity set on landing (negative = upward)
    pub jump_impulse: f32,
    pub color: u32,
}

impl Player {
    /// Place a fresh player horizontally centered, `player_start_offset` above the bottom
    pub fn spawn(tuning: &Tuning, viewport: Viewport, boots: bool) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - size.x / 2.0,
                viewport.height - tuning.player_start_offset,
            ),
            size,
            vel: Vec2::ZERO,
            speed: tuning.player_speed,
            jump_impulse: if boots {
                tuning.boots_jump_impulse
            } else {
                tuning.jump_impulse
            },
            color: PLAYER_COLOR,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A platform the player can bounce on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

impl Platform {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A collectible diamond, spawned above a platform
///
/// Diamonds are positioned once from their platform and then scrolled
/// independently by the same per-tick delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diamond {
    pub id: u32,
    /// Platform this diamond was spawned on
    pub platform_id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
    pub color: u32,
}

impl Diamond {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }
}

/// Purchasable upgrades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUps {
    /// Stronger jump impulse
    pub boots: bool,
    /// Boosted jump every few landings
    pub jetpack: bool,
}

/// Which power-up to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Boots,
    Jetpack,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Boots => "boots",
            PowerUpKind::Jetpack => "jetpack",
        }
    }
}

impl PowerUps {
    pub fn owns(&self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Boots => self.boots,
            PowerUpKind::Jetpack => self.jetpack,
        }
    }

    pub fn grant(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Boots => self.boots = true,
            PowerUpKind::Jetpack => self.jetpack = true,
        }
    }
}

/// Per-run progression and economy counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Total scrolled distance (monotonic)
    pub distance_counter: f64,
    /// Persistent currency, carried across runs
    pub coins: u64,
    /// Starts at 1, never decreases within a run
    pub level: u32,
    /// Last score (meters) a milestone reward was granted at
    pub last_coin_distance: u64,
    pub diamonds_collected: u32,
    /// Landings since the last jetpack boost
    pub jetpack_counter: u32,
    /// Vertical spacing the generator keeps between platforms
    pub platform_gap: f32,
    /// Scroll speed multiplier
    pub game_speed: f32,
}

impl RunState {
    pub fn new(tuning: &Tuning, coins: u64) -> Self {
        Self {
            distance_counter: 0.0,
            coins,
            level: 1,
            last_coin_distance: 0,
            diamonds_collected: 0,
            jetpack_counter: 0,
            platform_gap: tuning.initial_platform_gap,
            game_speed: 1.0,
        }
    }

    /// Score in meters, derived from the distance counter
    #[inline]
    pub fn score(&self, tuning: &Tuning) -> f64 {
        self.distance_counter / tuning.distance_per_meter
    }
}

/// Things that happened during a tick, for sound/UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed { platform_id: u32, boosted: bool },
    DiamondCollected { diamond_id: u32, coins: u64 },
    MilestoneReward { coins: u64, meters: u64 },
    LevelUp { level: u32 },
    PlatformSpawned { platform_id: u32, with_diamond: bool },
    GameOver { score: f64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: RunPhase,
    pub player: Player,
    /// Generation order; the landing scan relies on it
    pub platforms: Vec<Platform>,
    pub diamonds: Vec<Diamond>,
    pub power_ups: PowerUps,
    pub run: RunState,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle state (no run started) carrying the given coin balance
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, coins: u64) -> Self {
        let player = Player::spawn(&tuning, viewport, false);
        let run = RunState::new(&tuning, coins);
        Self {
            seed,
            tuning,
            viewport,
            phase: RunPhase::NotStarted,
            player,
            platforms: Vec::new(),
            diamonds: Vec::new(),
            power_ups: PowerUps::default(),
            run,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset entities and run counters and seed the opening platforms.
    /// Coins survive; everything else starts over.
    pub fn start_run(&mut self, viewport: Viewport, power_ups: PowerUps) {
        self.viewport = viewport;
        self.power_ups = power_ups;
        self.player = Player::spawn(&self.tuning, viewport, power_ups.boots);
        self.platforms.clear();
        self.diamonds.clear();
        self.events.clear();
        self.run = RunState::new(&self.tuning, self.run.coins);

        super::generator::create_initial_run(self);

        self.phase = RunPhase::Running;
        log::info!(
            "Run started: viewport {}x{}, boots={}, jetpack={}",
            viewport.width,
            viewport.height,
            power_ups.boots,
            power_ups.jetpack
        );
    }

    /// Current score in meters
    #[inline]
    pub fn score(&self) -> f64 {
        self.run.score(&self.tuning)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
