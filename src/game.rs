//! Game facade
//!
//! Wraps the pure simulation with everything that outlives a run: coins,
//! high score, purchased power-ups and the store they are saved to.
//! Presentation layers drive it through `start_run`/`set_input`/`tick` and
//! read back through the accessors.

use rand::Rng;
use thiserror::Error;

use crate::persistence::{ProgressStore, SavedProgress, load_progress, save_progress};
use crate::sim::{
    Diamond, GameEvent, GameState, Platform, Player, PowerUpKind, PowerUps, RunPhase, TickInput,
    Viewport, tick,
};
use crate::tuning::Tuning;

/// Why a purchase was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("{} is already owned", .0.as_str())]
    AlreadyOwned(PowerUpKind),
    #[error("need {cost} coins, have {balance}")]
    InsufficientCoins { cost: u64, balance: u64 },
}

/// Why a redemption was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedeemError {
    #[error("a player id is required")]
    MissingPlayerId,
    #[error("need {cost} coins, have {balance}")]
    InsufficientCoins { cost: u64, balance: u64 },
}

/// Proof of a coin redemption, to be handed to whoever pays out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemTicket {
    pub player_id: String,
    pub code: String,
    pub coins: u64,
}

/// Outcome of the last finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub score: f64,
    pub level: u32,
    pub diamonds: u32,
    pub new_record: bool,
}

pub struct Game<S: ProgressStore> {
    state: GameState,
    store: S,
    input: TickInput,
    high_score: f64,
    power_ups: PowerUps,
    /// What the store currently holds, to skip redundant writes
    saved: SavedProgress,
    last_run: Option<RunSummary>,
}

impl<S: ProgressStore> Game<S> {
    /// Load saved progress from `store` and prepare an idle game
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let saved = load_progress(&store);
        let mut state = GameState::new(seed, tuning, Viewport::new(0.0, 0.0), saved.coins);
        state.run.level = saved.level;
        Self {
            state,
            store,
            input: TickInput::default(),
            high_score: saved.high_score,
            power_ups: saved.power_ups,
            saved,
            last_run: None,
        }
    }

    /// Start a fresh run. `boots` selects the stronger jump; the jetpack
    /// applies whenever it is owned.
    pub fn start_run(&mut self, width: f32, height: f32, boots: bool) {
        let power_ups = PowerUps {
            boots,
            jetpack: self.power_ups.jetpack,
        };
        self.last_run = None;
        self.state.start_run(Viewport::new(width, height), power_ups);
    }

    /// Start a fresh run with every owned power-up
    pub fn restart(&mut self, width: f32, height: f32) {
        self.start_run(width, height, self.power_ups.boots);
    }

    /// Held directions, sampled on the next tick
    pub fn set_input(&mut self, left: bool, right: bool) {
        self.input = TickInput { left, right };
    }

    /// Latest viewport size; used for generation bounds and pruning from the next tick
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        self.state.viewport = viewport;
        if self.state.phase == RunPhase::NotStarted {
            self.state.player = Player::spawn(&self.state.tuning, viewport, self.power_ups.boots);
        }
    }

    pub fn pause(&mut self) {
        if self.state.phase == RunPhase::Running {
            self.state.phase = RunPhase::Paused;
            log::info!("Paused at {:.0} m", self.state.score());
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == RunPhase::Paused {
            self.state.phase = RunPhase::Running;
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Advance one frame of `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if self.state.phase != RunPhase::Running {
            return;
        }
        tick(&mut self.state, &self.input, dt_ms);
        if self.state.phase == RunPhase::Ended {
            self.finish_run();
        }
        self.persist_if_changed();
    }

    fn finish_run(&mut self) {
        let score = self.state.score();
        let new_record = score > self.high_score;
        if new_record {
            self.high_score = score;
            log::info!("New record: {:.0} m", score);
        }
        self.last_run = Some(RunSummary {
            score,
            level: self.state.run.level,
            diamonds: self.state.run.diamonds_collected,
            new_record,
        });
    }

    fn current_progress(&self) -> SavedProgress {
        SavedProgress {
            coins: self.state.run.coins,
            level: self.state.run.level,
            high_score: self.high_score,
            power_ups: self.power_ups,
        }
    }

    fn persist_if_changed(&mut self) {
        let progress = self.current_progress();
        if progress != self.saved {
            save_progress(&mut self.store, &progress);
            self.saved = progress;
        }
    }

    /// Buy a power-up with coins
    pub fn buy(&mut self, kind: PowerUpKind) -> Result<(), ShopError> {
        if self.power_ups.owns(kind) {
            return Err(ShopError::AlreadyOwned(kind));
        }
        let cost = match kind {
            PowerUpKind::Boots => self.state.tuning.boots_cost,
            PowerUpKind::Jetpack => self.state.tuning.jetpack_cost,
        };
        let balance = self.state.run.coins;
        if balance < cost {
            return Err(ShopError::InsufficientCoins { cost, balance });
        }

        self.state.run.coins -= cost;
        self.power_ups.grant(kind);
        log::info!("Bought {} for {} coins", kind.as_str(), cost);
        self.persist_if_changed();
        Ok(())
    }

    /// Trade coins for a prize ticket
    pub fn redeem(&mut self, player_id: &str, timestamp_ms: u64) -> Result<RedeemTicket, RedeemError> {
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(RedeemError::MissingPlayerId);
        }
        let cost = self.state.tuning.redeem_cost;
        let balance = self.state.run.coins;
        if balance < cost {
            return Err(RedeemError::InsufficientCoins { cost, balance });
        }

        self.state.run.coins -= cost;
        let ticket = RedeemTicket {
            player_id: player_id.to_string(),
            code: ticket_code(timestamp_ms, &mut rand::rng()),
            coins: cost,
        };
        log::info!("Redeemed {} coins for {}: {}", cost, ticket.player_id, ticket.code);
        self.persist_if_changed();
        Ok(ticket)
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.state.platforms
    }

    pub fn diamonds(&self) -> &[Diamond] {
        &self.state.diamonds
    }

    pub fn score(&self) -> f64 {
        self.state.score()
    }

    pub fn coins(&self) -> u64 {
        self.state.run.coins
    }

    pub fn level(&self) -> u32 {
        self.state.run.level
    }

    pub fn diamonds_collected(&self) -> u32 {
        self.state.run.diamonds_collected
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    /// Owned power-ups
    pub fn power_ups(&self) -> PowerUps {
        self.power_ups
    }

    /// Power-ups in effect for the current run
    pub fn active_power_ups(&self) -> PowerUps {
        self.state.power_ups
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

/// `TICKET-` + base-36 timestamp + three random base-36 characters
fn ticket_code<R: Rng>(timestamp_ms: u64, rng: &mut R) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let suffix: String = (0..3)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect();
    format!("TICKET-{}{}", to_base36(timestamp_ms), suffix)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
