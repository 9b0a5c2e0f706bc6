//! Saved progress and the storage it lives in
//!
//! Progress is a small JSON document (coins, level, high score, power-ups).
//! Storage is best-effort: unreadable data means "no prior data" and failed
//! writes are logged and otherwise ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PowerUps;

/// Key (or file stem) the progress document is stored under
pub const STORAGE_KEY: &str = "infiniteJumpData";

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// Progress that outlives a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedProgress {
    pub coins: u64,
    /// Level reached in the most recent run
    pub level: u32,
    /// Best score in meters
    pub high_score: f64,
    pub power_ups: PowerUps,
}

impl Default for SavedProgress {
    fn default() -> Self {
        Self {
            coins: 0,
            level: 1,
            high_score: 0.0,
            power_ups: PowerUps::default(),
        }
    }
}

/// Somewhere to keep the serialized progress document
pub trait ProgressStore {
    /// Read the raw document; `Ok(None)` if nothing has been saved yet
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// Replace the raw document
    fn write(&mut self, data: &str) -> Result<(), StoreError>;
}

/// Load progress, falling back to defaults on any failure
pub fn load_progress<S: ProgressStore + ?Sized>(store: &S) -> SavedProgress {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::info!("No saved progress found, starting fresh");
            return SavedProgress::default();
        }
        Err(err) => {
            log::warn!("Could not read saved progress ({err}), starting fresh");
            return SavedProgress::default();
        }
    };

    match serde_json::from_str::<SavedProgress>(&raw) {
        Ok(progress) => {
            log::info!(
                "Loaded progress: {} coins, level {}, best {:.0} m",
                progress.coins,
                progress.level,
                progress.high_score
            );
            progress.sanitized()
        }
        Err(err) => {
            log::warn!("Saved progress is corrupt ({err}), starting fresh");
            SavedProgress::default()
        }
    }
}

/// Save progress; failures are logged and swallowed
pub fn save_progress<S: ProgressStore + ?Sized>(store: &mut S, progress: &SavedProgress) {
    let json = match serde_json::to_string(progress) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Could not serialize progress: {err}");
            return;
        }
    };
    match store.write(&json) {
        Ok(()) => log::debug!("Progress saved ({} coins)", progress.coins),
        Err(err) => log::warn!("Could not save progress: {err}"),
    }
}

impl SavedProgress {
    /// Level 0 and non-finite or negative high scores can't come from a real run
    fn sanitized(mut self) -> Self {
        self.level = self.level.max(1);
        if !(self.high_score.is_finite() && self.high_score >= 0.0) {
            self.high_score = 0.0;
        }
        self
    }
}

/// In-memory store, handy for tests and headless runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub data: Option<String>,
    /// Reject every write, to exercise the failure path
    pub fail_writes: bool,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }
}

impl ProgressStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, data: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Rejected("quota exceeded".to_string()));
        }
        self.data = Some(data.to_string());
        self.writes += 1;
        Ok(())
    }
}
