//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame timestamps to tick durations)
//! - Input (keyboard and touch to held directions)
//! - Storage (a save file natively, LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{ControlCommand, Controls, Key};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
pub use time::FrameClock;
