//! Axis-aligned rectangle collision
//!
//! Two queries drive the game: which platform (if any) the player lands on,
//! and which diamonds the player touches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Diamond, Platform};

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other)
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }

    /// Strict horizontal overlap
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.min.x < other.max().x && self.max().x > other.min.x
    }
}

/// Find the platform the player lands on this tick.
///
/// A platform qualifies when the player is falling (`vel_y > 0`), its bottom
/// edge is within `tolerance` of the platform top (inclusive), and the two
/// overlap horizontally. Platforms are scanned in storage (generation) order
/// and the first match wins, so when two platforms share the landing band
/// the older one is chosen.
pub fn find_landing(
    player: &Rect,
    vel_y: f32,
    platforms: &[Platform],
    tolerance: f32,
) -> Option<usize> {
    if vel_y <= 0.0 {
        return None;
    }
    let bottom = player.max().y;
    platforms.iter().position(|platform| {
        let top = platform.pos.y;
        bottom <= top + tolerance && bottom >= top - tolerance && player.overlaps_x(&platform.rect())
    })
}

/// Indices of uncollected diamonds the player overlaps
pub fn touched_diamonds(player: &Rect, diamonds: &[Diamond]) -> Vec<usize> {
    diamonds
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.collected && player.overlaps(&d.rect()))
        .map(|(i, _)| i)
        .collect()
}
