//! Infinite level generation with a recycling window
//!
//! Platforms are spawned above the screen one at a time whenever the topmost
//! platform has scrolled further down than the current platform gap, and
//! anything that scrolls past the bottom is dropped.

use glam::Vec2;
use rand::Rng;

use super::state::{Diamond, GameEvent, GameState, Platform};
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal spawn range for a platform's left edge.
///
/// The range never inverts: on a viewport too narrow to fit a platform plus
/// both margins it collapses to the left margin.
pub fn platform_x_range(viewport_width: f32, tuning: &Tuning) -> (f32, f32) {
    let min_x = tuning.edge_margin;
    let max_x = (viewport_width - tuning.platform_width - tuning.edge_margin).max(min_x);
    (min_x, max_x)
}

/// Seed a new run: one platform under the player's feet, then the rest
/// stacked upward one gap apart.
pub fn create_initial_run(state: &mut GameState) {
    let size = Vec2::new(state.tuning.platform_width, state.tuning.platform_height);
    let player = &state.player;
    let pos = Vec2::new(
        player.pos.x + player.size.x / 2.0 - size.x / 2.0,
        player.bottom(),
    );
    let id = state.next_entity_id();
    state.platforms.push(Platform {
        id,
        pos,
        size,
        color: INITIAL_PLATFORM_COLOR,
    });

    let mut y = pos.y;
    for _ in 1..state.tuning.initial_platforms {
        y -= state.run.platform_gap;
        create_platform(state, y);
    }
}

/// Spawn one platform at height `y` with a random x and color, and maybe a
/// diamond hovering over it. Returns the new platform's id.
pub fn create_platform(state: &mut GameState, y: f32) -> u32 {
    let (min_x, max_x) = platform_x_range(state.viewport.width, &state.tuning);
    let x = if max_x > min_x {
        state.rng.random_range(min_x..max_x)
    } else {
        min_x
    };
    let color = PLATFORM_PALETTE[state.rng.random_range(0..PLATFORM_PALETTE.len())];

    let id = state.next_entity_id();
    let platform = Platform {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(state.tuning.platform_width, state.tuning.platform_height),
        color,
    };

    let with_diamond = state.rng.random_bool(state.tuning.diamond_chance);
    if with_diamond {
        let diamond = attach_diamond(state, &platform);
        state.diamonds.push(diamond);
    }
    state.platforms.push(platform);

    log::debug!("Spawned platform {} at ({:.1}, {:.1})", id, x, y);
    state.events.push(GameEvent::PlatformSpawned {
        platform_id: id,
        with_diamond,
    });
    id
}

/// Diamond centered on the platform, floating `diamond_lift` px above its top
fn attach_diamond(state: &mut GameState, platform: &Platform) -> Diamond {
    let size = state.tuning.diamond_size;
    Diamond {
        id: state.next_entity_id(),
        platform_id: platform.id,
        pos: Vec2::new(
            platform.pos.x + platform.size.x / 2.0 - size / 2.0,
            platform.pos.y - size - state.tuning.diamond_lift,
        ),
        size,
        collected: false,
        color: DIAMOND_COLOR,
    }
}

/// Drop off-screen platforms and spent diamonds, then spawn at most one new
/// platform at the top if the gap there has grown too large.
///
/// An empty platform list always spawns.
pub fn prune_and_generate(state: &mut GameState) -> Option<u32> {
    let despawn_line = state.viewport.despawn_line(&state.tuning);
    state.platforms.retain(|p| p.pos.y < despawn_line);
    state
        .diamonds
        .retain(|d| d.pos.y < despawn_line && !d.collected);

    let topmost = state
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .reduce(f32::min);

    match topmost {
        Some(top) if top <= state.run.platform_gap => None,
        _ => {
            let spawn_y = state.tuning.spawn_y;
            Some(create_platform(state, spawn_y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{PowerUps, Viewport};

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), Viewport::new(400.0, 800.0), 0);
        state.start_run(Viewport::new(400.0, 800.0), PowerUps::default());
        state
    }

    #[test]
    fn test_initial_run_layout() {
        let state = running_state(11);
        assert_eq!(state.platforms.len(), 5);

        let first = &state.platforms[0];
        assert_eq!(first.pos, Vec2::new(155.0, 700.0));
        assert_eq!(first.color, INITIAL_PLATFORM_COLOR);
        assert_eq!(first.pos.y, state.player.bottom());

        for pair in state.platforms.windows(2) {
            assert!((pair[0].pos.y - pair[1].pos.y - 180.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_platforms_stay_inside_margins() {
        let mut state = running_state(5);
        for i in 0..200 {
            create_platform(&mut state, -(i as f32));
        }
        for platform in &state.platforms[1..] {
            assert!(platform.pos.x >= 40.0);
            assert!(platform.pos.x <= 400.0 - 90.0 - 40.0);
            assert!(PLATFORM_PALETTE.contains(&platform.color));
        }
    }

    #[test]
    fn test_diamond_attached_above_platform() {
        let mut state = running_state(2);
        state.tuning.diamond_chance = 1.0;
        let id = create_platform(&mut state, 100.0);

        let platform = state.platforms.iter().find(|p| p.id == id).unwrap();
        let diamond = state.diamonds.iter().find(|d| d.platform_id == id).unwrap();
        assert!((diamond.pos.x - (platform.pos.x + 45.0 - 11.0)).abs() < 1e-4);
        assert!((diamond.pos.y - (100.0 - 22.0 - 8.0)).abs() < 1e-4);
        assert!(!diamond.collected);
        assert_eq!(diamond.color, DIAMOND_COLOR);
    }

    #[test]
    fn test_diamond_frequency_roughly_thirty_percent() {
        let mut state = running_state(99);
        let before = state.diamonds.len();
        for _ in 0..2_000 {
            create_platform(&mut state, 0.0);
        }
        let ratio = (state.diamonds.len() - before) as f64 / 2_000.0;
        assert!((0.25..0.35).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn test_degenerate_viewport_collapses_range() {
        let tuning = Tuning::default();
        assert_eq!(platform_x_range(0.0, &tuning), (40.0, 40.0));
        assert_eq!(platform_x_range(100.0, &tuning), (40.0, 40.0));
        assert_eq!(platform_x_range(400.0, &tuning), (40.0, 270.0));

        let mut state = running_state(4);
        state.viewport = Viewport::new(0.0, 0.0);
        let id = create_platform(&mut state, 0.0);
        let platform = state.platforms.iter().find(|p| p.id == id).unwrap();
        assert_eq!(platform.pos.x, 40.0);
    }

    #[test]
    fn test_prune_removes_offscreen_and_collected() {
        let mut state = running_state(8);
        state.tuning.diamond_chance = 1.0;
        create_platform(&mut state, 0.0);
        create_platform(&mut state, 50.0);
        state.platforms[0].pos.y = 900.0;
        state.diamonds[0].collected = true;
        state.diamonds[1].pos.y = 950.0;

        prune_and_generate(&mut state);
        assert!(state.platforms.iter().all(|p| p.pos.y < 900.0));
        assert!(state.diamonds.iter().all(|d| !d.collected && d.pos.y < 900.0));
    }

    #[test]
    fn test_generation_is_deficit_driven() {
        let mut state = running_state(6);
        // Topmost platform sits at -20: no deficit
        assert_eq!(prune_and_generate(&mut state), None);

        for platform in &mut state.platforms {
            platform.pos.y += 250.0;
        }
        let count = state.platforms.len();
        let spawned = prune_and_generate(&mut state).expect("gap too large, should spawn");
        let platform = state.platforms.iter().find(|p| p.id == spawned).unwrap();
        assert_eq!(platform.pos.y, -40.0);
        // Exactly one per call, even though the gap is huge
        assert_eq!(state.platforms.len(), count);
    }

    #[test]
    fn test_topmost_within_gap_after_generation() {
        let mut state = running_state(12);
        for shift in [0.0, 50.0, 200.0, 400.0, 1_000.0] {
            for platform in &mut state.platforms {
                platform.pos.y += shift;
            }
            prune_and_generate(&mut state);
            let top = state.platforms.iter().map(|p| p.pos.y).reduce(f32::min).unwrap();
            assert!(top <= state.run.platform_gap);
        }
    }

    #[test]
    fn test_empty_platform_list_generates() {
        let mut state = running_state(1);
        state.platforms.clear();
        assert!(prune_and_generate(&mut state).is_some());
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.platforms[0].pos.y, -40.0);
    }
}
