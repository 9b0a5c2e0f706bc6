//! Player motion and collision response
//!
//! Velocities are in pixels per tick; integration is plain Euler with no
//! substeps.

use super::collision::{find_landing, touched_diamonds};
use super::state::{GameEvent, GameState, Player};
use super::tick::TickInput;

/// Set horizontal velocity from held directions, or let it decay toward rest
pub fn apply_controls(player: &mut Player, input: &TickInput, damping: f32) {
    if input.left {
        player.vel.x = -player.speed;
    } else if input.right {
        player.vel.x = player.speed;
    } else {
        player.vel.x *= damping;
    }
}

/// Apply gravity, then move by the resulting velocity
pub fn integrate(player: &mut Player, gravity: f32) {
    player.vel.y += gravity;
    player.pos += player.vel;
}

/// Keep the player inside `[0, width - player width]`, stopping dead at the walls
pub fn clamp_to_walls(player: &mut Player, viewport_width: f32) {
    let max_x = (viewport_width - player.size.x).max(0.0);
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    }
    if player.pos.x > max_x {
        player.pos.x = max_x;
        player.vel.x = 0.0;
    }
}

/// Bounce off the first qualifying platform, if any.
///
/// Only one landing can happen per tick. With the jetpack owned every
/// `jetpack_cadence`-th landing launches at `jetpack_boost` times the impulse.
pub fn resolve_landing(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    let Some(index) = find_landing(
        &state.player.rect(),
        state.player.vel.y,
        &state.platforms,
        tuning.landing_tolerance,
    ) else {
        return false;
    };

    let platform = &state.platforms[index];
    let player = &mut state.player;
    player.pos.y = platform.pos.y - player.size.y;
    player.vel.y = player.jump_impulse;

    let mut boosted = false;
    if state.power_ups.jetpack {
        state.run.jetpack_counter += 1;
        if state.run.jetpack_counter >= tuning.jetpack_cadence {
            player.vel.y = player.jump_impulse * tuning.jetpack_boost;
            state.run.jetpack_counter = 0;
            boosted = true;
        }
    }

    log::debug!("Landed on platform {} (boosted: {})", platform.id, boosted);
    state.events.push(GameEvent::Landed {
        platform_id: platform.id,
        boosted,
    });
    true
}

/// Collect every uncollected diamond the player overlaps, crediting coins at once
pub fn collect_diamonds(state: &mut GameState) -> u32 {
    let player = state.player.rect();
    let hits = touched_diamonds(&player, &state.diamonds);
    let reward = state.tuning.diamond_coins;

    for &index in &hits {
        let diamond = &mut state.diamonds[index];
        diamond.collected = true;
        state.run.diamonds_collected += 1;
        state.run.coins += reward;
        log::debug!("Collected diamond {} (+{} coins)", diamond.id, reward);
        state.events.push(GameEvent::DiamondCollected {
            diamond_id: diamond.id,
            coins: reward,
        });
    }

    hits.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Diamond, Platform, PowerUps, Viewport};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn bare_state() -> GameState {
        let mut state = GameState::new(3, Tuning::default(), Viewport::new(400.0, 800.0), 0);
        state.phase = crate::sim::RunPhase::Running;
        state
    }

    fn platform_under_player(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            pos: Vec2::new(state.player.pos.x - 20.0, state.player.bottom()),
            size: Vec2::new(90.0, 18.0),
            color: 0,
        });
        id
    }

    #[test]
    fn test_controls_and_damping() {
        let mut player = bare_state().player;
        apply_controls(&mut player, &TickInput { left: true, right: false }, 0.9);
        assert_eq!(player.vel.x, -7.0);
        apply_controls(&mut player, &TickInput { left: false, right: true }, 0.9);
        assert_eq!(player.vel.x, 7.0);
        apply_controls(&mut player, &TickInput::default(), 0.9);
        assert!((player.vel.x - 6.3).abs() < 1e-5);
        // Both held: left wins
        apply_controls(&mut player, &TickInput { left: true, right: true }, 0.9);
        assert_eq!(player.vel.x, -7.0);
    }

    #[test]
    fn test_damping_approaches_rest_without_overshoot() {
        let mut player = bare_state().player;
        player.vel.x = 7.0;
        for _ in 0..100 {
            apply_controls(&mut player, &TickInput::default(), 0.9);
            assert!(player.vel.x >= 0.0);
        }
        assert!(player.vel.x < 0.01);
    }

    #[test]
    fn test_integrate_applies_gravity_first() {
        let mut player = bare_state().player;
        let start = player.pos;
        player.vel = Vec2::new(2.0, 0.0);
        integrate(&mut player, 0.4);
        assert!((player.vel.y - 0.4).abs() < 1e-6);
        assert!((player.pos.y - (start.y + 0.4)).abs() < 1e-4);
        assert!((player.pos.x - (start.x + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_wall_clamp_is_inelastic() {
        let mut player = bare_state().player;
        player.pos.x = -3.0;
        player.vel.x = -7.0;
        clamp_to_walls(&mut player, 400.0);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 0.0);

        player.pos.x = 380.0;
        player.vel.x = 7.0;
        clamp_to_walls(&mut player, 400.0);
        assert_eq!(player.pos.x, 365.0);
        assert_eq!(player.vel.x, 0.0);

        // Viewport narrower than the player never inverts the range
        player.pos.x = 10.0;
        clamp_to_walls(&mut player, 20.0);
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_landing_snaps_and_bounces() {
        let mut state = bare_state();
        let id = platform_under_player(&mut state);
        state.player.pos.y += 3.0;
        state.player.vel.y = 4.0;

        assert!(resolve_landing(&mut state));
        assert_eq!(state.player.bottom(), state.platforms[0].pos.y);
        assert_eq!(state.player.vel.y, -13.0);
        assert_eq!(
            state.events,
            vec![GameEvent::Landed { platform_id: id, boosted: false }]
        );
    }

    #[test]
    fn test_landing_picks_earliest_platform() {
        let mut state = bare_state();
        let first = platform_under_player(&mut state);
        // Second platform 4px lower, still inside the band
        let second = state.next_entity_id();
        state.platforms.push(Platform {
            id: second,
            pos: Vec2::new(state.player.pos.x, state.player.bottom() + 4.0),
            size: Vec2::new(90.0, 18.0),
            color: 0,
        });
        state.player.pos.y += 2.0;
        state.player.vel.y = 1.0;

        assert!(resolve_landing(&mut state));
        assert_eq!(state.player.bottom(), state.platforms[0].pos.y);
        assert_eq!(
            state.events,
            vec![GameEvent::Landed { platform_id: first, boosted: false }]
        );
    }

    #[test]
    fn test_jetpack_cadence() {
        let mut state = bare_state();
        state.power_ups = PowerUps { boots: false, jetpack: true };
        platform_under_player(&mut state);

        let mut impulses = Vec::new();
        for _ in 0..7 {
            state.player.vel.y = 1.0;
            assert!(resolve_landing(&mut state));
            impulses.push(state.player.vel.y);
        }
        assert_eq!(impulses, vec![-13.0, -13.0, -19.5, -13.0, -13.0, -19.5, -13.0]);
        assert_eq!(state.run.jetpack_counter, 1);
    }

    #[test]
    fn test_no_jetpack_counter_without_jetpack() {
        let mut state = bare_state();
        platform_under_player(&mut state);
        for _ in 0..3 {
            state.player.vel.y = 1.0;
            resolve_landing(&mut state);
            assert_eq!(state.player.vel.y, -13.0);
        }
        assert_eq!(state.run.jetpack_counter, 0);
    }

    #[test]
    fn test_diamond_collected_once() {
        let mut state = bare_state();
        let id = state.next_entity_id();
        state.diamonds.push(Diamond {
            id,
            platform_id: 0,
            pos: state.player.pos + Vec2::new(5.0, 5.0),
            size: 22.0,
            collected: false,
            color: 0,
        });

        assert_eq!(collect_diamonds(&mut state), 1);
        assert_eq!(state.run.coins, 5);
        assert_eq!(state.run.diamonds_collected, 1);
        assert!(state.diamonds[0].collected);

        assert_eq!(collect_diamonds(&mut state), 0);
        assert_eq!(state.run.coins, 5);
        assert_eq!(state.run.diamonds_collected, 1);
    }
}
