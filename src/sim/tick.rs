//! Per-frame simulation tick
//!
//! Fixed ordering every tick:
//! controls → gravity/integration → wall clamp → landing → diamond pickup →
//! distance/score/level → scroll → game-over check → prune and generate.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, RunPhase};
use super::{generator, physics, progression};

/// Held control directions, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds.
///
/// Does nothing unless the run is in [`RunPhase::Running`].
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != RunPhase::Running {
        return;
    }
    // A negative or NaN frame time would run the distance counter backwards
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

    let tuning = &state.tuning;
    physics::apply_controls(&mut state.player, input, tuning.horizontal_damping);
    physics::integrate(&mut state.player, tuning.gravity);
    physics::clamp_to_walls(&mut state.player, state.viewport.width);

    physics::resolve_landing(state);
    physics::collect_diamonds(state);

    let delta = progression::advance(state, dt_ms);
    progression::scroll_world(state, delta);

    if state.player.pos.y > state.viewport.despawn_line(&state.tuning) {
        let score = state.score();
        state.phase = RunPhase::Ended;
        state.events.push(GameEvent::GameOver { score });
        log::info!(
            "Run ended at {:.0} m (level {}, {} diamonds)",
            score,
            state.run.level,
            state.run.diamonds_collected
        );
        return;
    }

    generator::prune_and_generate(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{PowerUps, Viewport};
    use crate::tuning::Tuning;

    fn started(seed: u64, tuning: Tuning) -> GameState {
        let viewport = Viewport::new(400.0, 800.0);
        let mut state = GameState::new(seed, tuning, viewport, 0);
        state.start_run(viewport, PowerUps::default());
        state
    }

    /// Platforms as wide as the play area allows, all under the idle player
    fn wide_platform_tuning() -> Tuning {
        Tuning {
            platform_width: 320.0,
            diamond_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let viewport = Viewport::new(400.0, 800.0);
        let mut state = GameState::new(1, Tuning::default(), viewport, 0);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, RunPhase::NotStarted);
        assert_eq!(state.run.distance_counter, 0.0);

        state.start_run(viewport, PowerUps::default());
        state.phase = RunPhase::Paused;
        let player_pos = state.player.pos;
        let platforms: Vec<_> = state.platforms.iter().map(|p| p.pos).collect();
        tick(&mut state, &TickInput { left: true, right: false }, 16.0);
        assert_eq!(state.player.pos, player_pos);
        assert_eq!(state.platforms.iter().map(|p| p.pos).collect::<Vec<_>>(), platforms);
        assert_eq!(state.run.distance_counter, 0.0);
    }

    #[test]
    fn test_first_tick_lands_on_starting_platform() {
        let mut state = started(3, Tuning::default());
        state.events.clear();
        tick(&mut state, &TickInput::default(), 16.0);

        let first_id = state.platforms[0].id;
        assert_eq!(
            state.events.first(),
            Some(&GameEvent::Landed { platform_id: first_id, boosted: false })
        );
        assert_eq!(state.player.vel.y, -13.0);
    }

    #[test]
    fn test_hundred_idle_ticks() {
        let mut state = started(42, wide_platform_tuning());
        let start_y = state.player.pos.y;

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 16.0);
        }

        assert_eq!(state.phase, RunPhase::Running);
        assert!((state.run.distance_counter - 280.0).abs() < 0.01);
        assert!((state.score() - 28.0).abs() < 0.001);
        assert_eq!(state.run.level, 1);
        assert_eq!(state.run.coins, 0);
        assert_eq!(state.run.last_coin_distance, 0);
        assert!(state.player.pos.y < start_y);
    }

    #[test]
    fn test_falling_off_ends_run() {
        let mut state = started(5, Tuning::default());
        state.platforms.clear();
        state.diamonds.clear();
        state.player.pos.y = 890.0;
        state.player.vel.y = 20.0;
        state.events.clear();

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, RunPhase::Ended);
        assert!(matches!(state.events.last(), Some(GameEvent::GameOver { .. })));

        let distance = state.run.distance_counter;
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.run.distance_counter, distance);
    }

    #[test]
    fn test_steering_moves_player() {
        let mut state = started(9, wide_platform_tuning());
        let x = state.player.pos.x;
        for _ in 0..5 {
            tick(&mut state, &TickInput { left: true, right: false }, 16.0);
        }
        assert!((state.player.pos.x - (x - 35.0)).abs() < 1e-3);

        for _ in 0..200 {
            tick(&mut state, &TickInput { left: true, right: false }, 16.0);
        }
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_bad_frame_times_do_not_rewind_distance() {
        let mut state = started(13, wide_platform_tuning());
        tick(&mut state, &TickInput::default(), 16.0);
        let distance = state.run.distance_counter;
        tick(&mut state, &TickInput::default(), -50.0);
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.run.distance_counter, distance);
    }

    #[test]
    fn test_viewport_resize_applies_to_pruning() {
        let mut state = started(17, wide_platform_tuning());
        // Keep the player clear of both the platforms and the new bottom edge
        state.player.pos.y = 100.0;
        state.viewport = Viewport::new(400.0, 300.0);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.platforms.len(), 3);
        assert!(state.platforms.iter().all(|p| p.pos.y < 400.0));
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput { left: true, right: false },
            TickInput::default(),
            TickInput { left: false, right: true },
        ];
        let mut a = started(99_999, Tuning::default());
        let mut b = started(99_999, Tuning::default());
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, 16.0);
            tick(&mut b, input, 16.0);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.platforms.len(), b.platforms.len());
        assert_eq!(a.run.distance_counter, b.run.distance_counter);
        assert_eq!(a.events, b.events);
    }
}
