//! Distance, score, level and coin progression
//!
//! Everything here is derived from the monotonic distance counter. The scroll
//! delta is normalized to a reference frame duration so variable frame times
//! don't change the effective speed.

use super::state::{GameEvent, GameState, RunState};
use crate::tuning::Tuning;

/// Scroll distance covered in `dt_ms` at the run's current speed
#[inline]
pub fn distance_delta(run: &RunState, tuning: &Tuning, dt_ms: f32) -> f32 {
    tuning.scroll_speed * run.game_speed * (dt_ms / tuning.reference_frame_ms)
}

/// Grant milestone coins for every full `milestone_meters` crossed since the
/// watermark. Several boundaries crossed in one step pay out together.
/// Returns the coins awarded.
pub fn award_milestones(run: &mut RunState, tuning: &Tuning) -> u64 {
    let current = run.score(tuning).floor() as u64;
    let step = tuning.milestone_meters;
    if current < run.last_coin_distance + step {
        return 0;
    }
    let coins = (current - run.last_coin_distance) / step * tuning.milestone_coins;
    run.coins += coins;
    run.last_coin_distance = current - current % step;
    coins
}

/// Raise the level when the score passes the next threshold, retuning the
/// platform gap and scroll speed. Returns the new level if it changed.
pub fn update_level(run: &mut RunState, tuning: &Tuning) -> Option<u32> {
    let new_level = (run.score(tuning) / tuning.meters_per_level).floor() as u32 + 1;
    if new_level <= run.level {
        return None;
    }
    run.level = new_level;
    run.platform_gap = tuning.platform_gap_for_level(new_level);
    run.game_speed = tuning.game_speed_for_level(new_level);
    Some(new_level)
}

/// Accumulate this tick's distance and apply the rewards and difficulty that
/// follow from it. Returns the scroll delta for the camera.
pub fn advance(state: &mut GameState, dt_ms: f32) -> f32 {
    let tuning = &state.tuning;
    let run = &mut state.run;

    let delta = distance_delta(run, tuning, dt_ms);
    run.distance_counter += delta as f64;

    let coins = award_milestones(run, tuning);
    if coins > 0 {
        log::info!("Milestone {} m: +{} coins", run.last_coin_distance, coins);
        state.events.push(GameEvent::MilestoneReward {
            coins,
            meters: run.last_coin_distance,
        });
    }

    if let Some(level) = update_level(run, tuning) {
        log::info!(
            "Level {}: gap {:.0}, speed x{:.2}",
            level,
            run.platform_gap,
            run.game_speed
        );
        state.events.push(GameEvent::LevelUp { level });
    }

    delta
}

/// Camera-relative scroll: the world moves down by `delta`, the player up.
/// Diamonds move exactly like platforms.
pub fn scroll_world(state: &mut GameState, delta: f32) {
    for platform in &mut state.platforms {
        platform.pos.y += delta;
    }
    for diamond in &mut state.diamonds {
        diamond.pos.y += delta;
    }
    state.player.pos.y -= delta;
}
