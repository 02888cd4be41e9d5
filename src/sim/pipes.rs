//! Obstacle pair lifecycle: spawn scheduling, scrolling, scoring, retirement
//!
//! The spawn schedule is a one-shot timer re-armed after each fire, never a
//! fixed-period loop. Death and restart disarm it, so a cancelled spawn can
//! never fire into a reset world.

use rand::Rng;

use super::difficulty::difficulty;
use super::state::{GameEvent, GameState, PipePair};

/// Arm the one-shot spawn timer with a uniform draw from the current
/// difficulty's delay range.
pub fn arm_spawn_timer(state: &mut GameState) {
    let (lo, hi) = difficulty(state.score, &state.tuning).spawn_delay;
    let delay = if hi > lo {
        state.rng.random_range(lo..=hi)
    } else {
        lo
    };
    state.spawn_timer = Some(delay);
}

/// Count the spawn timer down; on fire, spawn one pair and re-arm.
/// Call only while Playing.
pub fn run_spawn_timer(state: &mut GameState, dt: f32) {
    let Some(remaining) = state.spawn_timer.as_mut() else {
        return;
    };
    *remaining -= dt;
    if *remaining <= 0.0 {
        spawn_pair(state);
        arm_spawn_timer(state);
    }
}

/// Create one pair just past the right playfield edge. The gap center is
/// uniform within the band that keeps a full margin to both the ceiling and
/// the ground, so the gap always fits.
fn spawn_pair(state: &mut GameState) {
    let params = difficulty(state.score, &state.tuning);
    let gap_height = params.gap_ratio * state.tuning.height;

    let min_center = gap_height / 2.0 + state.tuning.gap_center_margin;
    let max_center = state.tuning.ground_top() - gap_height / 2.0 - state.tuning.gap_center_margin;
    let gap_center = if max_center > min_center {
        state.rng.random_range(min_center..=max_center)
    } else {
        min_center
    };

    let x = state.tuning.width + state.tuning.spawn_lead;
    let width = state.tuning.pipe_width();
    let id = state.next_pair_id();
    state.pipes.push(PipePair {
        id,
        x,
        width,
        gap_center,
        gap_height,
        passed: false,
    });
    log::debug!("spawned pair {id} gap {gap_center:.0}±{:.0}", gap_height / 2.0);
}

/// Scroll every pair at the current difficulty speed, emit the pass events,
/// and retire pairs that are fully behind the playfield.
pub fn advance_pipes(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let dx = difficulty(state.score, &state.tuning).scroll_speed * dt;
    let player_x = state.player.pos.x;

    let mut passes = 0u32;
    for pair in &mut state.pipes {
        pair.x += dx;
        if !pair.passed && pair.right_edge() < player_x {
            pair.passed = true;
            passes += 1;
        }
    }

    for _ in 0..passes {
        state.score += 1;
        if state.score > state.best_score {
            state.best_score = state.score;
            state.new_best = true;
        }
        events.push(GameEvent::Scored { score: state.score });
    }

    let retire_x = -state.tuning.retire_margin;
    state.pipes.retain(|pair| pair.right_edge() > retire_x);
}
