//! The READY -> PLAYING -> OVER state machine
//!
//! One call advances the session by one step. Input is applied at the top of
//! the tick, before physics and collision, so the verdict never reads a
//! stale velocity. The returned events are the presentation layer's whole
//! view of what happened.

use super::collision;
use super::pipes;
use super::state::{DeathCause, GameEvent, GamePhase, GameState, TILT_DEAD_DEG};

/// Cosmetic idle bob while Ready
const READY_BOB_AMPLITUDE: f32 = 10.0;
const READY_BOB_FREQ: f32 = 3.0; // rad/s

/// Input gathered since the previous tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The single logical action: start, flap, or restart depending on phase
    pub primary: bool,
}

/// Advance the session by `dt` seconds and return the discrete events.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;
    state.elapsed += dt;

    match state.phase {
        GamePhase::Ready => {
            // Idle bob around mid-screen; gravity stays off in this phase
            state.player.pos.y = state.tuning.height / 2.0
                + (state.elapsed * READY_BOB_FREQ).sin() * READY_BOB_AMPLITUDE;

            if !input.primary {
                return events;
            }
            // Start and flap in one call; gravity runs below, this same tick
            state.phase = GamePhase::Playing;
            pipes::arm_spawn_timer(state);
            state.player.flap(&state.tuning);
            events.push(GameEvent::Started);
            events.push(GameEvent::Flapped);
            log::info!("run started (best {})", state.best_score);
        }

        GamePhase::Playing => {
            if input.primary {
                state.player.flap(&state.tuning);
                events.push(GameEvent::Flapped);
            }
        }

        GamePhase::Over => {
            // The world stays frozen; the only thing primary does is restart
            if input.primary {
                state.restart();
                events.push(GameEvent::Restarted);
            }
            return events;
        }
    }

    // Input is fully applied; now physics, spawning, scoring, and the verdict
    state.player.fall(dt, &state.tuning);
    pipes::run_spawn_timer(state, dt);
    pipes::advance_pipes(state, dt, &mut events);

    if let Some(cause) = collision::verdict(state) {
        kill(state, cause, &mut events);
    }

    events
}

/// Transition to Over: freeze the world, disarm the spawn timer, and report
/// the final score against the record.
fn kill(state: &mut GameState, cause: DeathCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Over;
    state.player.alive = false;
    state.player.vel_y = 0.0;
    state.player.tilt_deg = TILT_DEAD_DEG;
    state.spawn_timer = None;

    log::info!(
        "run over: {:?}, score {} (best {})",
        cause,
        state.score,
        state.best_score
    );
    events.push(GameEvent::Died {
        score: state.score,
        best: state.best_score,
        new_best: state.new_best,
        cause,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::PipePair;
    use crate::tuning::Tuning;

    fn state(seed: u64) -> GameState {
        GameState::new(seed, Tuning::desktop()).unwrap()
    }

    fn primary() -> TickInput {
        TickInput { primary: true }
    }

    /// A pair whose top half covers the player's current position
    fn lethal_pair(state: &mut GameState) -> PipePair {
        let id = state.next_pair_id();
        PipePair {
            id,
            x: state.player.pos.x - 20.0,
            width: state.tuning.pipe_width(),
            gap_center: state.tuning.ground_top() - 150.0,
            gap_height: 300.0,
            passed: false,
        }
    }

    #[test]
    fn primary_in_ready_starts_and_flaps_the_same_tick() {
        let mut state = state(5);

        // Idle ticks bob but never start
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::default(), SIM_DT).is_empty());
        }
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.spawn_timer.is_none());

        let events = tick(&mut state, &primary(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events, vec![GameEvent::Started, GameEvent::Flapped]);
        // Gravity ran in the same call: one step of pull on the flap impulse
        let expected = state.tuning.flap_velocity + state.tuning.gravity * SIM_DT;
        assert!((state.player.vel_y - expected).abs() < 0.001);
        assert!(state.spawn_timer.is_some());
    }

    #[test]
    fn flap_while_playing_sets_velocity() {
        let mut state = state(5);
        tick(&mut state, &primary(), SIM_DT);

        // Let the body fall a while, then flap again
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let events = tick(&mut state, &primary(), SIM_DT);
        assert!(events.contains(&GameEvent::Flapped));
        assert!(state.player.vel_y < 0.0);
    }

    #[test]
    fn overlap_ends_the_run_within_the_tick() {
        let mut state = state(5);
        tick(&mut state, &primary(), SIM_DT);
        let pair = lethal_pair(&mut state);
        state.pipes.push(pair);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Over);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Died {
                cause: DeathCause::Pipe,
                ..
            })
        ));
        assert!(!state.player.alive);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.player.tilt_deg, TILT_DEAD_DEG);
        assert!(state.spawn_timer.is_none());
    }

    #[test]
    fn dead_world_stays_frozen() {
        let mut state = state(5);
        tick(&mut state, &primary(), SIM_DT);
        let pair = lethal_pair(&mut state);
        state.pipes.push(pair);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Over);

        let pipes_before = state.pipes.clone();
        let pos_before = state.player.pos;
        for _ in 0..500 {
            assert!(tick(&mut state, &TickInput::default(), SIM_DT).is_empty());
        }
        // No gravity, no scrolling, no cancelled timer firing a late spawn
        assert_eq!(state.pipes, pipes_before);
        assert_eq!(state.player.pos, pos_before);
    }

    #[test]
    fn primary_in_over_restarts_without_physics() {
        let mut state = state(5);
        tick(&mut state, &primary(), SIM_DT);
        let pair = lethal_pair(&mut state);
        state.pipes.push(pair);
        tick(&mut state, &TickInput::default(), SIM_DT);

        let events = tick(&mut state, &primary(), SIM_DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.player.alive);
        assert!(state.pipes.is_empty());
        assert!(state.spawn_timer.is_none());
    }

    #[test]
    fn restart_is_idempotent() {
        let mut state = state(5);
        tick(&mut state, &primary(), SIM_DT);
        let pair = lethal_pair(&mut state);
        state.pipes.push(pair);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Over);

        state.restart();
        let once = (state.phase, state.score, state.pipes.len(), state.player.clone());
        state.restart();
        let twice = (state.phase, state.score, state.pipes.len(), state.player.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn death_commits_the_record() {
        let mut state = state(5);
        state.best_score = 2;
        tick(&mut state, &primary(), SIM_DT);

        // Hand the run three passed pairs, then kill it
        for _ in 0..3 {
            let id = state.next_pair_id();
            let pair = PipePair {
                id,
                x: state.player.pos.x - state.tuning.pipe_width() - 1.0,
                width: state.tuning.pipe_width(),
                gap_center: state.player.pos.y,
                gap_height: 400.0,
                passed: false,
            };
            state.pipes.push(pair);
        }
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        let scored = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        assert_eq!(scored, 3);
        assert_eq!(state.score, 3);
        assert_eq!(state.best_score, 3);

        let pair = lethal_pair(&mut state);
        state.pipes.push(pair);
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Died {
                score: 3,
                best: 3,
                new_best: true,
                ..
            })
        ));
    }

    #[test]
    fn score_equals_scored_event_count() {
        let mut state = state(99);
        tick(&mut state, &primary(), SIM_DT);

        let mut scored_events = 0usize;
        // Flap on a fixed cadence; count Scored events until the run ends
        for step in 0..200_000u32 {
            let input = TickInput {
                primary: step % 55 == 0,
            };
            let events = tick(&mut state, &input, SIM_DT);
            scored_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
            if state.phase == GamePhase::Over {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.score as usize, scored_events);
    }

    #[test]
    fn same_seed_same_inputs_same_state() {
        let mut a = state(777);
        let mut b = state(777);

        for step in 0..20_000u32 {
            let input = TickInput {
                primary: step % 47 == 0,
            };
            let ea = tick(&mut a, &input, SIM_DT);
            let eb = tick(&mut b, &input, SIM_DT);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.pipes, b.pipes);
        assert_eq!(a.player, b.player);
        assert_eq!(a.time_ticks, b.time_ticks);
    }
}
