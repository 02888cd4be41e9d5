//! Flappy Friend headless demo
//!
//! Runs the simulation at the fixed step with a naive autopilot and prints
//! per-run results. Handy for smoke-testing balance changes without a
//! frontend; the durable best score is wired up the same way a real
//! frontend would do it.

use flappy_friend::consts::SIM_DT;
use flappy_friend::records::BestScore;
use flappy_friend::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use flappy_friend::tuning::Tuning;

const DEMO_RUNS: u32 = 5;
const MAX_TICKS: u64 = 5_000_000;

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = match GameState::new(seed, Tuning::desktop()) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Bad tuning profile: {err}");
            std::process::exit(1);
        }
    };
    state.best_score = BestScore::load().score;
    log::info!("Session seed {seed}, stored best {}", state.best_score);

    let mut runs = 0u32;
    let mut ticks = 0u64;
    while runs < DEMO_RUNS && ticks < MAX_TICKS {
        ticks += 1;
        let input = TickInput {
            primary: autopilot(&state),
        };
        for event in tick(&mut state, &input, SIM_DT) {
            if let GameEvent::Died {
                score,
                best,
                new_best,
                cause,
            } = event
            {
                runs += 1;
                println!(
                    "run {runs}: score {score} (best {best}{}), hit {cause:?}",
                    if new_best { ", new record" } else { "" }
                );
                if new_best {
                    BestScore::new(best).save();
                }
            }
        }
    }

    println!("best score across the session: {}", state.best_score);
}

/// Flap when falling and below the next gap center (mid-screen before any
/// pipe shows up). Deliberately imperfect; the difficulty ramp kills it.
fn autopilot(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready | GamePhase::Over => true,
        GamePhase::Playing => {
            let target = state
                .pipes
                .iter()
                .find(|p| !p.passed && p.right_edge() >= state.player.pos.x)
                .map(|p| p.gap_center)
                .unwrap_or(state.tuning.height / 2.0);
            state.player.vel_y > 0.0 && state.player.pos.y > target
        }
    }
}
