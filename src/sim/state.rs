//! Session state and core simulation types
//!
//! One [`GameState`] is the whole session: init, tick it, drop it. Nothing
//! gameplay-relevant lives outside it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first input; the player bobs in place
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart input
    Over,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Pipe,
    Ground,
    Ceiling,
}

/// Discrete events emitted by a tick for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready became Playing
    Started,
    Flapped,
    /// One pipe pair passed; score after the increment
    Scored { score: u32 },
    Died {
        score: u32,
        best: u32,
        /// This run improved on the stored record
        new_best: bool,
        cause: DeathCause,
    },
    /// Over became Ready with a fresh world
    Restarted,
}

/// Tilt bounds, degrees. Tilt is purely cosmetic and never enters collision.
pub const TILT_MIN_DEG: f32 = -30.0;
pub const TILT_MAX_DEG: f32 = 90.0;
/// Tilt forced on death (nose-dive pose)
pub const TILT_DEAD_DEG: f32 = 90.0;

/// The controllable body. Horizontal position is fixed at a quarter of the
/// playfield width; only the vertical axis simulates.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Degrees, clamped to [`TILT_MIN_DEG`]..[`TILT_MAX_DEG`]
    pub tilt_deg: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.width / 4.0, tuning.height / 2.0),
            vel_y: 0.0,
            tilt_deg: 0.0,
            alive: true,
        }
    }

    /// Set (not add) upward velocity and snap the tilt up
    pub fn flap(&mut self, tuning: &Tuning) {
        self.vel_y = tuning.flap_velocity;
        self.tilt_deg = tuning.flap_tilt_deg;
    }

    /// Integrate gravity and the dive tilt for one step
    pub fn fall(&mut self, dt: f32, tuning: &Tuning) {
        self.vel_y += tuning.gravity * dt;
        self.pos.y += self.vel_y * dt;
        self.tilt_deg = (self.tilt_deg + tuning.tilt_rate_deg * dt).clamp(TILT_MIN_DEG, TILT_MAX_DEG);
    }
}

/// A top/bottom pipe pair with a passable gap between them
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub id: u32,
    /// x of the pair's left edge
    pub x: f32,
    pub width: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    /// Set exactly once, when the trailing edge crosses the player
    pub passed: bool,
}

impl PipePair {
    /// The trailing edge in travel direction; crossing the player's x is the
    /// pass event, and moving past the retire margin removes the pair.
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete session state: `init -> tick* -> drop`
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (survives restarts within the session)
    pub time_ticks: u64,
    /// Elapsed simulated seconds (drives the ready-state bob)
    pub elapsed: f32,
    pub player: Player,
    /// Active pairs, oldest first
    pub pipes: Vec<PipePair>,
    /// One-shot spawn timer: seconds until the next pair, None when disarmed
    pub(crate) spawn_timer: Option<f32>,
    pub score: u32,
    /// Monotone non-decreasing for the process lifetime; seed it from
    /// [`crate::records::BestScore`] at init for a durable record.
    pub best_score: u32,
    /// Whether the current run beat the record loaded at init
    pub new_best: bool,
    next_id: u32,
}

impl GameState {
    /// Create a fresh Ready session. Fails only on a structurally invalid
    /// tuning profile; see [`Tuning::validate`].
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let player = Player::new(&tuning);
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Ready,
            time_ticks: 0,
            elapsed: 0.0,
            player,
            pipes: Vec::new(),
            spawn_timer: None,
            score: 0,
            best_score: 0,
            new_best: false,
            next_id: 1,
        })
    }

    /// Allocate a new pipe pair ID
    pub(crate) fn next_pair_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset to a fresh Ready world. Idempotent; only the best score (and
    /// the RNG stream) survives.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Ready;
        self.player = Player::new(&self.tuning);
        self.pipes.clear();
        self.spawn_timer = None;
        self.score = 0;
        self.new_best = false;
    }
}
