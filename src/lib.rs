//! Flappy Friend - a side-scrolling obstacle-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, pipes, collision)
//! - `tuning`: Device-class balance profiles
//! - `records`: Durable best-score storage
//!
//! The crate is headless: a frontend gathers input into a
//! [`sim::TickInput`], calls [`sim::tick`] at a fixed step, reads the
//! player/pipe state straight off [`sim::GameState`] for drawing, and reacts
//! to the returned [`sim::GameEvent`]s for sound and effects. The sim never
//! waits on rendering.

pub mod records;
pub mod sim;
pub mod tuning;

pub use records::BestScore;
pub use tuning::{DeviceClass, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Fixed virtual playfield size (same logical world on all devices)
    pub const PLAYFIELD_WIDTH: f32 = 540.0;
    pub const PLAYFIELD_HEIGHT: f32 = 960.0;
}
