//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::{DifficultyParams, difficulty};
pub use state::{DeathCause, GameEvent, GamePhase, GameState, PipePair, Player};
pub use tick::{TickInput, tick};
