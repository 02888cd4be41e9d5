//! Collision detection and the per-tick outcome verdict
//!
//! Everything here is axis-aligned boxes: the player's hitbox against the
//! two halves of each pipe pair, the ground band, and the ceiling band. Any
//! overlap ends the run immediately; there are no grace frames.

use glam::Vec2;

use super::state::{DeathCause, GameState, PipePair, Player};
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; edge-touching boxes do not collide
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The player's collision box: a fixed square centered on the body,
/// hitbox-scaled from the sprite. Tilt never changes it.
pub fn player_box(player: &Player, tuning: &Tuning) -> Aabb {
    Aabb::from_center(player.pos, tuning.player_half_extents())
}

/// The solid region above the gap (playfield top down to the gap top)
pub fn top_pipe_box(pair: &PipePair) -> Aabb {
    Aabb {
        min: Vec2::new(pair.x, 0.0),
        max: Vec2::new(pair.right_edge(), pair.gap_center - pair.gap_height / 2.0),
    }
}

/// The solid region below the gap (gap bottom down to the ground)
pub fn bottom_pipe_box(pair: &PipePair, tuning: &Tuning) -> Aabb {
    Aabb {
        min: Vec2::new(pair.x, pair.gap_center + pair.gap_height / 2.0),
        max: Vec2::new(pair.right_edge(), tuning.ground_top()),
    }
}

/// Test the player against every hazard. Pipes first (mirrors the collider
/// registration order of the original), then ground, then ceiling.
pub fn verdict(state: &GameState) -> Option<DeathCause> {
    let player = player_box(&state.player, &state.tuning);

    for pair in &state.pipes {
        if player.intersects(&top_pipe_box(pair))
            || player.intersects(&bottom_pipe_box(pair, &state.tuning))
        {
            return Some(DeathCause::Pipe);
        }
    }

    if player.max.y > state.tuning.ground_top() {
        return Some(DeathCause::Ground);
    }
    if player.min.y < state.tuning.ceiling_height {
        return Some(DeathCause::Ceiling);
    }

    None
}
