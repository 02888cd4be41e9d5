//! Score-driven difficulty curve
//!
//! A pure function of the current score. Every output is linearly
//! interpolated from the difficulty level and clamped, so a long run
//! plateaus instead of becoming unplayable: the gap never shrinks below its
//! floor, the scroll never exceeds its cap, and spawns never come faster
//! than their floor delays.

use crate::tuning::Tuning;

/// Derived parameters for the current score. Never stored; re-derive each
/// time it is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    /// Horizontal pipe velocity, px/s (negative = leftward)
    pub scroll_speed: f32,
    /// Gap height as a fraction of playfield height
    pub gap_ratio: f32,
    /// Uniform spawn-delay draw range, seconds (min, max)
    pub spawn_delay: (f32, f32),
}

/// Map a score onto the current obstacle parameters.
pub fn difficulty(score: u32, tuning: &Tuning) -> DifficultyParams {
    let level = score.min(tuning.level_cap) as f32;

    let scroll_speed =
        (tuning.base_scroll_speed - level * tuning.speed_step).max(-tuning.max_scroll_speed);

    let gap_ratio = (tuning.base_gap_ratio - level * tuning.gap_step)
        .clamp(tuning.min_gap_ratio, tuning.base_gap_ratio);

    let spawn_delay = (
        (tuning.base_spawn_delay.0 - level * tuning.spawn_delay_step)
            .clamp(tuning.spawn_delay_floor.0, tuning.base_spawn_delay.0),
        (tuning.base_spawn_delay.1 - level * tuning.spawn_delay_step)
            .clamp(tuning.spawn_delay_floor.1, tuning.base_spawn_delay.1),
    );

    DifficultyParams {
        scroll_speed,
        gap_ratio,
        spawn_delay,
    }
}
