//! Device-class balance profiles
//!
//! Every gameplay constant lives in one [`Tuning`] struct chosen at session
//! init instead of being branched on a mobile check at each use site. Mobile
//! gets a wider gap, a stronger flap, and a slightly slower scroll.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Device class a profile targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

/// A structurally invalid balance profile.
///
/// These are configuration errors, not gameplay faults: the clamps in the
/// difficulty model guarantee that a profile passing [`Tuning::validate`]
/// can never produce a degenerate pipe or delay at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TuningError {
    #[error("gap ratios out of range (min {min}, base {base})")]
    GapRatio { min: f32, base: f32 },
    #[error("gap of {gap}px plus margins cannot fit above the ground at {ground_top}px")]
    GapDoesNotFit { gap: f32, ground_top: f32 },
    #[error("spawn delay bounds {lo}s..{hi}s are inverted or non-positive")]
    SpawnDelay { lo: f32, hi: f32 },
    #[error("scroll speed must be negative and capped (base {base}, cap {cap})")]
    ScrollSpeed { base: f32, cap: f32 },
    #[error("flap velocity must be upward (negative), got {0}")]
    FlapVelocity(f32),
    #[error("gravity must be positive, got {0}")]
    Gravity(f32),
    #[error("consecutive pipes {spacing}px apart would overlap ({clearance}px needed)")]
    SpawnSpacing { spacing: f32, clearance: f32 },
}

/// Full balance profile.
///
/// Lengths are virtual pixels, times seconds, velocities px/s, angles
/// degrees. The playfield is y-down with the origin at the top-left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    /// Ground band height as a fraction of playfield height
    pub ground_ratio: f32,
    /// Ceiling band thickness at the top of the playfield
    pub ceiling_height: f32,
    /// Player sprite height as a fraction of playfield height
    pub player_size_ratio: f32,
    /// Collision box scale relative to the sprite. Fixed fairness policy:
    /// one square box, 1.2x the sprite.
    pub hitbox_scale: f32,
    /// Downward acceleration while playing
    pub gravity: f32,
    /// Vertical velocity set (not added) by a flap; negative is up
    pub flap_velocity: f32,
    /// Tilt snapped on flap
    pub flap_tilt_deg: f32,
    /// Dive tilt rate between flaps
    pub tilt_rate_deg: f32,
    /// Pipe width as a fraction of playfield width
    pub pipe_width_ratio: f32,
    /// Leftward scroll velocity at score 0 (negative)
    pub base_scroll_speed: f32,
    /// Extra scroll speed magnitude per difficulty level
    pub speed_step: f32,
    /// Hard cap on scroll speed magnitude
    pub max_scroll_speed: f32,
    pub base_gap_ratio: f32,
    pub min_gap_ratio: f32,
    /// Gap ratio shaved off per difficulty level
    pub gap_step: f32,
    /// Spawn delay draw range at score 0 (min, max)
    pub base_spawn_delay: (f32, f32),
    /// Delay shaved off both bounds per difficulty level
    pub spawn_delay_step: f32,
    /// Lower limits for the two delay bounds
    pub spawn_delay_floor: (f32, f32),
    /// Score past which difficulty plateaus
    pub level_cap: u32,
    /// How far past the right edge new pipes spawn
    pub spawn_lead: f32,
    /// How far past the left edge pipes are retired
    pub retire_margin: f32,
    /// Clearance kept between the gap and the ceiling/ground
    pub gap_center_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::desktop()
    }
}

impl Tuning {
    pub fn desktop() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_ratio: 0.12,
            ceiling_height: 10.0,
            player_size_ratio: 0.09,
            hitbox_scale: 1.2,
            gravity: 1000.0,
            flap_velocity: -350.0,
            flap_tilt_deg: -25.0,
            tilt_rate_deg: 120.0,
            pipe_width_ratio: 0.10,
            base_scroll_speed: -200.0,
            speed_step: 5.0,
            max_scroll_speed: 360.0,
            base_gap_ratio: 0.35,
            min_gap_ratio: 0.24,
            gap_step: 0.004,
            base_spawn_delay: (1.3, 1.9),
            spawn_delay_step: 0.015,
            spawn_delay_floor: (0.85, 1.2),
            level_cap: 30,
            spawn_lead: 30.0,
            retire_margin: 200.0,
            gap_center_margin: 50.0,
        }
    }

    /// Taller ground, bigger gap, stronger flap, gentler scroll
    pub fn mobile() -> Self {
        Self {
            ground_ratio: 0.14,
            flap_velocity: -420.0,
            base_scroll_speed: -180.0,
            base_gap_ratio: 0.42,
            min_gap_ratio: 0.28,
            ..Self::desktop()
        }
    }

    pub fn for_device(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Desktop => Self::desktop(),
            DeviceClass::Mobile => Self::mobile(),
        }
    }

    /// Top of the ground band (y-down coordinates)
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.height * (1.0 - self.ground_ratio)
    }

    #[inline]
    pub fn pipe_width(&self) -> f32 {
        self.width * self.pipe_width_ratio
    }

    /// Half extents of the player's collision box (square, hitbox-scaled)
    #[inline]
    pub fn player_half_extents(&self) -> Vec2 {
        Vec2::splat(self.height * self.player_size_ratio * self.hitbox_scale / 2.0)
    }

    /// Check the profile for configurations the clamps cannot save.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.min_gap_ratio > 0.0
            && self.min_gap_ratio <= self.base_gap_ratio
            && self.base_gap_ratio < 1.0
            && self.gap_step >= 0.0)
        {
            return Err(TuningError::GapRatio {
                min: self.min_gap_ratio,
                base: self.base_gap_ratio,
            });
        }

        // The widest gap plus its margins must fit between the top of the
        // playfield and the ground, and the margin must cover the ceiling band.
        let widest_gap = self.base_gap_ratio * self.height;
        if widest_gap + 2.0 * self.gap_center_margin > self.ground_top()
            || self.gap_center_margin < self.ceiling_height
        {
            return Err(TuningError::GapDoesNotFit {
                gap: widest_gap,
                ground_top: self.ground_top(),
            });
        }

        let (floor_lo, floor_hi) = self.spawn_delay_floor;
        let (base_lo, base_hi) = self.base_spawn_delay;
        if !(floor_lo > 0.0
            && floor_lo <= floor_hi
            && floor_lo <= base_lo
            && floor_hi <= base_hi
            && base_lo <= base_hi
            && self.spawn_delay_step >= 0.0)
        {
            return Err(TuningError::SpawnDelay {
                lo: floor_lo,
                hi: base_hi,
            });
        }

        if self.base_scroll_speed >= 0.0 || self.max_scroll_speed <= 0.0 || self.speed_step < 0.0 {
            return Err(TuningError::ScrollSpeed {
                base: self.base_scroll_speed,
                cap: self.max_scroll_speed,
            });
        }
        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapVelocity(self.flap_velocity));
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::Gravity(self.gravity));
        }

        // Spawn delay is the sole spacing mechanism: at the fastest reachable
        // scroll, the shortest delay must still move a pipe clear of the
        // spawn point before the next one appears.
        let top_speed = (self.base_scroll_speed.abs()
            + self.level_cap as f32 * self.speed_step)
            .min(self.max_scroll_speed);
        let spacing = floor_lo * top_speed;
        let clearance = self.pipe_width() + self.spawn_lead;
        if spacing <= clearance {
            return Err(TuningError::SpawnSpacing { spacing, clearance });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_profiles_validate() {
        assert_eq!(Tuning::desktop().validate(), Ok(()));
        assert_eq!(Tuning::mobile().validate(), Ok(()));
        assert_eq!(Tuning::for_device(DeviceClass::Mobile).ground_ratio, 0.14);
    }

    #[test]
    fn inverted_gap_ratios_rejected() {
        let tuning = Tuning {
            min_gap_ratio: 0.5,
            base_gap_ratio: 0.3,
            ..Tuning::desktop()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapRatio { .. })
        ));
    }

    #[test]
    fn oversized_gap_rejected() {
        let tuning = Tuning {
            base_gap_ratio: 0.9,
            min_gap_ratio: 0.9,
            ..Tuning::desktop()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn downward_flap_rejected() {
        let tuning = Tuning {
            flap_velocity: 100.0,
            ..Tuning::desktop()
        };
        assert_eq!(tuning.validate(), Err(TuningError::FlapVelocity(100.0)));
    }

    #[test]
    fn overlapping_spawn_spacing_rejected() {
        // Delay floor so small that pipes would spawn on top of each other
        let tuning = Tuning {
            base_spawn_delay: (0.1, 0.2),
            spawn_delay_floor: (0.05, 0.1),
            ..Tuning::desktop()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::SpawnSpacing { .. })
        ));
    }

    #[test]
    fn derived_geometry() {
        let tuning = Tuning::desktop();
        assert!((tuning.ground_top() - 844.8).abs() < 0.01);
        assert!((tuning.pipe_width() - 54.0).abs() < 0.01);
        // 9% of 960 = 86.4 sprite, * 1.2 hitbox / 2 = 51.84 half extent
        assert!((tuning.player_half_extents().x - 51.84).abs() < 0.01);
    }
}
