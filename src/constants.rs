//! This module contains all the constants used by the simulation.

use std::f64::consts::PI;
use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The default size of the screen buffer, in pixels.
pub const SCREEN_SIZE: UVec2 = UVec2::new(1024, 768);

/// A full turn, in radians.
pub const TAU: f64 = 2.0 * PI;

/// Alpha given to every non-black pixel of a loaded sprite.
pub const SPRITE_ALPHA: u8 = 0xff;

/// Soft-deleted slots tolerated before a pool is compacted, for scenes without pickups.
pub const COMPACT_THRESHOLD_SIMPLE: usize = 30;
/// Soft-deleted slots tolerated before a pool is compacted, for scenes with pickups.
pub const COMPACT_THRESHOLD_BUFFED: usize = 400;

/// Highest health a player can reach through pickups.
pub const MAX_PLAYER_HEALTH: u32 = 9;
/// Highest damage a player can reach through pickups.
pub const MAX_PLAYER_DAMAGE: u32 = 999;

/// Wear dealt to a projectile each time it hits a hostile.
pub const PROJECTILE_WEAR: f64 = 1.0;

/// Health assigned to entities that should be removed on the next draw pass.
pub const DEAD_HEALTH: f64 = -1.0;

/// Number of digits used to render the score.
pub const SCORE_DIGITS: usize = 9;

/// Restitution applied to a bouncer's velocity component on reflection, as a half-open range.
pub const BOUNCE_RESTITUTION: (f64, f64) = (0.9, 1.1);

/// Chance that a freshly spawned bouncer spins.
pub const BOUNCER_SPIN_CHANCE: f64 = 0.7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_screen_size() {
        assert_eq!(SCREEN_SIZE.x, 1024);
        assert_eq!(SCREEN_SIZE.y, 768);
    }

    #[test]
    fn test_thresholds_ordered() {
        assert!(COMPACT_THRESHOLD_SIMPLE < COMPACT_THRESHOLD_BUFFED);
    }

    #[test]
    fn test_restitution_brackets_unity() {
        let (low, high) = BOUNCE_RESTITUTION;
        assert!(low < 1.0 && high > 1.0);
    }
}
