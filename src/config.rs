//! Layered game configuration.
//!
//! Values come from the built-in defaults, then an optional `horde.toml`, then
//! `HORDE_`-prefixed environment variables (`HORDE_PLAYER__SPEED=6`).

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::constants::{COMPACT_THRESHOLD_BUFFED, SCREEN_SIZE};
use crate::error::{GameError, GameResult};

/// Default location of the optional configuration file.
pub const CONFIG_FILE: &str = "horde.toml";

/// Prefix for environment overrides; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "HORDE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    /// Directory holding every image listed by [`Asset`](crate::asset::Asset).
    pub assets: PathBuf,
    /// Fixed seed for reproducible runs; drawn from the OS when unset.
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub registry: RegistryConfig,
    pub spawner: SpawnerConfig,
    pub chaser: KindStats,
    pub bouncer: KindStats,
    pub shooter: KindStats,
    pub shooter_shot: ShooterShotConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            assets: PathBuf::from("assets"),
            seed: None,
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            registry: RegistryConfig::default(),
            spawner: SpawnerConfig::default(),
            chaser: KindStats {
                health: 4.0,
                speed: 1.0,
                score: 10,
                rate: 0.2,
                update_ms: 10,
            },
            bouncer: KindStats {
                health: 6.0,
                speed: 2.0,
                score: 15,
                rate: 0.2,
                update_ms: 10,
            },
            shooter: KindStats {
                health: 3.0,
                speed: 0.5,
                score: 25,
                rate: 0.2,
                update_ms: 15,
            },
            shooter_shot: ShooterShotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl ScreenConfig {
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_SIZE.x,
            height: SCREEN_SIZE.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels moved per update along each held axis.
    pub speed: f64,
    pub health: u32,
    /// Damage carried by each player bullet.
    pub damage: u32,
    pub update_ms: Millis,
    /// Minimum time between two shots.
    pub shot_ms: Millis,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            health: 3,
            damage: 2,
            update_ms: 10,
            shot_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f64,
    pub update_ms: Millis,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            update_ms: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Soft-deleted slots tolerated before the pools are compacted.
    pub compact_threshold: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            compact_threshold: COMPACT_THRESHOLD_BUFFED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Added to the difficulty multiplier on every ramp.
    pub difficulty_step: f64,
    pub initial_spawn_chance: f64,
    /// Added to the spawn chance on every ramp; the chance never exceeds one.
    pub spawn_chance_step: f64,
    /// Time between difficulty ramps.
    pub ramp_ms: Millis,
    /// Time between spawn attempts.
    pub attempt_ms: Millis,
    /// Share of successful attempts that produce a pickup instead of a hostile.
    pub pickup_chance: f64,
    /// No hostiles are spawned while this many are alive.
    pub max_hostiles: usize,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            difficulty_step: 0.5,
            initial_spawn_chance: 0.2,
            spawn_chance_step: 0.5,
            ramp_ms: 10_000,
            attempt_ms: 1_000,
            pickup_chance: 0.01,
            max_hostiles: 150,
        }
    }
}

/// Base stats for one hostile kind; each grows as `base * (1 + rate * difficulty * jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub health: f64,
    pub speed: f64,
    pub score: u64,
    pub rate: f64,
    pub update_ms: Millis,
}

/// How an angle shooter fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterShotConfig {
    /// Time between shots once the previous one was fired.
    pub cooldown_ms: Millis,
    pub speed: f64,
    pub damage: f64,
    pub update_ms: Millis,
}

impl Default for ShooterShotConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1_500,
            speed: 5.0,
            damage: 1.0,
            update_ms: 10,
        }
    }
}

impl GameConfig {
    /// Loads defaults, then `path` if it exists, then the environment.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(GameConfig::default()))
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Extracts and validates a configuration from an arbitrary provider stack.
    pub fn from_figment(figment: Figment) -> GameResult<Self> {
        let config: GameConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        let fail = |message: String| Err(GameError::Config(message));

        if self.screen.width == 0 || self.screen.height == 0 {
            return fail(format!("screen must not be empty, got {}x{}", self.screen.width, self.screen.height));
        }
        if self.spawner.ramp_ms == 0 || self.spawner.attempt_ms == 0 {
            return fail("spawner intervals must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.spawner.pickup_chance) {
            return fail(format!("pickup chance {} is not a probability", self.spawner.pickup_chance));
        }
        let (initial, step) = (self.spawner.initial_spawn_chance, self.spawner.spawn_chance_step);
        if initial.is_nan() || step.is_nan() || initial < 0.0 || step < 0.0 {
            return fail("spawn chance and its step must be non-negative numbers".into());
        }
        if self.player.health == 0 {
            return fail("player must start alive".into());
        }
        if self.player.speed < 0.0 || self.bullet.speed < 0.0 {
            return fail("speeds must not be negative".into());
        }
        for (name, stats) in [
            ("chaser", &self.chaser),
            ("bouncer", &self.bouncer),
            ("shooter", &self.shooter),
        ] {
            if stats.health <= 0.0 {
                return fail(format!("{name} health must be positive"));
            }
            // A hostile that cannot move never finishes entering the screen.
            if stats.speed.is_nan() || stats.speed <= 0.0 {
                return fail(format!("{name} speed must be positive"));
            }
            if stats.rate.is_nan() || stats.rate < 0.0 {
                return fail(format!("{name} rate must not be negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_screen_rejected() {
        let mut config = GameConfig::default();
        config.screen.height = 0;
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }
}
