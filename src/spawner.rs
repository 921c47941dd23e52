//! Procedural spawning with a difficulty ramp.

use std::rc::Rc;

use glam::{DVec2, IVec2};
use rand::Rng;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::clock::{Millis, Throttle};
use crate::config::{GameConfig, KindStats, ShooterShotConfig, SpawnerConfig};
use crate::constants::{BOUNCER_SPIN_CHANCE, TAU};
use crate::entity::{
    AngleShooter, Body, Bouncer, Buff, Chaser, Entity, HostileKind, Playfield, Reward, ShotTemplate,
};
use crate::texture::Sprite;

/// Slowest and fastest spin given to a spinning bouncer, in radians per update.
const BOUNCER_SPIN: (f64, f64) = (TAU / 72.0, TAU / 36.0);

/// Shared sprites for everything the spawner creates, loaded once per run.
#[derive(Debug, Clone)]
pub struct Prototypes {
    pub chaser: Rc<Sprite>,
    pub bouncer: Rc<Sprite>,
    pub shooter: Rc<Sprite>,
    /// Shots fired by angle shooters.
    pub hostile_shot: Rc<Sprite>,
    pub health_pickup: Rc<Sprite>,
    pub damage_pickup: Rc<Sprite>,
}

impl Prototypes {
    pub fn hostile(&self, kind: HostileKind) -> &Rc<Sprite> {
        match kind {
            HostileKind::Chaser => &self.chaser,
            HostileKind::Bouncer => &self.bouncer,
            HostileKind::Shooter => &self.shooter,
        }
    }

    pub fn pickup(&self, reward: Reward) -> &Rc<Sprite> {
        match reward {
            Reward::Health => &self.health_pickup,
            Reward::Damage => &self.damage_pickup,
        }
    }
}

/// The screen edge a hostile enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Picks an edge with probability proportional to its length and a point along it, placed
/// so that `sprite` is completely off screen.
pub fn edge_spawn_point<R: Rng>(field: &Playfield, sprite: &Sprite, rng: &mut R) -> (Edge, IVec2) {
    let screen = field.size.as_ivec2();
    let half = sprite.half_extents();
    let size = sprite.size().as_ivec2();

    let roll = rng.random_range(0..2 * (screen.x + screen.y));
    if roll < screen.x {
        (Edge::Top, IVec2::new(rng.random_range(0..screen.x), half.y - size.y))
    } else if roll < 2 * screen.x {
        (Edge::Bottom, IVec2::new(rng.random_range(0..screen.x), screen.y + half.y))
    } else if roll < 2 * screen.x + screen.y {
        (Edge::Left, IVec2::new(half.x - size.x, rng.random_range(0..screen.y)))
    } else {
        (Edge::Right, IVec2::new(screen.x + half.x, rng.random_range(0..screen.y)))
    }
}

/// Decides when and what to spawn.
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    chaser: KindStats,
    bouncer: KindStats,
    shooter: KindStats,
    shot: ShooterShotConfig,
    prototypes: Prototypes,
    field: Playfield,
    difficulty: f64,
    spawn_chance: f64,
    ramp: Throttle,
    attempt: Throttle,
}

impl Spawner {
    /// Creates a spawner whose timers start at `start`.
    pub fn new(config: &GameConfig, prototypes: Prototypes, start: Millis) -> Self {
        let spawner = config.spawner;
        Self {
            config: spawner,
            chaser: config.chaser,
            bouncer: config.bouncer,
            shooter: config.shooter,
            shot: config.shooter_shot,
            prototypes,
            field: Playfield::new(config.screen.size()),
            difficulty: 0.0,
            spawn_chance: spawner.initial_spawn_chance.clamp(0.0, 1.0),
            ramp: Throttle::starting_at(spawner.ramp_ms, start),
            attempt: Throttle::starting_at(spawner.attempt_ms, start),
        }
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn spawn_chance(&self) -> f64 {
        self.spawn_chance
    }

    pub fn prototypes(&self) -> &Prototypes {
        &self.prototypes
    }

    /// Ramps difficulty on its timer, then maybe produces one new entity.
    pub fn update<R: Rng>(&mut self, now: Millis, live_hostiles: usize, rng: &mut R) -> Option<Entity> {
        if self.ramp.ready(now) {
            self.difficulty += self.config.difficulty_step;
            self.spawn_chance = (self.spawn_chance + self.config.spawn_chance_step).min(1.0);
            debug!(difficulty = self.difficulty, spawn_chance = self.spawn_chance, "Difficulty increased");
        }

        if !self.attempt.ready(now) || live_hostiles >= self.config.max_hostiles {
            return None;
        }
        if !rng.random_bool(self.spawn_chance) {
            return None;
        }

        if rng.random_bool(self.config.pickup_chance) {
            return Some(self.pickup(rng).into());
        }
        let kind = HostileKind::iter()
            .nth(rng.random_range(0..HostileKind::COUNT))
            .unwrap_or(HostileKind::Chaser);
        Some(self.hostile(kind, rng))
    }

    /// `base * (1 + rate * difficulty * jitter)` with jitter uniform in `[0, 1)`.
    fn scaled<R: Rng>(&self, base: f64, rate: f64, rng: &mut R) -> f64 {
        base * (1.0 + rate * self.difficulty * rng.random::<f64>())
    }

    /// Builds a hostile of `kind` just outside the screen.
    pub fn hostile<R: Rng>(&self, kind: HostileKind, rng: &mut R) -> Entity {
        let sprite = Rc::clone(self.prototypes.hostile(kind));
        let stats = match kind {
            HostileKind::Chaser => self.chaser,
            HostileKind::Bouncer => self.bouncer,
            HostileKind::Shooter => self.shooter,
        };
        let (edge, position) = edge_spawn_point(&self.field, &sprite, rng);
        let health = self.scaled(stats.health, stats.rate, rng);
        let speed = self.scaled(stats.speed, stats.rate, rng);
        let score = self.scaled(stats.score as f64, stats.rate, rng).round() as u64;
        debug!(
            kind = kind.as_ref(),
            edge = edge.as_ref(),
            x = position.x,
            y = position.y,
            health,
            speed,
            score,
            "Hostile spawned"
        );

        let body = Body::new(position, sprite, health, score, stats.update_ms).entering_from(&self.field);
        match kind {
            HostileKind::Chaser => Chaser::new(body, speed).into(),
            HostileKind::Bouncer => {
                let velocity = DVec2::from_angle(rng.random_range(0.0..TAU)) * speed;
                let spin = rng.random_bool(BOUNCER_SPIN_CHANCE).then(|| {
                    let magnitude = rng.random_range(BOUNCER_SPIN.0..BOUNCER_SPIN.1);
                    if rng.random_bool(0.5) {
                        magnitude
                    } else {
                        -magnitude
                    }
                });
                Bouncer::new(body, velocity, spin).into()
            }
            HostileKind::Shooter => {
                let shot = ShotTemplate {
                    sprite: Rc::clone(&self.prototypes.hostile_shot),
                    speed: self.shot.speed,
                    damage: self.shot.damage,
                    update_ms: self.shot.update_ms,
                };
                AngleShooter::new(body, speed, Throttle::new(self.shot.cooldown_ms), shot).into()
            }
        }
    }

    /// Builds a pickup somewhere fully on screen; pickups never move, so they cannot enter from an edge.
    pub fn pickup<R: Rng>(&self, rng: &mut R) -> Buff {
        let reward = Reward::iter().nth(rng.random_range(0..Reward::COUNT)).unwrap_or(Reward::Health);
        let sprite = Rc::clone(self.prototypes.pickup(reward));
        let (low, high) = self.field.center_range(&sprite);
        let position = IVec2::new(rng.random_range(low.x..=high.x), rng.random_range(low.y..=high.y));
        debug!(reward = reward.as_ref(), x = position.x, y = position.y, "Pickup spawned");
        Buff::new(Body::new(position, sprite, 1.0, 0, 0), reward)
    }
}
