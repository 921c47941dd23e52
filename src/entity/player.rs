use std::f64::consts::PI;

use glam::{DVec2, IVec2};
use tracing::debug;

use crate::clock::{Millis, Throttle};
use crate::config::PlayerConfig;
use crate::constants::{MAX_PLAYER_DAMAGE, MAX_PLAYER_HEALTH};
use crate::entity::bullet::{Bullet, Faction, ShotTemplate};
use crate::entity::buff::Reward;
use crate::entity::motion::{Playfield, Residue};
use crate::render::Canvas;
use crate::texture::Sprite;

/// The player-controlled ship. It lives outside the registry and is drawn last.
#[derive(Debug, Clone)]
pub struct Player {
    position: IVec2,
    health: u32,
    damage: u32,
    speed: f64,
    /// Requested movement per axis, each in `-1..=1`. Cleared after every update.
    step: IVec2,
    /// Cursor offset from the player; the ship faces and fires along it.
    aim: DVec2,
    sprite: Sprite,
    movement: Throttle,
    cooldown: Throttle,
    shot: ShotTemplate,
    residue: Residue,
}

impl Player {
    pub fn new(position: IVec2, sprite: Sprite, config: &PlayerConfig, mut shot: ShotTemplate) -> Self {
        shot.damage = config.damage as f64;
        Self {
            position,
            health: config.health,
            damage: config.damage,
            speed: config.speed,
            step: IVec2::ZERO,
            aim: DVec2::ZERO,
            sprite,
            movement: Throttle::new(config.update_ms),
            cooldown: Throttle::new(config.shot_ms),
            shot,
            residue: Residue::default(),
        }
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn aim(&self) -> DVec2 {
        self.aim
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Requests movement along each axis; components are clamped to `-1..=1`.
    pub fn set_step(&mut self, step: IVec2) {
        self.step = step.clamp(IVec2::NEG_ONE, IVec2::ONE);
    }

    pub fn aim_at(&mut self, cursor: IVec2) {
        self.aim = (cursor - self.position).as_dvec2();
    }

    /// Turns toward the aim and moves by the requested step, staying on screen.
    pub fn update(&mut self, now: Millis, field: &Playfield) {
        if !self.movement.ready(now) {
            return;
        }
        if self.aim != DVec2::ZERO {
            // The ship art points up, the heading angle points down.
            self.sprite.set_rotation_from_direction(self.aim.x, self.aim.y);
            self.sprite.add_rotation_step(PI);
            self.sprite.advance_rotation();
        }
        self.position += self.residue.advance(self.step.as_dvec2() * self.speed);
        self.position = field.clamp(self.position, &self.sprite);
        self.step = IVec2::ZERO;
    }

    /// Consumes the shot cooldown if it has elapsed.
    pub fn can_shoot(&mut self, now: Millis) -> bool {
        self.cooldown.ready(now)
    }

    /// Fires along the aim if the cooldown allows. Holds fire while the cursor sits on the ship.
    pub fn fire(&mut self, now: Millis) -> Option<Bullet> {
        if self.aim == DVec2::ZERO || !self.can_shoot(now) {
            return None;
        }
        Some(self.shot.fire(self.position, self.aim, Faction::Player))
    }

    pub fn apply_reward(&mut self, reward: Reward) {
        match reward {
            Reward::Health => self.health = (self.health + 1).min(MAX_PLAYER_HEALTH),
            Reward::Damage => {
                self.damage = (self.damage + 1).min(MAX_PLAYER_DAMAGE);
                self.shot.damage = self.damage as f64;
            }
        }
        debug!(reward = reward.as_ref(), health = self.health, damage = self.damage, "Reward applied");
    }

    /// Draws the ship over everything else.
    ///
    /// Touching any hostile-tagged pixel costs exactly one health; returns whether that happened.
    pub fn draw(&mut self, canvas: &mut Canvas<'_>) -> bool {
        let Canvas { frame, occupancy } = canvas;
        let mut touched = false;
        self.sprite.composite(frame, self.position, |x, y| {
            touched |= occupancy.probe(x, y).is_hostile();
        });
        if touched {
            self.health = self.health.saturating_sub(1);
            debug!(health = self.health, "Player hit");
        }
        touched
    }
}
