use std::rc::Rc;

use glam::{DVec2, IVec2};

use crate::clock::Millis;
use crate::entity::motion::Residue;
use crate::entity::{Body, Tick};
use crate::occupancy::{Owner, OwnerId};
use crate::texture::Sprite;

/// Who fired a bullet, which decides what it can hurt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Damages hostiles.
    Player,
    /// Kills the player on contact, passes through hostiles.
    Hostile,
}

/// Everything needed to fire a bullet except where and which way.
#[derive(Debug, Clone)]
pub struct ShotTemplate {
    pub sprite: Rc<Sprite>,
    pub speed: f64,
    pub damage: f64,
    pub update_ms: Millis,
}

impl ShotTemplate {
    pub fn fire(&self, from: IVec2, direction: DVec2, faction: Faction) -> Bullet {
        Bullet::new(
            Body::new(from, Rc::clone(&self.sprite), 1.0, 0, self.update_ms),
            direction,
            self.speed,
            self.damage,
            faction,
        )
    }
}

/// A projectile moving at constant velocity until it leaves the screen.
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Health doubles as durability: every hit wears it down.
    pub body: Body,
    /// Unit vector, or zero for a bullet that never moves.
    direction: DVec2,
    speed: f64,
    damage: f64,
    residue: Residue,
    faction: Faction,
}

impl Bullet {
    /// `direction` may have any length; it is normalized here and the sprite turned to face it.
    pub fn new(mut body: Body, direction: DVec2, speed: f64, damage: f64, faction: Faction) -> Self {
        let direction = direction.normalize_or_zero();
        if direction != DVec2::ZERO {
            let sprite = Rc::make_mut(&mut body.sprite);
            sprite.set_rotation_from_direction(direction.x, direction.y);
            sprite.advance_rotation();
        }
        Self {
            body,
            direction,
            speed,
            damage,
            residue: Residue::default(),
            faction,
        }
    }

    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    /// The occupancy id this bullet tags its pixels with when stored at `index`.
    pub fn owner(&self, index: usize) -> OwnerId {
        match self.faction {
            Faction::Player => Owner::Projectile(index),
            Faction::Hostile => Owner::HostileShot(index),
        }
        .into()
    }

    pub fn update(&mut self, tick: &Tick) {
        if !self.body.ready(tick.now) {
            return;
        }
        self.body.position += self.residue.advance(self.direction * self.speed);
        if tick.field.is_outside(self.body.position, &self.body.sprite) {
            self.body.kill();
        }
    }
}
