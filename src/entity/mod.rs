//! Everything the registry owns: hostiles, projectiles and pickups, plus the player.

pub mod bouncer;
pub mod buff;
pub mod bullet;
pub mod chaser;
pub mod motion;
pub mod player;
pub mod shooter;

use std::rc::Rc;

use glam::IVec2;
use rand::Rng;
use strum_macros::{AsRefStr, EnumCount, EnumIter};

use crate::clock::{Millis, Throttle};
use crate::constants::DEAD_HEALTH;
use crate::occupancy::{Owner, OwnerId};
use crate::render::Canvas;
use crate::texture::Sprite;

pub use bouncer::Bouncer;
pub use buff::{Buff, Reward};
pub use bullet::{Bullet, Faction, ShotTemplate};
pub use chaser::Chaser;
pub use motion::Playfield;
pub use player::Player;
pub use shooter::AngleShooter;

/// What every entity update gets to see.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub now: Millis,
    /// The player's center.
    pub target: IVec2,
    pub field: Playfield,
}

/// The hostile variants the spawner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, AsRefStr)]
pub enum HostileKind {
    Chaser,
    Bouncer,
    Shooter,
}

/// State shared by every registry entity.
#[derive(Debug, Clone)]
pub struct Body {
    /// Sprite center, in screen pixels.
    pub position: IVec2,
    /// Dead at or below zero.
    pub health: f64,
    /// Awarded to the player when this entity is killed by a hit.
    pub score: u64,
    pub sprite: Rc<Sprite>,
    /// Still travelling in from off screen. Bounds are not enforced until this clears.
    pub entering: bool,
    throttle: Throttle,
}

impl Body {
    pub fn new(position: IVec2, sprite: Rc<Sprite>, health: f64, score: u64, update_ms: Millis) -> Self {
        Self {
            position,
            health,
            score,
            sprite,
            entering: false,
            throttle: Throttle::new(update_ms),
        }
    }

    /// Marks the body as entering if any of it starts off screen.
    pub fn entering_from(mut self, field: &Playfield) -> Self {
        self.entering = !field.contains(self.position, &self.sprite);
        self
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
    }

    pub fn kill(&mut self) {
        self.health = DEAD_HEALTH;
    }

    /// Consumes the update throttle.
    pub(crate) fn ready(&mut self, now: Millis) -> bool {
        self.throttle.ready(now)
    }

    /// Ends the entry phase once fully on screen; afterwards keeps the sprite on screen.
    pub(crate) fn settle(&mut self, field: &Playfield) {
        if self.entering {
            self.entering = !field.contains(self.position, &self.sprite);
        } else {
            self.position = field.clamp(self.position, &self.sprite);
        }
    }

    /// Composites the sprite and claims its pixels for `owner`.
    ///
    /// Returns the index of the last player projectile found under the sprite.
    pub fn stamp(&self, canvas: &mut Canvas<'_>, owner: OwnerId) -> Option<usize> {
        let Canvas { frame, occupancy } = canvas;
        let mut hit = None;
        self.sprite.composite(frame, self.position, |x, y| {
            if let Owner::Projectile(index) = occupancy.probe(x, y).decode() {
                hit = Some(index);
            }
            occupancy.tag(x, y, owner);
        });
        hit
    }
}

/// A registry entity.
#[derive(Debug, Clone)]
pub enum Entity {
    Chaser(Chaser),
    Bouncer(Bouncer),
    Shooter(AngleShooter),
    Bullet(Bullet),
    Buff(Buff),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Chaser(chaser) => &chaser.body,
            Entity::Bouncer(bouncer) => &bouncer.body,
            Entity::Shooter(shooter) => shooter.body(),
            Entity::Bullet(bullet) => &bullet.body,
            Entity::Buff(buff) => &buff.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Chaser(chaser) => &mut chaser.body,
            Entity::Bouncer(bouncer) => &mut bouncer.body,
            Entity::Shooter(shooter) => shooter.body_mut(),
            Entity::Bullet(bullet) => &mut bullet.body,
            Entity::Buff(buff) => &mut buff.body,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.body().position
    }

    pub fn is_dead(&self) -> bool {
        self.body().is_dead()
    }

    pub fn is_hostile(&self) -> bool {
        matches!(self, Entity::Chaser(_) | Entity::Bouncer(_) | Entity::Shooter(_))
    }

    pub fn hostile_kind(&self) -> Option<HostileKind> {
        match self {
            Entity::Chaser(_) => Some(HostileKind::Chaser),
            Entity::Bouncer(_) => Some(HostileKind::Bouncer),
            Entity::Shooter(_) => Some(HostileKind::Shooter),
            Entity::Bullet(_) | Entity::Buff(_) => None,
        }
    }

    /// Advances movement and AI. A pickup collected during this update yields its reward.
    pub fn update<R: Rng>(&mut self, tick: &Tick, rng: &mut R) -> Option<Reward> {
        match self {
            Entity::Chaser(chaser) => chaser.update(tick),
            Entity::Bouncer(bouncer) => bouncer.update(tick, rng),
            Entity::Shooter(shooter) => shooter.update(tick),
            Entity::Bullet(bullet) => bullet.update(tick),
            Entity::Buff(buff) => return buff.update(tick),
        }
        None
    }

    /// Fires at `target` if this entity can attack and is ready to.
    pub fn attack(&mut self, target: IVec2) -> Option<Bullet> {
        match self {
            Entity::Shooter(shooter) => shooter.attack(target),
            _ => None,
        }
    }

    /// Draws the entity stored at `index` of its pool.
    ///
    /// Hostiles report the player projectile they were drawn over, if any.
    pub fn draw(&self, canvas: &mut Canvas<'_>, index: usize) -> Option<usize> {
        match self {
            Entity::Chaser(_) | Entity::Bouncer(_) | Entity::Shooter(_) => {
                self.body().stamp(canvas, Owner::Hostile(index).into())
            }
            Entity::Bullet(bullet) => {
                bullet.body.stamp(canvas, bullet.owner(index));
                None
            }
            Entity::Buff(buff) => {
                buff.body.stamp(canvas, Owner::Pickup(index).into());
                None
            }
        }
    }
}

impl From<Chaser> for Entity {
    fn from(chaser: Chaser) -> Self {
        Entity::Chaser(chaser)
    }
}

impl From<Bouncer> for Entity {
    fn from(bouncer: Bouncer) -> Self {
        Entity::Bouncer(bouncer)
    }
}

impl From<AngleShooter> for Entity {
    fn from(shooter: AngleShooter) -> Self {
        Entity::Shooter(shooter)
    }
}

impl From<Bullet> for Entity {
    fn from(bullet: Bullet) -> Self {
        Entity::Bullet(bullet)
    }
}

impl From<Buff> for Entity {
    fn from(buff: Buff) -> Self {
        Entity::Buff(buff)
    }
}
