use std::rc::Rc;

use glam::DVec2;
use rand::Rng;

use crate::constants::BOUNCE_RESTITUTION;
use crate::entity::motion::Residue;
use crate::entity::{Body, Tick};

/// Flies in a straight line and rebounds off the screen edges.
#[derive(Debug, Clone)]
pub struct Bouncer {
    pub body: Body,
    /// Pixels per update.
    velocity: DVec2,
    residue: Residue,
    spinning: bool,
}

impl Bouncer {
    /// Creates a bouncer. With `spin`, the sprite turns by that many radians every update,
    /// which gives this bouncer its own copy of the sprite.
    pub fn new(mut body: Body, velocity: DVec2, spin: Option<f64>) -> Self {
        if let Some(step) = spin {
            Rc::make_mut(&mut body.sprite).set_rotation_step(step);
        }
        Self {
            body,
            velocity,
            residue: Residue::default(),
            spinning: spin.is_some(),
        }
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn update<R: Rng>(&mut self, tick: &Tick, rng: &mut R) {
        if !self.body.ready(tick.now) {
            return;
        }
        if self.spinning {
            Rc::make_mut(&mut self.body.sprite).advance_rotation();
        }

        let delta = if self.body.entering {
            let heading = (tick.field.center() - self.body.position).as_dvec2();
            heading.normalize_or_zero() * self.velocity.length()
        } else {
            self.velocity
        };
        self.body.position += self.residue.advance(delta);

        if !self.body.entering {
            let (low, high) = tick.field.center_range(&self.body.sprite);
            let position = self.body.position;
            let (min, max) = BOUNCE_RESTITUTION;
            if position.x < low.x || position.x > high.x {
                self.velocity.x = -self.velocity.x * rng.random_range(min..max);
            }
            if position.y < low.y || position.y > high.y {
                self.velocity.y = -self.velocity.y * rng.random_range(min..max);
            }
        }
        self.body.settle(&tick.field);
    }
}
