use glam::DVec2;

use crate::entity::motion::{approach, Residue};
use crate::entity::{Body, Tick};

/// Walks straight at the player one axis at a time.
#[derive(Debug, Clone)]
pub struct Chaser {
    pub body: Body,
    /// Pixels per update on each axis; fractions accumulate between updates.
    speed: f64,
    residue: Residue,
}

impl Chaser {
    pub fn new(body: Body, speed: f64) -> Self {
        Self {
            body,
            speed,
            residue: Residue::default(),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn update(&mut self, tick: &Tick) {
        if !self.body.ready(tick.now) {
            return;
        }

        let goal = if self.body.entering {
            tick.field.center()
        } else {
            tick.target
        };
        let step = self.residue.advance(DVec2::splat(self.speed));
        let position = &mut self.body.position;
        position.x = approach(position.x, goal.x, step.x);
        position.y = approach(position.y, goal.y, step.y);
        self.body.settle(&tick.field);
    }
}
