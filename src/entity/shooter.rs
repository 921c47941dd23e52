use glam::IVec2;

use crate::clock::Throttle;
use crate::entity::bullet::{Bullet, Faction, ShotTemplate};
use crate::entity::chaser::Chaser;
use crate::entity::{Body, Tick};

/// A chaser that also fires aimed shots on a cooldown.
#[derive(Debug, Clone)]
pub struct AngleShooter {
    chaser: Chaser,
    cooldown: Throttle,
    ready_to_fire: bool,
    shot: ShotTemplate,
}

impl AngleShooter {
    pub fn new(body: Body, speed: f64, cooldown: Throttle, shot: ShotTemplate) -> Self {
        Self {
            chaser: Chaser::new(body, speed),
            cooldown,
            ready_to_fire: false,
            shot,
        }
    }

    pub fn body(&self) -> &Body {
        &self.chaser.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.chaser.body
    }

    pub fn is_ready_to_fire(&self) -> bool {
        self.ready_to_fire
    }

    pub fn update(&mut self, tick: &Tick) {
        self.chaser.update(tick);
        if !self.ready_to_fire && self.cooldown.ready(tick.now) {
            self.ready_to_fire = true;
        }
    }

    /// Spends a loaded shot on a bullet aimed at `target`.
    ///
    /// Holds fire while entering and while sitting on the target, keeping the shot loaded.
    pub fn attack(&mut self, target: IVec2) -> Option<Bullet> {
        let body = self.body();
        if !self.ready_to_fire || body.entering || target == body.position {
            return None;
        }
        let (from, direction) = (body.position, (target - body.position).as_dvec2());
        self.ready_to_fire = false;
        Some(self.shot.fire(from, direction, Faction::Hostile))
    }
}
