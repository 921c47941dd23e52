use strum_macros::{AsRefStr, EnumCount, EnumIter};

use crate::entity::{Body, Tick};

/// What a pickup grants once collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, AsRefStr)]
pub enum Reward {
    /// One more point of health.
    Health,
    /// One more point of bullet damage.
    Damage,
}

/// A stationary pickup.
#[derive(Debug, Clone)]
pub struct Buff {
    pub body: Body,
    reward: Reward,
}

impl Buff {
    pub fn new(body: Body, reward: Reward) -> Self {
        Self { body, reward }
    }

    pub fn reward(&self) -> Reward {
        self.reward
    }

    /// Collects the pickup when the player's center lies inside its half extents.
    pub fn update(&mut self, tick: &Tick) -> Option<Reward> {
        if self.body.is_dead() {
            return None;
        }
        let offset = (tick.target - self.body.position).abs();
        if offset.cmple(self.body.sprite.half_extents()).all() {
            self.body.kill();
            Some(self.reward)
        } else {
            None
        }
    }
}
