//! Ownership of every live non-player entity.
//!
//! Entities live in three soft-deleted pools. A dead entity's slot is emptied while
//! drawing, and the pools are only compacted once enough slots are empty, so removal
//! is amortized O(1). Pool indices are stable for a single frame, which is all the
//! occupancy map needs to link a hit back to its projectile.

use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::PROJECTILE_WEAR;
use crate::entity::{Buff, Bullet, Entity, Player, Reward, Tick};
use crate::render::Canvas;

/// A vector of optional slots. Emptied slots keep every other index stable until [`Pool::compact`].
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        self.slots.push(Some(item));
        self.slots.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Empties a slot, returning what was there.
    pub fn free(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Number of slots, empty ones included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().flatten()
    }

    /// Drops every empty slot, keeping the occupied ones in order.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }
}

/// Owns hostiles, projectiles and pickups, and the rewards waiting for the player.
#[derive(Debug, Clone)]
pub struct Registry {
    hostiles: Pool<Entity>,
    projectiles: Pool<Entity>,
    pickups: Pool<Entity>,
    /// Slots emptied since the last compaction, across all pools.
    deleted: usize,
    threshold: usize,
    rewards: SmallVec<[Reward; 4]>,
}

impl Registry {
    /// Creates an empty registry that compacts once more than `threshold` slots are empty.
    pub fn new(threshold: usize) -> Self {
        Self {
            hostiles: Pool::new(),
            projectiles: Pool::new(),
            pickups: Pool::new(),
            deleted: 0,
            threshold,
            rewards: SmallVec::new(),
        }
    }

    pub fn hostiles(&self) -> &Pool<Entity> {
        &self.hostiles
    }

    pub fn projectiles(&self) -> &Pool<Entity> {
        &self.projectiles
    }

    pub fn pickups(&self) -> &Pool<Entity> {
        &self.pickups
    }

    pub fn deleted(&self) -> usize {
        self.deleted
    }

    pub fn pending_rewards(&self) -> &[Reward] {
        &self.rewards
    }

    /// Adds a hostile.
    pub fn add(&mut self, hostile: Entity) {
        self.hostiles.push(hostile);
    }

    pub fn add_projectile(&mut self, bullet: Bullet) {
        self.projectiles.push(Entity::Bullet(bullet));
    }

    pub fn add_pickup(&mut self, buff: Buff) {
        self.pickups.push(Entity::Buff(buff));
    }

    /// Routes any entity to the pool it belongs in.
    pub fn spawn(&mut self, entity: Entity) {
        match entity {
            Entity::Bullet(bullet) => self.add_projectile(bullet),
            Entity::Buff(buff) => self.add_pickup(buff),
            hostile => self.add(hostile),
        }
    }

    /// Moves everything, lets hostiles attack and harvests pickups the player touched.
    ///
    /// Returns the number of live hostiles.
    pub fn update<R: Rng>(&mut self, tick: &Tick, rng: &mut R) -> usize {
        let mut shots: SmallVec<[Bullet; 4]> = SmallVec::new();
        for hostile in self.hostiles.iter_mut().filter(|e| !e.is_dead()) {
            hostile.update(tick, rng);
            shots.extend(hostile.attack(tick.target));
        }

        for projectile in self.projectiles.iter_mut().filter(|e| !e.is_dead()) {
            projectile.update(tick, rng);
        }
        for bullet in shots {
            self.add_projectile(bullet);
        }

        for pickup in self.pickups.iter_mut().filter(|e| !e.is_dead()) {
            if let Some(reward) = pickup.update(tick, rng) {
                debug!(reward = reward.as_ref(), "Pickup collected");
                self.rewards.push(reward);
            }
        }

        self.hostiles.live()
    }

    /// Draws projectiles, then pickups, then hostiles, freeing the dead on the way.
    ///
    /// A hostile drawn over a player projectile takes that projectile's damage and wears it down.
    /// Returns the total score of hostiles killed this pass.
    pub fn draw(&mut self, canvas: &mut Canvas<'_>) -> u64 {
        if self.deleted > self.threshold {
            self.compact();
        }

        self.deleted += Self::draw_passive(&mut self.projectiles, canvas);
        self.deleted += Self::draw_passive(&mut self.pickups, canvas);

        let mut score = 0;
        for index in 0..self.hostiles.capacity() {
            let Some(hostile) = self.hostiles.get_mut(index) else {
                continue;
            };
            if hostile.is_dead() {
                self.hostiles.free(index);
                self.deleted += 1;
                continue;
            }

            let Some(hit) = hostile.draw(canvas, index) else {
                continue;
            };
            // A projectile worn out earlier in this pass no longer hurts.
            if let Some(Entity::Bullet(bullet)) = self.projectiles.get_mut(hit).filter(|e| !e.is_dead()) {
                hostile.body_mut().take_damage(bullet.damage());
                bullet.body.take_damage(PROJECTILE_WEAR);
                if hostile.is_dead() {
                    let body = hostile.body();
                    trace!(index, x = body.position.x, y = body.position.y, score = body.score, "Hostile killed");
                    score += body.score;
                }
            }
        }
        score
    }

    /// Draws a pool whose entities never take hits, returning how many slots were freed.
    fn draw_passive(pool: &mut Pool<Entity>, canvas: &mut Canvas<'_>) -> usize {
        let mut freed = 0;
        for index in 0..pool.capacity() {
            let Some(entity) = pool.get(index) else {
                continue;
            };
            if entity.is_dead() {
                pool.free(index);
                freed += 1;
            } else {
                entity.draw(canvas, index);
            }
        }
        freed
    }

    /// Drops every empty slot from all pools.
    pub fn compact(&mut self) {
        debug!(
            deleted = self.deleted,
            hostiles = self.hostiles.live(),
            projectiles = self.projectiles.live(),
            pickups = self.pickups.live(),
            "Compacting registry"
        );
        self.hostiles.compact();
        self.projectiles.compact();
        self.pickups.compact();
        self.deleted = 0;
    }

    /// Applies and clears every pending reward.
    pub fn collect_reward(&mut self, player: &mut Player) {
        for reward in self.rewards.drain(..) {
            player.apply_reward(reward);
        }
    }
}
