//! Per-pixel ownership grid used to resolve collisions.
//!
//! Every entity tags the screen pixels its opaque sprite pixels land on while it is
//! drawn. Whoever draws later sees what was already there, which turns collision
//! detection into work proportional to sprite area instead of pairwise tests.

use bitflags::bitflags;
use glam::UVec2;

bitflags! {
    /// Category bits stored in the high end of an [`OwnerId`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OwnerTag: u32 {
        /// Anything that kills the player on contact: hostile bodies and their shots.
        const HOSTILE = 1 << 31;
        /// A pickup; never counts as a projectile hit.
        const PICKUP = 1 << 30;
        /// Set together with `HOSTILE` for projectiles fired by hostiles.
        const SHOT = 1 << 29;
    }
}

const INDEX_MASK: u32 = OwnerTag::SHOT.bits() - 1;

/// What an occupancy cell decodes to. Indices refer to the registry pools of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Empty,
    /// A player projectile, by projectile pool index.
    Projectile(usize),
    Hostile(usize),
    /// A hostile-fired projectile, by projectile pool index.
    HostileShot(usize),
    Pickup(usize),
}

/// Raw tagged owner id as stored in the grid. Zero means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OwnerId(u32);

impl OwnerId {
    pub const EMPTY: OwnerId = OwnerId(0);

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn tags(self) -> OwnerTag {
        OwnerTag::from_bits_truncate(self.0)
    }

    /// True for hostile bodies and hostile shots.
    pub fn is_hostile(self) -> bool {
        self.tags().contains(OwnerTag::HOSTILE)
    }

    pub fn decode(self) -> Owner {
        let index = (self.0 & INDEX_MASK) as usize;
        let tags = self.tags();
        if self.is_empty() {
            Owner::Empty
        } else if tags.contains(OwnerTag::HOSTILE | OwnerTag::SHOT) {
            Owner::HostileShot(index)
        } else if tags.contains(OwnerTag::HOSTILE) {
            Owner::Hostile(index)
        } else if tags.contains(OwnerTag::PICKUP) {
            Owner::Pickup(index)
        } else {
            // Plain ids are offset by one so that projectile 0 is not "empty".
            Owner::Projectile(index.saturating_sub(1))
        }
    }
}

impl From<Owner> for OwnerId {
    fn from(owner: Owner) -> Self {
        let index = |i: usize| i as u32 & INDEX_MASK;
        OwnerId(match owner {
            Owner::Empty => 0,
            Owner::Projectile(i) => index(i + 1),
            Owner::Hostile(i) => OwnerTag::HOSTILE.bits() | index(i),
            Owner::HostileShot(i) => (OwnerTag::HOSTILE | OwnerTag::SHOT).bits() | index(i),
            Owner::Pickup(i) => OwnerTag::PICKUP.bits() | index(i),
        })
    }
}

/// A screen-sized grid of [`OwnerId`]s, cleared at the start of every render pass.
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    size: UVec2,
    cells: Vec<OwnerId>,
}

impl OccupancyMap {
    pub fn new(size: UVec2) -> Self {
        Self {
            size,
            cells: vec![OwnerId::EMPTY; (size.x * size.y) as usize],
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn clear(&mut self) {
        self.cells.fill(OwnerId::EMPTY);
    }

    /// Claims `(x, y)` for `owner`. Coordinates outside the grid are ignored.
    pub fn tag(&mut self, x: u32, y: u32, owner: OwnerId) {
        if x < self.size.x && y < self.size.y {
            self.cells[(y * self.size.x + x) as usize] = owner;
        }
    }

    /// Returns the current owner of `(x, y)`; empty outside the grid.
    pub fn probe(&self, x: u32, y: u32) -> OwnerId {
        if x < self.size.x && y < self.size.y {
            self.cells[(y * self.size.x + x) as usize]
        } else {
            OwnerId::EMPTY
        }
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|id| !id.is_empty()).count()
    }
}
