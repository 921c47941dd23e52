//! Screen bounds and sub-pixel movement helpers shared by every moving entity.

use glam::{DVec2, IVec2, UVec2};

use crate::texture::Sprite;

/// The visible screen area entities live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playfield {
    pub size: UVec2,
}

impl Playfield {
    pub fn new(size: UVec2) -> Self {
        Self { size }
    }

    pub fn center(&self) -> IVec2 {
        (self.size / 2).as_ivec2()
    }

    /// Inclusive range of centers that keep all of `sprite` on screen.
    ///
    /// A sprite larger than the screen gets a collapsed range pinned to its top-left.
    pub fn center_range(&self, sprite: &Sprite) -> (IVec2, IVec2) {
        let half = sprite.half_extents();
        let low = half;
        let high = self.size.as_ivec2() - sprite.size().as_ivec2() + half;
        (low, high.max(low))
    }

    /// Pulls `center` into [`center_range`](Self::center_range).
    pub fn clamp(&self, center: IVec2, sprite: &Sprite) -> IVec2 {
        let (low, high) = self.center_range(sprite);
        center.max(low).min(high)
    }

    /// True if every pixel of `sprite` centered at `center` is on screen.
    pub fn contains(&self, center: IVec2, sprite: &Sprite) -> bool {
        let (low, high) = self.center_range(sprite);
        center.cmpge(low).all() && center.cmple(high).all()
    }

    /// True if no pixel of `sprite` centered at `center` is on screen.
    pub fn is_outside(&self, center: IVec2, sprite: &Sprite) -> bool {
        let origin = sprite.origin(center);
        let end = origin + sprite.size().as_ivec2();
        let size = self.size.as_ivec2();
        end.x <= 0 || end.y <= 0 || origin.x >= size.x || origin.y >= size.y
    }
}

/// Carries the fractional part of movement between updates so rounding never drifts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Residue(DVec2);

impl Residue {
    /// Adds `delta` and returns the whole pixels accumulated so far, keeping the remainder.
    ///
    /// Whole pixels are truncated toward zero, so negative movement carries a negative remainder.
    pub fn advance(&mut self, delta: DVec2) -> IVec2 {
        self.0 += delta;
        let whole = self.0.trunc();
        self.0 -= whole;
        whole.as_ivec2()
    }

    pub fn value(&self) -> DVec2 {
        self.0
    }
}

/// Moves `position` toward `target` by exactly `step`, or not at all if that would pass it.
pub fn approach(position: i32, target: i32, step: i32) -> i32 {
    if target <= position - step {
        position - step
    } else if target >= position + step {
        position + step
    } else {
        position
    }
}
