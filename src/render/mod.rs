//! Frame buffer, background and overlay compositing.

pub mod frame;
pub mod hud;

pub use frame::{Background, FrameBuffer};
pub use hud::{DigitFont, Stats};

use crate::occupancy::OccupancyMap;

/// Mutable per-frame drawing state handed to every entity's draw step.
pub struct Canvas<'a> {
    pub frame: &'a mut FrameBuffer,
    pub occupancy: &'a mut OccupancyMap,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut FrameBuffer, occupancy: &'a mut OccupancyMap) -> Self {
        Self { frame, occupancy }
    }
}
