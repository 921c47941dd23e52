//! The per-frame input snapshot supplied by the host.

use bitflags::bitflags;
use glam::IVec2;

bitflags! {
    /// Logical keys currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        /// Ends the run after the current update.
        const QUIT = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    pub keys: Keys,
    /// Pointer position in screen pixels.
    pub cursor: IVec2,
    /// Primary mouse button held.
    pub fire: bool,
}

impl Input {
    pub fn new(keys: Keys, cursor: IVec2, fire: bool) -> Self {
        Self { keys, cursor, fire }
    }

    /// Movement requested this frame, one of `-1`, `0` or `1` per axis.
    ///
    /// Opposite keys do not cancel: right wins over left and up wins over down.
    pub fn step(&self) -> IVec2 {
        let x = if self.keys.contains(Keys::RIGHT) {
            1
        } else if self.keys.contains(Keys::LEFT) {
            -1
        } else {
            0
        };
        let y = if self.keys.contains(Keys::UP) {
            -1
        } else if self.keys.contains(Keys::DOWN) {
            1
        } else {
            0
        };
        IVec2::new(x, y)
    }

    pub fn quit(&self) -> bool {
        self.keys.contains(Keys::QUIT)
    }
}
