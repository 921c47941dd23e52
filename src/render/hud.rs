//! Stat overlay drawn from a set of digit sprites.

use glam::IVec2;

use crate::constants::SCORE_DIGITS;
use crate::render::FrameBuffer;
use crate::texture::Sprite;

/// Horizontal gap between stat groups, in pixels.
const GROUP_GAP: i32 = 12;

/// The ten digit sprites, tightened so that numbers pack closely.
#[derive(Debug, Clone)]
pub struct DigitFont {
    digits: [Sprite; 10],
}

impl DigitFont {
    pub fn new(mut digits: [Sprite; 10]) -> Self {
        for digit in &mut digits {
            digit.tighten();
        }
        Self { digits }
    }

    pub fn glyph(&self, digit: u32) -> &Sprite {
        &self.digits[(digit % 10) as usize]
    }

    /// Width in pixels of `value` rendered with exactly `len` digits.
    pub fn measure(&self, value: u64, len: usize) -> i32 {
        digits_of(value, len).map(|d| self.glyph(d).width() as i32).sum()
    }

    /// Draws the lowest `len` decimal digits of `value`, zero-padded, with the top-left corner at `origin`.
    ///
    /// Returns the x coordinate just past the last glyph.
    pub fn draw(&self, frame: &mut FrameBuffer, value: u64, len: usize, origin: IVec2) -> i32 {
        let mut x = origin.x;
        for digit in digits_of(value, len) {
            let glyph = self.glyph(digit);
            glyph.composite(frame, IVec2::new(x, origin.y) + glyph.half_extents(), |_, _| {});
            x += glyph.width() as i32;
        }
        x
    }
}

/// Yields the lowest `len` digits of `value`, most significant first.
fn digits_of(value: u64, len: usize) -> impl Iterator<Item = u32> {
    (0..len as u32).rev().map(move |place| {
        let divisor = 10u64.checked_pow(place).unwrap_or(u64::MAX);
        ((value / divisor) % 10) as u32
    })
}

/// Numbers shown on top of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub score: u64,
    pub health: u32,
    pub damage: u32,
}

/// Score top-left; health and damage top-right.
pub fn draw_stats(frame: &mut FrameBuffer, font: &DigitFont, stats: Stats) {
    font.draw(frame, stats.score, SCORE_DIGITS, IVec2::ZERO);

    let right = frame.size().x as i32;
    let damage_width = font.measure(stats.damage as u64, 3);
    let health_width = font.measure(stats.health as u64, 1);
    let start = right - damage_width - GROUP_GAP - health_width;
    let after_health = font.draw(frame, stats.health as u64, 1, IVec2::new(start, 0));
    font.draw(frame, stats.damage as u64, 3, IVec2::new(after_health + GROUP_GAP, 0));
}

/// The final score, centered on the screen.
pub fn draw_final_score(frame: &mut FrameBuffer, font: &DigitFont, score: u64) {
    let size = frame.size().as_ivec2();
    let width = font.measure(score, SCORE_DIGITS);
    let height = font.glyph(0).height() as i32;
    font.draw(frame, score, SCORE_DIGITS, IVec2::new((size.x - width) / 2, (size.y - height) / 2));
}
