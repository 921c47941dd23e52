//! Alpha-keyed sprites with a cheap discrete rotation.
//!
//! A sprite keeps its decoded pixels untouched in a base buffer and renders every
//! rotation into a same-sized working buffer, which is what gets composited.

use std::f64::consts::PI;
use std::ops::Index;
use std::path::Path;

use glam::{IVec2, UVec2};
use image::RgbaImage;
use tracing::trace;

use crate::constants::TAU;
use crate::error::TextureError;
use crate::render::FrameBuffer;
use crate::texture::pixel::Pixel;

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    /// Pixels exactly as loaded (after keying and tightening).
    base: Vec<Pixel>,
    /// The base pixels rendered at the current rotation.
    working: Vec<Pixel>,
    /// Angle added to `angle` on every activation, in `[0, 2π)`.
    step: f64,
    /// Accumulated rotation, in `[0, 2π)`.
    angle: f64,
}

impl Sprite {
    /// Creates a sprite from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(width, height));
        }
        if pixels.len() != (width * height) as usize {
            return Err(TextureError::InvalidFormat(format!(
                "expected {} pixels for a {width}x{height} sprite, got {}",
                width * height,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            working: pixels.clone(),
            base: pixels,
            step: 0.0,
            angle: 0.0,
        })
    }

    /// Converts a decoded RGBA image, keying out black and giving every other pixel `alpha`.
    pub fn from_rgba(image: &RgbaImage, alpha: u8) -> Result<Self, TextureError> {
        let pixels = image.pixels().map(|p| Pixel::keyed(p[0], p[1], p[2], alpha)).collect();
        Self::from_pixels(image.width(), image.height(), pixels)
    }

    /// Decodes the image at `path` into a sprite.
    pub fn load(path: impl AsRef<Path>, alpha: u8) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| TextureError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sprite = Self::from_rgba(&image.to_rgba8(), alpha)?;
        trace!(path = %path.display(), width = sprite.width, height = sprite.height, "Sprite loaded");
        Ok(sprite)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Half the width and height, rounded down. The sprite's center sits at this offset.
    pub fn half_extents(&self) -> IVec2 {
        IVec2::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// The working (rotated) pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.working
    }

    /// The unrotated pixels, row-major.
    pub fn base_pixels(&self) -> &[Pixel] {
        &self.base
    }

    pub fn rotation_step(&self) -> f64 {
        self.step
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns the top-left corner of the sprite when centered at `center`.
    pub fn origin(&self, center: IVec2) -> IVec2 {
        center - self.half_extents()
    }

    /// Crops both buffers to the smallest box holding every visible pixel, plus a one pixel margin.
    ///
    /// Rotation is reset. Fully transparent sprites are left alone.
    pub fn tighten(&mut self) {
        let mut min = UVec2::new(self.width, self.height);
        let mut max = UVec2::ZERO;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.base[(y * self.width + x) as usize].is_visible() {
                    min = min.min(UVec2::new(x, y));
                    max = max.max(UVec2::new(x + 1, y + 1));
                }
            }
        }
        if max.x <= min.x || max.y <= min.y {
            return;
        }

        let extent = max - min;
        let (width, height) = (extent.x + 2, extent.y + 2);
        let mut tight = vec![Pixel::TRANSPARENT; (width * height) as usize];
        for y in min.y..max.y {
            let row = (y - min.y + 1) * width;
            for x in min.x..max.x {
                tight[(row + x - min.x + 1) as usize] = self.base[(y * self.width + x) as usize];
            }
        }

        trace!(from = ?self.size(), to = ?UVec2::new(width, height), "Sprite tightened");
        self.width = width;
        self.height = height;
        self.working = tight.clone();
        self.base = tight;
        self.angle = 0.0;
    }

    /// Sets the angle added on every [`advance_rotation`](Self::advance_rotation) call.
    pub fn set_rotation_step(&mut self, theta: f64) {
        self.step = theta.rem_euclid(TAU);
    }

    pub fn add_rotation_step(&mut self, theta: f64) {
        self.step = (self.step + theta).rem_euclid(TAU);
    }

    /// Points the sprite along `(dx, dy)`: the step becomes `atan2(-dx, dy)` and the accumulated angle resets.
    ///
    /// A zero vector has no heading and leaves the rotation untouched.
    pub fn set_rotation_from_direction(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.step = (-dx).atan2(dy).rem_euclid(TAU);
        self.angle = 0.0;
    }

    /// Accumulates one step and re-renders the working buffer from the base buffer.
    ///
    /// Angles in the lower half-turn are rendered a half-turn around and then flipped on
    /// both axes, which keeps the shear factors small.
    pub fn advance_rotation(&mut self) {
        self.angle += self.step;
        if self.angle >= TAU {
            self.angle -= TAU;
        }

        let flip = self.angle > PI / 2.0 && self.angle < PI + PI / 2.0;
        let angle = if flip { (self.angle + PI).rem_euclid(TAU) } else { self.angle };

        self.working.fill(Pixel::TRANSPARENT);
        self.shear_rotate(angle);
        if flip {
            self.flip_both();
        }
    }

    /// Three-shear rotation (x, y, x) of the base buffer into the working buffer.
    ///
    /// Coordinates are truncated after every shear, so this is an approximation that
    /// can leave holes; it is exact for an angle of zero.
    fn shear_rotate(&mut self, angle: f64) {
        let sin = angle.sin();
        let tan = (angle / 2.0).tan();
        let half = self.half_extents();
        let (w, h) = (self.width as i32, self.height as i32);

        for i in 0..h {
            for j in 0..w {
                let src = self.base[(i * w + j) as usize];
                if !src.is_visible() {
                    continue;
                }
                let mut x = (j - half.x) as f64;
                let mut y = (i - half.y) as f64;
                x = (x - tan * y).trunc();
                y = (y + sin * x).trunc();
                x = (x - tan * y).trunc();

                let (row, col) = (y as i32 + half.y, x as i32 + half.x);
                if (0..h).contains(&row) && (0..w).contains(&col) {
                    self.working[(row * w + col) as usize] = src;
                }
            }
        }
    }

    /// Mirrors the working buffer vertically and horizontally.
    fn flip_both(&mut self) {
        let mut flipped = vec![Pixel::TRANSPARENT; self.working.len()];
        let last = self.working.len() - 1;
        for (index, pixel) in self.working.iter().enumerate() {
            if pixel.is_visible() {
                flipped[last - index] = *pixel;
            }
        }
        self.working = flipped;
    }

    /// Alpha-blends the working buffer into `frame` centered at `center`, clipped to the frame.
    ///
    /// `visit` is called with the screen coordinates of every visible pixel that landed on screen.
    pub fn composite(&self, frame: &mut FrameBuffer, center: IVec2, mut visit: impl FnMut(u32, u32)) {
        let origin = self.origin(center);
        let bounds = frame.size().as_ivec2();

        for row in 0..self.height as i32 {
            let y = origin.y + row;
            if y < 0 || y >= bounds.y {
                continue;
            }
            for col in 0..self.width as i32 {
                let x = origin.x + col;
                if x < 0 || x >= bounds.x {
                    continue;
                }
                let pixel = self.working[(row * self.width as i32 + col) as usize];
                if pixel.is_visible() {
                    frame.blend(x as u32, y as u32, pixel);
                    visit(x as u32, y as u32);
                }
            }
        }
    }
}

impl Index<usize> for Sprite {
    type Output = Pixel;

    fn index(&self, index: usize) -> &Pixel {
        &self.working[index]
    }
}
