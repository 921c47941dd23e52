use std::path::Path;

use glam::UVec2;

use crate::error::TextureError;
use crate::texture::{Pixel, Sprite};

/// The screen buffer the host presents: one `0xAARRGGBB` cell per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    size: UVec2,
    cells: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(size: UVec2) -> Self {
        Self {
            size,
            cells: vec![0xff00_0000; (size.x * size.y) as usize],
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    /// Returns the cell at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.size.x && y < self.size.y).then(|| self.cells[(y * self.size.x + x) as usize])
    }

    /// Blends `pixel` over the cell at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.size.x && y < self.size.y {
            let cell = &mut self.cells[(y * self.size.x + x) as usize];
            *cell = pixel.mix(*cell);
        }
    }

    pub fn fill(&mut self, color: u32) {
        self.cells.fill(color);
    }

    /// Overwrites the buffer with the background. Only the overlapping prefix is copied on a size mismatch.
    pub fn copy_from(&mut self, background: &Background) {
        let len = self.cells.len().min(background.cells.len());
        self.cells[..len].copy_from_slice(&background.cells[..len]);
    }
}

/// A screen-sized image made by tiling a source picture, composited under everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    size: UVec2,
    cells: Vec<u32>,
}

impl Background {
    /// Tiles `tile` across a `size` screen. Black source pixels stay black.
    pub fn tiled(tile: &Sprite, size: UVec2) -> Self {
        let pixels = tile.base_pixels();
        let mut cells = Vec::with_capacity((size.x * size.y) as usize);
        for y in 0..size.y {
            let row = (y % tile.height()) * tile.width();
            for x in 0..size.x {
                let pixel = pixels[(row + x % tile.width()) as usize];
                cells.push(0xff00_0000 | pixel.to_argb());
            }
        }
        Self { size, cells }
    }

    pub fn load(path: impl AsRef<Path>, size: UVec2) -> Result<Self, TextureError> {
        Ok(Self::tiled(&Sprite::load(path, 0xff)?, size))
    }

    /// A single flat color.
    pub fn solid(color: u32, size: UVec2) -> Self {
        Self {
            size,
            cells: vec![0xff00_0000 | color; (size.x * size.y) as usize],
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns a copy with every channel scaled by `numerator / 255`.
    pub fn dimmed(&self, numerator: u8) -> Self {
        Self {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|&cell| Pixel::from_argb(cell).dimmed(numerator).to_argb())
                .collect(),
        }
    }
}
