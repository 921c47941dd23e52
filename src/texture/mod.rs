//! Sprite storage and pixel compositing.

pub mod pixel;
pub mod sprite;

pub use pixel::Pixel;
pub use sprite::Sprite;
