//! A single sprite pixel and the alpha compositing rule used for every blit.

/// An 8-bit-per-channel color with straight alpha.
///
/// Black (all color channels zero) is reserved to mean "no pixel": sprite art is
/// drawn on a black background which is keyed out on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` frame buffer cell.
    pub const fn from_argb(color: u32) -> Self {
        Self {
            r: (color >> 16) as u8,
            g: (color >> 8) as u8,
            b: color as u8,
            a: (color >> 24) as u8,
        }
    }

    /// Packs the pixel into the `0xAARRGGBB` layout used by the frame buffer.
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Builds a pixel from decoded RGBA bytes, keying out black and forcing `alpha` elsewhere.
    pub fn keyed(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        let a = if r == 0 && g == 0 && b == 0 { 0 } else { alpha };
        Self { r, g, b, a }
    }

    /// Returns true if this pixel carries any color.
    pub fn is_visible(self) -> bool {
        self.r != 0 || self.g != 0 || self.b != 0
    }

    /// Blends this pixel over `dst`, returning an opaque frame buffer cell.
    ///
    /// `out = src * a / 255 + dst * (255 - a) / 255` per channel; output alpha is always `0xff`.
    pub fn mix(self, dst: u32) -> u32 {
        let dst = Pixel::from_argb(dst);
        let a = self.a as u32;
        let blend = |src: u8, dst: u8| src as u32 * a / 255 + dst as u32 * (255 - a) / 255;
        0xff00_0000 | (blend(self.r, dst.r) << 16) | (blend(self.g, dst.g) << 8) | blend(self.b, dst.b)
    }

    /// Returns a copy with every color channel scaled by `numerator / 255`.
    pub fn dimmed(self, numerator: u8) -> Self {
        let scale = |c: u8| (c as u32 * numerator as u32 / 255) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_round_trip() {
        let pixel = Pixel::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(pixel.to_argb(), 0x7812_3456);
        assert_eq!(Pixel::from_argb(0x7812_3456), pixel);
    }

    #[test]
    fn test_keyed_black_is_transparent() {
        assert_eq!(Pixel::keyed(0, 0, 0, 0xff).a, 0);
        assert_eq!(Pixel::keyed(1, 0, 0, 0x80).a, 0x80);
    }

    #[test]
    fn test_mix_opaque_replaces() {
        let src = Pixel::new(10, 20, 30, 255);
        assert_eq!(src.mix(0xff_ff_ff_ff), 0xff0a_141e);
    }

    #[test]
    fn test_mix_transparent_keeps_destination() {
        assert_eq!(Pixel::TRANSPARENT.mix(0x0011_2233), 0xff11_2233);
    }

    #[test]
    fn test_mix_half() {
        let src = Pixel::new(200, 0, 0, 128);
        // 200 * 128 / 255 = 100, 100 * 127 / 255 = 49
        let out = src.mix(0xff64_0000);
        assert_eq!(Pixel::from_argb(out).r, 149);
        assert_eq!(out >> 24, 0xff);
    }
}
