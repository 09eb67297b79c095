//! 32-bit ARGB colors and blending onto RGB565 pixels.
//!
//! Dial styles are authored in 8-bit ARGB with alpha so that overlays (the
//! glass highlight, markers) can be alpha-blended. The framebuffer stores
//! RGB565, so blending reads the destination back, widens it to 8 bits per
//! channel, mixes, and narrows again (R>>3, G>>2, B>>3).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use serde::{Deserialize, Serialize};

/// Non-premultiplied 8-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Unpack a `0xAARRGGBB` literal.
    pub const fn from_u32(argb: u32) -> Self {
        Self::new(
            (argb >> 24) as u8,
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Argb, t: f32) -> Argb {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            libm::roundf(from as f32 + (to as f32 - from as f32) * t) as u8
        };
        Argb::new(
            mix(self.a, other.a),
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Narrow to RGB565, dropping alpha.
    pub fn to_rgb565(self) -> Rgb565 {
        Rgb565::new(self.r >> 3, self.g >> 2, self.b >> 3)
    }

    /// Source-over composite of `self` onto `dst`.
    pub fn blend_over(self, dst: Rgb565) -> Rgb565 {
        match self.a {
            0 => dst,
            255 => self.to_rgb565(),
            alpha => {
                let alpha = alpha as u32;
                let inv = 255 - alpha;
                let widen5 = |v: u8| ((v as u32) << 3) | ((v as u32) >> 2);
                let widen6 = |v: u8| ((v as u32) << 2) | ((v as u32) >> 4);
                let mix = |src: u8, dst: u32| ((src as u32 * alpha + dst * inv + 127) / 255) as u8;

                let r = mix(self.r, widen5(dst.r()));
                let g = mix(self.g, widen6(dst.g()));
                let b = mix(self.b, widen5(dst.b()));
                Rgb565::new(r >> 3, g >> 2, b >> 3)
            }
        }
    }
}
