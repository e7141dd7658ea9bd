//! Packed RGBA pixel values.
//!
//! A grid stores every pixel as a single `u32` with the layout `0xRRGGBBAA`:
//! red in the most significant byte, alpha in the least significant byte,
//! 8 bits per channel. [`Pixel`] is the unpacked, by-value view of one of
//! those integers.

use std::fmt;

use serde::{Deserialize, Serialize};

const RED_SHIFT: u32 = 24;
const GREEN_SHIFT: u32 = 16;
const BLUE_SHIFT: u32 = 8;

/// A 4-channel 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);

    /// Create a fully opaque pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a pixel from a big-endian `[r, g, b]` group. Alpha is 255.
    #[inline]
    pub const fn from_rgb_bytes(bytes: [u8; 3]) -> Self {
        Self::rgb(bytes[0], bytes[1], bytes[2])
    }

    /// Build a pixel from a big-endian `[r, g, b, a]` group.
    #[inline]
    pub const fn from_rgba_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Unpack a `0xRRGGBBAA` value.
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        Self::from_rgba_bytes(value.to_be_bytes())
    }

    /// Pack into `0xRRGGBBAA`.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << RED_SHIFT)
            | ((self.g as u32) << GREEN_SHIFT)
            | ((self.b as u32) << BLUE_SHIFT)
            | self.a as u32
    }

    #[inline]
    pub const fn to_rgb_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_fully_transparent(self) -> bool {
        self.a == 0
    }

    /// The same color with alpha forced to 255.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }
}

impl From<u32> for Pixel {
    fn from(value: u32) -> Self {
        Pixel::from_packed(value)
    }
}

impl From<Pixel> for u32 {
    fn from(pixel: Pixel) -> Self {
        pixel.to_packed()
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(bytes: [u8; 3]) -> Self {
        Pixel::from_rgb_bytes(bytes)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(bytes: [u8; 4]) -> Self {
        Pixel::from_rgba_bytes(bytes)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.to_packed())
    }
}
