//! PNG decoding through the `image` crate.

use image::{ImageFormat, RgbaImage};

use super::DecodeError;
use crate::container::SIGNATURE;
use crate::grid::{GridError, PixelGrid};

/// Decode PNG bytes into a grid.
///
/// Indexed, grayscale and 16-bit sources are expanded to 8-bit RGBA.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes lack a PNG signature.
/// Returns `DecodeError::CorruptedFile` if the PNG cannot be decoded.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    if !bytes.starts_with(&SIGNATURE) {
        return Err(DecodeError::InvalidFormat);
    }

    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(PixelGrid::from_rgba_image(img.into_rgba8())?)
}

impl PixelGrid {
    /// Create a grid from an `image::RgbaImage`.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self, GridError> {
        let (width, height) = img.dimensions();
        let pixels = img
            .into_raw()
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        PixelGrid::from_packed_pixels(width, height, pixels)
    }

    /// Convert to an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width(), self.height(), self.to_rgba_stream())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
