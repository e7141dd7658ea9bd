//! Types shared by every encoder: the encoder trait, the payload it
//! returns and the image header.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EncodeOptions;
use crate::grid::PixelGrid;

/// Errors that can occur while encoding a grid.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Indexed encoding was requested for more colors than a palette can hold
    #[error("Too many colors for an indexed image: {count} (maximum 256)")]
    TooManyColors { count: usize },

    /// Compressing the pixel payload failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),
}

/// Color layout of the encoded pixel payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorType {
    /// 3 samples per pixel (RGB).
    Truecolor = 2,
    /// 1 palette index per pixel.
    Indexed = 3,
    /// 4 samples per pixel (RGBA).
    TruecolorAlpha = 6,
}

impl ColorType {
    /// Samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            ColorType::Indexed => 1,
            ColorType::Truecolor => 3,
            ColorType::TruecolorAlpha => 4,
        }
    }
}

/// Image header metadata produced by an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    /// Bits per sample (per palette index for indexed images).
    pub bit_depth: u8,
    pub color_type: ColorType,
}

impl Header {
    /// Serialize in IHDR layout: big-endian dimensions, bit depth, color
    /// type, then compression, filter and interlace methods (all 0).
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut bytes = [0u8; 13];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8] = self.bit_depth;
        bytes[9] = self.color_type as u8;
        bytes
    }

    /// Bytes in one unfiltered scanline (without the filter type byte).
    pub fn row_bytes(&self) -> usize {
        let bits = self.width as usize * self.color_type.channels() * self.bit_depth as usize;
        bits.div_ceil(8)
    }
}

/// Everything an encoder hands back for container framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub header: Header,
    /// RGB triples, present for indexed images.
    pub palette: Option<Vec<u8>>,
    /// Per-entry alpha values, present when the palette has transparency.
    pub transparency: Option<Vec<u8>>,
    /// Filtered, compressed pixel data.
    pub data: Vec<u8>,
}

/// Converts a grid into an [`EncodedPayload`].
///
/// [`PixelGrid::export_with`] calls this and forwards any error unchanged.
pub trait Encoder {
    type Error: std::error::Error;

    fn encode(&self, grid: &PixelGrid, options: &EncodeOptions) -> Result<EncodedPayload, Self::Error>;
}
