//! Encoder configuration.

use serde::{Deserialize, Serialize};

/// How the encoder lays out pixel colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Indexed when the grid has at most 256 colors, otherwise truecolor,
    /// with an alpha channel only if some pixel is not opaque.
    #[default]
    Auto,
    /// Always indexed; fails when the grid has more than 256 colors.
    Indexed,
    /// RGB without alpha. Alpha values are dropped.
    Truecolor,
    /// RGBA.
    TruecolorAlpha,
}

/// What happens to pixel alpha values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transparency {
    /// Alpha is written as-is (alpha channel or transparency table).
    #[default]
    Preserve,
    /// Every pixel is treated as fully opaque.
    Discard,
}

/// zlib effort for the pixel payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionLevel {
    /// Stored blocks, no compression.
    None,
    Fast,
    #[default]
    Default,
    Best,
}

impl CompressionLevel {
    /// Convert to the flate2 compression setting.
    pub fn to_flate2(self) -> flate2::Compression {
        match self {
            CompressionLevel::None => flate2::Compression::none(),
            CompressionLevel::Fast => flate2::Compression::fast(),
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::Best => flate2::Compression::best(),
        }
    }
}

/// Options recognized by [`PngEncoder`](super::PngEncoder).
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub color_mode: ColorMode,
    pub transparency: Transparency,
    pub compression: CompressionLevel,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Check if alpha values should be written.
    pub fn keeps_alpha(&self) -> bool {
        self.transparency == Transparency::Preserve
    }
}
