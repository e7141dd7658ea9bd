//! PNG payload encoder.
//!
//! Produces the header, optional palette and transparency tables and the
//! zlib-compressed pixel stream. Every scanline uses filter type 0 (None);
//! compression is delegated to `flate2`.

use std::io::Write;

use flate2::write::ZlibEncoder;

use super::{
    ColorMode, ColorType, EncodeError, EncodeOptions, EncodedPayload, Encoder, Header,
};
use crate::grid::PixelGrid;
use crate::palette::Palette;
use crate::pixel::Pixel;

/// Filter type byte written in front of every scanline.
const FILTER_NONE: u8 = 0;

/// Default encoder used by [`PixelGrid::export`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }
}

/// Resolved pixel layout for one encode call.
enum Layout {
    Truecolor,
    TruecolorAlpha,
    Indexed { palette: Palette, bit_depth: u8 },
}

impl Layout {
    fn header(&self, width: u32, height: u32) -> Header {
        let (bit_depth, color_type) = match self {
            Layout::Truecolor => (8, ColorType::Truecolor),
            Layout::TruecolorAlpha => (8, ColorType::TruecolorAlpha),
            Layout::Indexed { bit_depth, .. } => (*bit_depth, ColorType::Indexed),
        };
        Header {
            width,
            height,
            bit_depth,
            color_type,
        }
    }
}

/// Apply the transparency option to a pixel.
fn normalize(pixel: Pixel, options: &EncodeOptions) -> Pixel {
    if options.keeps_alpha() {
        pixel
    } else {
        pixel.opaque()
    }
}

fn normalized_palette(grid: &PixelGrid, options: &EncodeOptions) -> Palette {
    Palette::from_pixels(
        grid.packed_pixels()
            .iter()
            .map(|&packed| normalize(Pixel::from_packed(packed), options)),
    )
}

fn indexed(palette: Palette) -> Result<Layout, EncodeError> {
    match palette.bit_depth() {
        Some(bit_depth) => Ok(Layout::Indexed { palette, bit_depth }),
        None => Err(EncodeError::TooManyColors {
            count: palette.len(),
        }),
    }
}

fn choose_layout(grid: &PixelGrid, options: &EncodeOptions) -> Result<Layout, EncodeError> {
    match options.color_mode {
        ColorMode::Auto => {
            let palette = normalized_palette(grid, options);
            if palette.can_encode_indexed() {
                indexed(palette)
            } else if palette.is_opaque() {
                Ok(Layout::Truecolor)
            } else {
                Ok(Layout::TruecolorAlpha)
            }
        }
        ColorMode::Indexed => indexed(normalized_palette(grid, options)),
        ColorMode::Truecolor => Ok(Layout::Truecolor),
        ColorMode::TruecolorAlpha if options.keeps_alpha() => Ok(Layout::TruecolorAlpha),
        ColorMode::TruecolorAlpha => Ok(Layout::Truecolor),
    }
}

/// Append palette indices packed MSB-first at `bit_depth` bits each.
fn pack_indices<I: Iterator<Item = u8>>(indices: I, bit_depth: u8, out: &mut Vec<u8>) {
    if bit_depth == 8 {
        out.extend(indices);
        return;
    }

    let per_byte = 8 / bit_depth;
    let mut byte = 0u8;
    let mut filled = 0u8;
    for index in indices {
        byte = (byte << bit_depth) | index;
        filled += 1;
        if filled == per_byte {
            out.push(byte);
            byte = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        out.push(byte << (bit_depth * (per_byte - filled)));
    }
}

/// Palette slot of a normalized pixel.
///
/// The palette is built from the same normalized pixels, so a miss means the
/// palette and the scanlines disagree on normalization.
fn palette_index(palette: &Palette, pixel: Pixel) -> u8 {
    let index = palette.index_of(pixel);
    debug_assert!(index.is_some(), "pixel {pixel} missing from palette");
    index.unwrap_or_default() as u8
}

/// Lay out every scanline with its filter byte.
fn filtered_scanlines(
    grid: &PixelGrid,
    layout: &Layout,
    header: &Header,
    options: &EncodeOptions,
) -> Vec<u8> {
    let mut raw = Vec::with_capacity((header.row_bytes() + 1) * grid.height() as usize);

    for line in grid.scanlines() {
        raw.push(FILTER_NONE);
        match layout {
            Layout::Truecolor => {
                for pixel in line.iter() {
                    raw.extend_from_slice(&pixel.to_rgb_bytes());
                }
            }
            Layout::TruecolorAlpha => {
                for pixel in line.iter() {
                    raw.extend_from_slice(&pixel.to_rgba_bytes());
                }
            }
            Layout::Indexed { palette, bit_depth } => {
                let indices = line
                    .iter()
                    .map(|pixel| palette_index(palette, normalize(pixel, options)));
                pack_indices(indices, *bit_depth, &mut raw);
            }
        }
    }

    raw
}

fn compress(raw: &[u8], options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), options.compression.to_flate2());
    encoder
        .write_all(raw)
        .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| EncodeError::CompressionFailed(e.to_string()))
}

impl Encoder for PngEncoder {
    type Error = EncodeError;

    fn encode(&self, grid: &PixelGrid, options: &EncodeOptions) -> Result<EncodedPayload, EncodeError> {
        let (width, height) = grid.size();
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let layout = choose_layout(grid, options)?;
        let header = layout.header(width, height);
        log::debug!(
            "encoding {}x{} grid as {:?} at bit depth {}",
            width,
            height,
            header.color_type,
            header.bit_depth
        );

        let raw = filtered_scanlines(grid, &layout, &header, options);
        let data = compress(&raw, options)?;

        let (palette, transparency) = match &layout {
            Layout::Indexed { palette, .. } => {
                let alphas = palette.to_transparency_table();
                let transparency = (!alphas.is_empty()).then_some(alphas);
                (Some(palette.to_palette_table()), transparency)
            }
            _ => (None, None),
        };

        Ok(EncodedPayload {
            header,
            palette,
            transparency,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{CompressionLevel, Transparency};
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    const RED: Pixel = Pixel::rgb(255, 0, 0);
    const GREEN: Pixel = Pixel::rgb(0, 255, 0);
    const BLUE: Pixel = Pixel::rgb(0, 0, 255);

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    /// A grid with `count` distinct opaque colors in a single row.
    fn distinct_colors(count: u32) -> PixelGrid {
        let pixels = (0..count)
            .map(|i| Pixel::from_packed((i << 8) | 0xFF))
            .collect::<Vec<_>>();
        PixelGrid::new(count, 1, pixels).unwrap()
    }

    #[test]
    fn test_pack_indices() {
        let mut out = Vec::new();
        pack_indices([1, 0, 1, 1, 0, 0, 0, 1, 1].into_iter(), 1, &mut out);
        assert_eq!(out, vec![0b1011_0001, 0b1000_0000]);

        let mut out = Vec::new();
        pack_indices([3, 2, 1].into_iter(), 2, &mut out);
        assert_eq!(out, vec![0b1110_0100]);

        let mut out = Vec::new();
        pack_indices([0xA, 0x5, 0xF].into_iter(), 4, &mut out);
        assert_eq!(out, vec![0xA5, 0xF0]);

        let mut out = Vec::new();
        pack_indices([200, 7].into_iter(), 8, &mut out);
        assert_eq!(out, vec![200, 7]);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let grid = PixelGrid::new(0, 3, RED).unwrap();
        let result = PngEncoder::new().encode(&grid, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
    }

    #[test]
    fn test_auto_prefers_indexed() {
        let grid = PixelGrid::new(3, 1, vec![RED, GREEN, BLUE]).unwrap();
        let payload = PngEncoder::new()
            .encode(&grid, &EncodeOptions::default())
            .unwrap();

        assert_eq!(payload.header.color_type, ColorType::Indexed);
        assert_eq!(payload.header.bit_depth, 2);
        assert_eq!(
            payload.palette,
            Some(vec![255, 0, 0, 0, 255, 0, 0, 0, 255])
        );
        assert_eq!(payload.transparency, None);
        // filter byte, then indices 0, 1, 2 packed at 2 bits
        assert_eq!(inflate(&payload.data), vec![0, 0b0001_1000]);
    }

    #[test]
    fn test_indexed_transparency_table() {
        let clear = Pixel::rgba(0, 0, 0, 0);
        let grid = PixelGrid::new(2, 1, vec![RED, clear]).unwrap();
        let payload = PngEncoder::new()
            .encode(&grid, &EncodeOptions::default())
            .unwrap();
        assert_eq!(payload.transparency, Some(vec![255, 0]));
    }

    #[test]
    fn test_auto_falls_back_to_truecolor() {
        let grid = distinct_colors(257);
        let payload = PngEncoder::new()
            .encode(&grid, &EncodeOptions::default())
            .unwrap();
        assert_eq!(payload.header.color_type, ColorType::Truecolor);
        assert_eq!(payload.header.bit_depth, 8);
        assert!(payload.palette.is_none());

        let raw = inflate(&payload.data);
        assert_eq!(raw.len(), 1 + 257 * 3);
        assert_eq!(&raw[..7], &[0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_auto_falls_back_to_truecolor_alpha() {
        let mut grid = distinct_colors(300);
        grid.set(0, 0, Pixel::rgba(1, 2, 3, 4)).unwrap();
        let payload = PngEncoder::new()
            .encode(&grid, &EncodeOptions::default())
            .unwrap();
        assert_eq!(payload.header.color_type, ColorType::TruecolorAlpha);
        assert_eq!(&inflate(&payload.data)[..5], &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_forced_indexed_too_many_colors() {
        let grid = distinct_colors(257);
        let options = EncodeOptions::new().with_color_mode(ColorMode::Indexed);
        let result = PngEncoder::new().encode(&grid, &options);
        assert!(matches!(
            result,
            Err(EncodeError::TooManyColors { count: 257 })
        ));
    }

    #[test]
    fn test_forced_truecolor_alpha() {
        let grid = PixelGrid::new(2, 2, Pixel::rgba(10, 20, 30, 40)).unwrap();
        let options = EncodeOptions::new().with_color_mode(ColorMode::TruecolorAlpha);
        let payload = PngEncoder::new().encode(&grid, &options).unwrap();
        assert_eq!(payload.header.color_type, ColorType::TruecolorAlpha);
        assert_eq!(
            inflate(&payload.data),
            vec![0, 10, 20, 30, 40, 10, 20, 30, 40, 0, 10, 20, 30, 40, 10, 20, 30, 40]
        );
    }

    #[test]
    fn test_discard_transparency() {
        let grid = PixelGrid::new(
            2,
            1,
            vec![Pixel::rgba(1, 2, 3, 0), Pixel::rgba(1, 2, 3, 255)],
        )
        .unwrap();
        let options = EncodeOptions::new().with_transparency(Transparency::Discard);

        let payload = PngEncoder::new().encode(&grid, &options).unwrap();
        assert_eq!(payload.header.color_type, ColorType::Indexed);
        assert_eq!(payload.palette, Some(vec![1, 2, 3]));
        assert_eq!(payload.transparency, None);

        let options = options.with_color_mode(ColorMode::TruecolorAlpha);
        let payload = PngEncoder::new().encode(&grid, &options).unwrap();
        assert_eq!(payload.header.color_type, ColorType::Truecolor);
    }

    #[test]
    fn test_discard_transparency_indices() {
        // Pixels that differ only in alpha share one palette slot.
        let grid = PixelGrid::new(
            4,
            1,
            vec![
                Pixel::rgba(1, 2, 3, 0),
                RED,
                Pixel::rgba(1, 2, 3, 77),
                Pixel::rgba(255, 0, 0, 10),
            ],
        )
        .unwrap();
        let options = EncodeOptions::new().with_transparency(Transparency::Discard);

        let payload = PngEncoder::new().encode(&grid, &options).unwrap();
        assert_eq!(payload.palette, Some(vec![1, 2, 3, 255, 0, 0]));
        assert_eq!(payload.header.bit_depth, 1);
        assert_eq!(inflate(&payload.data), vec![0, 0b0101_0000]);
    }

    #[test]
    fn test_palette_index_lookup() {
        let palette = Palette::from_pixels([RED, GREEN, BLUE]);
        assert_eq!(palette_index(&palette, RED), 0);
        assert_eq!(palette_index(&palette, BLUE), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing from palette")]
    fn test_palette_index_miss_is_caught() {
        let palette = Palette::from_pixels([RED]);
        palette_index(&palette, GREEN);
    }

    #[test]
    fn test_rows_top_to_bottom() {
        let grid = PixelGrid::new(1, 3, vec![RED, GREEN, BLUE]).unwrap();
        let options = EncodeOptions::new().with_color_mode(ColorMode::Truecolor);
        let payload = PngEncoder::new().encode(&grid, &options).unwrap();
        assert_eq!(
            inflate(&payload.data),
            vec![0, 255, 0, 0, 0, 0, 255, 0, 0, 0, 0, 255]
        );
    }

    #[test]
    fn test_compression_levels_decode_identically() {
        let grid = distinct_colors(64);
        let mut outputs = Vec::new();
        for level in [
            CompressionLevel::None,
            CompressionLevel::Fast,
            CompressionLevel::Default,
            CompressionLevel::Best,
        ] {
            let options = EncodeOptions::new().with_compression(level);
            let payload = PngEncoder::new().encode(&grid, &options).unwrap();
            outputs.push(inflate(&payload.data));
        }
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    }
}
