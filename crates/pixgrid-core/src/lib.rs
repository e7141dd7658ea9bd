//! Pixgrid Core - In-memory RGBA pixel grids
//!
//! This crate provides a mutable, random-access raster image stored as packed
//! `0xRRGGBBAA` pixels, constructors that read raw RGB/RGBA byte streams, and
//! an export path that hands the grid to an encoder and frames the result as a
//! PNG container.
//!
//! # Example
//!
//! ```ignore
//! use pixgrid_core::{EncodeOptions, Pixel, PixelGrid};
//!
//! let mut grid = PixelGrid::new(2, 1, Pixel::BLACK)?;
//! grid.set(1, 0, Pixel::rgb(0, 255, 0))?;
//!
//! let png = grid.to_png_bytes(&EncodeOptions::default())?;
//! ```

pub mod container;
pub mod decode;
pub mod encode;
pub mod grid;
pub mod palette;
pub mod pixel;
mod stream;

pub use container::{Chunk, Container};
pub use decode::{decode_png, DecodeError};
pub use encode::{EncodeError, EncodeOptions, Encoder, PngEncoder};
pub use grid::{GridError, Initializer, PixelGrid, Scanline, Scanlines};
pub use palette::Palette;
pub use pixel::Pixel;

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = Pixel::rgb(255, 0, 0);
    const GREEN: Pixel = Pixel::rgb(0, 255, 0);

    #[test]
    fn test_explicit_two_pixel_grid() {
        let grid = PixelGrid::new(2, 1, vec![RED, GREEN]).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), RED);
        assert_eq!(grid.get(1, 0).unwrap(), GREEN);
        assert_eq!(grid.size(), (2, 1));
    }

    #[test]
    fn test_rgb_stream_black_and_white() {
        let bytes: &[u8] = &[0, 0, 0, 255, 255, 255];
        let grid = PixelGrid::from_rgb_stream(2, 1, bytes).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Pixel::rgba(0, 0, 0, 255));
        assert_eq!(grid.get(1, 0).unwrap(), Pixel::rgba(255, 255, 255, 255));
    }

    #[test]
    fn test_export_ends_with_end_marker() {
        let grid = PixelGrid::new(3, 3, RED).unwrap();
        let container = grid.export(&EncodeOptions::default()).unwrap();
        let trailer = container.trailer().unwrap();
        assert_eq!(trailer.kind_str(), "IEND");
        assert!(trailer.data.is_empty());
    }

    #[test]
    fn test_export_then_decode() {
        let mut grid = PixelGrid::new(4, 2, Pixel::TRANSPARENT).unwrap();
        grid.set(3, 1, GREEN).unwrap();
        let bytes = grid.to_png_bytes(&EncodeOptions::default()).unwrap();
        assert_eq!(decode_png(&bytes).unwrap(), grid);
    }
}
