//! PNG decoding: container bytes back into a PixelGrid.
//!
//! This module provides functionality for:
//! - Decoding PNG bytes into a [`PixelGrid`](crate::PixelGrid)
//! - Converting between grids and `image::RgbaImage`
//!
//! Decoding is delegated to the `image` crate; every source color type is
//! expanded to 8-bit RGBA before it reaches the grid.
//!
//! # Examples
//!
//! ```ignore
//! use pixgrid_core::decode::decode_png;
//!
//! let png_bytes = std::fs::read("sprite.png").unwrap();
//! let grid = decode_png(&png_bytes).unwrap();
//! println!("Decoded {}x{} grid", grid.width(), grid.height());
//! ```

mod png;
mod types;

pub use png::decode_png;
pub use types::DecodeError;
