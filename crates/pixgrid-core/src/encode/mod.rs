//! Encoders for PixelGrid export.
//!
//! This module provides:
//! - The [`Encoder`] trait, the boundary between a grid and any encoder
//! - [`EncodeOptions`] for palette, transparency and compression choices
//! - [`PngEncoder`], the default encoder producing PNG payloads
//!
//! An encoder only produces the payload bundle (header, optional palette
//! and transparency tables, compressed pixel data). Framing it into a file is
//! the job of [`crate::container::Container`].
//!
//! # Examples
//!
//! ```ignore
//! use pixgrid_core::encode::{EncodeOptions, Encoder, PngEncoder};
//! use pixgrid_core::{Pixel, PixelGrid};
//!
//! let grid = PixelGrid::new(100, 100, Pixel::rgb(128, 128, 128)).unwrap();
//! let payload = PngEncoder::new().encode(&grid, &EncodeOptions::default()).unwrap();
//! println!("Compressed {} bytes", payload.data.len());
//! ```

mod options;
mod png;
mod types;

pub use options::{ColorMode, CompressionLevel, EncodeOptions, Transparency};
pub use png::PngEncoder;
pub use types::{ColorType, EncodeError, EncodedPayload, Encoder, Header};
