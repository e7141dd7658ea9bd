//! The packed-pixel grid.
//!
//! [`PixelGrid`] owns a flat, fixed-size buffer of `0xRRGGBBAA` values laid
//! out row-major: the pixel at `(x, y)` lives at offset `y * width + x`.
//! Every accessor in this crate (indexing, scanlines, stream import/export,
//! encoders) goes through that one mapping.
//!
//! # Coordinate System
//!
//! - `(0, 0)` = top-left corner
//! - `x` grows to the right, `y` grows downwards
//! - Out-of-range coordinates are rejected, never clamped or wrapped

use std::iter::FusedIterator;

use thiserror::Error;

use crate::container::Container;
use crate::encode::{EncodeError, EncodeOptions, Encoder, PngEncoder};
use crate::palette::Palette;
use crate::pixel::Pixel;

/// Errors raised by grid construction and indexing.
#[derive(Debug, Error)]
pub enum GridError {
    /// The initial pixel sequence does not cover the grid exactly.
    #[error("Invalid initializer: expected {expected} pixels (width * height), got {actual}")]
    InvalidInitializer { expected: usize, actual: usize },

    /// A coordinate lies outside the grid.
    #[error("Coordinate ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// `width * height` does not fit in memory addressing.
    #[error("Grid dimensions {width}x{height} overflow the addressable pixel count")]
    DimensionsOverflow { width: u32, height: u32 },

    /// The byte source failed while reading pixel groups.
    #[error("I/O error while reading pixel stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Initial content for [`PixelGrid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    /// Every pixel gets the same value.
    Uniform(Pixel),
    /// Row-major pixels, exactly `width * height` of them.
    Explicit(Vec<Pixel>),
}

impl From<Pixel> for Initializer {
    fn from(pixel: Pixel) -> Self {
        Initializer::Uniform(pixel)
    }
}

impl From<Vec<Pixel>> for Initializer {
    fn from(pixels: Vec<Pixel>) -> Self {
        Initializer::Explicit(pixels)
    }
}

/// A mutable, random-access raster of packed RGBA pixels.
///
/// Two grids are equal when their dimensions and every pixel, in order, are
/// identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

/// Number of pixels in a `width` x `height` grid.
fn pixel_count(width: u32, height: u32) -> Result<usize, GridError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(GridError::DimensionsOverflow { width, height })
}

impl PixelGrid {
    /// Create a grid from a uniform color or an explicit pixel sequence.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidInitializer` if an explicit sequence does
    /// not contain exactly `width * height` pixels.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use pixgrid_core::{Pixel, PixelGrid};
    ///
    /// let grid = PixelGrid::new(2, 1, vec![Pixel::rgb(255, 0, 0), Pixel::rgb(0, 255, 0)])?;
    /// assert_eq!(grid.size(), (2, 1));
    /// ```
    pub fn new(width: u32, height: u32, initial: impl Into<Initializer>) -> Result<Self, GridError> {
        let expected = pixel_count(width, height)?;

        let pixels = match initial.into() {
            Initializer::Uniform(pixel) => vec![pixel.to_packed(); expected],
            Initializer::Explicit(sequence) => {
                if sequence.len() != expected {
                    return Err(GridError::InvalidInitializer {
                        expected,
                        actual: sequence.len(),
                    });
                }
                sequence.into_iter().map(Pixel::to_packed).collect()
            }
        };

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a grid directly from packed `0xRRGGBBAA` values.
    pub fn from_packed_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, GridError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(GridError::InvalidInitializer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Translate a coordinate into a buffer offset.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.row_start(y as usize) + x as usize)
    }

    /// Buffer offset of the first pixel in row `y`.
    #[inline]
    fn row_start(&self, y: usize) -> usize {
        y * self.width as usize
    }

    /// Read the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<Pixel, GridError> {
        let offset = self.offset(x, y)?;
        Ok(Pixel::from_packed(self.pixels[offset]))
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// The coordinate is validated before the buffer is touched.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), GridError> {
        let offset = self.offset(x, y)?;
        self.pixels[offset] = pixel.to_packed();
        Ok(())
    }

    /// `(width, height)`
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Check whether `(x, y)` addresses a pixel of this grid.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Read-only view of the packed buffer in row-major order.
    #[inline]
    pub fn packed_pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Copy out row `y`.
    pub fn row(&self, y: u32) -> Result<Vec<Pixel>, GridError> {
        if y >= self.height {
            return Err(GridError::IndexOutOfBounds {
                x: 0,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.scanline_at(y as usize).to_vec())
    }

    /// Copy out column `x`, top to bottom.
    pub fn column(&self, x: u32) -> Result<Vec<Pixel>, GridError> {
        if x >= self.width {
            return Err(GridError::IndexOutOfBounds {
                x,
                y: 0,
                width: self.width,
                height: self.height,
            });
        }
        (0..self.height).map(|y| self.get(x, y)).collect()
    }

    /// Iterate over the rows of the grid, top to bottom.
    ///
    /// Every call starts again from the first row.
    pub fn scanlines(&self) -> Scanlines<'_> {
        Scanlines {
            grid: self,
            front: 0,
            back: self.height as usize,
        }
    }

    fn scanline_at(&self, y: usize) -> Scanline<'_> {
        let start = self.row_start(y);
        Scanline {
            y: y as u32,
            packed: &self.pixels[start..start + self.width as usize],
        }
    }

    /// The distinct colors currently present, computed on demand.
    pub fn palette(&self) -> Palette {
        Palette::from_grid(self)
    }

    /// Encode with `encoder` and frame the result as a container.
    ///
    /// Encoder failures are returned unchanged.
    pub fn export_with<E: Encoder>(
        &self,
        encoder: &E,
        options: &EncodeOptions,
    ) -> Result<Container, E::Error> {
        let payload = encoder.encode(self, options)?;
        let container = Container::assemble(payload);
        log::debug!(
            "exported {}x{} grid into {} chunks",
            self.width,
            self.height,
            container.chunks().len()
        );
        Ok(container)
    }

    /// Encode with the default [`PngEncoder`].
    pub fn export(&self, options: &EncodeOptions) -> Result<Container, EncodeError> {
        self.export_with(&PngEncoder::new(), options)
    }

    /// Encode and serialize to PNG file bytes.
    pub fn to_png_bytes(&self, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
        Ok(self.export(options)?.to_bytes())
    }
}

/// Iterator over the rows of a [`PixelGrid`], created by [`PixelGrid::scanlines`].
#[derive(Debug, Clone)]
pub struct Scanlines<'a> {
    grid: &'a PixelGrid,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Scanlines<'a> {
    type Item = Scanline<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let line = self.grid.scanline_at(self.front);
        self.front += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Scanlines<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.grid.scanline_at(self.back))
    }
}

impl ExactSizeIterator for Scanlines<'_> {}

impl FusedIterator for Scanlines<'_> {}

/// One read-only row of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanline<'a> {
    y: u32,
    packed: &'a [u32],
}

impl<'a> Scanline<'a> {
    /// Row index within the grid.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    /// Pixel at column `x`, if it exists.
    pub fn get(&self, x: u32) -> Option<Pixel> {
        self.packed.get(x as usize).copied().map(Pixel::from_packed)
    }

    /// Pixels left to right.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Pixel> + ExactSizeIterator + 'a {
        self.packed.iter().copied().map(Pixel::from_packed)
    }

    /// The packed values of this row.
    #[inline]
    pub fn packed(&self) -> &'a [u32] {
        self.packed
    }

    pub fn to_vec(&self) -> Vec<Pixel> {
        self.iter().collect()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
