//! Raw interleaved byte streams to and from a grid.
//!
//! Input streams are consumed in fixed-size groups (3 bytes for RGB,
//! 4 bytes for RGBA) until the source is exhausted. A trailing group that is
//! shorter than the group size is dropped. The resulting pixel count must
//! match `width * height` exactly, otherwise construction fails with
//! [`GridError::InvalidInitializer`].

use std::io::{self, ErrorKind, Read, Write};

use crate::grid::{GridError, PixelGrid};
use crate::pixel::Pixel;

/// Fill `group` from `reader`.
///
/// Returns the number of bytes read; anything below `group.len()` means the
/// source ran dry.
fn read_group<R: Read>(reader: &mut R, group: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < group.len() {
        match reader.read(&mut group[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read `N`-byte groups until the source is exhausted.
fn read_pixels<R: Read, const N: usize>(
    mut reader: R,
    to_pixel: fn([u8; N]) -> Pixel,
) -> Result<Vec<Pixel>, GridError> {
    let mut pixels = Vec::new();
    let mut group = [0u8; N];
    loop {
        let filled = read_group(&mut reader, &mut group)?;
        if filled < N {
            if filled > 0 {
                log::debug!("discarding {filled} trailing bytes of an incomplete {N}-byte pixel group");
            }
            return Ok(pixels);
        }
        pixels.push(to_pixel(group));
    }
}

impl PixelGrid {
    /// Build a grid from a stream of `[r, g, b]` triples. Alpha is set to 255.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidInitializer` if the stream does not hold
    /// exactly `width * height` triples, or `GridError::Io` if the reader fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use pixgrid_core::{Pixel, PixelGrid};
    ///
    /// let bytes: &[u8] = &[0, 0, 0, 255, 255, 255];
    /// let grid = PixelGrid::from_rgb_stream(2, 1, bytes)?;
    /// assert_eq!(grid.get(1, 0)?, Pixel::WHITE);
    /// ```
    pub fn from_rgb_stream<R: Read>(width: u32, height: u32, reader: R) -> Result<Self, GridError> {
        let pixels = read_pixels::<_, 3>(reader, Pixel::from_rgb_bytes)?;
        PixelGrid::new(width, height, pixels)
    }

    /// Build a grid from a stream of `[r, g, b, a]` quadruples.
    pub fn from_rgba_stream<R: Read>(width: u32, height: u32, reader: R) -> Result<Self, GridError> {
        let pixels = read_pixels::<_, 4>(reader, Pixel::from_rgba_bytes)?;
        PixelGrid::new(width, height, pixels)
    }

    /// Write every pixel as `[r, g, b]`, in scanline order.
    pub fn write_rgb_stream<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in self.scanlines() {
            for pixel in line.iter() {
                writer.write_all(&pixel.to_rgb_bytes())?;
            }
        }
        Ok(())
    }

    /// Write every pixel as `[r, g, b, a]`, in scanline order.
    pub fn write_rgba_stream<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in self.scanlines() {
            for pixel in line.iter() {
                writer.write_all(&pixel.to_rgba_bytes())?;
            }
        }
        Ok(())
    }

    /// RGB bytes of the whole grid (3 bytes per pixel, row-major order).
    pub fn to_rgb_stream(&self) -> Vec<u8> {
        self.packed_pixels()
            .iter()
            .flat_map(|&packed| Pixel::from_packed(packed).to_rgb_bytes())
            .collect()
    }

    /// RGBA bytes of the whole grid (4 bytes per pixel, row-major order).
    pub fn to_rgba_stream(&self) -> Vec<u8> {
        self.packed_pixels()
            .iter()
            .flat_map(|packed| packed.to_be_bytes())
            .collect()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
