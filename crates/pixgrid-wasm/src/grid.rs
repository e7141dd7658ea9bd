//! WASM wrapper for the pixel grid.
//!
//! This module provides a JavaScript-friendly `JsPixelGrid` that owns a core
//! `PixelGrid`. Pixels cross the boundary as packed `0xRRGGBBAA` numbers.

use js_sys::Uint32Array;
use pixgrid_core::{GridError, Pixel, PixelGrid};
use wasm_bindgen::prelude::*;

/// A mutable RGBA pixel grid for JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const grid = new JsPixelGrid(2, 1, 0x000000ff);
/// grid.set(1, 0, 0x00ff00ff);
///
/// const row = grid.scanline(0); // Uint32Array [0x000000ff, 0x00ff00ff]
/// const png = grid.to_png({ color_mode: "indexed" });
///
/// grid.free();
/// ```
#[wasm_bindgen]
pub struct JsPixelGrid {
    inner: PixelGrid,
}

#[wasm_bindgen]
impl JsPixelGrid {
    /// Create a grid filled with one packed color.
    ///
    /// # Arguments
    /// * `width` - Grid width in pixels
    /// * `height` - Grid height in pixels
    /// * `color` - Fill color as `0xRRGGBBAA`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, color: u32) -> Result<JsPixelGrid, JsValue> {
        PixelGrid::new(width, height, Pixel::from_packed(color))
            .map(Self::from_grid)
            .map_err(to_js_error)
    }

    /// Create a grid from RGB bytes (3 per pixel, row-major). Alpha is 255.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<JsPixelGrid, JsValue> {
        PixelGrid::from_rgb_stream(width, height, bytes)
            .map(Self::from_grid)
            .map_err(to_js_error)
    }

    /// Create a grid from RGBA bytes (4 per pixel, row-major).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<JsPixelGrid, JsValue> {
        PixelGrid::from_rgba_stream(width, height, bytes)
            .map(Self::from_grid)
            .map_err(to_js_error)
    }

    /// Get the grid width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the grid height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of distinct colors currently in the grid
    #[wasm_bindgen(getter)]
    pub fn palette_size(&self) -> usize {
        self.inner.palette().len()
    }

    /// Read the packed color at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Result<u32, JsValue> {
        self.packed_at(x, y).map_err(to_js_error)
    }

    /// Overwrite the pixel at (x, y) with a packed color.
    pub fn set(&mut self, x: u32, y: u32, color: u32) -> Result<(), JsValue> {
        self.inner
            .set(x, y, Pixel::from_packed(color))
            .map_err(to_js_error)
    }

    /// Returns row `y` as packed colors.
    ///
    /// Note: This copies the row into JavaScript memory.
    pub fn scanline(&self, y: u32) -> Result<Uint32Array, JsValue> {
        let packed = self.packed_row(y).map_err(to_js_error)?;
        Ok(Uint32Array::from(packed))
    }

    /// Returns RGBA pixel data, 4 bytes per pixel in row-major order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.inner.to_rgba_stream()
    }

    /// Compare pixel contents and dimensions with another grid.
    pub fn equals(&self, other: &JsPixelGrid) -> bool {
        self.inner == other.inner
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelGrid {
    pub(crate) fn from_grid(inner: PixelGrid) -> Self {
        Self { inner }
    }

    pub(crate) fn grid(&self) -> &PixelGrid {
        &self.inner
    }

    fn packed_at(&self, x: u32, y: u32) -> Result<u32, GridError> {
        self.inner.get(x, y).map(Pixel::to_packed)
    }

    fn packed_row(&self, y: u32) -> Result<&[u32], GridError> {
        let height = self.inner.height();
        self.inner
            .scanlines()
            .nth(y as usize)
            .map(|line| line.packed())
            .ok_or(GridError::IndexOutOfBounds {
                x: 0,
                y,
                width: self.inner.width(),
                height,
            })
    }
}

pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
