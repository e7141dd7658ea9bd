//! PNG decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_png`] - Decode PNG bytes into a `JsPixelGrid`
//! - [`is_png_file`] - Check if bytes start with the PNG signature
//!
//! # Example
//!
//! ```typescript
//! import { decode_png, is_png_file } from '@pixgrid/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (is_png_file(bytes)) {
//!   const grid = decode_png(bytes);
//!   console.log(`Decoded ${grid.width}x${grid.height}`);
//! }
//! ```

use crate::grid::{to_js_error, JsPixelGrid};
use pixgrid_core::container::SIGNATURE;
use pixgrid_core::decode;
use wasm_bindgen::prelude::*;

/// Decode PNG bytes into a grid.
///
/// Indexed, grayscale and 16-bit images are expanded to 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes do not start with the PNG signature
/// - The PNG is corrupted or truncated
#[wasm_bindgen]
pub fn decode_png(bytes: &[u8]) -> Result<JsPixelGrid, JsValue> {
    decode::decode_png(bytes)
        .map(JsPixelGrid::from_grid)
        .map_err(to_js_error)
}

/// Check if bytes start with the PNG file signature.
///
/// This is a quick check that does not validate the rest of the file.
#[wasm_bindgen]
pub fn is_png_file(bytes: &[u8]) -> bool {
    bytes.starts_with(&SIGNATURE)
}
