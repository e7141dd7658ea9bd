//! PNG encoding WASM bindings.
//!
//! Options are passed as a plain JavaScript object and deserialized into the
//! core `EncodeOptions`. Missing fields take their defaults, and `undefined`
//! or `null` selects the default options.
//!
//! # Example
//!
//! ```typescript
//! import { JsPixelGrid, encode_png } from '@pixgrid/wasm';
//!
//! const grid = new JsPixelGrid(64, 64, 0xffffffff);
//! const png = grid.to_png({ color_mode: "auto", compression: "best" });
//! const same = encode_png(grid, undefined);
//! ```

use crate::grid::{to_js_error, JsPixelGrid};
use pixgrid_core::EncodeOptions;
use wasm_bindgen::prelude::*;

/// Encode a grid to PNG file bytes.
///
/// # Arguments
///
/// * `grid` - The grid to encode
/// * `options` - `{ color_mode, transparency, compression }`, all optional
///
/// # Errors
///
/// Returns an error if:
/// - The options object has unknown enum values
/// - Width or height is zero
/// - Indexed output was requested for more than 256 colors
#[wasm_bindgen]
pub fn encode_png(grid: &JsPixelGrid, options: JsValue) -> Result<Vec<u8>, JsValue> {
    grid.to_png(options)
}

#[wasm_bindgen]
impl JsPixelGrid {
    /// Encode this grid to PNG file bytes. See [`encode_png`].
    pub fn to_png(&self, options: JsValue) -> Result<Vec<u8>, JsValue> {
        let options = parse_options(options)?;
        self.grid().to_png_bytes(&options).map_err(to_js_error)
    }
}

fn parse_options(value: JsValue) -> Result<EncodeOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EncodeOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid encode options: {}", e)))
}
