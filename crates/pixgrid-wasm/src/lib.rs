//! Pixgrid WASM - WebAssembly bindings for Pixgrid
//!
//! This crate provides WASM bindings to expose the pixgrid-core pixel grid
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `grid` - The `JsPixelGrid` wrapper (construction, get/set, scanlines)
//! - `decode` - PNG decoding bindings
//! - `encode` - PNG export bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelGrid, decode_png } from '@pixgrid/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const rgb = new Uint8Array([0, 0, 0, 255, 255, 255]);
//! const grid = JsPixelGrid.from_rgb_bytes(2, 1, rgb);
//! const png = grid.to_png(undefined);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod grid;

// Re-export public types
pub use decode::{decode_png, is_png_file};
pub use encode::encode_png;
pub use grid::JsPixelGrid;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
