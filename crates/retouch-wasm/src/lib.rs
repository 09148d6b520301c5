//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editor to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `session` - The stateful editor (load, filters, crop, drawing, export)
//! - `filters` - Filter values class and stateless render/sharpen helpers
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings
//! - `encode` - PNG encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditorSession } from '@retouch/wasm';
//!
//! await init();
//!
//! const editor = new EditorSession();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.set_filter('contrast', 140);
//! const png = editor.export_png();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod filters;
mod session;
mod types;

pub use decode::{decode_image, image_orientation};
pub use encode::{encode_png, encode_png_from_image, export_file_name};
pub use filters::{render_image, sharpen_image, FilterSpec};
pub use session::{ClientRect, JsEditorSession};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
