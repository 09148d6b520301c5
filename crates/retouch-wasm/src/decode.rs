//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG, JPEG, GIF, WebP or BMP file into RGBA pixels.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error if the bytes are empty, the format is not recognized,
/// or the file is truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation tag (1-8). Returns 1 when absent.
///
/// Returns a plain number so it works on every target.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_non_jpeg() {
        assert_eq!(image_orientation(&[0, 1, 2, 3]), 1);
        assert_eq!(image_orientation(&[]), 1);
    }
}
