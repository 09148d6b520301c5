//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, export_file_name } from '@retouch/wasm';
//!
//! const png = encode_png(imageData.data, imageData.width, imageData.height);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! link.download = export_file_name();
//! ```

use crate::types::JsDecodedImage;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length is not width * height * 4,
/// if either dimension is zero, or if encoding fails internally.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png(&pixels, image.width(), image.height()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download name for exports.
#[wasm_bindgen]
pub fn export_file_name() -> String {
    encode::EXPORT_FILE_NAME.to_string()
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32; the core
/// encoder is exercised directly here.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_encode_from_image_pixels() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let pixels = img.pixels();
        let png = encode::encode_png(&pixels, img.width(), img.height()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(), "edited_image.png");
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let png = encode_png(&pixels, 100, 100).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        assert!(encode_png(&[128u8; 100], 0, 100).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 4]; // Wrong size for 100x100
        assert!(encode_png(&pixels, 100, 100).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsDecodedImage::new(50, 50, vec![200u8; 50 * 50 * 4]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
