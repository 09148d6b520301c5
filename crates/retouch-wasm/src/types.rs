//! WASM-compatible wrapper types for image data.
//!
//! Images cross the JS boundary as RGBA8 buffers, the layout `ImageData`
//! uses, so the host can blit them onto a canvas without conversion.

use retouch_core::decode::DecodedImage;
use retouch_core::Surface;
use wasm_bindgen::prelude::*;

/// A decoded RGBA image for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// JavaScript `Uint8Array`; keep the image on the WASM side and read pixels
/// only when painting.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new image from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGBA pixel data as a `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory. Optional; the finalizer also does it.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    pub(crate) fn from_surface(surface: &Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            pixels: surface.pixels().to_vec(),
        }
    }

    /// Convert back to a core image (clones the pixels).
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    /// Check that the buffer holds exactly width * height RGBA pixels.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.pixels.len() as u64 == self.width as u64 * self.height as u64 * 4
    }
}
