//! Filter WASM bindings.
//!
//! Exposes the filter values as a JavaScript class plus stateless helpers
//! that run the compositing pipeline or the sharpen kernel on an image.

use crate::types::JsDecodedImage;
use retouch_core::{render, CropSpec, Surface};
use wasm_bindgen::prelude::*;

/// Filter values wrapper for JavaScript.
///
/// Setters clamp into range, so reading a value back after setting it may
/// return the clamped value.
#[wasm_bindgen]
pub struct FilterSpec {
    inner: retouch_core::FilterSpec,
}

#[wasm_bindgen]
impl FilterSpec {
    /// Create filters at their defaults
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: retouch_core::FilterSpec::new(),
        }
    }

    /// Brightness percentage (0 to 200, default 100)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness()
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.set_brightness(value);
    }

    /// Contrast percentage (0 to 200, default 100)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast()
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.set_contrast(value);
    }

    /// Saturation percentage (0 to 200, default 100)
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation()
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.set_saturation(value);
    }

    /// Hue rotation in degrees (0 to 360)
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f32 {
        self.inner.hue()
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: f32) {
        self.inner.set_hue(value);
    }

    /// Blur radius in pixels (0 to 10)
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur()
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.set_blur(value);
    }

    /// Sharpen intensity (0 to 10)
    #[wasm_bindgen(getter)]
    pub fn sharpen(&self) -> f32 {
        self.inner.sharpen()
    }

    #[wasm_bindgen(setter)]
    pub fn set_sharpen(&mut self, value: f32) {
        self.inner.set_sharpen(value);
    }

    /// Check if all filters are at default values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object. Missing fields take defaults.
    pub fn from_json(value: JsValue) -> Result<FilterSpec, JsValue> {
        let inner: retouch_core::FilterSpec =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSpec {
    pub(crate) fn inner(&self) -> &retouch_core::FilterSpec {
        &self.inner
    }
}

/// Render `image` through the crop rectangle and filters.
///
/// The result keeps the source dimensions: the crop rectangle is stretched
/// to fill it. A `crop_width`/`crop_height` of 0 means the full extent.
///
/// # Example (TypeScript)
/// ```typescript
/// const filters = new FilterSpec();
/// filters.brightness = 120;
/// const out = render_image(source, filters, 0, 0, 0, 0);
/// ```
#[wasm_bindgen]
pub fn render_image(
    image: &JsDecodedImage,
    filters: &FilterSpec,
    crop_x: u32,
    crop_y: u32,
    crop_width: u32,
    crop_height: u32,
) -> Result<JsDecodedImage, JsValue> {
    if !image.is_well_formed() {
        return Err(JsValue::from_str("Pixel buffer does not match image dimensions"));
    }
    Ok(render_with(image, filters, crop_x, crop_y, crop_width, crop_height))
}

fn render_with(
    image: &JsDecodedImage,
    filters: &FilterSpec,
    crop_x: u32,
    crop_y: u32,
    crop_width: u32,
    crop_height: u32,
) -> JsDecodedImage {
    let source = image.to_decoded();
    let crop = CropSpec {
        x: crop_x,
        y: crop_y,
        width: crop_width,
        height: crop_height,
    }
    .clamped_to(source.width, source.height);

    let mut surface = Surface::for_source(&source);
    render(&source, &crop, filters.inner(), &mut surface);
    JsDecodedImage::from_surface(&surface)
}

/// Apply the 3x3 sharpen kernel with intensity `amount` (0 to 10).
///
/// Border pixels and alpha are left unchanged.
#[wasm_bindgen]
pub fn sharpen_image(image: &JsDecodedImage, amount: f32) -> JsDecodedImage {
    let pixels = retouch_core::sharpen(&image.pixels(), image.width(), image.height(), amount);
    JsDecodedImage::new(image.width(), image.height(), pixels)
}
