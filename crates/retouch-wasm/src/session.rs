//! Editor session WASM bindings.
//!
//! Wraps the core session so a page can drive the whole editor: load a
//! file, forward slider and pointer events, and read the surface back for
//! display or download.
//!
//! # Example
//!
//! ```typescript
//! const editor = new EditorSession();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.set_filter('brightness', 120);
//!
//! canvas.onpointerdown = (e) => editor.pointer_down(canvas.getBoundingClientRect(), e.clientX, e.clientY);
//! const frame = new ImageData(new Uint8ClampedArray(editor.pixels()), editor.width, editor.height);
//! ```

use retouch_core::decode::{decode_image, DecodeError};
use retouch_core::{Color, CropField, EditorState, FlipAxis, LoadOutcome, LoadTicket, Tool, ViewRect};
use wasm_bindgen::prelude::*;

use crate::filters::FilterSpec;
use crate::types::JsDecodedImage;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Report a failed load in the browser console.
#[cfg(target_arch = "wasm32")]
fn report_load_failure(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn report_load_failure(_message: &str) {}

/// Map a load outcome to the JS result: failures throw.
fn settle(outcome: LoadOutcome) -> Result<bool, JsValue> {
    match outcome {
        LoadOutcome::Loaded { .. } => Ok(true),
        LoadOutcome::Stale => Ok(false),
        LoadOutcome::Failed(e) => {
            let message = format!("Image load failed: {e}");
            report_load_failure(&message);
            Err(js_error(message))
        }
    }
}

/// Bounding box of the displayed canvas, as returned by
/// `getBoundingClientRect()`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct ClientRect {
    view: ViewRect,
}

#[wasm_bindgen]
impl ClientRect {
    #[wasm_bindgen(constructor)]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            view: ViewRect::new(left, top, width, height),
        }
    }
}

/// An editing session for JavaScript.
#[wasm_bindgen(js_name = EditorSession)]
#[derive(Default)]
pub struct JsEditorSession {
    inner: retouch_core::EditorSession,
}

#[wasm_bindgen(js_class = EditorSession)]
impl JsEditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    // ----- Loading -----

    /// Decode and load an image file.
    ///
    /// On failure the previous image stays loaded and an error is thrown.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let outcome = self.inner.load_bytes(bytes);
        settle(outcome).map(|_| ())
    }

    /// Start an asynchronous load; returns a ticket for `finish_load`.
    ///
    /// Edits are ignored until the matching `finish_load`.
    pub fn begin_load(&mut self) -> f64 {
        self.inner.begin_load().id() as f64
    }

    /// Complete the load started with `ticket` using decoded RGBA pixels.
    ///
    /// Returns `false` when a newer load has superseded this one.
    pub fn finish_load(&mut self, ticket: f64, image: &JsDecodedImage) -> Result<bool, JsValue> {
        let Some(ticket) = self.pending_ticket(ticket) else {
            return Ok(false);
        };
        let result = if image.is_well_formed() {
            Ok(image.to_decoded())
        } else {
            Err(DecodeError::CorruptedFile(
                "Pixel buffer does not match image dimensions".to_string(),
            ))
        };
        settle(self.inner.finish_load(ticket, result))
    }

    /// Complete the load started with `ticket` by decoding a file.
    pub fn finish_load_bytes(&mut self, ticket: f64, bytes: &[u8]) -> Result<bool, JsValue> {
        let Some(ticket) = self.pending_ticket(ticket) else {
            return Ok(false);
        };
        settle(self.inner.finish_load(ticket, decode_image(bytes)))
    }

    #[wasm_bindgen(getter)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.surface().is_some()
    }

    // ----- Filters and crop -----

    /// Set one filter by name (`brightness`, `contrast`, `saturation`,
    /// `hue`, `blur`, `sharpen`). Returns `false` if ignored.
    pub fn set_filter(&mut self, name: &str, value: f32) -> bool {
        self.inner.set_filter_field(name, value)
    }

    /// Replace all filters at once.
    pub fn set_filters(&mut self, filters: &FilterSpec) -> bool {
        self.inner.set_filter(*filters.inner())
    }

    /// Set one crop field by name (`x`, `y`, `width`, `height`).
    pub fn set_crop(&mut self, field: &str, value: f64) -> Result<bool, JsValue> {
        let field: CropField = field
            .parse()
            .map_err(|()| js_error(format!("Unknown crop field: {field}")))?;
        Ok(self.inner.set_crop_field(field, value))
    }

    /// Restore default filters and crop.
    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    // ----- Draw settings -----

    /// Select `pen`, `highlighter`, `square`, `circle` or `triangle`.
    pub fn set_tool(&mut self, tool: &str) -> Result<bool, JsValue> {
        let tool: Tool = tool.parse().map_err(|()| js_error(format!("Unknown tool: {tool}")))?;
        Ok(self.inner.update_draw_settings(|d| d.set_tool(tool)))
    }

    /// Set the stroke color from a `#rrggbb` string.
    pub fn set_color(&mut self, color: &str) -> Result<bool, JsValue> {
        let color: Color = color.parse().map_err(js_error)?;
        Ok(self.inner.update_draw_settings(|d| d.set_color(color)))
    }

    /// Set the brush size (1 to 50).
    pub fn set_size(&mut self, size: f32) -> bool {
        self.inner.update_draw_settings(|d| d.set_size(size))
    }

    /// Set the highlighter opacity (0 to 1).
    pub fn set_highlighter_opacity(&mut self, opacity: f32) -> bool {
        self.inner.update_draw_settings(|d| d.set_highlighter_opacity(opacity))
    }

    // ----- Pointer events -----

    pub fn pointer_down(&mut self, rect: &ClientRect, client_x: f32, client_y: f32) -> bool {
        self.inner.pointer_down(&rect.view, client_x, client_y)
    }

    pub fn pointer_move(&mut self, rect: &ClientRect, client_x: f32, client_y: f32) -> bool {
        self.inner.pointer_move(&rect.view, client_x, client_y)
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    // ----- Surface -----

    /// Mirror the canvas: `horizontal` or `vertical`.
    pub fn flip(&mut self, axis: &str) -> Result<bool, JsValue> {
        let axis: FlipAxis = axis.parse().map_err(|()| js_error(format!("Unknown flip axis: {axis}")))?;
        Ok(self.inner.flip(axis))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.surface().map_or(0, |s| s.width())
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.surface().map_or(0, |s| s.height())
    }

    /// RGBA pixels of the live surface (copied). Empty without an image.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.surface().map(|s| s.pixels().to_vec()).unwrap_or_default()
    }

    /// The live surface as an image, or `undefined` without one.
    pub fn snapshot(&self) -> Option<JsDecodedImage> {
        self.inner.surface().map(JsDecodedImage::from_surface)
    }

    /// Encode the live surface as PNG; `undefined` without an image.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, JsValue> {
        let export = self.inner.export_png().map_err(js_error)?;
        Ok(export.map(|e| e.bytes))
    }

    // ----- State -----

    /// Current filters, crop and draw settings as a plain JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.state()).map_err(js_error)
    }

    /// Apply a state object (as returned by `state()`); re-renders only if
    /// filters or crop changed.
    pub fn set_state(&mut self, value: JsValue) -> Result<bool, JsValue> {
        let next: EditorState = serde_wasm_bindgen::from_value(value).map_err(js_error)?;
        Ok(self.inner.set_state(next))
    }
}

impl JsEditorSession {
    /// Ticket ids are handed to JS as numbers; accept only the one pending.
    fn pending_ticket(&self, ticket: f64) -> Option<LoadTicket> {
        let current = self.inner.pending_load()?;
        (current.id() as f64 == ticket).then_some(current)
    }

    #[cfg(test)]
    fn load_decoded(&mut self, image: retouch_core::decode::DecodedImage) {
        let ticket = self.inner.begin_load();
        self.inner.finish_load(ticket, Ok(image));
    }
}
