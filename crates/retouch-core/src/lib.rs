//! Retouch Core - Image compositing library
//!
//! This crate provides the core of the Retouch editor: the filter and crop
//! compositing pipeline, the sharpen convolution, stroke rasterization for
//! the drawing tools, and the editor session that ties them together.

pub mod adjustments;
pub mod composite;
pub mod decode;
pub mod encode;
pub mod session;
pub mod sharpen;
pub mod stroke;
pub mod surface;
pub mod transform;

mod color;

pub use color::{Color, ColorParseError};
pub use composite::{render, Composition};
pub use session::{EditorSession, EditorState, ExportedImage, LoadOutcome, LoadTicket};
pub use sharpen::{sharpen, sharpen_in_place};
pub use stroke::{DrawSettings, Point, StrokeRasterizer, Tool, ViewRect};
pub use surface::Surface;
pub use transform::{flip, FlipAxis, SourceRect};

use serde::{Deserialize, Serialize};

/// Range of the brightness, contrast and saturation percentages.
pub const PERCENT_RANGE: (f32, f32) = (0.0, 200.0);
/// Range of the hue rotation in degrees.
pub const HUE_RANGE: (f32, f32) = (0.0, 360.0);
/// Range shared by blur (pixels) and sharpen (intensity).
pub const DETAIL_RANGE: (f32, f32) = (0.0, 10.0);

/// Continuous adjustment filters applied on every render.
///
/// Fields are private so every value stays inside its declared range:
/// setters clamp (and round to the slider step), they never reject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterValues", into = "FilterValues")]
pub struct FilterSpec {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    blur: f32,
    sharpen: f32,
}

/// Unvalidated filter values, used for (de)serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterValues {
    /// Brightness percentage (0 to 200)
    pub brightness: f32,
    /// Contrast percentage (0 to 200)
    pub contrast: f32,
    /// Saturation percentage (0 to 200)
    pub saturation: f32,
    /// Hue rotation in degrees (0 to 360)
    pub hue: f32,
    /// Gaussian blur radius in pixels (0 to 10)
    pub blur: f32,
    /// Sharpen intensity (0 to 10)
    pub sharpen: f32,
}

impl Default for FilterValues {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue: 0.0,
            blur: 0.0,
            sharpen: 0.0,
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterValues::default().into()
    }
}

impl From<FilterValues> for FilterSpec {
    fn from(values: FilterValues) -> Self {
        let mut spec = FilterSpec {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue: 0.0,
            blur: 0.0,
            sharpen: 0.0,
        };
        spec.set_brightness(values.brightness);
        spec.set_contrast(values.contrast);
        spec.set_saturation(values.saturation);
        spec.set_hue(values.hue);
        spec.set_blur(values.blur);
        spec.set_sharpen(values.sharpen);
        spec
    }
}

impl From<FilterSpec> for FilterValues {
    fn from(spec: FilterSpec) -> Self {
        Self {
            brightness: spec.brightness,
            contrast: spec.contrast,
            saturation: spec.saturation,
            hue: spec.hue,
            blur: spec.blur,
            sharpen: spec.sharpen,
        }
    }
}

/// Clamp `value` into `range` and snap it to a multiple of `step`.
/// NaN falls back to `fallback`.
pub(crate) fn quantize(value: f32, range: (f32, f32), step: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        return fallback;
    }
    let snapped = (value.clamp(range.0, range.1) / step).round() * step;
    snapped.clamp(range.0, range.1)
}

impl FilterSpec {
    /// Create a filter spec with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn blur(&self) -> f32 {
        self.blur
    }

    pub fn sharpen(&self) -> f32 {
        self.sharpen
    }

    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = quantize(value, PERCENT_RANGE, 1.0, 100.0);
    }

    pub fn set_contrast(&mut self, value: f32) {
        self.contrast = quantize(value, PERCENT_RANGE, 1.0, 100.0);
    }

    pub fn set_saturation(&mut self, value: f32) {
        self.saturation = quantize(value, PERCENT_RANGE, 1.0, 100.0);
    }

    pub fn set_hue(&mut self, value: f32) {
        self.hue = quantize(value, HUE_RANGE, 1.0, 0.0);
    }

    pub fn set_blur(&mut self, value: f32) {
        self.blur = quantize(value, DETAIL_RANGE, 0.1, 0.0);
    }

    pub fn set_sharpen(&mut self, value: f32) {
        self.sharpen = quantize(value, DETAIL_RANGE, 0.1, 0.0);
    }

    /// Set a single field by name, as sent by slider controls.
    ///
    /// Returns `false` for an unknown field name.
    pub fn set_field(&mut self, field: &str, value: f32) -> bool {
        match field {
            "brightness" => self.set_brightness(value),
            "contrast" => self.set_contrast(value),
            "saturation" => self.set_saturation(value),
            "hue" => self.set_hue(value),
            "blur" => self.set_blur(value),
            "sharpen" => self.set_sharpen(value),
            _ => return false,
        }
        true
    }
}

/// Which edge of the crop rectangle a setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropField {
    X,
    Y,
    Width,
    Height,
}

impl std::str::FromStr for CropField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(CropField::X),
            "y" => Ok(CropField::Y),
            "width" => Ok(CropField::Width),
            "height" => Ok(CropField::Height),
            _ => Err(()),
        }
    }
}

/// Crop rectangle in source pixel space.
///
/// A `width` or `height` of 0 means "use the full source extent", not an
/// empty crop. Each setter clamps only its own field against the source
/// dimensions; the sum `x + width` is not validated here (see
/// [`CropSpec::resolve`] for how the pipeline treats it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSpec {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Clamp a user-entered coordinate into `[0, max]`.
fn clamp_coordinate(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(max as f64) as u32
}

impl CropSpec {
    /// Create an empty crop (full source extent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this crop selects the full source
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Set one field, clamping it into `[0, source dimension]`.
    ///
    /// `x` and `width` clamp against the source width, `y` and `height`
    /// against the source height.
    pub fn set_field(&mut self, field: CropField, value: f64, source_width: u32, source_height: u32) {
        match field {
            CropField::X => self.x = clamp_coordinate(value, source_width),
            CropField::Y => self.y = clamp_coordinate(value, source_height),
            CropField::Width => self.width = clamp_coordinate(value, source_width),
            CropField::Height => self.height = clamp_coordinate(value, source_height),
        }
    }

    /// Re-clamp every field independently against new source dimensions.
    pub fn clamped_to(&self, source_width: u32, source_height: u32) -> Self {
        Self {
            x: self.x.min(source_width),
            y: self.y.min(source_height),
            width: self.width.min(source_width),
            height: self.height.min(source_height),
        }
    }

    /// Resolve the effective source rectangle.
    ///
    /// Zero width/height expand to the full source extent, then the
    /// rectangle is intersected with the source bounds so `x + width`
    /// never exceeds the source width. Returns `None` when nothing of the
    /// source remains (e.g. `x` equals the source width).
    pub fn resolve(&self, source_width: u32, source_height: u32) -> Option<SourceRect> {
        let width = if self.width > 0 { self.width } else { source_width };
        let height = if self.height > 0 { self.height } else { source_height };

        let x = self.x.min(source_width);
        let y = self.y.min(source_height);
        let width = width.min(source_width - x);
        let height = height.min(source_height - y);

        if width == 0 || height == 0 {
            return None;
        }

        Some(SourceRect {
            x,
            y,
            width,
            height,
        })
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
