//! The compositing pipeline.
//!
//! Renders one frame from the immutable source image:
//!
//! 1. Clear the destination (erases any strokes drawn since the last render)
//! 2. Resolve the crop rectangle against the source
//! 3. Stretch the rectangle over the whole destination
//! 4. Color filters (brightness, contrast, saturation, hue)
//! 5. Gaussian blur
//! 6. Sharpen convolution, if requested
//!
//! Every render reads the original source, never a previous frame, so filter
//! changes do not compound and identical inputs give identical bytes.

use image::imageops::{self, FilterType};

use crate::adjustments::apply_color_filters;
use crate::decode::DecodedImage;
use crate::sharpen::sharpen_in_place;
use crate::surface::Surface;
use crate::transform::extract_region;
use crate::{CropSpec, FilterSpec};

/// Something that can repaint the base frame of the editor.
///
/// Shape tools call this before every preview so the previous preview is
/// erased.
pub trait BaseFrame {
    fn render_base(&self, destination: &mut Surface);
}

/// Borrowed inputs of one render.
#[derive(Debug, Clone, Copy)]
pub struct Composition<'a> {
    pub source: &'a DecodedImage,
    pub crop: &'a CropSpec,
    pub filter: &'a FilterSpec,
}

impl<'a> Composition<'a> {
    pub fn new(source: &'a DecodedImage, crop: &'a CropSpec, filter: &'a FilterSpec) -> Self {
        Self {
            source,
            crop,
            filter,
        }
    }
}

impl BaseFrame for Composition<'_> {
    fn render_base(&self, destination: &mut Surface) {
        render(self.source, self.crop, self.filter, destination);
    }
}

/// Render `source` through `crop` and `filter` into `destination`.
///
/// The destination keeps its own dimensions; the crop rectangle is always
/// stretched to fill it. If the crop leaves nothing of the source, the
/// destination is left transparent.
pub fn render(source: &DecodedImage, crop: &CropSpec, filter: &FilterSpec, destination: &mut Surface) {
    destination.clear();

    let (dst_w, dst_h) = destination.dimensions();
    if dst_w == 0 || dst_h == 0 {
        return;
    }

    let Some(rect) = crop.resolve(source.width, source.height) else {
        tracing::debug!(?crop, "Crop selects no source pixels, leaving surface empty");
        return;
    };

    let Some(region) = extract_region(source, rect) else {
        tracing::warn!(
            width = source.width,
            height = source.height,
            bytes = source.pixels.len(),
            "Source buffer does not match its dimensions"
        );
        return;
    };

    let mut frame = if region.dimensions() == (dst_w, dst_h) {
        region
    } else {
        imageops::resize(&region, dst_w, dst_h, FilterType::Triangle)
    };

    apply_color_filters(&mut frame, filter);

    if filter.blur() > 0.0 {
        frame = imageops::blur(&frame, filter.blur());
    }

    destination.replace(frame);

    if filter.sharpen() > 0.0 {
        sharpen_in_place(destination, filter.sharpen());
    }

    tracing::debug!(
        crop_x = rect.x,
        crop_y = rect.y,
        crop_width = rect.width,
        crop_height = rect.height,
        width = dst_w,
        height = dst_h,
        ?filter,
        "Rendered frame"
    );
}


// ============================================================================
// Property-Based Tests
// ============================================================================
