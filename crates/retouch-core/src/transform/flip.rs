//! Canvas flips.
//!
//! A flip mirrors whatever the surface currently shows, strokes included.
//! It does not touch the source image, so the next re-render (any filter or
//! crop change) discards it.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

impl std::str::FromStr for FlipAxis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" | "h" => Ok(FlipAxis::Horizontal),
            "vertical" | "v" => Ok(FlipAxis::Vertical),
            _ => Err(()),
        }
    }
}

/// Mirror the surface contents in place.
pub fn flip(surface: &mut Surface, axis: FlipAxis) {
    match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal_in_place(surface.image_mut()),
        FlipAxis::Vertical => imageops::flip_vertical_in_place(surface.image_mut()),
    }
}
