//! Geometric operations: crop-rectangle extraction and canvas flips.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixel space (not normalized)
//! - Origin is the top-left corner
//! - Flips act on the output surface, never on the source image

mod crop;
mod flip;

pub use crop::{extract_region, SourceRect};
pub use flip::{flip, FlipAxis};
