//! Image decoding for Retouch.
//!
//! This module turns an uploaded file into the immutable RGBA source image
//! the editor composites from:
//! - Format detection from the file contents (PNG, JPEG, GIF, WebP, BMP)
//! - EXIF orientation correction, matching how browsers display photos
//! - Conversion to RGBA8 so transparent sources keep their alpha
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
