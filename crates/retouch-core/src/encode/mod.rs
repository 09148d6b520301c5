//! Image encoding for export.
//!
//! The editor exports the live surface as a PNG file named
//! [`EXPORT_FILE_NAME`]. PNG keeps the alpha channel, so transparent areas
//! left by an out-of-bounds crop survive the download.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray, half transparent
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};

/// File name offered to the user when downloading the edited image.
pub const EXPORT_FILE_NAME: &str = "edited_image.png";
