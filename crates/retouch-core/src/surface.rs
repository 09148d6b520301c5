//! The output surface: the live RGBA buffer users see, draw on and export.
//!
//! Its dimensions are fixed to the source image's native size when the image
//! is loaded. Compositing overwrites it entirely; strokes blend on top.

use image::{Rgba, RgbaImage};

use crate::decode::DecodedImage;

/// Mutable RGBA8 pixel buffer matching the display dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a surface sized to a source image (contents left transparent).
    pub fn for_source(source: &DecodedImage) -> Self {
        Self::new(source.width, source.height)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// RGBA bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Mutable RGBA bytes in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels_mut().fill(0);
    }

    /// Overwrite the surface with `image`, which must have the same size.
    ///
    /// Returns `false` (leaving the surface untouched) on a size mismatch.
    pub fn replace(&mut self, image: RgbaImage) -> bool {
        if image.dimensions() != self.dimensions() {
            return false;
        }
        self.image = image;
        true
    }

    /// RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Source-over blend `rgba` at `(x, y)` with the given opacity.
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4], opacity: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = blend_over(*dst, rgba, opacity);
    }
}

/// Composite `src` (scaled by `opacity`) over `dst`.
fn blend_over(dst: Rgba<u8>, src: [u8; 4], opacity: f32) -> Rgba<u8> {
    let a = (src[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if a <= 0.0 {
        return dst;
    }
    if a >= 1.0 {
        return Rgba([src[0], src[1], src[2], 255]);
    }

    let inv = 1.0 - a;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = a + dst_a * inv;

    let channel = |s: u8, d: u8| -> u8 {
        ((s as f32 * a + d as f32 * dst_a * inv) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
