//! Source rectangle extraction.
//!
//! The compositing pipeline stretches a rectangle of the source image over
//! the whole output surface. This module owns that rectangle type and the
//! copy of its pixels out of the source.

use image::RgbaImage;

use crate::decode::DecodedImage;

/// A non-empty rectangle in source pixel space, fully inside the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether this rectangle covers the whole of a `width` x `height` image.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

/// Copy the pixels under `rect` out of `image`.
///
/// Returns `None` if the image buffer is malformed. The rectangle is
/// clipped to the image.
pub fn extract_region(image: &DecodedImage, rect: SourceRect) -> Option<RgbaImage> {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    if image.pixels.len() != src_w * src_h * 4 {
        return None;
    }

    // Fast path: full extent, no row copies
    if rect.covers(image.width, image.height) {
        return RgbaImage::from_raw(image.width, image.height, image.pixels.clone());
    }

    let x0 = (rect.x as usize).min(src_w);
    let y0 = (rect.y as usize).min(src_h);
    let x1 = x0.saturating_add(rect.width as usize).min(src_w);
    let y1 = y0.saturating_add(rect.height as usize).min(src_h);

    let row_bytes = (x1 - x0) * 4;
    let mut pixels = Vec::with_capacity(row_bytes * (y1 - y0));
    for y in y0..y1 {
        let start = (y * src_w + x0) * 4;
        pixels.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    RgbaImage::from_raw((x1 - x0) as u32, (y1 - y0) as u32, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_region_is_copy() {
        let img = test_image(20, 10);
        let region = extract_region(&img, SourceRect::new(0, 0, 20, 10)).unwrap();
        assert_eq!(region.dimensions(), (20, 10));
        assert_eq!(region.into_raw(), img.pixels);
    }

    #[test]
    fn test_center_region() {
        let img = test_image(10, 10);
        let region = extract_region(&img, SourceRect::new(2, 3, 4, 5)).unwrap();

        assert_eq!(region.dimensions(), (4, 5));
        // Value at (2, 3) = 3 * 10 + 2 = 32
        assert_eq!(region.get_pixel(0, 0).0, [32, 32, 32, 255]);
        // Value at (5, 7) = 7 * 10 + 5 = 75
        assert_eq!(region.get_pixel(3, 4).0, [75, 75, 75, 255]);
    }

    #[test]
    fn test_region_clipped_to_image() {
        let img = test_image(6, 4);
        let region = extract_region(&img, SourceRect::new(4, 2, 10, 10)).unwrap();

        assert_eq!(region.dimensions(), (2, 2));
        // Value at (5, 3) = 3 * 6 + 5 = 23
        assert_eq!(region.get_pixel(1, 1).0, [23, 23, 23, 255]);
    }

    #[test]
    fn test_region_outlives_source() {
        let region = {
            let img = test_image(8, 8);
            extract_region(&img, SourceRect::new(1, 1, 3, 3)).unwrap()
        };
        // Value at (1, 1) = 1 * 8 + 1 = 9
        assert_eq!(region.get_pixel(0, 0).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_covers() {
        assert!(SourceRect::new(0, 0, 8, 6).covers(8, 6));
        assert!(!SourceRect::new(1, 0, 7, 6).covers(8, 6));
        assert!(!SourceRect::new(0, 0, 8, 5).covers(8, 6));
    }

    #[test]
    fn test_malformed_source() {
        let img = DecodedImage {
            width: 5,
            height: 5,
            pixels: vec![0; 3],
        };
        assert!(extract_region(&img, SourceRect::new(0, 0, 5, 5)).is_none());
    }
}
