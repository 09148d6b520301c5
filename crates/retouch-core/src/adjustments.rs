//! Color filter stages of the filter pass.
//!
//! Applies the per-pixel color filters to RGBA pixel data. Alpha is never
//! modified by these stages. Blur, the last stage of the filter pass, works
//! on neighborhoods and lives in [`crate::composite`].
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Hue rotation
//!
//! Each stage clamps its output to [0, 1] before the next one runs, and a
//! stage at its default value is skipped entirely, so default filters leave
//! the pixels bit-for-bit unchanged.

use crate::FilterSpec;

/// Luminance weights used by the saturation and hue matrices.
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

type Matrix = [[f32; 3]; 3];

/// Apply brightness, contrast, saturation and hue to RGBA pixels in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `filter` - The filter values to apply
pub fn apply_color_filters(pixels: &mut [u8], filter: &FilterSpec) {
    let brightness = filter.brightness() / 100.0;
    let contrast = filter.contrast() / 100.0;
    let saturation = (filter.saturation() != 100.0).then(|| saturation_matrix(filter.saturation() / 100.0));
    let hue = (filter.hue() % 360.0 != 0.0).then(|| hue_rotation_matrix(filter.hue()));

    // Early exit if no color stage is active
    if brightness == 1.0 && contrast == 1.0 && saturation.is_none() && hue.is_none() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(4) {
        let mut rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];

        if brightness != 1.0 {
            rgb = apply_brightness(rgb, brightness);
        }
        if contrast != 1.0 {
            rgb = apply_contrast(rgb, contrast);
        }
        if let Some(m) = &saturation {
            rgb = apply_matrix(rgb, m);
        }
        if let Some(m) = &hue {
            rgb = apply_matrix(rgb, m);
        }

        chunk[0] = to_byte(rgb[0]);
        chunk[1] = to_byte(rgb[1]);
        chunk[2] = to_byte(rgb[2]);
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn clamp_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [
        rgb[0].clamp(0.0, 1.0),
        rgb[1].clamp(0.0, 1.0),
        rgb[2].clamp(0.0, 1.0),
    ]
}

/// Linear multiply. `amount` 1.0 is identity, 0.0 is black.
#[inline]
fn apply_brightness(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    clamp_rgb([rgb[0] * amount, rgb[1] * amount, rgb[2] * amount])
}

/// Scale around the 0.5 midpoint.
///
/// Formula: `output = (input - 0.5) * amount + 0.5`
#[inline]
fn apply_contrast(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let midpoint = 0.5;
    clamp_rgb([
        (rgb[0] - midpoint) * amount + midpoint,
        (rgb[1] - midpoint) * amount + midpoint,
        (rgb[2] - midpoint) * amount + midpoint,
    ])
}

#[inline]
fn apply_matrix(rgb: [f32; 3], m: &Matrix) -> [f32; 3] {
    clamp_rgb([
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ])
}

/// Saturation matrix: 0.0 is grayscale, 1.0 identity, 2.0 doubles chroma.
///
/// Pulls each channel toward (or pushes it away from) the pixel's
/// luminance, so gray pixels are fixed points.
fn saturation_matrix(s: f32) -> Matrix {
    [
        [
            LUMA_R + (1.0 - LUMA_R) * s,
            LUMA_G - LUMA_G * s,
            LUMA_B - LUMA_B * s,
        ],
        [
            LUMA_R - LUMA_R * s,
            LUMA_G + (1.0 - LUMA_G) * s,
            LUMA_B - LUMA_B * s,
        ],
        [
            LUMA_R - LUMA_R * s,
            LUMA_G - LUMA_G * s,
            LUMA_B + (1.0 - LUMA_B) * s,
        ],
    ]
}

/// Luminance-preserving hue rotation by `degrees`.
fn hue_rotation_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            LUMA_R + cos * (1.0 - LUMA_R) - sin * LUMA_R,
            LUMA_G - cos * LUMA_G - sin * LUMA_G,
            LUMA_B - cos * LUMA_B + sin * (1.0 - LUMA_B),
        ],
        [
            LUMA_R - cos * LUMA_R + sin * 0.143,
            LUMA_G + cos * (1.0 - LUMA_G) + sin * 0.140,
            LUMA_B - cos * LUMA_B - sin * 0.283,
        ],
        [
            LUMA_R - cos * LUMA_R - sin * (1.0 - LUMA_R),
            LUMA_G - cos * LUMA_G + sin * LUMA_G,
            LUMA_B + cos * (1.0 - LUMA_B) + sin * LUMA_B,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a pixel from RGBA values (0-255)
    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Vec<u8> {
        vec![r, g, b, a]
    }

    /// Helper to apply filters and return resulting pixels
    fn apply(pixels: &[u8], filter: &FilterSpec) -> Vec<u8> {
        let mut result = pixels.to_vec();
        apply_color_filters(&mut result, filter);
        result
    }

    fn filter_with(f: impl FnOnce(&mut FilterSpec)) -> FilterSpec {
        let mut filter = FilterSpec::default();
        f(&mut filter);
        filter
    }

    // ===== Identity Tests =====

    #[test]
    fn test_identity_default_filters() {
        let pixels = pixel(128, 64, 192, 200);
        let result = apply(&pixels, &FilterSpec::default());
        assert_eq!(result, pixels, "Default filters should not change pixels");
    }

    #[test]
    fn test_full_hue_turn_is_identity() {
        let pixels = pixel(17, 99, 230, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_hue(360.0)));
        assert_eq!(result, pixels);
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_half() {
        let pixels = pixel(255, 100, 0, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_brightness(50.0)));
        assert_eq!(result, pixel(128, 50, 0, 255));
    }

    #[test]
    fn test_brightness_zero_is_black() {
        let pixels = pixel(255, 255, 255, 77);
        let result = apply(&pixels, &filter_with(|f| f.set_brightness(0.0)));
        assert_eq!(result, pixel(0, 0, 0, 77), "Alpha should be untouched");
    }

    #[test]
    fn test_brightness_clips_at_white() {
        let pixels = pixel(200, 200, 200, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_brightness(200.0)));
        assert_eq!(result, pixel(255, 255, 255, 255));
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_increase() {
        let pixels = pixel(64, 128, 192, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_contrast(200.0)));
        assert!(result[0] < 64, "Dark pixel should get darker");
        assert!((result[1] as i32 - 128).abs() < 3, "Mid pixel should stay near middle");
        assert_eq!(result[2], 255, "Bright pixel should clip at white");
    }

    #[test]
    fn test_contrast_zero_is_flat_gray() {
        let pixels = pixel(0, 90, 255, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_contrast(0.0)));
        assert_eq!(result, pixel(128, 128, 128, 255));
    }

    // ===== Saturation Tests =====

    #[test]
    fn test_saturation_zero_is_grayscale() {
        let pixels = pixel(200, 128, 100, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_saturation(0.0)));
        assert!((result[0] as i32 - result[1] as i32).abs() <= 1);
        assert!((result[1] as i32 - result[2] as i32).abs() <= 1);
    }

    #[test]
    fn test_saturation_increase() {
        let pixels = pixel(200, 128, 100, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_saturation(150.0)));
        let orig_diff = 200 - 100;
        let new_diff = result[0] as i32 - result[2] as i32;
        assert!(new_diff > orig_diff, "Color difference should increase");
    }

    #[test]
    fn test_saturation_keeps_gray() {
        let pixels = pixel(90, 90, 90, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_saturation(200.0)));
        for c in &result[0..3] {
            assert!((*c as i32 - 90).abs() <= 1);
        }
    }

    // ===== Hue Tests =====

    #[test]
    fn test_hue_rotation_moves_red_toward_green() {
        let pixels = pixel(255, 0, 0, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_hue(120.0)));
        assert!(result[1] > result[0], "Red rotated by 120 degrees should lean green");
    }

    #[test]
    fn test_hue_rotation_keeps_gray() {
        let pixels = pixel(128, 128, 128, 255);
        let result = apply(&pixels, &filter_with(|f| f.set_hue(200.0)));
        for c in &result[0..3] {
            assert!((*c as i32 - 128).abs() <= 1);
        }
    }

    #[test]
    fn test_hue_matrix_rows_sum_to_one() {
        let m = hue_rotation_matrix(73.0);
        for row in m {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 0.01);
        }
    }

    // ===== Multi-pixel and Edge Case Tests =====

    #[test]
    fn test_alpha_never_modified() {
        let mut pixels = vec![
            255, 0, 0, 10, // Red
            0, 255, 0, 128, // Green
            0, 0, 255, 255, // Blue
        ];
        let filter = filter_with(|f| {
            f.set_brightness(150.0);
            f.set_contrast(40.0);
            f.set_saturation(180.0);
            f.set_hue(45.0);
        });
        apply_color_filters(&mut pixels, &filter);
        assert_eq!(pixels[3], 10);
        assert_eq!(pixels[7], 128);
        assert_eq!(pixels[11], 255);
    }

    #[test]
    fn test_empty_pixels() {
        let mut pixels: Vec<u8> = vec![];
        apply_color_filters(&mut pixels, &filter_with(|f| f.set_brightness(10.0)));
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_incomplete_pixel_ignored() {
        // 5 bytes = 1 complete pixel + 1 byte remainder
        let mut pixels = vec![100, 100, 100, 255, 64];
        apply_color_filters(&mut pixels, &filter_with(|f| f.set_brightness(200.0)));
        assert_eq!(pixels[0], 200);
        assert_eq!(pixels[4], 64);
    }
}
