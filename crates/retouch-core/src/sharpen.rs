//! Sharpen convolution.
//!
//! A 3x3 unsharp kernel parameterized by an intensity `amount` in (0, 10]:
//!
//! ```text
//!  0   -f    0
//! -f  1+4f  -f        f = amount / 10
//!  0   -f    0
//! ```
//!
//! ## Edge Policy
//! Border pixels (first/last row and column) are copied through unchanged.
//! Alpha is never convolved: every output pixel keeps its input alpha.

use crate::surface::Surface;

/// Build the 3x3 kernel for the given amount.
#[inline]
fn kernel(amount: f32) -> [[f64; 3]; 3] {
    let f = f64::from(amount) / 10.0;
    [[0.0, -f, 0.0], [-f, 1.0 + 4.0 * f, -f], [0.0, -f, 0.0]]
}

/// Sharpen RGBA pixel data, returning a new buffer of the same size.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `amount` - Sharpen intensity; 0 reproduces the input
///
/// A buffer whose length does not match `width * height * 4` is returned
/// unchanged.
pub fn sharpen(pixels: &[u8], width: u32, height: u32, amount: f32) -> Vec<u8> {
    let mut output = pixels.to_vec();

    let (w, h) = (width as usize, height as usize);
    if pixels.len() != w * h * 4 || w < 3 || h < 3 {
        return output;
    }

    let k = kernel(amount);

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = (y * w + x) * 4;
            for c in 0..3 {
                let mut sum = 0.0f64;
                for (ky, row) in k.iter().enumerate() {
                    let sy = y + ky - 1;
                    for (kx, weight) in row.iter().enumerate() {
                        let sx = x + kx - 1;
                        sum += f64::from(pixels[(sy * w + sx) * 4 + c]) * weight;
                    }
                }
                output[idx + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}

/// Sharpen a surface in place.
pub fn sharpen_in_place(surface: &mut Surface, amount: f32) {
    let (width, height) = surface.dimensions();
    let sharpened = sharpen(surface.pixels(), width, height, amount);
    surface.pixels_mut().copy_from_slice(&sharpened);
}


// ============================================================================
// Property-Based Tests
// ============================================================================
