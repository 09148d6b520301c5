//! Pixel-level drawing primitives used by the stroke tools.
//!
//! Coverage is binary: pixel `(x, y)` is sampled at its integer coordinate
//! and painted when that point lies within half the line width of the
//! outline. Lines therefore have round caps and round joins.

use super::Point;
use crate::surface::Surface;

/// Slack for float error when testing coverage against the half width.
const COVERAGE_EPSILON: f32 = 1e-4;

/// Paint parameters shared by every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Brush {
    pub rgba: [u8; 4],
    pub width: f32,
    pub opacity: f32,
}

impl Brush {
    #[inline]
    fn half_width(&self) -> f32 {
        self.width / 2.0 + COVERAGE_EPSILON
    }
}

/// Pixels already painted by the current stroke.
///
/// Translucent strokes consult it so overlapping segments of one stroke
/// blend each pixel only once.
#[derive(Debug, Clone)]
pub(crate) struct CoverageMask {
    width: u32,
    painted: Vec<bool>,
}

impl CoverageMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            painted: vec![false; width as usize * height as usize],
        }
    }

    /// Mark `(x, y)`; returns `true` if it was not marked before.
    fn claim(&mut self, x: u32, y: u32) -> bool {
        let idx = y as usize * self.width as usize + x as usize;
        match self.painted.get_mut(idx) {
            Some(painted) if !*painted => {
                *painted = true;
                true
            }
            _ => false,
        }
    }
}

/// Inclusive pixel bounds of a float box, clipped to the surface.
fn clipped_bounds(surface: &Surface, min: Point, max: Point) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = surface.dimensions();
    if w == 0 || h == 0 {
        return None;
    }

    let x0 = min.x.floor().max(0.0);
    let y0 = min.y.floor().max(0.0);
    let x1 = max.x.ceil().min((w - 1) as f32);
    let y1 = max.y.ceil().min((h - 1) as f32);

    if !(x0 <= x1 && y0 <= y1) {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Blend `brush` into every pixel of the bounds where `covered` holds.
fn fill_where(
    surface: &mut Surface,
    bounds: (u32, u32, u32, u32),
    brush: &Brush,
    mut mask: Option<&mut CoverageMask>,
    covered: impl Fn(Point) -> bool,
) {
    let (x0, y0, x1, y1) = bounds;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if !covered(Point::new(x as f32, y as f32)) {
                continue;
            }
            if let Some(mask) = mask.as_deref_mut() {
                if !mask.claim(x, y) {
                    continue;
                }
            }
            surface.blend_pixel(x as i64, y as i64, brush.rgba, brush.opacity);
        }
    }
}

/// Euclidean distance from `p` to the segment `a`-`b`.
pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Paint a straight segment with round caps.
pub(crate) fn paint_segment(
    surface: &mut Surface,
    a: Point,
    b: Point,
    brush: &Brush,
    mask: Option<&mut CoverageMask>,
) {
    let half = brush.half_width();
    let min = Point::new(a.x.min(b.x) - half, a.y.min(b.y) - half);
    let max = Point::new(a.x.max(b.x) + half, a.y.max(b.y) + half);

    if let Some(bounds) = clipped_bounds(surface, min, max) {
        fill_where(surface, bounds, brush, mask, |p| {
            distance_to_segment(p, a, b) <= half
        });
    }
}

/// Paint the outline through `points`, closing it back to the first point.
pub(crate) fn paint_closed_outline(surface: &mut Surface, points: &[Point], brush: &Brush) {
    let Some(&first) = points.first() else {
        return;
    };
    let mut mask = CoverageMask::new(surface.width(), surface.height());
    for pair in points.windows(2) {
        paint_segment(surface, pair[0], pair[1], brush, Some(&mut mask));
    }
    if let Some(&last) = points.last() {
        paint_segment(surface, last, first, brush, Some(&mut mask));
    }
}

/// Paint a circle outline.
pub(crate) fn paint_ring(surface: &mut Surface, center: Point, radius: f32, brush: &Brush) {
    let half = brush.half_width();
    let reach = radius + half;
    let min = Point::new(center.x - reach, center.y - reach);
    let max = Point::new(center.x + reach, center.y + reach);

    if let Some(bounds) = clipped_bounds(surface, min, max) {
        fill_where(surface, bounds, brush, None, |p| {
            (p.distance(center) - radius).abs() <= half
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Brush = Brush {
        rgba: [255, 0, 0, 255],
        width: 1.0,
        opacity: 1.0,
    };

    fn painted(surface: &Surface) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y).map(|p| p[3]) != Some(0) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end the distance is to the endpoint
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
        // Degenerate segment
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_horizontal_segment_width_one() {
        let mut surface = Surface::new(10, 5);
        paint_segment(&mut surface, Point::new(2.0, 2.0), Point::new(6.0, 2.0), &RED, None);

        let expected: Vec<(u32, u32)> = (2..=6).map(|x| (x, 2)).collect();
        assert_eq!(painted(&surface), expected);
    }

    #[test]
    fn test_wide_segment_has_round_caps() {
        let mut surface = Surface::new(20, 20);
        let brush = Brush { width: 6.0, ..RED };
        paint_segment(&mut surface, Point::new(10.0, 10.0), Point::new(10.0, 10.0), &brush, None);

        // A dot of radius 3
        assert!(surface.pixel(13, 10).unwrap()[3] > 0);
        assert!(surface.pixel(10, 7).unwrap()[3] > 0);
        assert_eq!(surface.pixel(13, 13).unwrap()[3], 0, "Corner lies outside the cap");
    }

    #[test]
    fn test_segment_clipped_to_surface() {
        let mut surface = Surface::new(4, 4);
        paint_segment(&mut surface, Point::new(-10.0, 1.0), Point::new(20.0, 1.0), &RED, None);
        assert_eq!(painted(&surface), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_segment_entirely_outside() {
        let mut surface = Surface::new(4, 4);
        paint_segment(&mut surface, Point::new(-10.0, -10.0), Point::new(-5.0, -5.0), &RED, None);
        assert!(painted(&surface).is_empty());
    }

    #[test]
    fn test_mask_prevents_double_blend() {
        let brush = Brush {
            rgba: [0, 0, 0, 255],
            width: 3.0,
            opacity: 0.5,
        };
        let a = Point::new(2.0, 2.0);
        let b = Point::new(7.0, 2.0);

        let mut once = Surface::new(10, 5);
        paint_segment(&mut once, a, b, &brush, None);

        let mut twice = Surface::new(10, 5);
        let mut mask = CoverageMask::new(10, 5);
        paint_segment(&mut twice, a, b, &brush, Some(&mut mask));
        paint_segment(&mut twice, b, a, &brush, Some(&mut mask));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_ring_radius() {
        let mut surface = Surface::new(30, 30);
        paint_ring(&mut surface, Point::new(15.0, 15.0), 10.0, &RED);

        assert!(surface.pixel(25, 15).unwrap()[3] > 0);
        assert!(surface.pixel(15, 5).unwrap()[3] > 0);
        assert_eq!(surface.pixel(15, 15).unwrap()[3], 0, "Center is not painted");
        assert_eq!(surface.pixel(27, 15).unwrap()[3], 0);
    }

    #[test]
    fn test_closed_outline_joins_last_to_first() {
        let mut surface = Surface::new(10, 10);
        let points = [Point::new(1.0, 1.0), Point::new(8.0, 1.0), Point::new(8.0, 8.0)];
        paint_closed_outline(&mut surface, &points, &RED);

        // Closing edge (8,8) -> (1,1) passes through (4,4)
        assert!(surface.pixel(4, 4).unwrap()[3] > 0);
    }

    #[test]
    fn test_empty_surface_is_noop() {
        let mut surface = Surface::new(0, 0);
        paint_segment(&mut surface, Point::new(0.0, 0.0), Point::new(1.0, 1.0), &RED, None);
        paint_ring(&mut surface, Point::new(0.0, 0.0), 3.0, &RED);
        assert!(surface.pixels().is_empty());
    }
}
