//! Freehand and shape drawing on the output surface.
//!
//! A stroke runs `Idle -> Drawing -> Idle`. Pen and highlighter strokes
//! accumulate segments on top of the surface. Shape tools show a single
//! live preview: every move repaints the base frame first, so only the
//! latest outline remains.

mod raster;

use serde::{Deserialize, Serialize};

use crate::composite::BaseFrame;
use crate::surface::Surface;
use crate::{quantize, Color};

use raster::{paint_closed_outline, paint_ring, paint_segment, Brush, CoverageMask};

/// Range of the brush size slider.
pub const SIZE_RANGE: (f32, f32) = (1.0, 50.0);
/// Range of the highlighter opacity.
pub const OPACITY_RANGE: (f32, f32) = (0.0, 1.0);

/// Drawing tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Highlighter,
    Square,
    Circle,
    Triangle,
}

impl Tool {
    /// Shape tools preview a single outline instead of accumulating paint.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Square | Tool::Circle | Tool::Triangle)
    }
}

impl std::str::FromStr for Tool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(Tool::Pen),
            "highlighter" => Ok(Tool::Highlighter),
            "square" => Ok(Tool::Square),
            "circle" => Ok(Tool::Circle),
            "triangle" => Ok(Tool::Triangle),
            _ => Err(()),
        }
    }
}

/// A position in surface pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// On-screen box of the displayed surface, in client coordinates.
///
/// The surface may be displayed scaled; pointer positions are mapped back
/// to surface pixels through this box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client position onto a `surface_width` x `surface_height` surface.
    ///
    /// An axis with a zero (or non-finite) on-screen extent maps with scale 1.
    pub fn to_surface(&self, client_x: f32, client_y: f32, surface_width: u32, surface_height: u32) -> Point {
        let scale = |surface: u32, view: f32| {
            if view.is_finite() && view > 0.0 {
                surface as f32 / view
            } else {
                1.0
            }
        };
        Point::new(
            (client_x - self.left) * scale(surface_width, self.width),
            (client_y - self.top) * scale(surface_height, self.height),
        )
    }
}

/// Brush settings chosen in the toolbar.
///
/// Like [`crate::FilterSpec`], fields are private and setters clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DrawValues", into = "DrawValues")]
pub struct DrawSettings {
    tool: Tool,
    color: Color,
    size: f32,
    highlighter_opacity: f32,
}

/// Unvalidated draw settings, used for (de)serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawValues {
    pub tool: Tool,
    pub color: Color,
    /// Brush size in pixels (1 to 50)
    pub size: f32,
    /// Highlighter opacity (0 to 1)
    pub highlighter_opacity: f32,
}

impl Default for DrawValues {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color::BLACK,
            size: 5.0,
            highlighter_opacity: 0.5,
        }
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        DrawValues::default().into()
    }
}

impl From<DrawValues> for DrawSettings {
    fn from(values: DrawValues) -> Self {
        let mut settings = DrawSettings {
            tool: values.tool,
            color: values.color,
            size: 5.0,
            highlighter_opacity: 0.5,
        };
        settings.set_size(values.size);
        settings.set_highlighter_opacity(values.highlighter_opacity);
        settings
    }
}

impl From<DrawSettings> for DrawValues {
    fn from(settings: DrawSettings) -> Self {
        Self {
            tool: settings.tool,
            color: settings.color,
            size: settings.size,
            highlighter_opacity: settings.highlighter_opacity,
        }
    }
}

impl DrawSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn highlighter_opacity(&self) -> f32 {
        self.highlighter_opacity
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the brush size, clamped to 1..=50 whole pixels.
    pub fn set_size(&mut self, size: f32) {
        self.size = quantize(size, SIZE_RANGE, 1.0, 5.0);
    }

    /// Set the highlighter opacity, clamped to 0..=1 in steps of 0.1.
    pub fn set_highlighter_opacity(&mut self, opacity: f32) {
        self.highlighter_opacity = quantize(opacity, OPACITY_RANGE, 0.1, 0.5);
    }

    /// Brush for the current tool.
    fn brush(&self) -> Brush {
        match self.tool {
            Tool::Highlighter => Brush {
                rgba: self.color.to_rgba(255),
                width: self.size * 2.0,
                opacity: self.highlighter_opacity,
            },
            _ => Brush {
                rgba: self.color.to_rgba(255),
                width: self.size,
                opacity: 1.0,
            },
        }
    }
}

/// A stroke in progress. Settings are captured when it starts.
#[derive(Debug, Clone)]
struct ActiveStroke {
    tool: Tool,
    brush: Brush,
    start: Point,
    last: Point,
    /// Only allocated for translucent freehand strokes.
    coverage: Option<CoverageMask>,
}

#[derive(Debug, Clone, Default)]
enum StrokeState {
    #[default]
    Idle,
    Drawing(ActiveStroke),
}

/// Turns pointer positions into paint on a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct StrokeRasterizer {
    state: StrokeState,
}

impl StrokeRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing(_))
    }

    /// Begin a stroke at `point`. Nothing is painted until the first move.
    ///
    /// Starting while already drawing abandons the previous stroke.
    pub fn stroke_start(&mut self, point: Point, settings: &DrawSettings, surface: &Surface) {
        let brush = settings.brush();
        let coverage = (!settings.tool.is_shape() && brush.opacity < 1.0)
            .then(|| CoverageMask::new(surface.width(), surface.height()));

        self.state = StrokeState::Drawing(ActiveStroke {
            tool: settings.tool,
            brush,
            start: point,
            last: point,
            coverage,
        });
    }

    /// Extend the stroke to `point`.
    ///
    /// Returns `false` (and touches nothing) when no stroke is active.
    pub fn stroke_move<B>(&mut self, point: Point, surface: &mut Surface, base: &B) -> bool
    where
        B: BaseFrame + ?Sized,
    {
        let StrokeState::Drawing(stroke) = &mut self.state else {
            return false;
        };

        let brush = stroke.brush;
        let start = stroke.start;
        match stroke.tool {
            Tool::Pen | Tool::Highlighter => {
                paint_segment(surface, stroke.last, point, &brush, stroke.coverage.as_mut());
                stroke.last = point;
            }
            Tool::Square => {
                base.render_base(surface);
                let corners = [
                    start,
                    Point::new(point.x, start.y),
                    point,
                    Point::new(start.x, point.y),
                ];
                paint_closed_outline(surface, &corners, &brush);
            }
            Tool::Circle => {
                base.render_base(surface);
                paint_ring(surface, start, start.distance(point), &brush);
            }
            Tool::Triangle => {
                base.render_base(surface);
                let apex = [start, point, Point::new(2.0 * start.x - point.x, point.y)];
                paint_closed_outline(surface, &apex, &brush);
            }
        }
        true
    }

    /// Finish the current stroke; a no-op while idle.
    pub fn stroke_end(&mut self) {
        self.state = StrokeState::Idle;
    }
}
