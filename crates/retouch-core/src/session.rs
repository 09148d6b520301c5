//! Editor session: owns the source image, the live surface and the editing
//! state, and routes UI events to the compositing pipeline and the stroke
//! rasterizer.
//!
//! The session re-renders only when filter or crop values actually change.
//! Draw-setting changes never touch the surface, so strokes survive them;
//! any render erases strokes (they are not retained).

use serde::{Deserialize, Serialize};

use crate::composite::{render, Composition};
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError, EXPORT_FILE_NAME};
use crate::stroke::{DrawSettings, Point, StrokeRasterizer, ViewRect};
use crate::surface::Surface;
use crate::transform::{flip, FlipAxis};
use crate::{CropField, CropSpec, FilterSpec};

/// Everything the user can set in the editor UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorState {
    pub filter: FilterSpec,
    pub crop: CropSpec,
    pub draw: DrawSettings,
}

impl EditorState {
    /// Whether moving from `self` to `next` requires a new base frame.
    pub fn needs_render(&self, next: &EditorState) -> bool {
        self.filter != next.filter || self.crop != next.crop
    }
}

/// Identifies one load request. Only the most recent ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Result of completing a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image replaced the previous one and was rendered.
    Loaded { width: u32, height: u32 },
    /// Decoding failed; the session kept its previous image.
    Failed(DecodeError),
    /// A newer request superseded this one; the result was discarded.
    Stale,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// An encoded export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Source image and the surface rendered from it. Replaced together.
#[derive(Debug, Clone)]
struct Canvas {
    source: DecodedImage,
    surface: Surface,
}

/// A single editing session.
#[derive(Debug, Default)]
pub struct EditorSession {
    state: EditorState,
    canvas: Option<Canvas>,
    rasterizer: StrokeRasterizer,
    last_ticket: u64,
    pending: Option<LoadTicket>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn source(&self) -> Option<&DecodedImage> {
        self.canvas.as_ref().map(|c| &c.source)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.canvas.as_ref().map(|c| &c.surface)
    }

    /// True between [`begin_load`](Self::begin_load) and the matching
    /// [`finish_load`](Self::finish_load).
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket of the load in flight, if any.
    pub fn pending_load(&self) -> Option<LoadTicket> {
        self.pending
    }

    pub fn is_drawing(&self) -> bool {
        self.rasterizer.is_drawing()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start a load request, superseding any request still in flight.
    ///
    /// Edits are refused until the request is finished.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.last_ticket += 1;
        let ticket = LoadTicket(self.last_ticket);
        if let Some(previous) = self.pending.replace(ticket) {
            tracing::debug!(superseded = previous.id(), ticket = ticket.id(), "Load request superseded");
        }
        self.rasterizer.stroke_end();
        ticket
    }

    /// Complete a load request with its decode result.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<DecodedImage, DecodeError>) -> LoadOutcome {
        if self.pending != Some(ticket) {
            tracing::warn!(ticket = ticket.id(), "Discarding result of superseded load");
            return LoadOutcome::Stale;
        }
        self.pending = None;

        let source = match result {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(ticket = ticket.id(), error = %e, "Image load failed, keeping previous image");
                return LoadOutcome::Failed(e);
            }
        };

        let (width, height) = (source.width, source.height);
        self.state.crop = self.state.crop.clamped_to(width, height);

        let mut canvas = Canvas {
            surface: Surface::for_source(&source),
            source,
        };
        render(&canvas.source, &self.state.crop, &self.state.filter, &mut canvas.surface);
        self.canvas = Some(canvas);

        tracing::info!(ticket = ticket.id(), width, height, "Image loaded");
        LoadOutcome::Loaded { width, height }
    }

    /// Decode `bytes` and load the result in one step.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, decode_image(bytes))
    }

    // ------------------------------------------------------------------
    // State changes
    // ------------------------------------------------------------------

    /// Re-render when `prev -> next` changed filter or crop.
    ///
    /// Returns whether a render happened. Draw-setting changes alone never
    /// render.
    pub fn on_state_changed(&mut self, prev: &EditorState, next: &EditorState) -> bool {
        if !prev.needs_render(next) {
            return false;
        }
        self.render_with(next);
        true
    }

    fn render_with(&mut self, state: &EditorState) {
        if let Some(canvas) = self.canvas.as_mut() {
            render(&canvas.source, &state.crop, &state.filter, &mut canvas.surface);
        }
    }

    /// Apply `edit` to the state and dispatch the change.
    ///
    /// Returns `false` if the edit was refused because a load is pending.
    fn edit(&mut self, edit: impl FnOnce(&mut EditorState, (u32, u32))) -> bool {
        if let Some(ticket) = self.pending {
            tracing::debug!(ticket = ticket.id(), "Edit ignored while image is loading");
            return false;
        }
        let prev = self.state;
        let mut next = prev;
        edit(&mut next, self.source_dimensions());
        self.state = next;
        self.on_state_changed(&prev, &next);
        true
    }

    /// Dimensions crop values are clamped against. Without an image,
    /// values are kept and clamped when one loads.
    fn source_dimensions(&self) -> (u32, u32) {
        self.source()
            .map(|s| (s.width, s.height))
            .unwrap_or((u32::MAX, u32::MAX))
    }

    /// Replace the whole state at once; renders at most once.
    pub fn set_state(&mut self, next: EditorState) -> bool {
        self.edit(|state, (w, h)| {
            *state = EditorState {
                crop: next.crop.clamped_to(w, h),
                ..next
            }
        })
    }

    /// Replace the whole filter set.
    pub fn set_filter(&mut self, filter: FilterSpec) -> bool {
        self.edit(|state, _| state.filter = filter)
    }

    /// Modify filter values in place, e.g. `session.update_filter(|f| f.set_hue(90.0))`.
    pub fn update_filter(&mut self, update: impl FnOnce(&mut FilterSpec)) -> bool {
        self.edit(|state, _| update(&mut state.filter))
    }

    /// Set one filter by name. Unknown names are ignored.
    pub fn set_filter_field(&mut self, field: &str, value: f32) -> bool {
        let mut known = false;
        let accepted = self.edit(|state, _| known = state.filter.set_field(field, value));
        accepted && known
    }

    /// Replace the crop rectangle, clamping each field to the source.
    pub fn set_crop(&mut self, crop: CropSpec) -> bool {
        self.edit(|state, (w, h)| state.crop = crop.clamped_to(w, h))
    }

    /// Set one crop field, clamped to the source.
    pub fn set_crop_field(&mut self, field: CropField, value: f64) -> bool {
        self.edit(|state, (w, h)| state.crop.set_field(field, value, w, h))
    }

    /// Replace the brush settings. Never re-renders.
    pub fn set_draw_settings(&mut self, draw: DrawSettings) -> bool {
        self.edit(|state, _| state.draw = draw)
    }

    /// Modify brush settings in place. Never re-renders.
    pub fn update_draw_settings(&mut self, update: impl FnOnce(&mut DrawSettings)) -> bool {
        self.edit(|state, _| update(&mut state.draw))
    }

    /// Restore default filters and crop and re-render the base frame.
    ///
    /// Brush settings are kept. The surface is always re-rendered, which
    /// also clears any strokes.
    pub fn reset(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.state.filter = FilterSpec::default();
        self.state.crop = CropSpec::default();
        let state = self.state;
        self.render_with(&state);
        true
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Begin a stroke at a surface position.
    pub fn stroke_start(&mut self, point: Point) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(canvas) = self.canvas.as_ref() else {
            return false;
        };
        self.rasterizer.stroke_start(point, &self.state.draw, &canvas.surface);
        true
    }

    /// Extend the active stroke. Returns `false` if nothing was drawn.
    pub fn stroke_move(&mut self, point: Point) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(Canvas { source, surface }) = self.canvas.as_mut() else {
            return false;
        };
        let base = Composition::new(source, &self.state.crop, &self.state.filter);
        self.rasterizer.stroke_move(point, surface, &base)
    }

    pub fn stroke_end(&mut self) {
        self.rasterizer.stroke_end();
    }

    /// Map a client position through `view` into surface coordinates.
    pub fn map_pointer(&self, view: &ViewRect, client_x: f32, client_y: f32) -> Option<Point> {
        let surface = self.surface()?;
        Some(view.to_surface(client_x, client_y, surface.width(), surface.height()))
    }

    pub fn pointer_down(&mut self, view: &ViewRect, client_x: f32, client_y: f32) -> bool {
        match self.map_pointer(view, client_x, client_y) {
            Some(point) => self.stroke_start(point),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, view: &ViewRect, client_x: f32, client_y: f32) -> bool {
        match self.map_pointer(view, client_x, client_y) {
            Some(point) => self.stroke_move(point),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.stroke_end();
    }

    // ------------------------------------------------------------------
    // Surface operations
    // ------------------------------------------------------------------

    /// Mirror the current surface. Lost on the next render.
    pub fn flip(&mut self, axis: FlipAxis) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        flip(&mut canvas.surface, axis);
        true
    }

    /// Encode the live surface as PNG. `None` when no image is loaded.
    pub fn export_png(&self) -> Result<Option<ExportedImage>, EncodeError> {
        let Some(surface) = self.surface() else {
            return Ok(None);
        };
        let bytes = encode_png(surface.pixels(), surface.width(), surface.height())?;
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            bytes = bytes.len(),
            "Exported surface"
        );
        Ok(Some(ExportedImage {
            file_name: EXPORT_FILE_NAME,
            bytes,
        }))
    }
}
