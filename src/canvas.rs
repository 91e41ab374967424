//! The drawing surface contract.
//!
//! The ring only ever strokes arcs and draws centred text, so that is all a
//! surface has to provide. [`CellCanvas`](crate::cell_canvas::CellCanvas)
//! rasterises into terminal cells; [`RecordingCanvas`] keeps the calls for
//! inspection and for hosts that replay them on their own renderer.

use crate::geometry::RectF;
use crate::paint::{FontMetrics, Paint};

/// An immediate mode 2D drawing surface.
///
/// Angles are in degrees. 0° points at 3 o'clock and angles grow clockwise,
/// so 270° is 12 o'clock.
pub trait Canvas {
    /// Width of the surface in layout units.
    fn width(&self) -> f32;

    /// Height of the surface in layout units.
    fn height(&self) -> f32;

    /// Draws the arc of the oval inscribed in `oval`, starting at
    /// `start_angle` and sweeping `sweep_angle` degrees.
    fn draw_arc(
        &mut self,
        oval: RectF,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        paint: &Paint,
    );

    /// Draws `text` with its baseline at `y`, anchored at `x` according to the
    /// paint's alignment.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);

    /// Metrics of the font `paint` selects.
    fn font_metrics(&self, paint: &Paint) -> FontMetrics {
        FontMetrics::approximate(paint.text_size)
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A [`Canvas::draw_arc`] call.
    Arc {
        /// Oval the arc follows.
        oval: RectF,
        /// Start angle in degrees.
        start_angle: f32,
        /// Sweep in degrees.
        sweep_angle: f32,
        /// Whether the arc is closed through the centre.
        use_center: bool,
        /// Paint used.
        paint: Paint,
    },
    /// A [`Canvas::draw_text`] call.
    Text {
        /// The text drawn.
        text: String,
        /// Anchor x.
        x: f32,
        /// Baseline y.
        y: f32,
        /// Paint used.
        paint: Paint,
    },
}

/// A canvas that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Creates an empty recording surface of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Calls recorded so far, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded arcs, in order.
    pub fn arcs(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Arc { .. }))
    }

    /// Recorded text runs, in order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn draw_arc(
        &mut self,
        oval: RectF,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        paint: &Paint,
    ) {
        self.ops.push(DrawOp::Arc {
            oval,
            start_angle,
            sweep_angle,
            use_center,
            paint: paint.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            paint: paint.clone(),
        });
    }
}
