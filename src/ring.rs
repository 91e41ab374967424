//! Circular progress ring component for Bubble Tea applications.
//!
//! The ring draws a full background track, a progress arc starting at 12
//! o'clock and a centred percentage label. Calling
//! [`Model::start_progress`] runs a repeating animation whose every repeat
//! bumps the displayed percentage by one, so the label counts up to the
//! configured progress.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_progress_ring::ring::{new, with_progress, with_arc_color};
//!
//! let mut ring = new(&[
//!     with_progress(75),
//!     with_arc_color("#2ecc71".to_string()),
//! ]);
//! assert_eq!(ring.progress(), 75);
//! assert_eq!(ring.label(), "0%");
//!
//! // Returns the command that drives the first animation frame.
//! let _cmd = ring.start_progress();
//! assert!(ring.is_animating());
//! ```
//!
//! # Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_progress_ring::ring::{self, FinishedMsg};
//! use bubbletea_rs::{Cmd, Model as TeaModel, Msg};
//!
//! struct App {
//!     ring: ring::Model,
//! }
//!
//! impl TeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut ring = ring::new(&[ring::with_progress(60)]);
//!         let cmd = ring.start_progress();
//!         (Self { ring }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if msg.downcast_ref::<FinishedMsg>().is_some() {
//!             // The count-up is done.
//!         }
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```

use crate::animation::{AnimationState, RepeatAnimation, RepeatCount};
use crate::canvas::Canvas;
use crate::cell_canvas::{CellCanvas, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::geometry::{BoundsCache, BoundsKey, BoundsPolicy, Padding, RingBounds};
use crate::interpolator::DecelerateInterpolator;
use crate::measure::{resolve_size_and_state, MeasureSpec, Measured};
use crate::paint::{Paint, Typeface};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::cell::Cell;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for ring instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Angle the progress arc starts at: 12 o'clock.
pub const START_ANGLE: f32 = 270.0;
/// Degrees of sweep per displayed percent.
pub const DEGREES_PER_PERCENT: f64 = 3.6;

const FPS: u32 = 60;
const DEFAULT_CYCLE_DURATION: Duration = Duration::from_millis(5);
const DECELERATE_FACTOR: f32 = 5.0;
const DEFAULT_TRACK_COLOR: &str = "#888888";
const DEFAULT_ARC_COLOR: &str = "#00FF00";
const DEFAULT_STROKE_WIDTH: f32 = 24.0;
const DEFAULT_TEXT_SIZE: i32 = 24;
const DEFAULT_SIZE: i32 = 160;

/// Configuration options for a progress ring.
///
/// Options are applied in order, so a later option wins over an earlier one.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progress_ring::ring::{new, with_progress, with_size, with_track_color};
///
/// let ring = new(&[
///     with_progress(40),
///     with_size(200, 200),
///     with_track_color("#333333".to_string()),
/// ]);
/// assert_eq!(ring.size(), (200, 200));
/// ```
#[derive(Debug, Clone)]
pub enum RingOption {
    /// Target percentage; also the number of animation repeats.
    WithProgress(i32),
    /// Colour of the background track.
    WithTrackColor(String),
    /// Colour of the progress arc. Also the label colour unless
    /// [`RingOption::WithTextColor`] is given.
    WithArcColor(String),
    /// Colour of the percentage label.
    WithTextColor(String),
    /// Stroke width of the background track.
    WithTrackStrokeWidth(f32),
    /// Stroke width of the progress arc.
    WithArcStrokeWidth(f32),
    /// Label size before density scaling.
    WithTextSize(i32),
    /// Label typeface.
    WithTypeface(Typeface),
    /// Display density multiplier for the label size.
    WithDensity(f32),
    /// Length of one animation cycle.
    WithCycleDuration(Duration),
    /// Animation frames per second.
    WithFps(u32),
    /// Laid out width and height.
    WithSize(i32, i32),
    /// Padding around the content area.
    WithPadding(Padding),
    /// Suggested minimum width and height.
    WithMinSize(i32, i32),
    /// Layout units per terminal cell, used by [`Model::view`].
    WithCellSize(f32, f32),
    /// Glyphs for the arc and the track in terminal output.
    WithFillCharacters(char, char),
    /// Caching policy for the ring bounds.
    WithBoundsPolicy(BoundsPolicy),
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithProgress(progress) => {
                m.progress = *progress;
                m.repeat_target = *progress;
            }
            RingOption::WithTrackColor(color) => m.track_color = color.clone(),
            RingOption::WithArcColor(color) => m.arc_color = color.clone(),
            RingOption::WithTextColor(color) => m.text_color = Some(color.clone()),
            RingOption::WithTrackStrokeWidth(width) => m.track_stroke_width = *width,
            RingOption::WithArcStrokeWidth(width) => m.arc_stroke_width = *width,
            RingOption::WithTextSize(size) => m.text_size = *size,
            RingOption::WithTypeface(face) => m.typeface = Some(face.clone()),
            RingOption::WithDensity(density) => m.density = *density,
            RingOption::WithCycleDuration(duration) => m.cycle_duration = *duration,
            RingOption::WithFps(fps) => m.fps = (*fps).max(1),
            RingOption::WithSize(width, height) => {
                m.width = *width;
                m.height = *height;
            }
            RingOption::WithPadding(padding) => m.padding = *padding,
            RingOption::WithMinSize(width, height) => {
                m.min_width = *width;
                m.min_height = *height;
            }
            RingOption::WithCellSize(width, height) => {
                m.cell_width = *width;
                m.cell_height = *height;
            }
            RingOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            RingOption::WithBoundsPolicy(policy) => m.bounds_policy = *policy,
        }
    }
}

/// Sets the target percentage.
///
/// The value is not range checked. It is also the number of repeats the next
/// [`Model::start_progress`] runs.
///
/// ```rust
/// use bubbletea_progress_ring::ring::{new, with_progress};
///
/// let ring = new(&[with_progress(10)]);
/// assert_eq!(ring.progress(), 10);
/// assert_eq!(ring.displayed_progress(), 0.0);
/// ```
pub fn with_progress(progress: i32) -> RingOption {
    RingOption::WithProgress(progress)
}

/// Sets the background track colour (hex code or ANSI index).
pub fn with_track_color(color: String) -> RingOption {
    RingOption::WithTrackColor(color)
}

/// Sets the progress arc colour, which the label uses too unless
/// [`with_text_color`] is also given.
pub fn with_arc_color(color: String) -> RingOption {
    RingOption::WithArcColor(color)
}

/// Sets the label colour.
pub fn with_text_color(color: String) -> RingOption {
    RingOption::WithTextColor(color)
}

/// Sets the stroke width of the background track.
pub fn with_track_stroke_width(width: f32) -> RingOption {
    RingOption::WithTrackStrokeWidth(width)
}

/// Sets the stroke width of the progress arc.
pub fn with_arc_stroke_width(width: f32) -> RingOption {
    RingOption::WithArcStrokeWidth(width)
}

/// Sets the label size. The label paint uses `size * density`.
pub fn with_text_size(size: i32) -> RingOption {
    RingOption::WithTextSize(size)
}

/// Sets the label typeface.
pub fn with_typeface(face: Typeface) -> RingOption {
    RingOption::WithTypeface(face)
}

/// Sets the display density used to scale the label size.
pub fn with_density(density: f32) -> RingOption {
    RingOption::WithDensity(density)
}

/// Sets the length of one animation cycle. Defaults to 5ms.
///
/// Every cycle ends in one repeat, and every repeat adds one percent to the
/// label, so this controls how fast the label counts up.
///
/// ```rust
/// use bubbletea_progress_ring::ring::{new, with_cycle_duration};
/// use std::time::Duration;
///
/// let ring = new(&[with_cycle_duration(Duration::from_millis(40))]);
/// assert_eq!(ring.cycle_duration(), Duration::from_millis(40));
/// ```
pub fn with_cycle_duration(duration: Duration) -> RingOption {
    RingOption::WithCycleDuration(duration)
}

/// Sets the animation frame rate. Zero is treated as one.
pub fn with_fps(fps: u32) -> RingOption {
    RingOption::WithFps(fps)
}

/// Sets the laid out size in layout units.
pub fn with_size(width: i32, height: i32) -> RingOption {
    RingOption::WithSize(width, height)
}

/// Sets the padding around the content area.
pub fn with_padding(padding: Padding) -> RingOption {
    RingOption::WithPadding(padding)
}

/// Sets the suggested minimum size reported during measurement.
pub fn with_min_size(width: i32, height: i32) -> RingOption {
    RingOption::WithMinSize(width, height)
}

/// Sets how many layout units one terminal cell covers.
pub fn with_cell_size(width: f32, height: f32) -> RingOption {
    RingOption::WithCellSize(width, height)
}

/// Sets the glyphs used for the arc (`full`) and the track (`empty`) when
/// rendering to the terminal.
pub fn with_fill_characters(full: char, empty: char) -> RingOption {
    RingOption::WithFillCharacters(full, empty)
}

/// Sets the caching policy for the ring bounds.
///
/// [`BoundsPolicy::OneShot`] keeps the bounds from the first draw forever,
/// even after resizes or stroke changes.
pub fn with_bounds_policy(policy: BoundsPolicy) -> RingOption {
    RingOption::WithBoundsPolicy(policy)
}

/// Message that drives one animation frame.
///
/// Frames carry the ring's id and the tag of the animation run that
/// scheduled them. Restarting the animation bumps the tag, so frames of a
/// cancelled run are ignored.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

/// Sent once an animation run has used up all of its repeats.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// Id of the ring that finished.
    pub id: i64,
}

/// The progress ring model.
///
/// Style fields are set through options at construction or through setters
/// afterwards. Setters update the prebuilt paints in place and flag the ring
/// for redraw and relayout; see [`Model::needs_redraw`] and
/// [`Model::needs_layout`].
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,

    progress: i32,
    repeat_target: i32,

    track_color: String,
    arc_color: String,
    text_color: Option<String>,
    track_stroke_width: f32,
    arc_stroke_width: f32,
    text_size: i32,
    typeface: Option<Typeface>,
    density: f32,
    full: char,
    empty: char,

    track_paint: Paint,
    arc_paint: Paint,
    text_paint: Paint,

    width: i32,
    height: i32,
    padding: Padding,
    min_width: i32,
    min_height: i32,
    cell_width: f32,
    cell_height: f32,

    bounds_policy: BoundsPolicy,
    bounds: BoundsCache,

    displayed_progress: f32,
    animation: RepeatAnimation,
    cycle_duration: Duration,
    fps: u32,

    needs_redraw: Cell<bool>,
    needs_layout: bool,
    measured: Option<(Measured, Measured)>,
}

/// Creates a new progress ring.
///
/// # Default Configuration
///
/// - **Progress**: 0
/// - **Track colour**: "#888888" (gray)
/// - **Arc and label colour**: "#00FF00" (green)
/// - **Stroke widths**: 24.0
/// - **Label size**: 24 at density 1.0
/// - **Size**: 160 x 160, no padding
/// - **Animation**: 5ms cycles, decelerating, 60 frames per second
pub fn new(opts: &[RingOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        progress: 0,
        repeat_target: 0,
        track_color: DEFAULT_TRACK_COLOR.to_string(),
        arc_color: DEFAULT_ARC_COLOR.to_string(),
        text_color: None,
        track_stroke_width: DEFAULT_STROKE_WIDTH,
        arc_stroke_width: DEFAULT_STROKE_WIDTH,
        text_size: DEFAULT_TEXT_SIZE,
        typeface: None,
        density: 1.0,
        full: '█',
        empty: '░',
        track_paint: Paint::default(),
        arc_paint: Paint::default(),
        text_paint: Paint::default(),
        width: DEFAULT_SIZE,
        height: DEFAULT_SIZE,
        padding: Padding::default(),
        min_width: 0,
        min_height: 0,
        cell_width: DEFAULT_CELL_WIDTH,
        cell_height: DEFAULT_CELL_HEIGHT,
        bounds_policy: BoundsPolicy::default(),
        bounds: BoundsCache::default(),
        displayed_progress: 0.0,
        animation: idle_animation(DEFAULT_CYCLE_DURATION, 0),
        cycle_duration: DEFAULT_CYCLE_DURATION,
        fps: FPS,
        needs_redraw: Cell::new(true),
        needs_layout: true,
        measured: None,
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m.rebuild_paints();
    m
}

fn idle_animation(cycle_duration: Duration, repeat_target: i32) -> RepeatAnimation {
    RepeatAnimation::new(
        cycle_duration,
        RepeatCount::from(repeat_target),
        Box::new(DecelerateInterpolator::new(DECELERATE_FACTOR)),
    )
}

impl Model {
    /// Unique id of this ring, matching the id in its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The target percentage.
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Sets the target percentage and the repeat count of the next run.
    ///
    /// A run already in flight keeps the repeat count it started with.
    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress;
        self.repeat_target = progress;
        self.invalidate();
        self.request_layout();
    }

    /// Background track colour.
    pub fn track_color(&self) -> &str {
        &self.track_color
    }

    /// Sets the background track colour.
    pub fn set_track_color(&mut self, color: impl Into<String>) {
        self.track_color = color.into();
        self.track_paint.color = self.track_color.clone();
        self.invalidate();
        self.request_layout();
    }

    /// Progress arc colour.
    pub fn arc_color(&self) -> &str {
        &self.arc_color
    }

    /// Sets the progress arc colour. The label keeps its colour.
    pub fn set_arc_color(&mut self, color: impl Into<String>) {
        self.arc_color = color.into();
        self.arc_paint.color = self.arc_color.clone();
        self.invalidate();
        self.request_layout();
    }

    /// Label colour.
    pub fn text_color(&self) -> &str {
        &self.text_paint.color
    }

    /// Sets the label colour.
    pub fn set_text_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.text_paint.color = color.clone();
        self.text_color = Some(color);
        self.invalidate();
    }

    /// Background track stroke width.
    pub fn track_stroke_width(&self) -> f32 {
        self.track_stroke_width
    }

    /// Sets the background track stroke width.
    ///
    /// Under [`BoundsPolicy::OneShot`] bounds computed earlier are kept, so the
    /// stroke and its oval can disagree.
    pub fn set_track_stroke_width(&mut self, width: f32) {
        self.track_stroke_width = width;
        self.track_paint.stroke_width = width;
        self.invalidate();
        self.request_layout();
    }

    /// Progress arc stroke width.
    pub fn arc_stroke_width(&self) -> f32 {
        self.arc_stroke_width
    }

    /// Sets the progress arc stroke width. See
    /// [`set_track_stroke_width`](Self::set_track_stroke_width) about bounds.
    pub fn set_arc_stroke_width(&mut self, width: f32) {
        self.arc_stroke_width = width;
        self.arc_paint.stroke_width = width;
        self.invalidate();
        self.request_layout();
    }

    /// Label size before density scaling.
    pub fn text_size(&self) -> i32 {
        self.text_size
    }

    /// Display density.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// The stored typeface.
    pub fn typeface(&self) -> Option<&Typeface> {
        self.typeface.as_ref()
    }

    /// Stores a typeface for the label.
    ///
    /// The label paint only picks it up on the next
    /// [`rebuild_paints`](Self::rebuild_paints).
    pub fn set_typeface(&mut self, face: Typeface) {
        self.typeface = Some(face);
    }

    /// Rebuilds all three paints from the current style fields.
    pub fn rebuild_paints(&mut self) {
        self.track_paint =
            Paint::round_stroke(self.track_color.clone(), self.track_stroke_width, self.empty);
        self.arc_paint =
            Paint::round_stroke(self.arc_color.clone(), self.arc_stroke_width, self.full);

        let text_color = self
            .text_color
            .clone()
            .unwrap_or_else(|| self.arc_color.clone());
        let mut text_paint =
            Paint::centered_text(text_color, self.text_size as f32 * self.density);
        text_paint.typeface = self.typeface.clone();
        self.text_paint = text_paint;

        self.invalidate();
    }

    /// Paint of the background track.
    pub fn track_paint(&self) -> &Paint {
        &self.track_paint
    }

    /// Paint of the progress arc.
    pub fn arc_paint(&self) -> &Paint {
        &self.arc_paint
    }

    /// Paint of the label.
    pub fn text_paint(&self) -> &Paint {
        &self.text_paint
    }

    /// Laid out width and height.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Assigns the laid out size.
    pub fn set_size(&mut self, width: i32, height: i32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.invalidate();
        }
    }

    /// Padding around the content area.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Sets the padding.
    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.invalidate();
        self.request_layout();
    }

    /// Sets the suggested minimum size.
    pub fn set_min_size(&mut self, width: i32, height: i32) {
        self.min_width = width;
        self.min_height = height;
        self.request_layout();
    }

    /// Resolves the ring's size against its parent's constraints.
    ///
    /// Width asks for the horizontal padding plus the suggested minimum width.
    /// Height asks for the vertical padding only; the minimum height is not
    /// consulted.
    pub fn measure(
        &mut self,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> (Measured, Measured) {
        let desired_width = self.padding.horizontal() + self.min_width;
        let desired_height = self.padding.vertical();

        let measured = (
            resolve_size_and_state(desired_width, width_spec),
            resolve_size_and_state(desired_height, height_spec),
        );
        self.measured = Some(measured);
        self.needs_layout = false;
        measured
    }

    /// Result of the last [`measure`](Self::measure).
    pub fn measured(&self) -> Option<(Measured, Measured)> {
        self.measured
    }

    /// The track and arc ovals for the current layout.
    pub fn bounds(&self) -> RingBounds {
        self.bounds_for(self.width, self.height)
    }

    /// Drops cached bounds so the next draw recomputes them, including under
    /// [`BoundsPolicy::OneShot`].
    pub fn reset_bounds(&mut self) {
        self.bounds.clear();
        self.invalidate();
    }

    fn bounds_for(&self, width: i32, height: i32) -> RingBounds {
        let key = BoundsKey {
            width,
            height,
            padding: self.padding,
            track_stroke_width: self.track_stroke_width,
            arc_stroke_width: self.arc_stroke_width,
        };
        self.bounds.resolve(key, self.bounds_policy)
    }

    /// The percentage currently shown. Only animation repeats change it; it
    /// is neither reset between runs nor capped at [`progress`](Self::progress).
    pub fn displayed_progress(&self) -> f32 {
        self.displayed_progress
    }

    /// Sweep of the progress arc: 3.6 degrees per displayed percent.
    ///
    /// ```rust
    /// use bubbletea_progress_ring::ring::new;
    ///
    /// assert_eq!(new(&[]).sweep_angle(), 0.0);
    /// ```
    pub fn sweep_angle(&self) -> f32 {
        (DEGREES_PER_PERCENT * self.displayed_progress as f64) as f32
    }

    /// The label text, e.g. `"37%"`.
    pub fn label(&self) -> String {
        format!("{:.0}%", self.displayed_progress)
    }

    /// Draws the track, the progress arc and the label onto `canvas`.
    ///
    /// The ovals and the label are both laid out on the canvas size. The label
    /// is centred on the whole canvas, ignoring padding, with its visual
    /// centre rather than its baseline on the vertical middle.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let bounds = self.bounds_for(canvas.width() as i32, canvas.height() as i32);

        canvas.draw_arc(bounds.track, 0.0, 360.0, false, &self.track_paint);
        canvas.draw_arc(bounds.arc, START_ANGLE, self.sweep_angle(), false, &self.arc_paint);

        let metrics = canvas.font_metrics(&self.text_paint);
        let x = canvas.width() / 2.0;
        let y = canvas.height() / 2.0 - (metrics.descent + metrics.ascent) / 2.0;
        canvas.draw_text(&self.label(), x, y, &self.text_paint);

        self.needs_redraw.set(false);
    }

    /// Cancels any running animation and starts a new run.
    ///
    /// The run repeats as many times as the current progress. The displayed
    /// percentage carries over from before the call. Returns the command for
    /// the first frame.
    pub fn start_progress(&mut self) -> Cmd {
        if self.animation.is_running() {
            log::debug!(
                "ring {}: cancelling run {} after {} repeats",
                self.id,
                self.tag,
                self.animation.repeats_fired()
            );
        }
        self.animation.cancel();
        self.tag += 1;
        self.invalidate();

        self.animation = idle_animation(self.cycle_duration, self.repeat_target);
        self.animation.start();
        log::debug!(
            "ring {}: starting run {} with {:?} repeats of {:?}",
            self.id,
            self.tag,
            self.animation.repeat_count(),
            self.cycle_duration
        );

        self.next_frame()
    }

    /// Handles animation frames. Other messages are ignored.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        let frame_msg = msg.downcast_ref::<FrameMsg>()?;
        if frame_msg.id != self.id || frame_msg.tag != self.tag {
            return None;
        }

        let outcome = self.animation.advance(self.frame_interval())?;
        if outcome.repeated {
            self.displayed_progress += 1.0;
            log::trace!(
                "ring {}: repeat {} -> {}",
                self.id,
                self.animation.repeats_fired(),
                self.label()
            );
        }
        self.invalidate();

        if outcome.finished {
            log::debug!("ring {}: run {} finished at {}", self.id, self.tag, self.label());
            return Some(self.finished());
        }
        Some(self.next_frame())
    }

    /// True while an animation run is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Idle or animating.
    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Interpolated fraction of the current animation cycle.
    pub fn animation_fraction(&self) -> f32 {
        self.animation.fraction()
    }

    /// Length of one animation cycle.
    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    /// Sets the cycle length used by the next run.
    pub fn set_cycle_duration(&mut self, duration: Duration) {
        self.cycle_duration = duration;
    }

    /// Animation frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// True when something changed since the last [`render`](Self::render).
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw.get()
    }

    /// True when something changed since the last [`measure`](Self::measure).
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Renders the ring into terminal cells.
    pub fn view(&self) -> String {
        let mut canvas = CellCanvas::new(
            self.width as f32,
            self.height as f32,
            self.cell_width,
            self.cell_height,
        );
        self.render(&mut canvas);
        canvas.render()
    }

    fn invalidate(&self) {
        self.needs_redraw.set(true);
    }

    fn request_layout(&mut self) {
        self.needs_layout = true;
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps as u64)
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(self.frame_interval(), move |_| {
            Box::new(FrameMsg { id, tag }) as Msg
        })
    }

    fn finished(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let model = new(&[]);
        (model, std::option::Option::None)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::geometry::RectF;
    use crate::measure::MeasureSpec;
    use crate::paint::{StrokeCap, TextAlign};

    fn frame(ring: &Model) -> FrameMsg {
        FrameMsg {
            id: ring.id,
            tag: ring.tag,
        }
    }

    fn run_to_end(ring: &mut Model) {
        let mut frames = 0;
        while ring.is_animating() {
            let msg = frame(ring);
            std::mem::drop(ring.update(Box::new(msg)));
            frames += 1;
            assert!(frames < 100_000, "animation never finished");
        }
    }

    fn recorded(ring: &Model, width: f32, height: f32) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(width, height);
        ring.render(&mut canvas);
        canvas
    }

    #[test]
    fn test_new_with_no_options() {
        let ring = new(&[]);
        assert_eq!(ring.progress(), 0);
        assert_eq!(ring.track_color(), DEFAULT_TRACK_COLOR);
        assert_eq!(ring.arc_color(), DEFAULT_ARC_COLOR);
        assert_eq!(ring.text_color(), DEFAULT_ARC_COLOR);
        assert_eq!(ring.track_stroke_width(), 24.0);
        assert_eq!(ring.arc_stroke_width(), 24.0);
        assert_eq!(ring.text_size(), 24);
        assert_eq!(ring.displayed_progress(), 0.0);
        assert_eq!(ring.cycle_duration(), Duration::from_millis(5));
        assert_eq!(ring.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_progress_option_sets_repeat_target() {
        for p in [-5, 0, 10, 100, 250] {
            let ring = new(&[with_progress(p)]);
            assert_eq!(ring.progress(), p);
            assert_eq!(ring.repeat_target, p);
            assert_eq!(ring.displayed_progress(), 0.0);
        }
    }

    #[test]
    fn test_set_progress_round_trip() {
        let mut ring = new(&[]);
        for p in [0, 1, 42, 100, -3, 1000] {
            ring.set_progress(p);
            assert_eq!(ring.progress(), p);
            assert_eq!(ring.repeat_target, p);
        }
    }

    #[test]
    fn test_setters_invalidate_and_request_layout() {
        let mut ring = new(&[]);
        ring.render(&mut RecordingCanvas::new(160.0, 160.0));
        ring.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert!(!ring.needs_redraw());
        assert!(!ring.needs_layout());

        ring.set_track_color("#111111");
        assert!(ring.needs_redraw());
        assert!(ring.needs_layout());
        assert_eq!(ring.track_paint().color, "#111111");

        ring.render(&mut RecordingCanvas::new(160.0, 160.0));
        ring.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        ring.set_arc_stroke_width(6.0);
        assert!(ring.needs_redraw());
        assert!(ring.needs_layout());
        assert_eq!(ring.arc_paint().stroke_width, 6.0);
    }

    #[test]
    fn test_arc_color_is_default_text_color() {
        let ring = new(&[with_arc_color("#ff00ff".to_string())]);
        assert_eq!(ring.text_paint().color, "#ff00ff");

        let ring = new(&[
            with_arc_color("#ff00ff".to_string()),
            with_text_color("#ffffff".to_string()),
        ]);
        assert_eq!(ring.arc_paint().color, "#ff00ff");
        assert_eq!(ring.text_paint().color, "#ffffff");
    }

    #[test]
    fn test_set_arc_color_keeps_label_color() {
        let mut ring = new(&[]);
        ring.set_arc_color("#0000ff");
        assert_eq!(ring.arc_paint().color, "#0000ff");
        assert_eq!(ring.text_color(), DEFAULT_ARC_COLOR);
    }

    #[test]
    fn test_paints_are_round_strokes() {
        let ring = new(&[with_fill_characters('#', '.')]);
        assert_eq!(ring.track_paint().stroke_cap, StrokeCap::Round);
        assert!(ring.arc_paint().anti_alias);
        assert_eq!(ring.arc_paint().glyph, '#');
        assert_eq!(ring.track_paint().glyph, '.');
        assert_eq!(ring.text_paint().text_align, TextAlign::Center);
    }

    #[test]
    fn test_text_size_scaled_by_density() {
        let ring = new(&[with_text_size(20), with_density(2.5)]);
        assert_eq!(ring.text_paint().text_size, 50.0);
    }

    #[test]
    fn test_typeface_applies_on_rebuild_only() {
        let mut ring = new(&[]);
        ring.set_typeface(Typeface::new("Iosevka"));
        assert_eq!(ring.typeface().map(|f| f.family.as_str()), Some("Iosevka"));
        assert!(ring.text_paint().typeface.is_none());

        ring.rebuild_paints();
        assert_eq!(
            ring.text_paint().typeface.as_ref().map(|f| f.family.as_str()),
            Some("Iosevka")
        );
    }

    #[test]
    fn test_typeface_option_applies_at_construction() {
        let ring = new(&[with_typeface(Typeface::new("Hack").bold())]);
        assert!(ring.text_paint().typeface.as_ref().is_some_and(|f| f.bold));
    }

    #[test]
    fn test_measure_width_uses_min_width_height_ignores_min_height() {
        let mut ring = new(&[
            with_padding(Padding::new(4, 6, 8, 10)),
            with_min_size(100, 100),
        ]);
        let (w, h) = ring.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(w.size, 112);
        assert_eq!(h.size, 16);
        assert_eq!(ring.measured(), Some((w, h)));
    }

    #[test]
    fn test_measure_respects_constraints() {
        let mut ring = new(&[with_min_size(300, 0)]);
        let (w, h) = ring.measure(MeasureSpec::AtMost(200), MeasureSpec::Exactly(150));
        assert_eq!(w.size, 200);
        assert!(w.too_small);
        assert_eq!(h.size, 150);
        assert!(!h.too_small);
    }

    #[test]
    fn test_bounds_for_200_square() {
        let ring = new(&[with_size(200, 200), with_track_stroke_width(24.0)]);
        let bounds = ring.bounds();
        assert_eq!(bounds.track, RectF::new(24.0, 24.0, 176.0, 176.0));
    }

    #[test]
    fn test_bounds_follow_resize_and_stroke_changes() {
        let mut ring = new(&[with_size(200, 200)]);
        ring.render(&mut RecordingCanvas::new(200.0, 200.0));

        ring.set_size(300, 300);
        assert_eq!(ring.bounds().track, RectF::new(24.0, 24.0, 276.0, 276.0));

        ring.set_arc_stroke_width(10.0);
        assert_eq!(ring.bounds().arc, RectF::new(10.0, 10.0, 290.0, 290.0));
    }

    #[test]
    fn test_one_shot_bounds_go_stale() {
        let mut ring = new(&[
            with_size(200, 200),
            with_bounds_policy(BoundsPolicy::OneShot),
        ]);
        ring.render(&mut RecordingCanvas::new(200.0, 200.0));

        ring.set_size(300, 300);
        ring.set_track_stroke_width(4.0);
        assert_eq!(ring.bounds().track, RectF::new(24.0, 24.0, 176.0, 176.0));
    }

    #[test]
    fn test_sweep_angle_is_exact() {
        let mut ring = new(&[]);
        for (d, expected) in [(0.0, 0.0), (37.0, 133.2), (50.0, 180.0), (100.0, 360.0)] {
            ring.displayed_progress = d;
            assert_eq!(ring.sweep_angle(), expected);
        }
    }

    #[test]
    fn test_label_text() {
        let mut ring = new(&[]);
        assert_eq!(ring.label(), "0%");
        ring.displayed_progress = 37.0;
        assert_eq!(ring.label(), "37%");
    }

    #[test]
    fn test_render_draws_track_arc_and_label() {
        let mut ring = new(&[with_size(200, 200)]);
        ring.displayed_progress = 25.0;
        let canvas = recorded(&ring, 200.0, 200.0);
        let ops = canvas.ops();
        assert_eq!(ops.len(), 3);

        match &ops[0] {
            DrawOp::Arc {
                oval,
                start_angle,
                sweep_angle,
                use_center,
                paint,
            } => {
                assert_eq!(*oval, RectF::new(24.0, 24.0, 176.0, 176.0));
                assert_eq!(*start_angle, 0.0);
                assert_eq!(*sweep_angle, 360.0);
                assert!(!use_center);
                assert_eq!(paint.color, DEFAULT_TRACK_COLOR);
            }
            other => panic!("expected track arc, got {other:?}"),
        }

        match &ops[1] {
            DrawOp::Arc {
                start_angle,
                sweep_angle,
                paint,
                ..
            } => {
                assert_eq!(*start_angle, START_ANGLE);
                assert_eq!(*sweep_angle, 90.0);
                assert_eq!(paint.color, DEFAULT_ARC_COLOR);
            }
            other => panic!("expected progress arc, got {other:?}"),
        }

        match &ops[2] {
            DrawOp::Text { text, x, y, paint } => {
                assert_eq!(text, "25%");
                assert_eq!(*x, 100.0);
                let metrics = canvas.font_metrics(paint);
                let visual_center = y + metrics.center_offset();
                assert!((visual_center - 100.0).abs() < 1e-3);
            }
            other => panic!("expected label, got {other:?}"),
        }
    }

    #[test]
    fn test_render_lays_out_on_canvas_size() {
        let ring = new(&[]);
        let canvas = recorded(&ring, 400.0, 400.0);

        let ovals: Vec<RectF> = canvas
            .arcs()
            .filter_map(|op| match op {
                DrawOp::Arc { oval, .. } => Some(*oval),
                _ => None,
            })
            .collect();
        assert_eq!(ovals.len(), 2);

        let label = canvas.texts().find_map(|op| match op {
            DrawOp::Text { x, y, paint, .. } => Some((*x, *y, paint.clone())),
            _ => None,
        });
        let (x, y, paint) = label.expect("label drawn");
        let visual_center = y + canvas.font_metrics(&paint).center_offset();

        for oval in ovals {
            assert_eq!(oval, RectF::new(24.0, 24.0, 376.0, 376.0));
            assert_eq!(oval.center_x(), x);
            assert!((oval.center_y() - visual_center).abs() < 1e-3);
        }
    }

    #[test]
    fn test_reset_bounds_refreshes_one_shot_cache() {
        let mut ring = new(&[
            with_size(200, 200),
            with_bounds_policy(BoundsPolicy::OneShot),
        ]);
        ring.render(&mut RecordingCanvas::new(200.0, 200.0));
        ring.set_size(300, 300);
        assert_eq!(ring.bounds().track, RectF::new(24.0, 24.0, 176.0, 176.0));

        ring.reset_bounds();
        assert!(ring.needs_redraw());
        assert_eq!(ring.bounds().track, RectF::new(24.0, 24.0, 276.0, 276.0));
    }

    #[test]
    fn test_label_centered_on_full_canvas_not_padding() {
        let ring = new(&[with_size(200, 100), with_padding(Padding::new(50, 0, 0, 0))]);
        let canvas = recorded(&ring, 200.0, 100.0);
        let label_x = canvas.texts().find_map(|op| match op {
            DrawOp::Text { x, .. } => Some(*x),
            _ => None,
        });
        assert_eq!(label_x, Some(100.0));
    }

    #[test]
    fn test_start_progress_runs_to_target() {
        let mut ring = new(&[with_progress(10)]);
        std::mem::drop(ring.start_progress());
        assert!(ring.is_animating());

        run_to_end(&mut ring);
        assert_eq!(ring.displayed_progress(), 10.0);
        assert_eq!(ring.label(), "10%");
        assert_eq!(ring.animation_state(), AnimationState::Idle);
    }

    #[test]
    fn test_restart_continues_from_displayed_value() {
        let mut ring = new(&[with_progress(5)]);
        std::mem::drop(ring.start_progress());
        run_to_end(&mut ring);
        assert_eq!(ring.displayed_progress(), 5.0);

        std::mem::drop(ring.start_progress());
        run_to_end(&mut ring);
        assert_eq!(ring.displayed_progress(), 10.0);
    }

    #[test]
    fn test_restart_cancels_previous_run() {
        let mut ring = new(&[with_progress(50)]);
        std::mem::drop(ring.start_progress());
        let stale = frame(&ring);
        for _ in 0..4 {
            let msg = frame(&ring);
            std::mem::drop(ring.update(Box::new(msg)));
        }
        let shown = ring.displayed_progress();
        assert_eq!(shown, 2.0);

        std::mem::drop(ring.start_progress());
        assert!(ring.update(Box::new(stale)).is_none());
        assert_eq!(ring.displayed_progress(), shown);
    }

    #[test]
    fn test_set_progress_does_not_change_running_animation() {
        let mut ring = new(&[with_progress(3)]);
        std::mem::drop(ring.start_progress());
        ring.set_progress(20);
        run_to_end(&mut ring);
        assert_eq!(ring.displayed_progress(), 3.0);
        assert_eq!(ring.progress(), 20);
    }

    #[test]
    fn test_update_rejects_foreign_frames() {
        let mut ring = new(&[with_progress(3)]);
        std::mem::drop(ring.start_progress());

        let wrong_id = FrameMsg {
            id: ring.id + 999,
            tag: ring.tag,
        };
        assert!(ring.update(Box::new(wrong_id)).is_none());

        let wrong_tag = FrameMsg {
            id: ring.id,
            tag: ring.tag + 999,
        };
        assert!(ring.update(Box::new(wrong_tag)).is_none());

        assert!(ring.update(Box::new("not a frame")).is_none());
    }

    #[test]
    fn test_update_when_idle_returns_none() {
        let mut ring = new(&[]);
        let msg = frame(&ring);
        assert!(ring.update(Box::new(msg)).is_none());
    }

    #[test]
    fn test_frames_schedule_next_frame_until_finished() {
        let mut ring = new(&[with_progress(1)]);
        std::mem::drop(ring.start_progress());
        let msg = frame(&ring);
        assert!(ring.update(Box::new(msg)).is_some());
        assert!(ring.is_animating());
    }

    #[tokio::test]
    async fn test_last_frame_emits_finished_msg() {
        let mut ring = new(&[with_progress(1)]);
        std::mem::drop(ring.start_progress());

        let mut last = None;
        let mut frames = 0;
        while ring.is_animating() {
            let msg = frame(&ring);
            last = ring.update(Box::new(msg));
            frames += 1;
            assert!(frames < 100, "animation never finished");
        }
        assert_eq!(ring.displayed_progress(), 1.0);

        let cmd = last.expect("final frame returns a command");
        let msg = cmd.await.expect("command yields a message");
        let finished = msg
            .downcast_ref::<FinishedMsg>()
            .expect("final command yields FinishedMsg");
        assert_eq!(finished.id, ring.id());

        let late = frame(&ring);
        assert!(ring.update(Box::new(late)).is_none());
        assert_eq!(ring.displayed_progress(), 1.0);
    }

    #[test]
    fn test_displayed_progress_not_capped_by_target() {
        let mut ring = new(&[with_progress(4)]);
        std::mem::drop(ring.start_progress());
        run_to_end(&mut ring);
        ring.set_progress(2);
        std::mem::drop(ring.start_progress());
        run_to_end(&mut ring);
        assert_eq!(ring.displayed_progress(), 6.0);
        assert!(ring.displayed_progress() > ring.progress() as f32);
    }

    #[test]
    fn test_view_shows_label_and_ring() {
        let mut ring = new(&[with_size(160, 168)]);
        ring.displayed_progress = 25.0;
        let view = ring.view();
        let plain = lipgloss_extras::lipgloss::strip_ansi(&view);
        assert_eq!(plain.lines().count(), 11);
        assert!(plain.contains("25%"));
        assert!(plain.contains('░'));
        assert!(plain.contains('█'));
    }

    #[test]
    fn test_unique_ids() {
        let a = new(&[]);
        let b = new(&[]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_default_implementation() {
        let ring = Model::default();
        assert_eq!(ring.progress(), 0);
        assert_eq!(ring.size(), (DEFAULT_SIZE, DEFAULT_SIZE));
    }
}
