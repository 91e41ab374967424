#![warn(missing_docs)]

//! # bubbletea-progress-ring
//!
//! An animated circular progress indicator for terminal applications built
//! with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The ring draws a full background track, a progress arc that starts at 12
//! o'clock and sweeps clockwise, and a centred percentage label. Like every
//! bubbletea component it follows the Elm Architecture: build it with
//! [`ring::new`], feed it messages through `update()` and print `view()`.
//!
//! Drawing goes through the small [`Canvas`] trait, so the same model can
//! render to terminal cells ([`CellCanvas`]) or be replayed onto any other
//! surface ([`RecordingCanvas`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_progress_ring::prelude::*;
//!
//! let mut ring = ring_new(&[with_progress(42), with_size(160, 160)]);
//! let _first_frame = ring.start_progress();
//!
//! let view = ring.view();
//! assert_eq!(view.lines().count(), 10);
//! ```
//!
//! ## Animation
//!
//! [`ring::Model::start_progress`] runs a repeating, decelerating animation
//! with as many repeats as the configured progress. Each repeat adds one to
//! the displayed percentage, so a ring configured with `with_progress(10)`
//! counts its label from its current value up by ten. Restarting cancels the
//! run in flight; its pending frames are ignored.
//!
//! ## Configuration
//!
//! Options follow the builder pattern used across the bubbletea widgets
//! (`with_progress`, `with_arc_color`, ...). Configuration read from files can
//! go through [`attrs::StyleAttributes`], which validates colours first.

pub mod animation;
pub mod attrs;
pub mod canvas;
pub mod cell_canvas;
pub mod error;
pub mod geometry;
pub mod interpolator;
pub mod measure;
pub mod paint;
pub mod ring;

pub use animation::{AnimationState, RepeatAnimation, RepeatCount};
pub use attrs::StyleAttributes;
pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use cell_canvas::CellCanvas;
pub use error::{Error, Result};
pub use geometry::{BoundsPolicy, Padding, RectF, RingBounds};
pub use measure::{MeasureSpec, Measured};
pub use paint::{FontMetrics, Paint, Typeface};
pub use ring::{FinishedMsg, FrameMsg, Model as ProgressRing, RingOption};

/// Everything needed to build and drive a ring.
pub mod prelude {
    pub use crate::attrs::StyleAttributes;
    pub use crate::canvas::{Canvas, RecordingCanvas};
    pub use crate::cell_canvas::CellCanvas;
    pub use crate::geometry::{BoundsPolicy, Padding};
    pub use crate::measure::MeasureSpec;
    pub use crate::paint::Typeface;
    pub use crate::ring::{
        new as ring_new, with_arc_color, with_arc_stroke_width, with_bounds_policy,
        with_cell_size, with_cycle_duration, with_density, with_fill_characters, with_fps,
        with_min_size, with_padding, with_progress, with_size, with_text_color, with_text_size,
        with_track_color, with_track_stroke_width, with_typeface, FinishedMsg, FrameMsg,
        Model as ProgressRing, RingOption,
    };
}
