//! Layout geometry for the progress ring.
//!
//! The ring is two concentric ovals: the full-circle track and the progress arc.
//! Each oval is the widget's padded content area inset by its own stroke width.
//! Coordinates are truncated toward zero, matching the integer pixel grid the
//! widget is laid out on.

use std::cell::Cell;

/// A floating point rectangle given by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RectF {
    /// Creates a rectangle from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent. Negative when the rectangle is inverted.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent. Negative when the rectangle is inverted.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle has no positive area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical centre.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Padding around the widget's content area, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    /// Left padding.
    pub left: i32,
    /// Top padding.
    pub top: i32,
    /// Right padding.
    pub right: i32,
    /// Bottom padding.
    pub bottom: i32,
}

impl Padding {
    /// Creates padding from its four sides.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on every side.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Everything the ring bounds depend on. A change to any field makes cached
/// bounds stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsKey {
    /// Widget width.
    pub width: i32,
    /// Widget height.
    pub height: i32,
    /// Widget padding.
    pub padding: Padding,
    /// Stroke width of the background track.
    pub track_stroke_width: f32,
    /// Stroke width of the progress arc.
    pub arc_stroke_width: f32,
}

/// The two ovals the ring draws into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingBounds {
    /// Oval of the full background track.
    pub track: RectF,
    /// Oval of the progress arc.
    pub arc: RectF,
}

impl RingBounds {
    /// Computes both ovals for the given layout.
    pub fn compute(key: &BoundsKey) -> Self {
        Self {
            track: inset_content(key.width, key.height, key.padding, key.track_stroke_width),
            arc: inset_content(key.width, key.height, key.padding, key.arc_stroke_width),
        }
    }
}

/// Insets the padded content area of a `width` x `height` widget by `stroke` on
/// every side.
///
/// A stroke wider than half the content yields an inverted rectangle; callers
/// draw it as-is.
pub fn inset_content(width: i32, height: i32, padding: Padding, stroke: f32) -> RectF {
    let left = (padding.left as f32 + stroke).trunc();
    let top = (padding.top as f32 + stroke).trunc();
    let right = (width as f32 - stroke - padding.right as f32).trunc();
    let bottom = (height as f32 - stroke - padding.bottom as f32).trunc();
    RectF::new(left, top, right, bottom)
}

/// How long computed bounds stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Recompute whenever the [`BoundsKey`] changes.
    #[default]
    Tracked,
    /// Compute once on the first draw with a nonzero size and keep those
    /// bounds for the rest of the widget's life, even across resizes and
    /// stroke width changes.
    OneShot,
}

/// Lazily computed ring bounds.
///
/// Interior mutability lets rendering (`&self`) fill the cache.
#[derive(Debug, Clone, Default)]
pub struct BoundsCache {
    cached: Cell<Option<(BoundsKey, RingBounds)>>,
}

impl BoundsCache {
    /// Returns bounds for `key`, computing and caching them as `policy` allows.
    pub fn resolve(&self, key: BoundsKey, policy: BoundsPolicy) -> RingBounds {
        match (policy, self.cached.get()) {
            (BoundsPolicy::OneShot, Some((_, bounds))) => bounds,
            (BoundsPolicy::Tracked, Some((cached_key, bounds))) if cached_key == key => bounds,
            _ => {
                let bounds = RingBounds::compute(&key);
                if key.width > 0 && key.height > 0 {
                    log::debug!(
                        "ring bounds computed for {}x{}: track={:?} arc={:?}",
                        key.width,
                        key.height,
                        bounds.track,
                        bounds.arc
                    );
                    self.cached.set(Some((key, bounds)));
                }
                bounds
            }
        }
    }

    /// The cached bounds, if any have been computed.
    pub fn cached(&self) -> Option<RingBounds> {
        self.cached.get().map(|(_, bounds)| bounds)
    }

    /// Drops the cached bounds.
    pub fn clear(&self) {
        self.cached.set(None);
    }
}
