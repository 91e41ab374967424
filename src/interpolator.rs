//! Time curves for animations.
//!
//! An interpolator remaps the linear progress of one animation cycle, a
//! fraction in `0.0..=1.0`, onto an eased fraction.

use std::fmt::Debug;

/// Maps a linear cycle fraction to an eased one.
pub trait Interpolator: Debug + Send + Sync {
    /// Eased value for `input` in `0.0..=1.0`.
    fn interpolate(&self, input: f32) -> f32;

    /// Clones the interpolator behind a box.
    fn clone_box(&self) -> Box<dyn Interpolator>;
}

impl Clone for Box<dyn Interpolator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// No easing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolator;

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, input: f32) -> f32 {
        input
    }

    fn clone_box(&self) -> Box<dyn Interpolator> {
        Box::new(*self)
    }
}

/// Starts fast and slows down towards the end of the cycle.
///
/// Computes `1 - (1 - t)^(2 * factor)`. Larger factors decelerate harder.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progress_ring::interpolator::{DecelerateInterpolator, Interpolator};
///
/// let curve = DecelerateInterpolator::new(1.0);
/// assert_eq!(curve.interpolate(0.5), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecelerateInterpolator {
    factor: f32,
}

impl DecelerateInterpolator {
    /// Creates a curve with the given deceleration factor.
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    /// The deceleration factor.
    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl Default for DecelerateInterpolator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Interpolator for DecelerateInterpolator {
    fn interpolate(&self, input: f32) -> f32 {
        if self.factor == 1.0 {
            1.0 - (1.0 - input) * (1.0 - input)
        } else {
            1.0 - (1.0 - input).powf(2.0 * self.factor)
        }
    }

    fn clone_box(&self) -> Box<dyn Interpolator> {
        Box::new(*self)
    }
}
