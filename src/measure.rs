//! Size negotiation between a parent layout and the ring.
//!
//! A parent hands each dimension a [`MeasureSpec`]; the ring states the size it
//! would like and [`resolve_size_and_state`] reconciles the two.

/// A parent's constraint on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The parent imposes no constraint.
    Unspecified,
    /// The child must be exactly this size.
    Exactly(i32),
    /// The child may be as large as it wants up to this size.
    AtMost(i32),
}

/// A resolved dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measured {
    /// The resolved size.
    pub size: i32,
    /// Set when the desired size did not fit an [`MeasureSpec::AtMost`] limit.
    pub too_small: bool,
}

impl Measured {
    fn fits(size: i32) -> Self {
        Self {
            size,
            too_small: false,
        }
    }
}

/// Reconciles a desired size with the parent's constraint.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progress_ring::measure::{resolve_size_and_state, MeasureSpec};
///
/// assert_eq!(resolve_size_and_state(50, MeasureSpec::Exactly(200)).size, 200);
/// assert_eq!(resolve_size_and_state(50, MeasureSpec::Unspecified).size, 50);
///
/// let clipped = resolve_size_and_state(300, MeasureSpec::AtMost(200));
/// assert_eq!(clipped.size, 200);
/// assert!(clipped.too_small);
/// ```
pub fn resolve_size_and_state(size: i32, spec: MeasureSpec) -> Measured {
    match spec {
        MeasureSpec::Unspecified => Measured::fits(size),
        MeasureSpec::Exactly(spec_size) => Measured::fits(spec_size),
        MeasureSpec::AtMost(spec_size) if spec_size < size => Measured {
            size: spec_size,
            too_small: true,
        },
        MeasureSpec::AtMost(_) => Measured::fits(size),
    }
}
