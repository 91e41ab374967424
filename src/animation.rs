//! A repeating, interpolated animation driven one frame at a time.
//!
//! The animation never schedules anything itself. Its owner calls
//! [`RepeatAnimation::advance`] once per frame with the frame interval and acts
//! on the returned [`FrameOutcome`]. This keeps timing deterministic and lets
//! the owner route frames through bubbletea-rs commands.
//!
//! One cycle runs for `cycle_duration`. When a cycle expires and repeats are
//! left, exactly one repeat fires on that frame and the following frame starts
//! the next cycle from zero. When the last cycle expires the animation goes
//! back to [`AnimationState::Idle`].

use crate::interpolator::Interpolator;
use std::time::Duration;

/// How many times a cycle is repeated after the first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    /// Repeat this many times, for `n + 1` cycles in total.
    Finite(u32),
    /// Repeat until cancelled.
    Infinite,
}

impl From<i32> for RepeatCount {
    /// Negative counts mean "repeat forever".
    fn from(count: i32) -> Self {
        if count < 0 {
            RepeatCount::Infinite
        } else {
            RepeatCount::Finite(count as u32)
        }
    }
}

/// Whether an animation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Not started, finished or cancelled.
    #[default]
    Idle,
    /// Frames are being consumed.
    Animating,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Interpolated fraction of the current cycle.
    pub fraction: f32,
    /// A repeat fired on this frame.
    pub repeated: bool,
    /// The last cycle ended on this frame; the animation is idle now.
    pub finished: bool,
}

/// The repeating animation state machine.
#[derive(Debug, Clone)]
pub struct RepeatAnimation {
    cycle_duration: Duration,
    repeat_count: RepeatCount,
    interpolator: Box<dyn Interpolator>,
    state: AnimationState,
    elapsed: Duration,
    repeated: u64,
    restart_pending: bool,
    fraction: f32,
}

impl RepeatAnimation {
    /// Creates an idle animation.
    pub fn new(
        cycle_duration: Duration,
        repeat_count: RepeatCount,
        interpolator: Box<dyn Interpolator>,
    ) -> Self {
        Self {
            cycle_duration,
            repeat_count,
            interpolator,
            state: AnimationState::Idle,
            elapsed: Duration::ZERO,
            repeated: 0,
            restart_pending: false,
            fraction: 0.0,
        }
    }

    /// Starts from the first cycle. The next [`advance`](Self::advance) is the
    /// cycle's first frame.
    pub fn start(&mut self) {
        self.state = AnimationState::Animating;
        self.elapsed = Duration::ZERO;
        self.repeated = 0;
        self.restart_pending = true;
        self.fraction = 0.0;
    }

    /// Stops immediately. No further repeats fire.
    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
        self.restart_pending = false;
    }

    /// Consumes one frame of `frame_interval`.
    ///
    /// Returns `None` when the animation is idle.
    pub fn advance(&mut self, frame_interval: Duration) -> Option<FrameOutcome> {
        if self.state == AnimationState::Idle {
            return None;
        }

        if self.restart_pending {
            self.elapsed = Duration::ZERO;
            self.restart_pending = false;
        } else {
            self.elapsed += frame_interval;
        }

        let normalized = self.normalized_time();
        self.fraction = self.interpolator.interpolate(normalized);

        if normalized < 1.0 {
            return Some(self.outcome(false, false));
        }

        if self.repeats_remaining() {
            self.repeated += 1;
            self.restart_pending = true;
            Some(self.outcome(true, false))
        } else {
            self.state = AnimationState::Idle;
            Some(self.outcome(false, true))
        }
    }

    /// Current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// True while animating.
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Animating
    }

    /// Repeats fired since the last start.
    pub fn repeats_fired(&self) -> u64 {
        self.repeated
    }

    /// Configured repeat count.
    pub fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    /// Length of one cycle.
    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    /// Interpolated fraction of the current cycle as of the last frame.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    fn normalized_time(&self) -> f32 {
        if self.cycle_duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / self.cycle_duration.as_secs_f64();
        t.min(1.0) as f32
    }

    fn repeats_remaining(&self) -> bool {
        match self.repeat_count {
            RepeatCount::Finite(n) => self.repeated < u64::from(n),
            RepeatCount::Infinite => true,
        }
    }

    fn outcome(&self, repeated: bool, finished: bool) -> FrameOutcome {
        FrameOutcome {
            fraction: self.fraction,
            repeated,
            finished,
        }
    }
}
