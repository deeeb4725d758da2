use crate::extensions::easing::Easing;

/// A single scroll-to-target animation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    /// Scroll position when the animation starts.
    pub from: f64,
    /// Destination scroll position.
    pub to: f64,
    /// Start timestamp in milliseconds (same clock the gate is fed with).
    pub started_at: f64,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    pub easing: Easing,
}

impl ScrollPlan {
    pub fn distance(&self) -> f64 {
        (self.to - self.from).abs()
    }

    pub fn ends_at(&self) -> f64 {
        self.started_at + self.duration_ms
    }
}

/// Animation port: eases the viewport scroll position from A to B over a
/// duration. Cancellable; at most one plan runs at a time.
///
/// Completion is observed by polling [`ScrollDriver::is_running`], so a
/// driver never needs to call back into the gate.
pub trait ScrollDriver {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Start a plan. Any plan still running is replaced.
    fn start(&mut self, plan: ScrollPlan) -> Self::Handle;

    /// Stop the plan identified by `handle`. Stale handles are ignored.
    /// After this returns, no further scroll writes happen for `handle`.
    fn cancel(&mut self, handle: Self::Handle);

    /// Whether `handle` is still animating.
    fn is_running(&self, handle: Self::Handle) -> bool;
}
