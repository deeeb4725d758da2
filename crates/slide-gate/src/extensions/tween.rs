// extensions/tween.rs
//
// Frame-driven scroll tween. Holds at most one active plan; the host's frame
// loop calls `tick(now)` and writes the returned position to the viewport.
//
// Usage:
//   let mut driver = TweenDriver::new();
//   let id = driver.start(plan);
//   while let Some(frame) = driver.tick(now) { window.scroll_to(0, frame.position); ... }

use crate::api::driver::{ScrollDriver, ScrollPlan};
use super::easing::ease;

/// Handle to a started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// One scroll animation in progress.
#[derive(Debug, Clone)]
pub struct ScrollTween {
    pub id: TweenId,
    pub plan: ScrollPlan,
}

impl ScrollTween {
    /// Normalized progress [0, 1] at time `now`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.plan.duration_ms <= 0.0 || !self.plan.duration_ms.is_finite() {
            1.0
        } else {
            ((now - self.plan.started_at) / self.plan.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Eased scroll position at time `now`.
    pub fn position(&self, now: f64) -> f64 {
        ease(self.plan.from, self.plan.to, self.progress(now), self.plan.easing)
    }
}

/// Position produced by one frame of the active tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub id: TweenId,
    pub position: f64,
    /// The tween reached its destination on this frame and was retired.
    pub done: bool,
}

/// Headless implementation of [`ScrollDriver`].
#[derive(Debug, Default)]
pub struct TweenDriver {
    active: Option<ScrollTween>,
    next_id: u32,
    /// Ids cancelled or replaced since the last drain, oldest first.
    cancelled: Vec<TweenId>,
}

impl TweenDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the active tween to `now`. Returns `None` when idle.
    pub fn tick(&mut self, now: f64) -> Option<TweenFrame> {
        let tween = self.active.as_ref()?;
        let id = tween.id;
        let position = tween.position(now);
        let done = tween.progress(now) >= 1.0;
        if done {
            self.active = None;
        }
        Some(TweenFrame { id, position, done })
    }

    /// The tween currently running, if any.
    pub fn active(&self) -> Option<&ScrollTween> {
        self.active.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Drain ids that were cancelled or replaced.
    pub fn drain_cancelled(&mut self) -> impl Iterator<Item = TweenId> + '_ {
        self.cancelled.drain(..)
    }

    /// Stop whatever is running.
    pub fn clear(&mut self) {
        if let Some(tween) = self.active.take() {
            self.cancelled.push(tween.id);
        }
    }
}

impl ScrollDriver for TweenDriver {
    type Handle = TweenId;

    fn start(&mut self, plan: ScrollPlan) -> TweenId {
        self.clear();
        let id = TweenId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active = Some(ScrollTween { id, plan });
        id
    }

    fn cancel(&mut self, handle: TweenId) {
        if self.active.as_ref().is_some_and(|t| t.id == handle) {
            self.clear();
        }
    }

    fn is_running(&self, handle: TweenId) -> bool {
        self.active.as_ref().is_some_and(|t| t.id == handle)
    }
}
