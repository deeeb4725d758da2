use crate::api::driver::{ScrollDriver, ScrollPlan};
use crate::api::surface::SlideSurface;
use crate::api::types::{Direction, KeyStep, PassReason, SuppressReason, Verdict};
use crate::core::config::GateConfig;
use crate::core::error::AttachError;
use crate::core::geometry::{
    at_container_edge, current_index, inner_has_room, is_tall, tall_remaining,
};
use crate::core::phase::{GateSnapshot, Phase};
use crate::input::gesture::{Gesture, Swipe, TouchTracker};

/// Turns discrete wheel, touch and key gestures over an ordered list of
/// slides into single-step animated scroll transitions.
///
/// The gate never touches the page directly: geometry comes from a
/// [`SlideSurface`], animation goes through a [`ScrollDriver`], and time is
/// passed in as `now` (milliseconds, monotonic) with every call.
///
/// Multiple gates must own disjoint containers.
pub struct ScrollGate<S: SlideSurface, D: ScrollDriver> {
    config: GateConfig,
    driver: D,
    surface: Option<S>,
    phase: Phase<D::Handle>,
    hold: u32,
    compact: bool,
    touch: TouchTracker,
    last_target: Option<usize>,
}

impl<S: SlideSurface, D: ScrollDriver> ScrollGate<S, D> {
    pub fn new(config: GateConfig, driver: D) -> Self {
        Self {
            config,
            driver,
            surface: None,
            phase: Phase::Idle,
            hold: 0,
            compact: false,
            touch: TouchTracker::new(),
            last_target: None,
        }
    }

    /// Take ownership of a surface and start intercepting gestures.
    ///
    /// On error the gate stays detached and every gesture passes through.
    pub fn attach(&mut self, surface: S) -> Result<(), AttachError> {
        if self.surface.is_some() {
            return Err(AttachError::AlreadyAttached);
        }
        let count = surface.slide_count();
        if count < 2 {
            return Err(AttachError::TooFewSlides(count));
        }
        if surface.container().is_none() {
            return Err(AttachError::MissingContainer);
        }
        self.surface = Some(surface);
        log::debug!("slide gate attached with {} slides", count);
        Ok(())
    }

    /// Cancel any animation, drop the surface and reset to the initial state.
    /// Safe to call repeatedly.
    pub fn detach(&mut self) -> Option<S> {
        self.release();
        self.last_target = None;
        let surface = self.surface.take();
        if surface.is_some() {
            log::debug!("slide gate detached");
        }
        surface
    }

    /// Push the viewport classification. Going compact cancels everything;
    /// while compact no geometry is queried and nothing is consumed.
    pub fn set_compact(&mut self, compact: bool) {
        if compact == self.compact {
            return;
        }
        if compact {
            self.release();
        }
        self.compact = compact;
        log::info!("slide gate {}", if compact { "disabled (compact layout)" } else { "enabled" });
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Attached and not compact.
    pub fn is_active(&self) -> bool {
        self.surface.is_some() && !self.compact
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn phase(&self) -> Phase<D::Handle> {
        self.phase
    }

    pub fn hold_counter(&self) -> u32 {
        self.hold
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            attached: self.surface.is_some(),
            compact: self.compact,
            animating: self.phase.is_animating(),
            lock_until: self.phase.lock_until(),
            hold_counter: self.hold,
            last_target: self.last_target,
        }
    }

    /// Dispatch a generic gesture.
    pub fn handle(&mut self, gesture: Gesture, target: &S::Target, now: f64) -> Verdict {
        match gesture {
            Gesture::Wheel { delta_y } => self.on_wheel(delta_y, target, now),
            Gesture::TouchStart { y } => self.on_touch_start(y, target, now),
            Gesture::TouchEnd { y } => self.on_touch_end(y, target, now),
            Gesture::Key { step } => self.on_key(step, target, now),
        }
    }

    /// One wheel tick. Consume the DOM event iff the verdict `consumes()`.
    pub fn on_wheel(&mut self, delta_y: f64, target: &S::Target, now: f64) -> Verdict {
        if let Some(pass) = self.precheck(target) {
            return pass;
        }
        match Direction::from_delta(delta_y) {
            Some(direction) => self.classify(direction, target, now),
            None => Verdict::PassThrough(PassReason::NoDirection),
        }
    }

    /// A new touch always regains control: the animation stops and the lock
    /// clears, wherever on the page the finger lands.
    pub fn on_touch_start(&mut self, y: f64, _target: &S::Target, _now: f64) -> Verdict {
        if let Some(pass) = self.inactive() {
            return pass;
        }
        self.cancel_animation();
        self.phase = Phase::Idle;
        self.touch.begin(y);
        Verdict::PassThrough(PassReason::NoDirection)
    }

    /// Classify a finished swipe. A suppressed swipe simply does nothing.
    pub fn on_touch_end(&mut self, y: f64, target: &S::Target, now: f64) -> Verdict {
        if let Some(pass) = self.precheck(target) {
            self.touch.reset();
            return pass;
        }
        match self.touch.end(y, self.config.touch_min_distance) {
            Swipe::Orphan => Verdict::PassThrough(PassReason::NoTouchStart),
            Swipe::Noise => Verdict::PassThrough(PassReason::TouchNoise),
            Swipe::Directed(direction) => self.classify(direction, target, now),
        }
    }

    /// Navigation keys go through the same pipeline as a wheel tick.
    pub fn on_key(&mut self, step: KeyStep, target: &S::Target, now: f64) -> Verdict {
        if let Some(pass) = self.precheck(target) {
            return pass;
        }
        self.classify(step.direction(), target, now)
    }

    /// Programmatic navigation. Ignores the lock and replaces any running
    /// animation; `index` is clamped to the slide range.
    pub fn scroll_to_slide(&mut self, index: usize, now: f64) -> Verdict {
        if self.compact {
            return Verdict::PassThrough(PassReason::Compact);
        }
        let Some(surface) = self.surface.as_ref() else {
            return Verdict::PassThrough(PassReason::Detached);
        };
        let eps = self.config.edge_epsilon;
        let to = index.min(surface.slide_count().saturating_sub(1));
        let y = surface.scroll_y();
        let from = current_index(surface, y, eps);
        let Some(dest) = surface.slide(to).map(|s| s.top).filter(|t| t.is_finite()) else {
            return Verdict::PassThrough(PassReason::Geometry);
        };
        if !y.is_finite() {
            return Verdict::PassThrough(PassReason::Geometry);
        }
        if (dest - y).abs() <= eps {
            return Verdict::PassThrough(PassReason::AlreadyThere);
        }
        self.commit(from, to, y, dest, now)
    }

    /// Advance lock bookkeeping to `now`. Called on every gesture; hosts may
    /// also call it from their frame loop.
    pub fn poll(&mut self, now: f64) {
        if let Phase::Animating { handle, until } = self.phase {
            if !self.driver.is_running(handle) {
                self.phase = Phase::Locked { until };
            } else if now >= until + self.config.max_duration_ms {
                // Completion never arrived; the lock is time-bounded regardless.
                log::warn!("scroll animation {:?} outlived its lock, cancelling", handle);
                self.driver.cancel(handle);
                self.phase = Phase::Idle;
            }
        }
        if let Phase::Locked { until } = self.phase {
            if now >= until {
                self.phase = Phase::Idle;
            }
        }
    }

    fn inactive(&self) -> Option<Verdict> {
        if self.compact {
            return Some(Verdict::PassThrough(PassReason::Compact));
        }
        if self.surface.is_none() {
            return Some(Verdict::PassThrough(PassReason::Detached));
        }
        None
    }

    fn precheck(&self, target: &S::Target) -> Option<Verdict> {
        self.inactive().or_else(|| {
            let inside = self.surface.as_ref().is_some_and(|s| s.contains(target));
            (!inside).then_some(Verdict::PassThrough(PassReason::OutsideContainer))
        })
    }

    fn classify(&mut self, direction: Direction, target: &S::Target, now: f64) -> Verdict {
        self.poll(now);
        let eps = self.config.edge_epsilon;
        let Some(surface) = self.surface.as_ref() else {
            return Verdict::PassThrough(PassReason::Detached);
        };

        // Release control at the container's own edges, or when the viewport
        // has not reached the container yet.
        let y = surface.scroll_y();
        let viewport = surface.viewport_height();
        let exit = match surface.container() {
            Some(c) if c.is_valid() && y.is_finite() && viewport.is_finite() => {
                at_container_edge(c, y, viewport, direction, eps) || y < c.top - eps
            }
            _ => true,
        };
        if exit {
            self.release();
            return Verdict::PassThrough(PassReason::ContainerEdge);
        }

        match self.phase {
            Phase::Animating { .. } => return Verdict::Suppress(SuppressReason::Animating),
            Phase::Locked { until } if now < until => {
                return Verdict::Suppress(SuppressReason::Locked);
            }
            _ => {}
        }

        let index = current_index(surface, y, eps);
        if direction == Direction::Up || !self.config.is_hold_slide(index) {
            self.hold = 0;
        }

        if let Some(extent) = surface.inner_scrollable(target, index) {
            if inner_has_room(&extent, direction, eps) {
                return Verdict::PassThrough(PassReason::InnerScroll);
            }
        }

        let slide = surface.slide(index);
        let tall = slide.is_some_and(|s| is_tall(s, viewport, self.config.tall_margin));
        if tall && slide.is_some_and(|s| tall_remaining(s, y, viewport, direction, eps)) {
            return Verdict::PassThrough(PassReason::TallExtent);
        }

        if tall && direction == Direction::Down && self.config.is_hold_slide(index) {
            if self.hold < self.config.hold_threshold {
                self.hold += 1;
                return Verdict::Suppress(SuppressReason::Holding(self.hold));
            }
            self.hold = 0;
        } else {
            self.hold = 0;
        }

        let count = surface.slide_count();
        let Some(to) = index.checked_add_signed(direction.step()).filter(|&to| to < count) else {
            return Verdict::PassThrough(PassReason::SequenceEnd);
        };

        let Some(dest) = surface.slide(to).map(|s| s.top).filter(|t| t.is_finite()) else {
            return Verdict::PassThrough(PassReason::Geometry);
        };
        self.commit(index, to, y, dest, now)
    }

    fn commit(&mut self, from: usize, to: usize, y: f64, dest: f64, now: f64) -> Verdict {
        let plan = ScrollPlan {
            from: y,
            to: dest,
            started_at: now,
            duration_ms: self.config.duration_for(dest - y),
            easing: self.config.easing,
        };
        self.cancel_animation();
        let handle = self.driver.start(plan);
        self.phase = Phase::Animating {
            handle,
            until: plan.ends_at() + self.config.tail_ms,
        };
        self.hold = 0;
        self.last_target = Some(to);
        log::debug!(
            "slide {} -> {} ({:.0}px over {:.0}ms)",
            from,
            to,
            plan.distance(),
            plan.duration_ms
        );
        Verdict::Commit { from, to }
    }

    fn cancel_animation(&mut self) {
        if let Some(handle) = self.phase.handle() {
            self.driver.cancel(handle);
        }
    }

    /// Cancel the animation, clear the lock and the hold counter.
    fn release(&mut self) {
        self.cancel_animation();
        self.phase = Phase::Idle;
        self.hold = 0;
        self.touch.reset();
    }
}
