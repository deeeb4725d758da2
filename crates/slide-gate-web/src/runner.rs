use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slide_gate::{AttachError, GateConfig, GateSnapshot, KeyStep, ScrollGate, SlideSurface, Verdict};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Element, Event, HtmlElement, KeyboardEvent, MediaQueryList,
    MediaQueryListEvent, TouchEvent, WheelEvent, Window,
};

use crate::driver::RafDriver;
use crate::surface::DomSurface;

pub type DomGate = ScrollGate<DomSurface, RafDriver>;

/// Owns one gate and every browser listener that feeds it.
///
/// Listeners are registered on `window` and filtered by container
/// containment; they reach the runner through a weak reference, so dropping
/// the runner (or calling `detach`) leaves nothing behind.
pub struct GateRunner {
    state: Rc<RefCell<RunnerState>>,
}

struct RunnerState {
    window: Window,
    gate: DomGate,
    this: Weak<RefCell<RunnerState>>,
    gestures: Option<GestureListeners>,
    media: Option<MediaWatch>,
}

struct GestureListeners {
    wheel: Closure<dyn FnMut(WheelEvent)>,
    touch_start: Closure<dyn FnMut(TouchEvent)>,
    touch_end: Closure<dyn FnMut(TouchEvent)>,
    key: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

struct MediaWatch {
    list: MediaQueryList,
    on_change: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl GateRunner {
    pub fn new(window: Window, config: GateConfig) -> Self {
        let driver = RafDriver::new(window.clone());
        let gate = ScrollGate::new(config, driver);
        let state = Rc::new_cyclic(|this| {
            RefCell::new(RunnerState {
                window,
                gate,
                this: this.clone(),
                gestures: None,
                media: None,
            })
        });
        Self { state }
    }

    /// Resolve the container and slides, subscribe to the compact breakpoint
    /// and, on wide viewports, start listening for gestures.
    pub fn attach(&self, container: &str, slides: &str) -> Result<(), AttachError> {
        let mut state = self.state.borrow_mut();
        if state.gate.is_attached() {
            return Err(AttachError::AlreadyAttached);
        }
        let surface = DomSurface::from_selectors(state.window.clone(), container, slides)
            .ok_or(AttachError::MissingContainer)?;
        state.gate.attach(surface)?;

        let compact = state.watch_media();
        state.on_compact_change(compact);
        log::info!(
            "slide gate attached to {} ({} slides, compact: {})",
            container,
            state.gate.surface().map_or(0, |s| s.slide_count()),
            compact
        );
        Ok(())
    }

    /// Remove every listener, cancel any animation and reset the gate.
    /// Safe to call repeatedly.
    pub fn detach(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            log::warn!("slide gate busy, detach skipped");
            return;
        };
        state.remove_gestures();
        state.unwatch_media();
        state.set_container_class(false);
        state.gate.detach();
    }

    /// Navigate to a slide programmatically (e.g. a "skip intro" button).
    pub fn scroll_to(&self, index: usize) -> Verdict {
        let mut state = self.state.borrow_mut();
        let now = now(&state.window);
        state.gate.scroll_to_slide(index, now)
    }

    pub fn snapshot(&self) -> GateSnapshot {
        self.state.borrow().gate.snapshot()
    }
}

impl Drop for GateRunner {
    fn drop(&mut self) {
        self.detach();
    }
}

impl RunnerState {
    fn on_compact_change(&mut self, compact: bool) {
        self.gate.set_compact(compact);
        if compact {
            self.remove_gestures();
            self.set_container_class(false);
        } else if self.gate.is_attached() && self.gestures.is_none() {
            self.install_gestures();
            self.set_container_class(true);
        }
    }

    fn on_wheel(&mut self, event: &WheelEvent) {
        let Some(target) = event_element(event) else {
            return;
        };
        let now = now(&self.window);
        let verdict = self.gate.on_wheel(event.delta_y(), &target, now);
        if verdict.consumes() {
            event.prevent_default();
        }
        log::trace!("wheel {:+.0}: {:?}", event.delta_y(), verdict);
    }

    fn on_touch_start(&mut self, event: &TouchEvent) {
        let (Some(target), Some(touch)) = (event_element(event), event.touches().get(0)) else {
            return;
        };
        let now = now(&self.window);
        self.gate.on_touch_start(touch.client_y() as f64, &target, now);
    }

    fn on_touch_end(&mut self, event: &TouchEvent) {
        let (Some(target), Some(touch)) = (event_element(event), event.changed_touches().get(0))
        else {
            return;
        };
        let now = now(&self.window);
        let verdict = self.gate.on_touch_end(touch.client_y() as f64, &target, now);
        log::trace!("swipe: {:?}", verdict);
    }

    fn on_key(&mut self, event: &KeyboardEvent) {
        if event.default_prevented() || event.alt_key() || event.ctrl_key() || event.meta_key() {
            return;
        }
        if event_element(event).is_some_and(|el| is_editable(&el)) {
            return;
        }
        let Some(step) = KeyStep::from_key(&event.key(), event.shift_key()) else {
            return;
        };
        // Keys land on <body>; classify them against the container itself.
        let Some(container) = self.gate.surface().map(|s| s.container_element().clone()) else {
            return;
        };
        let now = now(&self.window);
        let verdict = self.gate.on_key(step, &container, now);
        if verdict.consumes() {
            event.prevent_default();
        }
    }

    fn install_gestures(&mut self) {
        let this = self.this.clone();
        let wheel = Closure::<dyn FnMut(WheelEvent)>::new({
            let this = this.clone();
            move |e: WheelEvent| with_state(&this, |s| s.on_wheel(&e))
        });
        let touch_start = Closure::<dyn FnMut(TouchEvent)>::new({
            let this = this.clone();
            move |e: TouchEvent| with_state(&this, |s| s.on_touch_start(&e))
        });
        let touch_end = Closure::<dyn FnMut(TouchEvent)>::new({
            let this = this.clone();
            move |e: TouchEvent| with_state(&this, |s| s.on_touch_end(&e))
        });
        let key = self.gate.config().keyboard.then(|| {
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                with_state(&this, |s| s.on_key(&e))
            })
        });

        // Wheel must be non-passive so preventDefault is honored.
        let active = AddEventListenerOptions::new();
        active.set_passive(false);
        let passive = AddEventListenerOptions::new();
        passive.set_passive(true);

        let mut registrations = vec![
            ("wheel", wheel.as_ref(), &active),
            ("touchstart", touch_start.as_ref(), &passive),
            ("touchend", touch_end.as_ref(), &passive),
        ];
        if let Some(key) = &key {
            registrations.push(("keydown", key.as_ref(), &active));
        }
        for (kind, callback, options) in registrations {
            let result = self
                .window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    callback.unchecked_ref(),
                    options,
                );
            if let Err(e) = result {
                log::warn!("failed to add {} listener: {:?}", kind, e);
            }
        }

        self.gestures = Some(GestureListeners { wheel, touch_start, touch_end, key });
    }

    fn remove_gestures(&mut self) {
        let Some(listeners) = self.gestures.take() else {
            return;
        };
        let mut registrations = vec![
            ("wheel", listeners.wheel.as_ref()),
            ("touchstart", listeners.touch_start.as_ref()),
            ("touchend", listeners.touch_end.as_ref()),
        ];
        if let Some(key) = &listeners.key {
            registrations.push(("keydown", key.as_ref()));
        }
        for (kind, callback) in registrations {
            if let Err(e) = self.window.remove_event_listener_with_callback(kind, callback.unchecked_ref()) {
                log::warn!("failed to remove {} listener: {:?}", kind, e);
            }
        }
    }

    /// Subscribe to the compact breakpoint. Returns whether the layout is
    /// compact right now; a failed `matchMedia` counts as wide.
    fn watch_media(&mut self) -> bool {
        let query = self.gate.config().compact_media_query();
        let list = match self.window.match_media(&query) {
            Ok(Some(list)) => list,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("matchMedia({}) failed: {:?}", query, e);
                return false;
            }
        };
        let this = self.this.clone();
        let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |e: MediaQueryListEvent| with_state(&this, |s| s.on_compact_change(e.matches())),
        );
        if let Err(e) = list.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref()) {
            log::warn!("failed to watch {}: {:?}", query, e);
        }
        let compact = list.matches();
        self.media = Some(MediaWatch { list, on_change });
        compact
    }

    fn unwatch_media(&mut self) {
        if let Some(watch) = self.media.take() {
            let callback = watch.on_change.as_ref().unchecked_ref();
            if let Err(e) = watch.list.remove_event_listener_with_callback("change", callback) {
                log::warn!("failed to unwatch media query: {:?}", e);
            }
        }
    }

    fn set_container_class(&self, on: bool) {
        let Some(class) = self.gate.config().container_class.as_deref() else {
            return;
        };
        let Some(container) = self.gate.surface().map(|s| s.container_element()) else {
            return;
        };
        let classes = container.class_list();
        let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
        if let Err(e) = result {
            log::warn!("failed to toggle container class {}: {:?}", class, e);
        }
    }
}

fn with_state(this: &Weak<RefCell<RunnerState>>, f: impl FnOnce(&mut RunnerState)) {
    let Some(state) = this.upgrade() else {
        return;
    };
    match state.try_borrow_mut() {
        Ok(mut state) => f(&mut state),
        Err(_) => log::warn!("slide gate re-entered, event dropped"),
    };
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn is_editable(element: &Element) -> bool {
    let tag = element.tag_name();
    matches!(tag.as_str(), "INPUT" | "TEXTAREA" | "SELECT")
        || element.dyn_ref::<HtmlElement>().is_some_and(|h| h.is_content_editable())
}

/// Milliseconds on the same timeline as `requestAnimationFrame` timestamps.
fn now(window: &Window) -> f64 {
    window.performance().map_or_else(js_sys::Date::now, |p| p.now())
}
