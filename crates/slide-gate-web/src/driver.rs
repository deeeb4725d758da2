use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slide_gate::{ScrollDriver, ScrollPlan, TweenDriver, TweenId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Shared {
    tweens: TweenDriver,
    /// Pending `requestAnimationFrame` request, if any.
    raf_id: Option<i32>,
}

/// [`ScrollDriver`] that advances a [`TweenDriver`] from
/// `requestAnimationFrame` and writes the eased position with `scrollTo`.
///
/// Cancelling removes the tween before returning, so a frame that was already
/// queued finds nothing to write.
pub struct RafDriver {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafDriver {
    pub fn new(window: Window) -> Self {
        let shared = Rc::new(RefCell::new(Shared { tweens: TweenDriver::new(), raf_id: None }));
        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let callback = {
            let window = window.clone();
            let shared = Rc::clone(&shared);
            let frame_ref: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&frame);
            Closure::<dyn FnMut(f64)>::new(move |now: f64| {
                let again = {
                    let mut state = shared.borrow_mut();
                    state.raf_id = None;
                    match state.tweens.tick(now) {
                        Some(frame) => {
                            window.scroll_to_with_x_and_y(0.0, frame.position);
                            !frame.done
                        }
                        None => false,
                    }
                };
                if again {
                    if let Some(frame) = frame_ref.upgrade() {
                        request_frame(&window, &shared, &frame);
                    }
                }
            })
        };
        *frame.borrow_mut() = Some(callback);

        Self { window, shared, frame }
    }

    fn stop_frames(&self) {
        let pending = self.shared.borrow_mut().raf_id.take();
        if let Some(id) = pending {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}

fn request_frame(window: &Window, shared: &Rc<RefCell<Shared>>, frame: &RefCell<Option<FrameCallback>>) {
    if shared.borrow().raf_id.is_some() {
        return;
    }
    let borrowed = frame.borrow();
    let Some(callback) = borrowed.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => shared.borrow_mut().raf_id = Some(id),
        Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
    }
}

impl ScrollDriver for RafDriver {
    type Handle = TweenId;

    fn start(&mut self, plan: ScrollPlan) -> TweenId {
        let id = {
            let mut state = self.shared.borrow_mut();
            let id = state.tweens.start(plan);
            state.tweens.drain_cancelled().for_each(drop);
            id
        };
        request_frame(&self.window, &self.shared, &self.frame);
        id
    }

    fn cancel(&mut self, handle: TweenId) {
        let idle = {
            let mut state = self.shared.borrow_mut();
            state.tweens.cancel(handle);
            state.tweens.drain_cancelled().for_each(drop);
            state.tweens.is_idle()
        };
        if idle {
            self.stop_frames();
        }
    }

    fn is_running(&self, handle: TweenId) -> bool {
        self.shared.borrow().tweens.is_running(handle)
    }
}

impl Drop for RafDriver {
    fn drop(&mut self) {
        self.shared.borrow_mut().tweens.clear();
        self.stop_frames();
        self.frame.borrow_mut().take();
    }
}
