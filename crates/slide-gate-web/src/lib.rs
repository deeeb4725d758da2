pub mod driver;
pub mod runner;
pub mod surface;

pub use driver::RafDriver;
pub use runner::{DomGate, GateRunner};
pub use surface::DomSurface;

use std::cell::RefCell;

use slide_gate::GateConfig;
use wasm_bindgen::prelude::*;

// One gate per page. Exported as free functions because the embedding page
// drives it from plain JS.
thread_local! {
    static RUNNER: RefCell<Option<GateRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&GateRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let borrow = cell.borrow();
        match borrow.as_ref() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("slide gate not initialized, call gate_init() first");
                None
            }
        }
    })
}

/// Create the page's gate from a JSON config (empty string for defaults).
/// Replaces, and fully detaches, any previous gate.
#[wasm_bindgen]
pub fn gate_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        GateConfig::default()
    } else {
        match GateConfig::from_json(config_json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                return false;
            }
        }
    };
    let Some(window) = web_sys::window() else {
        log::warn!("slide gate needs a window");
        return false;
    };

    let previous = RUNNER.with(|cell| cell.borrow_mut().replace(GateRunner::new(window, config)));
    drop(previous);
    log::info!("slide-gate: initialized");
    true
}

/// Attach to `container` (CSS selector) and the `slides` inside it.
/// Returns false, leaving native scrolling untouched, when setup is incomplete.
#[wasm_bindgen]
pub fn gate_attach(container: &str, slides: &str) -> bool {
    with_runner(|r| match r.attach(container, slides) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("slide gate not attached: {}", e);
            false
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn gate_detach() {
    with_runner(|r| r.detach());
}

/// Animate to slide `index` (clamped). Returns whether a transition started.
#[wasm_bindgen]
pub fn gate_scroll_to(index: u32) -> bool {
    with_runner(|r| r.scroll_to(index as usize).is_commit()).unwrap_or(false)
}

/// Current gate state as JSON, for debugging overlays.
#[wasm_bindgen]
pub fn gate_snapshot() -> String {
    with_runner(|r| serde_json::to_string(&r.snapshot()).unwrap_or_default()).unwrap_or_default()
}
