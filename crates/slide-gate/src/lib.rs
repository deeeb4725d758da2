pub mod api;
pub mod core;
pub mod extensions;
pub mod input;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience
pub use api::driver::{ScrollDriver, ScrollPlan};
pub use api::surface::{ScrollExtent, SlideSurface, Span};
pub use api::types::{Direction, KeyStep, PassReason, SuppressReason, Verdict};
pub use crate::core::config::GateConfig;
pub use crate::core::error::{AttachError, ConfigError};
pub use crate::core::gate::ScrollGate;
pub use crate::core::phase::{GateSnapshot, Phase};
pub use input::gesture::{Gesture, Swipe, TouchTracker};

pub use extensions::{
    Easing, lerp, ease,
    ScrollTween, TweenDriver, TweenFrame, TweenId,
};
