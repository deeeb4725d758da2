// extensions/mod.rs
//
// Animation helpers that do not depend on the gate: easing curves and the
// headless scroll tween driver.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use tween::{ScrollTween, TweenDriver, TweenFrame, TweenId};
