use crate::api::types::{Direction, KeyStep};

/// Input events the gate understands. No DOM types here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// One wheel tick with its vertical delta.
    Wheel { delta_y: f64 },
    /// A touch began at client y.
    TouchStart { y: f64 },
    /// A touch ended at client y.
    TouchEnd { y: f64 },
    /// A navigation key was pressed.
    Key { step: KeyStep },
}

/// What a touch-end resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swipe {
    /// No touch-start was recorded.
    Orphan,
    /// Displacement below the noise threshold.
    Noise,
    Directed(Direction),
}

/// Remembers where the current touch began.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    start_y: Option<f64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, y: f64) {
        self.start_y = if y.is_finite() { Some(y) } else { None };
    }

    /// Close the touch and classify it. A finger moving up scrolls down.
    pub fn end(&mut self, y: f64, min_distance: f64) -> Swipe {
        let Some(start) = self.start_y.take() else {
            return Swipe::Orphan;
        };
        let travel = start - y;
        if !travel.is_finite() || travel.abs() < min_distance {
            return Swipe::Noise;
        }
        match Direction::from_delta(travel) {
            Some(direction) => Swipe::Directed(direction),
            None => Swipe::Noise,
        }
    }

    pub fn reset(&mut self) {
        self.start_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_up_scrolls_down() {
        let mut t = TouchTracker::new();
        t.begin(500.0);
        assert_eq!(t.end(300.0, 40.0), Swipe::Directed(Direction::Down));
        assert_eq!(t.end(300.0, 40.0), Swipe::Orphan);
    }

    #[test]
    fn swipe_down_scrolls_up() {
        let mut t = TouchTracker::new();
        t.begin(100.0);
        assert_eq!(t.end(200.0, 40.0), Swipe::Directed(Direction::Up));
    }

    #[test]
    fn short_swipe_is_noise() {
        let mut t = TouchTracker::new();
        t.begin(100.0);
        assert_eq!(t.end(139.0, 40.0), Swipe::Noise);
    }

    #[test]
    fn end_without_begin_is_orphan() {
        let mut t = TouchTracker::new();
        assert_eq!(t.end(10.0, 40.0), Swipe::Orphan);
        t.begin(f64::NAN);
        assert_eq!(t.end(10.0, 40.0), Swipe::Orphan);
    }
}
