/// Vertical direction of a gesture, in document terms.
/// `Down` moves toward later slides (scroll position increases).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction from a wheel `deltaY`. Zero or NaN deltas carry no direction.
    pub fn from_delta(delta_y: f64) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Direction::Down)
        } else if delta_y < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Signed slide step for this direction.
    pub fn step(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// Keyboard navigation keys the gate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStep {
    PageDown,
    PageUp,
    ArrowDown,
    ArrowUp,
    /// Space bar (Shift+Space is reported as `PageUp` by the caller).
    Space,
}

impl KeyStep {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        match key {
            "PageDown" => Some(KeyStep::PageDown),
            "PageUp" => Some(KeyStep::PageUp),
            "ArrowDown" => Some(KeyStep::ArrowDown),
            "ArrowUp" => Some(KeyStep::ArrowUp),
            " " | "Spacebar" if shift => Some(KeyStep::PageUp),
            " " | "Spacebar" => Some(KeyStep::Space),
            _ => None,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            KeyStep::PageDown | KeyStep::ArrowDown | KeyStep::Space => Direction::Down,
            KeyStep::PageUp | KeyStep::ArrowUp => Direction::Up,
        }
    }
}

/// Why a gesture was left to the browser's native scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// No surface is attached.
    Detached,
    /// Compact (mobile) layout: the gate is switched off.
    Compact,
    /// The event target is outside the container subtree.
    OutsideContainer,
    /// Zero or NaN delta.
    NoDirection,
    /// Swipe shorter than the touch noise threshold.
    TouchNoise,
    /// Touch-end without a matching touch-start.
    NoTouchStart,
    /// The viewport is at the container's own edge in the gesture direction.
    ContainerEdge,
    /// A nested scrollable element still has room in the gesture direction.
    InnerScroll,
    /// The current slide is tall and still has unseen extent.
    TallExtent,
    /// First slide going up, or last slide going down.
    SequenceEnd,
    /// Destination geometry is missing or degenerate.
    Geometry,
    /// Programmatic navigation to the slide already in place.
    AlreadyThere,
}

/// Why a gesture was consumed without a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// A scroll animation is in flight.
    Animating,
    /// The lock window of the previous transition has not expired.
    Locked,
    /// Hold rule on a tall slide; carries the hold counter after this gesture.
    Holding(u32),
}

/// Outcome of classifying one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    PassThrough(PassReason),
    Suppress(SuppressReason),
    Commit { from: usize, to: usize },
}

impl Verdict {
    /// Whether the caller should `preventDefault()` the originating event.
    pub fn consumes(&self) -> bool {
        !matches!(self, Verdict::PassThrough(_))
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, Verdict::Commit { .. })
    }
}
