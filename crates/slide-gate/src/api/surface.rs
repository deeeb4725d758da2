/// A vertical extent in document coordinates (pixels from the top of the page).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Absolute top offset.
    pub top: f64,
    /// Layout height.
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Both values are finite and the height is positive.
    pub fn is_valid(&self) -> bool {
        self.top.is_finite() && self.height.is_finite() && self.height > 0.0
    }
}

/// Scroll metrics of an element that scrolls internally.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollExtent {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self { scroll_top, scroll_height, client_height }
    }
}

/// Geometry port over the rendered container and its slides.
///
/// Every query is recomputed on demand; nothing here is cached as
/// authoritative state. Implementations may return degenerate values
/// (NaN, zero height) and the gate treats those as "defer to native scroll".
pub trait SlideSurface {
    /// Opaque handle for an event target (a DOM element in the browser).
    type Target;

    /// Current vertical scroll position of the viewport.
    fn scroll_y(&self) -> f64;

    /// Height of the viewport.
    fn viewport_height(&self) -> f64;

    /// Absolute extent of the container. `None` if it is no longer mounted.
    fn container(&self) -> Option<Span>;

    /// Number of registered slides. Fixed for the lifetime of an attachment.
    fn slide_count(&self) -> usize;

    /// Absolute extent of slide `index`.
    fn slide(&self, index: usize) -> Option<Span>;

    /// Whether `target` lies inside the container subtree.
    fn contains(&self, target: &Self::Target) -> bool;

    /// Nearest ancestor of `target` (inclusive), bounded by slide `index`,
    /// that scrolls internally: overflow enabled and content taller than its box.
    fn inner_scrollable(&self, target: &Self::Target, index: usize) -> Option<ScrollExtent>;
}
