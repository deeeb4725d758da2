use slide_gate::{ScrollExtent, SlideSurface, Span};
use wasm_bindgen::JsCast;
use web_sys::{Element, Node, Window};

/// [`SlideSurface`] over live DOM elements. Geometry is read from layout on
/// every query.
pub struct DomSurface {
    window: Window,
    container: Element,
    slides: Vec<Element>,
}

impl DomSurface {
    pub fn new(window: Window, container: Element, slides: Vec<Element>) -> Self {
        Self { window, container, slides }
    }

    /// Resolve the container with `document.querySelector` and its slides
    /// with `querySelectorAll` inside it. `None` when the container is missing.
    pub fn from_selectors(window: Window, container: &str, slides: &str) -> Option<Self> {
        let document = window.document()?;
        let container = document.query_selector(container).ok().flatten()?;
        let list = container.query_selector_all(slides).ok()?;
        let slides = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        Some(Self::new(window, container, slides))
    }

    pub fn container_element(&self) -> &Element {
        &self.container
    }

    fn span_of(&self, element: &Element) -> Span {
        let rect = element.get_bounding_client_rect();
        Span::new(rect.top() + self.scroll_y(), rect.height())
    }

    /// Scroll metrics of `element` if its computed style lets it scroll and
    /// its content overflows.
    fn scroll_extent(&self, element: &Element) -> Option<ScrollExtent> {
        let style = self.window.get_computed_style(element).ok().flatten()?;
        let overflow = style.get_property_value("overflow-y").ok()?;
        if !matches!(overflow.as_str(), "auto" | "scroll" | "overlay") {
            return None;
        }
        let scroll_height = element.scroll_height() as f64;
        let client_height = element.client_height() as f64;
        if scroll_height <= client_height + 1.0 {
            return None;
        }
        Some(ScrollExtent::new(element.scroll_top() as f64, scroll_height, client_height))
    }
}

impl SlideSurface for DomSurface {
    type Target = Element;

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(f64::NAN)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    }

    fn container(&self) -> Option<Span> {
        if !self.container.is_connected() {
            return None;
        }
        Some(self.span_of(&self.container))
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide(&self, index: usize) -> Option<Span> {
        let slide = self.slides.get(index)?;
        Some(self.span_of(slide))
    }

    fn contains(&self, target: &Element) -> bool {
        let node: &Node = target;
        self.container.contains(Some(node))
    }

    fn inner_scrollable(&self, target: &Element, index: usize) -> Option<ScrollExtent> {
        let slide = self.slides.get(index)?;
        let node: &Node = target;
        if !slide.contains(Some(node)) {
            return None;
        }
        let mut current = Some(target.clone());
        while let Some(element) = current {
            if let Some(extent) = self.scroll_extent(&element) {
                return Some(extent);
            }
            let as_node: &Node = &element;
            let slide_node: &Node = slide;
            if as_node.is_same_node(Some(slide_node)) {
                break;
            }
            current = element.parent_element();
        }
        None
    }
}
