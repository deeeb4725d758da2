// core/geometry.rs
//
// Pure decision queries over slide geometry. Every comparison carries an
// epsilon so exact boundary values never oscillate between two slides.
// Degenerate inputs (NaN, zero height) answer "no", which defers to native
// scrolling.

use crate::api::surface::{ScrollExtent, SlideSurface, Span};
use crate::api::types::Direction;

/// Greatest slide index whose top is at or above `scroll_y + eps`. Defaults to 0.
pub fn current_index<S: SlideSurface + ?Sized>(surface: &S, scroll_y: f64, eps: f64) -> usize {
    if !scroll_y.is_finite() {
        return 0;
    }
    let mut index = 0;
    for i in 0..surface.slide_count() {
        match surface.slide(i) {
            Some(span) if span.top.is_finite() && span.top <= scroll_y + eps => index = i,
            _ => {}
        }
    }
    index
}

/// The viewport has reached the container's own edge in `direction`: its
/// top at the container top going up, its bottom at the container bottom
/// going down.
pub fn at_container_edge(
    container: Span,
    scroll_y: f64,
    viewport_height: f64,
    direction: Direction,
    eps: f64,
) -> bool {
    if !container.top.is_finite() || !container.height.is_finite() || !scroll_y.is_finite() {
        return false;
    }
    match direction {
        Direction::Up => scroll_y <= container.top + eps,
        Direction::Down => {
            viewport_height.is_finite() && scroll_y + viewport_height >= container.bottom() - eps
        }
    }
}

/// The element really scrolls: content taller than its box.
pub fn scrolls(extent: &ScrollExtent, eps: f64) -> bool {
    let values = [extent.scroll_top, extent.scroll_height, extent.client_height];
    values.iter().all(|v| v.is_finite())
        && extent.client_height > 0.0
        && extent.scroll_height > extent.client_height + eps
}

/// A scrollable element still has room to move in `direction`.
pub fn inner_has_room(extent: &ScrollExtent, direction: Direction, eps: f64) -> bool {
    if !scrolls(extent, eps) {
        return false;
    }
    match direction {
        Direction::Up => extent.scroll_top > eps,
        Direction::Down => extent.scroll_top + extent.client_height < extent.scroll_height - eps,
    }
}

/// Slide exceeds the viewport by more than `margin`.
pub fn is_tall(slide: Span, viewport_height: f64, margin: f64) -> bool {
    slide.is_valid()
        && viewport_height.is_finite()
        && viewport_height > 0.0
        && slide.height > viewport_height + margin
}

/// The slide still has unseen extent off screen in `direction`. Only
/// meaningful for tall slides.
pub fn tall_remaining(
    slide: Span,
    scroll_y: f64,
    viewport_height: f64,
    direction: Direction,
    eps: f64,
) -> bool {
    if !slide.is_valid() || !scroll_y.is_finite() || !viewport_height.is_finite() {
        return false;
    }
    match direction {
        Direction::Up => scroll_y - slide.top > eps,
        Direction::Down => slide.bottom() - (scroll_y + viewport_height) > eps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;

    const EPS: f64 = 1.0;
    const TALL: f64 = 2.0;

    #[test]
    fn index_is_greatest_top_at_or_above_scroll() {
        let surface = FakeSurface::uniform(4, 800.0);
        assert_eq!(current_index(&surface, 0.0, EPS), 0);
        assert_eq!(current_index(&surface, 799.0, EPS), 1);
        assert_eq!(current_index(&surface, 798.0, EPS), 0);
        assert_eq!(current_index(&surface, 1700.0, EPS), 2);
        assert_eq!(current_index(&surface, 99_999.0, EPS), 3);
    }

    #[test]
    fn index_defaults_to_zero_above_container() {
        let surface = FakeSurface::uniform(3, 800.0).offset(500.0);
        assert_eq!(current_index(&surface, 0.0, EPS), 0);
        assert_eq!(current_index(&surface, f64::NAN, EPS), 0);
    }

    #[test]
    fn container_edges_use_epsilon() {
        let c = Span::new(100.0, 1600.0);
        assert!(at_container_edge(c, 101.0, 800.0, Direction::Up, EPS));
        assert!(!at_container_edge(c, 102.0, 800.0, Direction::Up, EPS));
        assert!(!at_container_edge(Span::new(f64::NAN, 1.0), 0.0, 800.0, Direction::Up, EPS));
    }

    #[test]
    fn bottom_edge_is_measured_at_the_viewport_bottom() {
        let c = Span::new(100.0, 1600.0);
        assert!(at_container_edge(c, 900.0, 800.0, Direction::Down, EPS));
        assert!(at_container_edge(c, 899.0, 800.0, Direction::Down, EPS));
        assert!(!at_container_edge(c, 898.0, 800.0, Direction::Down, EPS));
        assert!(!at_container_edge(c, 900.0, f64::NAN, Direction::Down, EPS));
    }

    #[test]
    fn inner_room_depends_on_direction() {
        let mid = ScrollExtent::new(50.0, 500.0, 200.0);
        assert!(inner_has_room(&mid, Direction::Up, EPS));
        assert!(inner_has_room(&mid, Direction::Down, EPS));

        let top = ScrollExtent::new(0.0, 500.0, 200.0);
        assert!(!inner_has_room(&top, Direction::Up, EPS));

        let bottom = ScrollExtent::new(300.0, 500.0, 200.0);
        assert!(!inner_has_room(&bottom, Direction::Down, EPS));
    }

    #[test]
    fn degenerate_inner_extent_has_no_room() {
        let flat = ScrollExtent::new(0.0, 200.0, 200.0);
        assert!(!inner_has_room(&flat, Direction::Down, EPS));
        let nan = ScrollExtent::new(f64::NAN, 500.0, 200.0);
        assert!(!inner_has_room(&nan, Direction::Down, EPS));
        let zero = ScrollExtent::new(0.0, 500.0, 0.0);
        assert!(!inner_has_room(&zero, Direction::Down, EPS));
    }

    #[test]
    fn tall_slide_extent() {
        let slide = Span::new(0.0, 2400.0);
        assert!(is_tall(slide, 800.0, TALL));
        assert!(tall_remaining(slide, 0.0, 800.0, Direction::Down, EPS));
        assert!(!tall_remaining(slide, 0.0, 800.0, Direction::Up, EPS));
        assert!(!tall_remaining(slide, 1600.0, 800.0, Direction::Down, EPS));
        assert!(!tall_remaining(slide, 1599.5, 800.0, Direction::Down, EPS));
        assert!(tall_remaining(slide, 1600.0, 800.0, Direction::Up, EPS));
    }

    #[test]
    fn viewport_sized_slide_is_not_tall() {
        assert!(!is_tall(Span::new(0.0, 800.0), 800.0, TALL));
        assert!(!is_tall(Span::new(0.0, 801.5), 800.0, TALL));
        assert!(!is_tall(Span::new(0.0, 802.0), 800.0, TALL));
        assert!(is_tall(Span::new(0.0, 802.5), 800.0, TALL));
        assert!(!is_tall(Span::new(0.0, 2000.0), 0.0, TALL));
        assert!(!tall_remaining(Span::new(0.0, 0.0), 0.0, 800.0, Direction::Down, EPS));
    }
}
