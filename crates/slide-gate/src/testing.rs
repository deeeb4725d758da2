// Test doubles shared by unit tests.

use std::cell::Cell;
use std::collections::HashMap;

use crate::api::surface::{ScrollExtent, SlideSurface, Span};

/// In-memory page: slides stacked from `offset`, targets are plain ids.
/// Target 0 is a plain element inside the container.
#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub heights: Vec<f64>,
    pub offset: f64,
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub mounted: bool,
    inner: HashMap<u32, (usize, ScrollExtent)>,
    outside: Vec<u32>,
    queries: Cell<usize>,
}

impl FakeSurface {
    /// `count` slides, each exactly one viewport of `height`.
    pub fn uniform(count: usize, height: f64) -> Self {
        Self {
            heights: vec![height; count],
            offset: 0.0,
            scroll_y: 0.0,
            viewport_height: height,
            mounted: true,
            inner: HashMap::new(),
            outside: Vec::new(),
            queries: Cell::new(0),
        }
    }

    pub fn offset(mut self, top: f64) -> Self {
        self.offset = top;
        self
    }

    pub fn with_height(mut self, index: usize, height: f64) -> Self {
        self.heights[index] = height;
        self
    }

    pub fn with_inner(mut self, target: u32, slide: usize, extent: ScrollExtent) -> Self {
        self.inner.insert(target, (slide, extent));
        self
    }

    pub fn with_outside(mut self, target: u32) -> Self {
        self.outside.push(target);
        self
    }

    pub fn top_of(&self, index: usize) -> f64 {
        self.offset + self.heights[..index].iter().sum::<f64>()
    }

    /// Number of geometry queries made so far.
    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn count(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl SlideSurface for FakeSurface {
    type Target = u32;

    fn scroll_y(&self) -> f64 {
        self.count();
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.count();
        self.viewport_height
    }

    fn container(&self) -> Option<Span> {
        self.count();
        if !self.mounted {
            return None;
        }
        Some(Span::new(self.offset, self.heights.iter().sum()))
    }

    fn slide_count(&self) -> usize {
        self.heights.len()
    }

    fn slide(&self, index: usize) -> Option<Span> {
        self.count();
        let height = *self.heights.get(index)?;
        Some(Span::new(self.top_of(index), height))
    }

    fn contains(&self, target: &u32) -> bool {
        !self.outside.contains(target)
    }

    fn inner_scrollable(&self, target: &u32, index: usize) -> Option<ScrollExtent> {
        self.count();
        match self.inner.get(target) {
            Some((slide, extent)) if *slide == index => Some(*extent),
            _ => None,
        }
    }
}
