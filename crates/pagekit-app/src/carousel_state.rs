//! Carousel index state
//!
//! Pure index arithmetic; rendering slide offsets and dots lives in
//! `handler::carousel`.

/// Current slide of a fixed-size carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    current: usize,
    slide_count: usize,
}

impl CarouselState {
    pub fn new(slide_count: usize) -> Self {
        Self {
            current: 0,
            slide_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Advance with wrap-around. Returns false when there are no slides.
    pub fn next(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.current = (self.current + 1) % self.slide_count;
        true
    }

    /// Step back with wrap-around. Returns false when there are no slides.
    pub fn previous(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.current = (self.current + self.slide_count - 1) % self.slide_count;
        true
    }

    /// Jump to `index`; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slide_count {
            return false;
        }
        self.current = index;
        true
    }

    /// Horizontal offset of a slide in percent of the slide width
    pub fn offset_percent(&self, slide_index: usize) -> i64 {
        100 * (slide_index as i64 - self.current as i64)
    }
}
