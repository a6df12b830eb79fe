//! Layout geometry: element boxes and the viewport
//!
//! All rectangles are in document coordinates (pixels from the top-left
//! corner of the page). The viewport is a window onto the document whose
//! vertical position is the scroll offset.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow (positive) or shrink (negative) the box by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + 2.0 * margin).max(0.0),
            height: (self.height + 2.0 * margin).max(0.0),
        }
    }

    /// Overlapping region of two boxes.
    ///
    /// Edge-adjacent boxes yield a zero-area intersection rather than `None`,
    /// matching how browsers treat a target that just touches the root.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical scroll offset
    #[serde(default)]
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    /// Visible region in document coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Clamp a requested scroll offset to the scrollable range of a document
    /// with the given total height.
    pub fn clamp_scroll(&self, y: f64, document_height: f64) -> f64 {
        let max = (document_height - self.height).max(0.0);
        y.clamp(0.0, max)
    }
}
