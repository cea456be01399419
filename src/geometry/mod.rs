//! Geometric primitives for layout analysis.
//!
//! Coordinates follow the upstream extractor's screen convention: the origin is
//! the top-left corner of the page and `y` grows downwards, so a larger `top`
//! means further down the page.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge
    pub x: f32,
    /// Y coordinate of the top edge
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_sections::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 100.0, 12.0);
    /// assert_eq!(rect.right(), 110.0);
    /// assert_eq!(rect.bottom(), 32.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Vertical distance from the bottom of `self` to the top of `below`.
    ///
    /// Negative when the rectangles overlap vertically.
    pub fn vertical_gap_to(&self, below: &Rect) -> f32 {
        below.top() - self.bottom()
    }

    /// Horizontal distance from the right edge of `self` to the left edge of `next`.
    ///
    /// Negative when the rectangles overlap horizontally.
    pub fn horizontal_gap_to(&self, next: &Rect) -> f32 {
        next.left() - self.right()
    }

    /// True when every coordinate is finite and the extent is non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}
