//! Geometric primitives for layout analysis.
//!
//! Layout providers report boxes as corner coordinates `[x0, y0, x1, y1]`
//! in page space with y growing downwards, so `Rect` stores them that way
//! and (de)serializes as a four-element array.

use serde::{Deserialize, Serialize};

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outliner::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Left edge (x0).
    pub fn left(&self) -> f32 {
        self.x0
    }

    /// Top edge (y0).
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// Bottom edge (y1).
    pub fn bottom(&self) -> f32 {
        self.y1
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Vertical distance from the bottom of `above` to the top of `self`.
    ///
    /// Negative when the boxes overlap vertically.
    pub fn gap_below(&self, above: &Rect) -> f32 {
        self.y0 - above.y1
    }
}

impl From<[f32; 4]> for Rect {
    fn from(coords: [f32; 4]) -> Self {
        Rect::from_points(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x0, rect.y0, rect.x1, rect.y1]
    }
}
