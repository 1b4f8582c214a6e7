//! Screen rectangle arithmetic

use serde::{Deserialize, Serialize};

/// A rectangle in virtual-screen pixels (right and bottom are exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width in pixels
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in pixels
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Area in square pixels, zero for degenerate rectangles
    pub fn area(&self) -> i64 {
        i64::from(self.width().max(0)) * i64::from(self.height().max(0))
    }

    /// Center point, rounded towards the top-left
    pub const fn center(&self) -> (i32, i32) {
        (
            self.left + self.width() / 2,
            self.top + self.height() / 2,
        )
    }

    /// Whether `point` lies inside the rectangle
    pub const fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether any edge differs from `other` by more than `tolerance` pixels
    pub fn differs_from(&self, other: &Self, tolerance: i32) -> bool {
        (self.left - other.left).abs() > tolerance
            || (self.top - other.top).abs() > tolerance
            || (self.right - other.right).abs() > tolerance
            || (self.bottom - other.bottom).abs() > tolerance
    }
}

/// Whether a window moved between two observations
///
/// A missing observation on either side always counts as a change.
pub fn rect_changed(a: Option<Rect>, b: Option<Rect>, tolerance: i32) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.differs_from(&b, tolerance),
        _ => true,
    }
}
