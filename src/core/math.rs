// Math utilities and helper functions

use glam::Vec2;

/// Axis-aligned rectangle in screen pixel space.
///
/// Always derived on demand from a position and a size, never stored
/// long-term on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    /// Smallest rectangle containing every point (empty input yields a zero rect)
    pub fn bounding(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        points.iter().skip(1).fold(
            Self::new(first.x, first.y, first.x, first.y),
            |rect, p| Self {
                left: rect.left.min(p.x),
                top: rect.top.min(p.y),
                right: rect.right.max(p.x),
                bottom: rect.bottom.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Move the rectangle by a vector
    pub fn translated(&self, by: Vec2) -> Self {
        Self::new(
            self.left + by.x,
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
        )
    }

    /// Strict containment: points on the edge are outside
    pub fn strictly_contains(&self, point: Vec2) -> bool {
        point.x > self.left && point.x < self.right && point.y > self.top && point.y < self.bottom
    }

    /// Corner points clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right, self.top),
            Vec2::new(self.right, self.bottom),
            Vec2::new(self.left, self.bottom),
        ]
    }
}

/// Round to the nearest even integer (odd results are bumped up)
pub fn round_to_nearest_even(value: f32) -> f32 {
    let rounded = value.round();
    if rounded % 2.0 != 0.0 {
        rounded + 1.0
    } else {
        rounded
    }
}
