// Collider geometry

use glam::Vec2;
use serde::Deserialize;

use crate::core::math::Rect;

/// Hit-box relative to the top-left of an entity's visual footprint
///
/// Sizes are in screen pixels, already scaled. Degenerate boxes are not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ColliderBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ColliderBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Collider covering the whole footprint
    pub fn full(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Screen rectangle of an entity's collider.
///
/// `position` is the entity's centre in world space, `half_extents` half
/// its scaled footprint and `origin` the view's world-to-screen shift.
pub fn collider_rect(
    position: Vec2,
    half_extents: Vec2,
    collider: &ColliderBox,
    origin: Vec2,
) -> Rect {
    let top_left = position + origin - half_extents + collider.offset();
    Rect::from_origin_size(top_left, collider.size())
}

/// Screen rectangle of the full visual footprint
pub fn footprint_rect(position: Vec2, half_extents: Vec2, origin: Vec2) -> Rect {
    Rect::from_origin_size(position + origin - half_extents, half_extents * 2.0)
}
