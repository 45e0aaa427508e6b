// Debug overlay shapes
//
// Debug output is plain data so it can be inspected in tests or handed to
// whatever backend draws translucent shapes.

use glam::Vec2;

use crate::core::math::Rect;

/// RGBA colour, components in 0..=1
pub type DebugColor = [f32; 4];

pub const COLLIDER_COLOR: DebugColor = [0.88, 0.0, 0.0, 0.5];
pub const SPAWN_COLOR: DebugColor = [0.0, 1.0, 0.0, 0.8];
pub const STAIRS_COLOR: DebugColor = [0.0, 1.0, 1.0, 0.5];
pub const PORTAL_COLOR: DebugColor = [0.2, 0.0, 0.2, 0.5];
pub const ORIGIN_COLOR: DebugColor = [0.0, 1.0, 0.0, 0.8];

/// A single overlay primitive in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DebugShape {
    /// Filled rectangle
    Rect { rect: Rect, color: DebugColor },
    /// Filled polygon (points in drawing order)
    Polygon { points: Vec<Vec2>, color: DebugColor },
    /// Downward arrow pointing at `at`, with a label under it
    Marker {
        at: Vec2,
        label: String,
        color: DebugColor,
    },
}

/// Collects debug shapes for one frame
#[derive(Debug, Default)]
pub struct DebugOverlay {
    shapes: Vec<DebugShape>,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, rect: Rect, color: DebugColor) {
        self.shapes.push(DebugShape::Rect { rect, color });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, color: DebugColor) {
        self.shapes.push(DebugShape::Polygon { points, color });
    }

    pub fn marker(&mut self, at: Vec2, label: &str, color: DebugColor) {
        self.shapes.push(DebugShape::Marker {
            at,
            label: label.to_string(),
            color,
        });
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of rectangles drawn with a given colour
    pub fn count_rects(&self, color: DebugColor) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, DebugShape::Rect { color: c, .. } if *c == color))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_collects_shapes() {
        let mut overlay = DebugOverlay::new();
        assert!(overlay.is_empty());

        overlay.rect(Rect::new(0.0, 0.0, 4.0, 4.0), COLLIDER_COLOR);
        overlay.rect(Rect::new(4.0, 0.0, 8.0, 4.0), PORTAL_COLOR);
        overlay.marker(Vec2::new(1.0, 2.0), "player", SPAWN_COLOR);

        assert_eq!(overlay.len(), 3);
        assert_eq!(overlay.count_rects(COLLIDER_COLOR), 1);
        assert!(matches!(
            &overlay.shapes()[2],
            DebugShape::Marker { label, .. } if label == "player"
        ));
    }
}
