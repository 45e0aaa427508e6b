// View context: viewport size and world-to-screen mapping

use glam::Vec2;

use crate::core::math::{round_to_nearest_even, Rect};

/// 2D view onto the level
///
/// World coordinates are centred: `(0, 0)` maps to the middle of the
/// viewport, shifted by the scroll `offset`.
#[derive(Debug, Clone)]
pub struct View {
    /// Viewport size in pixels (always even)
    size: Vec2,
    /// Centre of the viewport in pixels
    center: Vec2,
    /// Scroll offset (negated camera target)
    pub offset: Vec2,
    /// Whether debug overlays should include view helpers
    pub debug: bool,
}

impl View {
    /// Create a view for a viewport of the given size
    pub fn new(width: f32, height: f32) -> Self {
        let mut view = Self {
            size: Vec2::ZERO,
            center: Vec2::ZERO,
            offset: Vec2::ZERO,
            debug: false,
        };
        view.resize(width, height);
        view
    }

    /// Enable view debug helpers
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Fit the view to a new viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(round_to_nearest_even(width), round_to_nearest_even(height));
        self.center = self.size / 2.0;
    }

    /// Centre the screen on a world point
    pub fn centre_on(&mut self, point: Vec2) {
        self.offset = -point;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Screen position of the world origin (viewport centre plus scroll)
    pub fn origin(&self) -> Vec2 {
        self.center + self.offset
    }

    /// World transform -> screen transform (0,0 in the corner)
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos + self.origin()
    }

    /// Screen transform -> world transform
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos - self.origin()
    }

    /// Screen-space rectangle covering the viewport
    pub fn viewport(&self) -> Viewport {
        Viewport {
            min: Vec2::ZERO,
            max: self.size,
        }
    }

    /// Project a world rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect.translated(self.origin())
    }
}

/// Viewport bounds in screen coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Whether a footprint whose top-left is at `corner` may be visible.
    ///
    /// The viewport is widened by the footprint on every side and the
    /// bounds are exclusive, so a sprite exactly one width off-screen is
    /// culled.
    pub fn admits_footprint(&self, corner: Vec2, footprint: Vec2) -> bool {
        corner.x > self.min.x - footprint.x
            && corner.x < self.max.x + footprint.x
            && corner.y > self.min.y - footprint.y
            && corner.y < self.max.y + footprint.y
    }
}
