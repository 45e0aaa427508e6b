// Sprite: a positioned cell of an atlas

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::assets::SpriteAtlas;
use crate::engine::physics::footprint_rect;
use crate::engine::renderer::{DrawTarget, View};

/// A positioned, drawable atlas cell. Items are plain sprites.
#[derive(Debug, Clone)]
pub struct Sprite {
    atlas: SpriteAtlas,
    /// Centre of the sprite in world coordinates
    pub position: Vec2,
    cell: u32,
}

impl Sprite {
    pub fn new(atlas: SpriteAtlas, position: Vec2) -> Self {
        Self {
            atlas,
            position,
            cell: 0,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Select the atlas cell drawn next
    pub fn set_cell(&mut self, cell: u32) {
        self.cell = cell;
    }

    pub fn cell(&self) -> u32 {
        self.cell
    }

    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    pub fn scaled_size(&self) -> Vec2 {
        self.atlas.scaled_size()
    }

    pub fn half_extents(&self) -> Vec2 {
        self.atlas.half_extents()
    }

    pub fn scale(&self) -> f32 {
        self.atlas.scale
    }

    /// Painter's-algorithm depth: the bottom edge in world space
    pub fn depth(&self) -> f32 {
        self.position.y + self.half_extents().y
    }

    /// Screen position of the footprint's top-left corner
    pub fn screen_corner(&self, view: &View) -> Vec2 {
        view.world_to_screen(self.position - self.half_extents())
    }

    /// Full footprint in screen space
    pub fn bounds(&self, view: &View) -> Rect {
        footprint_rect(self.position, self.half_extents(), view.origin())
    }

    pub fn render(&self, view: &View, target: &mut dyn DrawTarget) {
        let source = self.atlas.cell_source(self.cell);
        target.blit(&self.atlas.image, Some(source), self.bounds(view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::DrawList;

    fn hero() -> Sprite {
        Sprite::new(SpriteAtlas::new("hero", 96, 128, 3, 4).scaled(2.0), Vec2::ZERO)
    }

    #[test]
    fn test_bounds_are_centred_on_position() {
        let mut sprite = hero();
        sprite.set_position(10.0, -20.0);
        let view = View::new(400.0, 300.0);

        // 64x64 footprint, origin (200, 150)
        let bounds = sprite.bounds(&view);
        assert_eq!(bounds, Rect::new(178.0, 98.0, 242.0, 162.0));
        assert_eq!(sprite.screen_corner(&view), Vec2::new(178.0, 98.0));
        assert_eq!(sprite.depth(), 12.0);
    }

    #[test]
    fn test_render_blits_current_cell() {
        let mut sprite = hero();
        sprite.set_cell(4);
        let view = View::new(400.0, 300.0);
        let mut list = DrawList::new();

        sprite.render(&view, &mut list);

        let call = &list.calls()[0];
        assert_eq!(call.image, "hero");
        assert_eq!(call.source, Some(Rect::new(32.0, 32.0, 64.0, 64.0)));
        assert_eq!(call.dest, Rect::new(168.0, 118.0, 232.0, 182.0));
    }
}
