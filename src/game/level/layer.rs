// Level layers

use glam::Vec2;

use crate::engine::assets::TileGrid;
use crate::engine::renderer::ImageRepeat;

/// Background or foreground picture
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    /// Image resource name
    pub image: String,
    /// Unscaled image size in map pixels
    pub size: Vec2,
    pub repeat: ImageRepeat,
    /// Fraction of the scroll offset the image follows
    pub parallax: Vec2,
}

/// What a layer holds and how it is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Decorative tiles
    Tiles { grid: TileGrid, offset: Vec2 },
    /// Tiles that also block movement
    Colliders { grid: TileGrid, offset: Vec2 },
    Image(ImageLayer),
    /// Where items and characters are drawn
    Objects,
}

/// One stratum of the level, drawn in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
}

impl Layer {
    pub fn tiles(name: &str, grid: TileGrid, offset: Vec2) -> Self {
        Self {
            name: name.to_string(),
            kind: LayerKind::Tiles { grid, offset },
        }
    }

    pub fn colliders(name: &str, grid: TileGrid, offset: Vec2) -> Self {
        Self {
            name: name.to_string(),
            kind: LayerKind::Colliders { grid, offset },
        }
    }

    pub fn image(name: &str, image: ImageLayer) -> Self {
        Self {
            name: name.to_string(),
            kind: LayerKind::Image(image),
        }
    }

    pub fn objects() -> Self {
        Self {
            name: "objects".to_string(),
            kind: LayerKind::Objects,
        }
    }

    pub fn is_collider(&self) -> bool {
        matches!(self.kind, LayerKind::Colliders { .. })
    }

    /// Tile grid and layer offset, for tile and collider layers
    pub fn tile_grid(&self) -> Option<(&TileGrid, Vec2)> {
        match &self.kind {
            LayerKind::Tiles { grid, offset } | LayerKind::Colliders { grid, offset } => {
                Some((grid, *offset))
            }
            _ => None,
        }
    }
}
