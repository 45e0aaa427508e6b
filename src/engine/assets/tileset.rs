// Tilesets: grid atlases addressed by global tile ids, with tile animations

use std::collections::HashMap;

use glam::Vec2;

use super::SpriteAtlas;
use crate::core::math::Rect;
use crate::core::timer::FrameTimer;
use crate::engine::renderer::{DrawTarget, View};

/// Tiled stores flip/rotation flags in the top bits of a global id
const GID_FLAGS_MASK: u32 = 0x1FFF_FFFF;

/// Row-major grid of global tile ids (`0` = empty cell)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGrid {
    width: usize,
    cells: Vec<u32>,
}

impl TileGrid {
    /// Wrap a flat id list; a trailing partial row is kept
    pub fn new(width: usize, cells: Vec<u32>) -> Self {
        Self {
            width: width.max(1),
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (including a partial last row)
    pub fn height(&self) -> usize {
        self.cells.len().div_ceil(self.width)
    }

    pub fn get(&self, gx: usize, gy: usize) -> Option<u32> {
        if gx >= self.width {
            return None;
        }
        self.cells.get(gy * self.width + gx).copied()
    }

    /// Iterate `(gx, gy, gid)` in row-major order, skipping empty cells
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, gid)| **gid != 0)
            .map(move |(i, gid)| (i % self.width, i / self.width, *gid))
    }
}

/// Animation attached to one local tile id
#[derive(Debug, Clone)]
pub struct TileAnimation {
    /// Local tile ids to cycle through
    frames: Vec<u32>,
    timer: FrameTimer,
}

impl TileAnimation {
    pub fn new(frames: Vec<u32>, interval: f32) -> Self {
        Self {
            frames,
            timer: FrameTimer::new(interval),
        }
    }

    /// Tile id to show right now
    pub fn current(&self) -> Option<u32> {
        self.frames.get(self.timer.index()).copied()
    }
}

/// A tileset: one atlas plus per-tile animations.
#[derive(Debug, Clone)]
pub struct TileSet {
    atlas: SpriteAtlas,
    animations: HashMap<u32, TileAnimation>,
}

impl TileSet {
    pub fn new(atlas: SpriteAtlas) -> Self {
        Self {
            atlas,
            animations: HashMap::new(),
        }
    }

    /// Animate a local tile id through `frames`, `interval` seconds apart
    pub fn with_animation(mut self, tile: u32, frames: Vec<u32>, interval: f32) -> Self {
        self.animations.insert(tile, TileAnimation::new(frames, interval));
        self
    }

    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    /// Local id for a global id, if it belongs to this tileset
    pub fn local_id(&self, gid: u32, first_gid: u32) -> Option<u32> {
        let gid = gid & GID_FLAGS_MASK;
        if gid == 0 || gid < first_gid {
            return None;
        }
        let local = gid - first_gid;
        (local < self.atlas.cell_count()).then_some(local)
    }

    /// Advance all tile animations
    pub fn update(&mut self, dt: f32) {
        for animation in self.animations.values_mut() {
            let len = animation.frames.len();
            animation.timer.advance(dt, len);
        }
    }

    /// Screen rectangle of grid cell `(gx, gy)`.
    ///
    /// `offset` is the level's coordinate-system correction in unscaled map
    /// pixels.
    pub fn tile_rect(&self, view: &View, gx: usize, gy: usize, offset: Vec2) -> Rect {
        let size = self.atlas.scaled_size();
        let world = Vec2::new(gx as f32 * size.x, gy as f32 * size.y) - offset * self.atlas.scale;
        Rect::from_origin_size(view.world_to_screen(world), size)
    }

    /// One screen rectangle per occupied cell of this tileset, row-major
    pub fn colliders(
        &self,
        view: &View,
        grid: &TileGrid,
        offset: Vec2,
        first_gid: u32,
    ) -> Vec<Rect> {
        grid.occupied()
            .filter(|(_, _, gid)| self.local_id(*gid, first_gid).is_some())
            .map(|(gx, gy, _)| self.tile_rect(view, gx, gy, offset))
            .collect()
    }

    /// Draw every visible cell of the grid that belongs to this tileset
    pub fn render(
        &self,
        target: &mut dyn DrawTarget,
        view: &View,
        grid: &TileGrid,
        offset: Vec2,
        first_gid: u32,
    ) {
        let viewport = view.viewport();
        let size = self.atlas.scaled_size();

        for (gx, gy, gid) in grid.occupied() {
            let Some(local) = self.local_id(gid, first_gid) else {
                continue;
            };
            let dest = self.tile_rect(view, gx, gy, offset);
            if !viewport.admits_footprint(dest.top_left(), size) {
                continue;
            }
            let cell = self
                .animations
                .get(&local)
                .and_then(TileAnimation::current)
                .unwrap_or(local);
            target.blit(&self.atlas.image, Some(self.atlas.cell_source(cell)), dest);
        }
    }
}
