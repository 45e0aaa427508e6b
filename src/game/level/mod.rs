// Level model
//
// A level owns its layers, tilesets, markers and the three entity
// populations, and drives their per-frame update and draw.

mod layer;
pub mod loader;
mod markers;
pub mod render;

pub use layer::{ImageLayer, Layer, LayerKind};
pub use loader::{LevelLoader, LoadError};
pub use markers::{Portal, Stair};

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::math::Rect;
use crate::core::random::RandomSource;
use crate::engine::assets::TileSet;
use crate::engine::physics::{
    DebugOverlay, COLLIDER_COLOR, ORIGIN_COLOR, PORTAL_COLOR, SPAWN_COLOR, STAIRS_COLOR,
};
use crate::engine::renderer::{compose_background, DrawTarget, View};
use crate::game::characters::{Actor, Mob, Roster, Sprite};

/// A tileset placed in the level's global tile id space
#[derive(Debug, Clone)]
pub struct TilesetEntry {
    /// Name the map refers to the tileset by
    pub source: String,
    pub tileset: TileSet,
    /// Global id of the tileset's first tile
    pub first_gid: u32,
}

/// Map with all tiles, items and actors
pub struct Level {
    /// Centre of the coordinate system in map pixels (not scroll)
    pub offset: Vec2,
    pub scale: f32,

    tilesets: Vec<TilesetEntry>,
    layers: Vec<Layer>,

    items: Roster<Sprite>,
    characters: Roster<Actor>,
    npcs: Roster<Actor>,
    mobs: Roster<Mob>,

    spawn_points: BTreeMap<String, Vec<Vec2>>,
    stairs: Vec<Stair>,
    portals: Vec<Portal>,

    rng: Box<dyn RandomSource>,
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("offset", &self.offset)
            .field("scale", &self.scale)
            .field("layers", &self.layers.len())
            .field("tilesets", &self.tilesets.len())
            .field("items", &self.items.len())
            .field("characters", &self.characters.len())
            .field("npcs", &self.npcs.len())
            .field("mobs", &self.mobs.len())
            .finish_non_exhaustive()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Empty level seeded from OS entropy
    pub fn new() -> Self {
        Self::with_random_source(Box::new(StdRng::from_entropy()))
    }

    /// Empty level with a reproducible random source
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random_source(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_random_source(rng: Box<dyn RandomSource>) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            tilesets: Vec::new(),
            layers: Vec::new(),
            items: Roster::new(),
            characters: Roster::new(),
            npcs: Roster::new(),
            mobs: Roster::new(),
            spawn_points: BTreeMap::new(),
            stairs: Vec::new(),
            portals: Vec::new(),
            rng,
        }
    }

    pub fn add_tileset(&mut self, source: &str, tileset: TileSet, first_gid: u32) {
        self.tilesets.push(TilesetEntry {
            source: source.to_string(),
            tileset,
            first_gid,
        });
    }

    pub fn tilesets(&self) -> &[TilesetEntry] {
        &self.tilesets
    }

    /// Append a layer on top of the existing ones
    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn add_spawn_point(&mut self, category: &str, point: Vec2) {
        self.spawn_points
            .entry(category.to_string())
            .or_default()
            .push(point);
    }

    pub fn spawn_categories(&self) -> impl Iterator<Item = &str> {
        self.spawn_points.keys().map(String::as_str)
    }

    pub fn add_stair(&mut self, stair: Stair) {
        self.stairs.push(stair);
    }

    pub fn add_portal(&mut self, portal: Portal) {
        self.portals.push(portal);
    }

    pub fn items(&self) -> &Roster<Sprite> {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Roster<Sprite> {
        &mut self.items
    }

    /// Player-controlled actors
    pub fn characters(&self) -> &Roster<Actor> {
        &self.characters
    }

    pub fn characters_mut(&mut self) -> &mut Roster<Actor> {
        &mut self.characters
    }

    /// Passive actors; they only play their idle animation
    pub fn npcs(&self) -> &Roster<Actor> {
        &self.npcs
    }

    pub fn npcs_mut(&mut self) -> &mut Roster<Actor> {
        &mut self.npcs
    }

    pub fn mobs(&self) -> &Roster<Mob> {
        &self.mobs
    }

    pub fn mobs_mut(&mut self) -> &mut Roster<Mob> {
        &mut self.mobs
    }

    /// The level's random source, for callers that seed their own choices
    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Screen rectangles of every collider tile.
    ///
    /// Only the first tileset is consulted. Layers are visited in order and
    /// tiles row-major within a layer.
    pub fn colliders(&self, view: &View) -> Vec<Rect> {
        let Some(entry) = self.tilesets.first() else {
            return Vec::new();
        };

        self.layers
            .iter()
            .filter_map(|layer| match &layer.kind {
                LayerKind::Colliders { grid, .. } => Some(grid),
                _ => None,
            })
            .flat_map(|grid| {
                entry
                    .tileset
                    .colliders(view, grid, self.offset, entry.first_gid)
            })
            .collect()
    }

    /// A random spawn point of `category`, or `fallback` when there is none
    pub fn spawn_point(&mut self, category: &str, fallback: Vec2) -> Vec2 {
        let Some(points) = self.spawn_points.get(category).filter(|p| !p.is_empty()) else {
            return fallback;
        };
        let last = points.len() as i32 - 1;
        let index = self.rng.range_inclusive(0, last) as usize;
        points.get(index).copied().unwrap_or(fallback)
    }

    /// All spawn points of `category`, or `fallback` when there are none
    pub fn spawn_points<'a>(&'a self, category: &str, fallback: &'a [Vec2]) -> &'a [Vec2] {
        match self.spawn_points.get(category) {
            Some(points) if !points.is_empty() => points,
            _ => fallback,
        }
    }

    pub fn stairs(&self) -> &[Stair] {
        &self.stairs
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Cache bounds and top-edge angles of every stair
    pub fn precalc_stairs(&mut self) {
        for stair in &mut self.stairs {
            stair.precalc();
        }
    }

    /// Advance one simulation step.
    ///
    /// Tile animations tick, NPCs play their idle animation and every MOB
    /// runs its state machine against this step's colliders. Player
    /// characters are left to whoever steers them.
    pub fn update(&mut self, view: &View, dt: f32) {
        for entry in &mut self.tilesets {
            entry.tileset.update(dt);
        }

        let colliders = self.colliders(view);

        for npc in self.npcs.values_mut() {
            npc.animate_idle(dt);
        }

        let rng = self.rng.as_mut();
        for mob in self.mobs.values_mut() {
            mob.update(dt, &colliders, view, rng);
        }
    }

    /// Draw every layer in order
    pub fn render(&self, view: &View, target: &mut dyn DrawTarget) {
        for layer in &self.layers {
            match &layer.kind {
                LayerKind::Image(image) => compose_background(
                    target,
                    view,
                    &image.image,
                    image.size * self.scale,
                    image.repeat,
                    image.parallax,
                ),
                LayerKind::Objects => self.render_objects(view, target),
                LayerKind::Tiles { grid, offset } | LayerKind::Colliders { grid, offset } => {
                    for entry in &self.tilesets {
                        entry.tileset.render(
                            target,
                            view,
                            grid,
                            self.offset - *offset,
                            entry.first_gid,
                        );
                    }
                }
            }
        }
    }

    /// Items first, then all actors back to front
    fn render_objects(&self, view: &View, target: &mut dyn DrawTarget) {
        for item in self.items.values() {
            item.render(view, target);
        }

        let actors = self
            .characters
            .values()
            .chain(self.npcs.values())
            .map(|actor| &actor.sprite)
            .chain(self.mobs.values().map(|mob| &mob.actor.sprite));

        for sprite in render::draw_order(view, actors) {
            sprite.render(view, target);
        }
    }

    /// Debug shapes for colliders, markers, item footprints and player hit-boxes
    pub fn debug(&self, view: &View) -> DebugOverlay {
        let mut overlay = DebugOverlay::new();
        let origin = view.origin();

        for layer in self.layers.iter().filter(|layer| layer.is_collider()) {
            if let Some((grid, _)) = layer.tile_grid() {
                for entry in &self.tilesets {
                    for rect in entry.tileset.colliders(view, grid, self.offset, entry.first_gid) {
                        overlay.rect(rect, COLLIDER_COLOR);
                    }
                }
            }
        }

        for (category, points) in &self.spawn_points {
            for point in points {
                overlay.marker(*point + origin, category, SPAWN_COLOR);
            }
        }

        for stair in &self.stairs {
            let points = stair.points.iter().map(|p| *p + origin).collect();
            overlay.polygon(points, STAIRS_COLOR);
        }

        for portal in &self.portals {
            overlay.rect(view.rect_to_screen(portal.rect), PORTAL_COLOR);
        }

        for item in self.items.values() {
            overlay.rect(item.bounds(view), COLLIDER_COLOR);
        }
        for character in self.characters.values() {
            overlay.rect(character.collider_rect(view), COLLIDER_COLOR);
        }

        if view.debug {
            overlay.marker(origin, "center", ORIGIN_COLOR);
        }

        overlay
    }
}
