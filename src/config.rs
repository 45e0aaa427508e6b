// Runtime configuration
//
// Everything tunable lives in one RON document. Every section has a
// default so a partial (or empty) file is valid.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::engine::assets::{AssetError, AtlasSpec, TileSet};
use crate::engine::game_loop::FIXED_TIMESTEP;
use crate::engine::physics::ColliderBox;
use crate::game::characters::{Actor, ActorStats, AnimationSet, Mob, Sprite};

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// MOB wandering tuning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    /// Shortest leg of a wander, whole seconds
    pub min_duration_secs: i32,
    /// Longest leg of a wander, whole seconds
    pub max_duration_secs: i32,
    /// Permitted travel below this counts as blocked
    pub blocked_epsilon: f32,
}

impl WanderConfig {
    pub const DEFAULT: WanderConfig = WanderConfig {
        min_duration_secs: 1,
        max_duration_secs: 2,
        blocked_epsilon: 0.001,
    };
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
    pub debug: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            debug: false,
        }
    }
}

/// One animated tile: local id, frame ids and seconds per frame
#[derive(Debug, Clone, Deserialize)]
pub struct TileAnimationConfig {
    pub tile: u32,
    pub frames: Vec<u32>,
    pub interval: f32,
}

/// A tileset as referenced from TMX `<tileset source=..>`
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetConfig {
    pub atlas: AtlasSpec,
    #[serde(default)]
    pub animations: Vec<TileAnimationConfig>,
}

impl TilesetConfig {
    pub fn build(&self) -> Result<TileSet, ConfigError> {
        let tileset = self.animations.iter().fold(
            TileSet::new(self.atlas.resolve()?),
            |tileset, anim| tileset.with_animation(anim.tile, anim.frames.clone(), anim.interval),
        );
        Ok(tileset)
    }
}

fn default_count() -> u32 {
    1
}

/// A kind of MOB and where to spawn it
#[derive(Debug, Clone, Deserialize)]
pub struct MobTemplate {
    pub name: String,
    pub atlas: AtlasSpec,
    #[serde(default)]
    pub stats: ActorStats,
    #[serde(default)]
    pub animation: AnimationSet,
    #[serde(default)]
    pub collider: Option<ColliderBox>,
    /// Spawn point category to place them at
    pub spawn: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

impl MobTemplate {
    /// Build one MOB of this kind standing at `position`
    pub fn build(&self, position: Vec2, wander: WanderConfig) -> Result<Mob, ConfigError> {
        let sprite = Sprite::new(self.atlas.resolve()?, position);
        let mut actor = Actor::new(sprite, self.stats, self.animation.clone());
        if let Some(collider) = self.collider {
            actor = actor.with_collider(collider);
        }
        Ok(Mob::new(actor, wander))
    }
}

/// Top-level scene configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub view: ViewConfig,
    /// Seconds per simulation step
    pub fixed_timestep: f32,
    /// Seed for the level's random source (OS entropy when absent)
    pub seed: Option<u64>,
    /// Map scale applied by the level loader
    pub scale: f32,
    /// Prefix for image layer resources
    pub resource_prefix: String,
    /// Frames the demo runs before exiting
    pub frames: u32,
    pub wander: WanderConfig,
    /// Tilesets keyed by TMX source name
    pub tilesets: HashMap<String, TilesetConfig>,
    pub mobs: Vec<MobTemplate>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            fixed_timestep: FIXED_TIMESTEP,
            seed: None,
            scale: 1.0,
            resource_prefix: String::new(),
            frames: 300,
            wander: WanderConfig::DEFAULT,
            tilesets: HashMap::new(),
            mobs: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Parse a RON document
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Resolve every configured tileset
    pub fn build_tilesets(&self) -> Result<HashMap<String, TileSet>, ConfigError> {
        self.tilesets
            .iter()
            .map(|(source, config)| config.build().map(|tileset| (source.clone(), tileset)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SceneConfig::from_ron_str("()").unwrap();
        assert_eq!(config.wander, WanderConfig::DEFAULT);
        assert_eq!(config.view.width, 1280.0);
        assert_relative_eq!(config.fixed_timestep, FIXED_TIMESTEP);
        assert!(config.seed.is_none());
        assert!(config.mobs.is_empty());
    }

    #[test]
    fn test_full_document() {
        let config = SceneConfig::from_ron_str(
            r#"(
                view: (width: 640.0, height: 480.0),
                seed: Some(7),
                scale: 2.0,
                wander: (max_duration_secs: 3),
                tilesets: {
                    "terrain.tsx": (
                        atlas: (
                            image: "terrain", width: Some(64), height: Some(64), cell: Some(16),
                        ),
                        animations: [(tile: 3, frames: [3, 4, 5], interval: 0.25)],
                    ),
                },
                mobs: [
                    (
                        name: "slime",
                        atlas: (
                            image: "slime", width: Some(96), height: Some(128),
                            cols: Some(3), rows: Some(4),
                        ),
                        stats: (speed: 30.0),
                        animation: (speed: 20.0, idle: [0], move_down: [0, 1, 2]),
                        spawn: "mob",
                        count: 3,
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(config.view.height, 480.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.wander.min_duration_secs, 1);
        assert_eq!(config.wander.max_duration_secs, 3);

        let tilesets = config.build_tilesets().unwrap();
        assert_eq!(tilesets["terrain.tsx"].atlas().cell_count(), 16);

        let template = &config.mobs[0];
        assert_eq!(template.count, 3);
        let mob = template.build(Vec2::new(5.0, 6.0), config.wander).unwrap();
        assert_eq!(mob.actor.position(), Vec2::new(5.0, 6.0));
        assert_eq!(mob.actor.stats().speed, 30.0);
        assert_relative_eq!(mob.actor.animation().interval, 0.2);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SceneConfig::from_ron_str("(view: 12)"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SceneConfig::load("does/not/exist.ron"),
            Err(ConfigError::Io(_))
        ));
    }
}
