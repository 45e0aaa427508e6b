//! Tile-based 2D scene runtime.
//!
//! Levels are stacks of tile, image and object layers. Actors slide along
//! collider tiles one axis at a time, play per-direction animations, and
//! MOBs wander on their own. Drawing goes through [`engine::renderer::DrawTarget`]
//! so the simulation runs without a display.

pub mod config;
pub mod core;
pub mod engine;
pub mod game;
