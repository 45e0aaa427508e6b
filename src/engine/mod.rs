// Engine modules: assets, timing, physics, rendering

pub mod assets;
pub mod game_loop;
pub mod physics;
pub mod renderer;
