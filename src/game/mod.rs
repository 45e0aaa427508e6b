// Game modules: characters and levels

pub mod characters;
pub mod level;
