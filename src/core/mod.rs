// Core primitives shared by the engine and game layers

pub mod math;
pub mod random;
pub mod timer;

pub use math::Rect;
pub use random::{RandomSource, ScriptedRandom};
pub use timer::FrameTimer;
