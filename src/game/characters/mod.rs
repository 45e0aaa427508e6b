// Character system
//
// Everything that lives on the map and moves or animates:
// - Sprite: positioned atlas cell (items)
// - Actor: sprite + collision + directional animation
// - Mob: actor driven by a wander state machine
// - Roster: keyed, ordered collections of the above

pub mod animation;
pub mod character;
pub mod roster;
pub mod sprite;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationSet, Track};
pub use character::{Actor, Horizontal, Vertical};
pub use roster::Roster;
pub use sprite::Sprite;
pub use state::{Action, Heading, Mob, WanderBrain};
pub use stats::{ActorStats, BASE_STATS};
