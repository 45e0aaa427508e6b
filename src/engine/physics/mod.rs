// Collision system: collider geometry, axis-separated sliding resolver,
// entity overlap queries and debug overlay shapes

mod collider;
mod collision;
mod debug;

pub use collider::{collider_rect, footprint_rect, ColliderBox};
pub use collision::{corners_overlap, permitted_travel, Direction};
pub use debug::{
    DebugColor, DebugOverlay, DebugShape, COLLIDER_COLOR, ORIGIN_COLOR, PORTAL_COLOR, SPAWN_COLOR,
    STAIRS_COLOR,
};
