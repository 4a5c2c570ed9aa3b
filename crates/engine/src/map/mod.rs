mod collision;
mod layout;
mod tasks;
mod vents;

pub use collision::CollisionResolver;
pub use layout::{
    Room, RoomCategory, SpatialLayout, Task, Vent, Wall, CORRIDOR_MAX, CORRIDOR_MIN, MAP_EXTENT,
};
pub use tasks::TaskRegistry;
pub use vents::{VentGraph, DEFAULT_VENT_OFFSET};
