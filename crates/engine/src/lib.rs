pub mod config;
pub mod error;
pub mod geometry;
pub mod map;
pub mod sim;

pub use config::{SessionConfig, TickConfig};
pub use error::{CoreError, IndexKind};
pub use geometry::{Circle, Rect, Vec2};
pub use map::{
    CollisionResolver, Room, RoomCategory, SpatialLayout, Task, TaskRegistry, Vent, VentGraph,
    Wall, CORRIDOR_MAX, CORRIDOR_MIN, DEFAULT_VENT_OFFSET, MAP_EXTENT,
};
pub use sim::{
    plan_sim_steps, ActionStates, CountdownClock, GameEvent, GameEventKind, GameState,
    GameStateMachine, HudSnapshot, InputAction, InteractionController, InteractionOutcome,
    MessageLog, Player, Session, StepPlan, TickScheduler, Transition, MESSAGE_LIFETIME,
    MOVE_SPEED_PER_TICK, PLAYER_SPAWN,
};
