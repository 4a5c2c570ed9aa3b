mod clock;
mod events;
mod input;
mod interaction;
mod messages;
mod schedule;
mod session;
mod state;

pub use clock::CountdownClock;
pub use events::{GameEvent, GameEventKind};
pub use input::{ActionStates, InputAction};
pub use interaction::{InteractionController, InteractionOutcome};
pub use messages::{MessageLog, MESSAGE_LIFETIME};
pub use schedule::{plan_sim_steps, StepPlan, TickScheduler};
pub use session::{HudSnapshot, Player, Session, MOVE_SPEED_PER_TICK, PLAYER_SPAWN};
pub use state::{GameState, GameStateMachine, Transition};
