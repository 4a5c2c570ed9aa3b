use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::geometry::Vec2;
use crate::map::{CollisionResolver, SpatialLayout, TaskRegistry, VentGraph};

use super::events::EventQueue;
use super::{
    ActionStates, GameEvent, GameState, GameStateMachine, InputAction,
    InteractionController, InteractionOutcome, MessageLog, TickScheduler, Transition,
};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(175.0, 175.0);
pub const MOVE_SPEED_PER_TICK: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Displacement requested on the most recent movement tick.
    pub velocity: Vec2,
}

/// Everything a HUD needs for one frame, copied out of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub state: GameState,
    pub remaining_seconds: u64,
    pub completed: u32,
    pub total: u32,
    pub player_position: Vec2,
    pub messages: Vec<String>,
}

/// One play-through: owns the map, the player, the mode machine and both
/// tick schedules. The host feeds it input edges and frame deltas.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    total_tasks: u32,
    layout: SpatialLayout,
    vents: VentGraph,
    tasks: TaskRegistry,
    player: Player,
    machine: GameStateMachine,
    held: ActionStates,
    scheduler: TickScheduler,
    events: EventQueue,
    messages: MessageLog,
    was_moving: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_layout(config, SpatialLayout::authored())
    }

    pub fn with_layout(config: SessionConfig, layout: SpatialLayout) -> Self {
        let total_tasks = clamp_total_tasks(config.total_task_count, layout.tasks().len());
        let vents = VentGraph::for_layout(&layout);
        let tasks = TaskRegistry::for_layout(&layout);
        let scheduler = TickScheduler::from_config(&config.ticks);
        let machine = GameStateMachine::new(config.time_limit());

        info!(
            time_limit_s = config.time_limit_seconds,
            total_tasks,
            rooms = layout.rooms().len(),
            vents = vents.len(),
            sound_enabled = config.sound_enabled,
            show_mini_map = config.show_mini_map,
            "session_started"
        );

        Self {
            config,
            total_tasks,
            layout,
            vents,
            tasks,
            player: Player {
                position: PLAYER_SPAWN,
                velocity: Vec2::ZERO,
            },
            machine,
            held: ActionStates::default(),
            scheduler,
            events: EventQueue::default(),
            messages: MessageLog::default(),
            was_moving: false,
        }
    }

    /// Key-down for a logical action. Movement is recorded as held; every
    /// other action fires once per call, so the host must filter key repeat.
    pub fn press(&mut self, action: InputAction) {
        if action.is_movement() {
            self.held.set(action, true);
            return;
        }

        if action == InputAction::Interact {
            self.interact();
            return;
        }

        let result = self.machine.handle_control(action);
        self.apply_control_result(result);
    }

    pub fn release(&mut self, action: InputAction) {
        self.held.set(action, false);
    }

    /// Drops every held action, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Advances session time by `dt`: movement ticks first, then message
    /// aging, then the countdown.
    pub fn advance(&mut self, dt: Duration) {
        if self.machine.has_exited() {
            return;
        }

        let plan = self.scheduler.plan_movement(dt);
        if self.machine.state().accepts_movement() {
            for _ in 0..plan.ticks_to_run {
                self.movement_tick();
            }
        }
        if plan.dropped_backlog > Duration::ZERO {
            warn!(
                dropped_backlog_ms = plan.dropped_backlog.as_millis() as u64,
                ticks_run = plan.ticks_to_run,
                "movement_backlog_dropped"
            );
        }

        self.messages.age(dt);

        let active_dt = self.machine.advance_clock(dt);
        let countdown_ticks = self.scheduler.countdown_ticks(active_dt);
        for _ in 0..countdown_ticks {
            let all_tasks_complete = self.tasks.is_all_complete(self.total_tasks);
            if let Some(transition) = self.machine.evaluate_countdown(all_tasks_complete) {
                self.apply_transition(transition);
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn has_ended(&self) -> bool {
        self.machine.has_exited()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.machine.clock().remaining_seconds()
    }

    pub fn active_elapsed(&self) -> Duration {
        self.machine.clock().active_elapsed()
    }

    pub fn completed_tasks(&self) -> u32 {
        self.tasks.completed_count()
    }

    pub fn total_tasks(&self) -> u32 {
        self.total_tasks
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position
    }

    pub fn layout(&self) -> &SpatialLayout {
        &self.layout
    }

    pub fn vent_graph(&self) -> &VentGraph {
        &self.vents
    }

    pub fn task_registry(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            state: self.state(),
            remaining_seconds: self.remaining_seconds(),
            completed: self.completed_tasks(),
            total: self.total_tasks,
            player_position: self.player.position,
            messages: self.messages.lines().to_vec(),
        }
    }

    /// Teleports the player without collision checks. For tooling and tests.
    pub fn debug_place_player(&mut self, position: Vec2) {
        debug!(x = position.x, y = position.y, "player_placed");
        self.player.position = position;
    }

    fn movement_tick(&mut self) {
        let velocity = self.held.movement_velocity(MOVE_SPEED_PER_TICK);
        let before = self.player.position;
        let after = CollisionResolver::new(&self.layout).try_move(before, velocity);
        self.player.velocity = velocity;
        self.player.position = after;

        let moving = after != before;
        if moving != self.was_moving {
            self.was_moving = moving;
            self.events.emit(if moving {
                GameEvent::MovementStarted
            } else {
                GameEvent::MovementStopped
            });
        }
    }

    fn interact(&mut self) {
        if let Err(error) = self.machine.check_interaction() {
            debug!(error = %error, "interaction_ignored");
            return;
        }

        let controller = InteractionController::new(&self.layout, &self.vents);
        match controller.attempt_interact(&mut self.tasks, self.player.position) {
            InteractionOutcome::None => {}
            InteractionOutcome::TaskCompleted {
                index,
                name,
                completed,
            } => {
                info!(
                    task = index,
                    completed,
                    total = self.total_tasks,
                    "task_completed"
                );
                self.messages
                    .push(format!("Task Completed! {completed}/{}", self.total_tasks));
                self.events.emit(GameEvent::TaskCompleted {
                    name,
                    count: completed,
                });
            }
            InteractionOutcome::Vented {
                from,
                to,
                destination,
            } => {
                info!(from, to, "vent_used");
                self.player.position = destination;
                self.messages.push("Vent Used!");
                self.events.emit(GameEvent::VentUsed { from, to });
            }
        }
    }

    fn apply_control_result(&mut self, result: Result<Transition, CoreError>) {
        match result {
            Ok(transition) => self.apply_transition(transition),
            Err(error) => debug!(error = %error, "transition_ignored"),
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Changed { from, to } => {
                if !to.accepts_movement() && self.was_moving {
                    self.was_moving = false;
                    self.events.emit(GameEvent::MovementStopped);
                }
                info!(
                    from = from.as_token(),
                    to = to.as_token(),
                    remaining_s = self.remaining_seconds(),
                    "state_changed"
                );
                self.events.emit(GameEvent::StateChanged { from, to });
            }
            Transition::Exit { from } => {
                info!(
                    final_state = from.as_token(),
                    completed = self.tasks.completed_count(),
                    events_emitted = self.events.emitted_total(),
                    "session_ended"
                );
                self.events.emit(GameEvent::SessionEnded { final_state: from });
            }
        }
    }
}

fn clamp_total_tasks(configured: u32, authored: usize) -> u32 {
    let authored = u32::try_from(authored).unwrap_or(u32::MAX).max(1);
    let clamped = configured.clamp(1, authored);
    if clamped != configured {
        warn!(configured, clamped, "total_task_count_clamped");
    }
    clamped
}
