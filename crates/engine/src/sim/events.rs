use super::GameState;

/// Notifications for presentation collaborators (HUD toasts, audio). Emitted
/// in the order the session observed them.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    TaskCompleted { name: String, count: u32 },
    VentUsed { from: usize, to: usize },
    MovementStarted,
    MovementStopped,
    StateChanged { from: GameState, to: GameState },
    SessionEnded { final_state: GameState },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEventKind {
    TaskCompleted,
    VentUsed,
    MovementStarted,
    MovementStopped,
    StateChanged,
    SessionEnded,
}

impl GameEvent {
    pub fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::TaskCompleted { .. } => GameEventKind::TaskCompleted,
            GameEvent::VentUsed { .. } => GameEventKind::VentUsed,
            GameEvent::MovementStarted => GameEventKind::MovementStarted,
            GameEvent::MovementStopped => GameEventKind::MovementStopped,
            GameEvent::StateChanged { .. } => GameEventKind::StateChanged,
            GameEvent::SessionEnded { .. } => GameEventKind::SessionEnded,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    pending: Vec<GameEvent>,
    emitted_total: u64,
}

impl EventQueue {
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.emitted_total = self.emitted_total.saturating_add(1);
        self.pending.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn emitted_total(&self) -> u64 {
        self.emitted_total
    }
}
