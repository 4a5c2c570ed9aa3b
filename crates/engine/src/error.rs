use std::fmt;

use thiserror::Error;

use crate::sim::{GameState, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Vent,
    Task,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Vent => f.write_str("vent"),
            IndexKind::Task => f.write_str("task"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A caller passed an index that the layout never handed out.
    #[error("{kind} index {index} out of range (count {len})")]
    OutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },
    /// The current state defines no transition for the action. Input can race
    /// a state change by one tick, so callers drop these.
    #[error("no transition for {action:?} while {state:?}")]
    InvalidTransition {
        state: GameState,
        action: InputAction,
    },
}
