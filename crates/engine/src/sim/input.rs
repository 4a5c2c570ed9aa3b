use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Logical input, decoupled from any platform key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ToggleMapView,
    TogglePause,
    Interact,
    Acknowledge,
}

const ACTION_COUNT: usize = 8;

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::MoveUp,
        InputAction::MoveDown,
        InputAction::ToggleMapView,
        InputAction::TogglePause,
        InputAction::Interact,
        InputAction::Acknowledge,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveLeft => 0,
            InputAction::MoveRight => 1,
            InputAction::MoveUp => 2,
            InputAction::MoveDown => 3,
            InputAction::ToggleMapView => 4,
            InputAction::TogglePause => 5,
            InputAction::Interact => 6,
            InputAction::Acknowledge => 7,
        }
    }

    pub const fn is_movement(self) -> bool {
        matches!(
            self,
            InputAction::MoveLeft
                | InputAction::MoveRight
                | InputAction::MoveUp
                | InputAction::MoveDown
        )
    }
}

/// Set of currently held actions. The movement tick reads it every tick
/// without consuming anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }

    /// Velocity for one movement tick. When both directions of an axis are
    /// held, right wins over left and down wins over up.
    pub fn movement_velocity(&self, speed: f32) -> Vec2 {
        let mut velocity = Vec2::ZERO;
        if self.is_down(InputAction::MoveLeft) {
            velocity.x = -speed;
        }
        if self.is_down(InputAction::MoveRight) {
            velocity.x = speed;
        }
        if self.is_down(InputAction::MoveUp) {
            velocity.y = -speed;
        }
        if self.is_down(InputAction::MoveDown) {
            velocity.y = speed;
        }
        velocity
    }
}
