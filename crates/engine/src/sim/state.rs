use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::{CountdownClock, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    MapView,
    Paused,
    GameOver,
    GameWon,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::GameWon)
    }

    pub fn accepts_movement(self) -> bool {
        matches!(self, GameState::Playing | GameState::MapView)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            GameState::Playing => "playing",
            GameState::MapView => "map_view",
            GameState::Paused => "paused",
            GameState::GameOver => "game_over",
            GameState::GameWon => "game_won",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: GameState, to: GameState },
    /// Acknowledged from a terminal state. The session is over and ownership
    /// passes back to the host.
    Exit { from: GameState },
}

/// Mode machine for one session. Starts in `Playing` with its countdown
/// running; the clock runs only while the state is `Playing`. After an
/// `Exit` every further request is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateMachine {
    state: GameState,
    exited: bool,
    clock: CountdownClock,
}

impl GameStateMachine {
    pub fn new(time_limit: Duration) -> Self {
        let mut clock = CountdownClock::new(time_limit);
        clock.start();
        Self {
            state: GameState::Playing,
            exited: false,
            clock,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn clock(&self) -> &CountdownClock {
        &self.clock
    }

    /// Feeds `dt` to the countdown and returns the part of it that counted as
    /// active time: all of it while playing, none otherwise.
    pub fn advance_clock(&mut self, dt: Duration) -> Duration {
        if !self.clock.is_running() {
            return Duration::ZERO;
        }
        self.clock.advance(dt);
        dt
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Routes a control action to its transition function. Movement actions
    /// have no transition of their own.
    pub fn handle_control(&mut self, action: InputAction) -> Result<Transition, CoreError> {
        match action {
            InputAction::ToggleMapView => self.toggle_map(),
            InputAction::TogglePause => self.toggle_pause(),
            InputAction::Acknowledge => self.acknowledge(),
            _ => Err(self.invalid(action)),
        }
    }

    pub fn toggle_map(&mut self) -> Result<Transition, CoreError> {
        match self.live_state(InputAction::ToggleMapView)? {
            GameState::Playing => Ok(self.change_to(GameState::MapView)),
            GameState::MapView => Ok(self.change_to(GameState::Playing)),
            _ => Err(self.invalid(InputAction::ToggleMapView)),
        }
    }

    pub fn toggle_pause(&mut self) -> Result<Transition, CoreError> {
        match self.live_state(InputAction::TogglePause)? {
            GameState::Playing => Ok(self.change_to(GameState::Paused)),
            GameState::Paused => Ok(self.change_to(GameState::Playing)),
            _ => Err(self.invalid(InputAction::TogglePause)),
        }
    }

    pub fn acknowledge(&mut self) -> Result<Transition, CoreError> {
        match self.live_state(InputAction::Acknowledge)? {
            GameState::Paused | GameState::MapView => Ok(self.change_to(GameState::Playing)),
            from @ (GameState::GameOver | GameState::GameWon) => {
                self.exited = true;
                Ok(Transition::Exit { from })
            }
            GameState::Playing => Err(self.invalid(InputAction::Acknowledge)),
        }
    }

    /// Interaction is only legal while playing.
    pub fn check_interaction(&self) -> Result<(), CoreError> {
        match self.live_state(InputAction::Interact)? {
            GameState::Playing => Ok(()),
            _ => Err(self.invalid(InputAction::Interact)),
        }
    }

    /// Once-per-countdown-tick evaluation. Only meaningful while playing; the
    /// win check is applied after the time-out check so finishing the last
    /// task on the final second still wins.
    pub fn evaluate_countdown(&mut self, all_tasks_complete: bool) -> Option<Transition> {
        if self.exited || self.state != GameState::Playing {
            return None;
        }

        let mut next = None;
        if self.clock.is_expired() {
            next = Some(GameState::GameOver);
        }
        if all_tasks_complete {
            next = Some(GameState::GameWon);
        }
        next.map(|to| self.change_to(to))
    }

    fn live_state(&self, action: InputAction) -> Result<GameState, CoreError> {
        if self.exited {
            return Err(self.invalid(action));
        }
        Ok(self.state)
    }

    fn change_to(&mut self, to: GameState) -> Transition {
        let from = self.state;
        self.state = to;
        if to == GameState::Playing {
            self.clock.resume();
        } else {
            self.clock.pause();
        }
        Transition::Changed { from, to }
    }

    fn invalid(&self, action: InputAction) -> CoreError {
        CoreError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}
