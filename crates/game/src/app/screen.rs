use std::time::Duration;

use lightsout_engine::{GameEvent, InputAction, Session, SessionConfig};
use tracing::info;
use winit::keyboard::KeyCode;

use super::audio::AudioDirector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    Start,
    ToggleSound,
    ToggleMiniMap,
    Exit,
}

/// What the renderer should draw this frame.
pub(crate) enum ScreenView<'a> {
    Menu { sound_enabled: bool, show_mini_map: bool },
    Playing(&'a Session),
}

enum Screen {
    Menu,
    Playing(Box<Session>),
}

/// Menu and play screens. The session only lives while playing; an
/// acknowledged game over or win drops it and returns to the menu.
pub(crate) struct ScreenMachine {
    base_config: SessionConfig,
    screen: Screen,
    audio: AudioDirector,
    sessions_started: u32,
}

impl ScreenMachine {
    pub(crate) fn new(base_config: SessionConfig, audio: AudioDirector) -> Self {
        Self {
            base_config,
            screen: Screen::Menu,
            audio,
            sessions_started: 0,
        }
    }

    pub(crate) fn view(&self) -> ScreenView<'_> {
        match &self.screen {
            Screen::Menu => ScreenView::Menu {
                sound_enabled: self.base_config.sound_enabled,
                show_mini_map: self.base_config.show_mini_map,
            },
            Screen::Playing(session) => ScreenView::Playing(session),
        }
    }

    pub(crate) fn is_playing(&self) -> bool {
        matches!(self.screen, Screen::Playing(_))
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode, pressed: bool) -> ScreenCommand {
        match &mut self.screen {
            Screen::Menu => {
                if !pressed {
                    return ScreenCommand::None;
                }
                match menu_command_for_key(key) {
                    Some(command) => self.apply_menu_command(command),
                    None => ScreenCommand::None,
                }
            }
            Screen::Playing(session) => {
                let Some(action) = play_action_for_key(key) else {
                    return ScreenCommand::None;
                };
                if pressed {
                    session.press(action);
                } else {
                    session.release(action);
                }
                self.pump_session_events();
                ScreenCommand::None
            }
        }
    }

    pub(crate) fn release_all(&mut self) {
        if let Screen::Playing(session) = &mut self.screen {
            session.release_all();
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        if let Screen::Playing(session) = &mut self.screen {
            session.advance(dt);
            self.pump_session_events();
        }
    }

    fn apply_menu_command(&mut self, command: MenuCommand) -> ScreenCommand {
        match command {
            MenuCommand::Start => {
                self.sessions_started = self.sessions_started.saturating_add(1);
                info!(session = self.sessions_started, "session_requested");
                let session = Session::new(self.base_config.clone());
                self.audio.begin_session(self.base_config.sound_enabled);
                self.screen = Screen::Playing(Box::new(session));
            }
            MenuCommand::ToggleSound => {
                self.base_config.sound_enabled = !self.base_config.sound_enabled;
                info!(sound_enabled = self.base_config.sound_enabled, "setting_changed");
            }
            MenuCommand::ToggleMiniMap => {
                self.base_config.show_mini_map = !self.base_config.show_mini_map;
                info!(show_mini_map = self.base_config.show_mini_map, "setting_changed");
            }
            MenuCommand::Exit => {
                info!(reason = "menu_exit", "shutdown_requested");
                return ScreenCommand::Quit;
            }
        }
        ScreenCommand::None
    }

    fn pump_session_events(&mut self) {
        let Screen::Playing(session) = &mut self.screen else {
            return;
        };
        let mut ended = false;
        for event in session.drain_events() {
            self.audio.on_event(&event);
            if matches!(event, GameEvent::SessionEnded { .. }) {
                ended = true;
            }
        }
        if ended {
            self.audio.end_session();
            self.screen = Screen::Menu;
            info!("returned_to_menu");
        }
    }
}

fn play_action_for_key(key: KeyCode) -> Option<InputAction> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(InputAction::MoveUp),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(InputAction::MoveDown),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(InputAction::MoveLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(InputAction::MoveRight),
        KeyCode::KeyM => Some(InputAction::ToggleMapView),
        KeyCode::KeyP => Some(InputAction::TogglePause),
        KeyCode::KeyE => Some(InputAction::Interact),
        KeyCode::Escape => Some(InputAction::Acknowledge),
        _ => None,
    }
}

fn menu_command_for_key(key: KeyCode) -> Option<MenuCommand> {
    match key {
        KeyCode::Enter | KeyCode::NumpadEnter => Some(MenuCommand::Start),
        KeyCode::KeyS => Some(MenuCommand::ToggleSound),
        KeyCode::KeyN => Some(MenuCommand::ToggleMiniMap),
        KeyCode::Escape => Some(MenuCommand::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use lightsout_engine::GameState;

    use super::super::audio::LogAudioSink;
    use super::*;

    fn machine() -> ScreenMachine {
        ScreenMachine::new(
            SessionConfig::default(),
            AudioDirector::new(Box::new(LogAudioSink)),
        )
    }

    fn tap(machine: &mut ScreenMachine, key: KeyCode) -> ScreenCommand {
        let command = machine.handle_key(key, true);
        machine.handle_key(key, false);
        command
    }

    fn playing_state(machine: &ScreenMachine) -> Option<GameState> {
        match machine.view() {
            ScreenView::Playing(session) => Some(session.state()),
            ScreenView::Menu { .. } => None,
        }
    }

    #[test]
    fn menu_settings_toggle_before_start() {
        let mut machine = machine();
        tap(&mut machine, KeyCode::KeyS);
        tap(&mut machine, KeyCode::KeyN);
        match machine.view() {
            ScreenView::Menu {
                sound_enabled,
                show_mini_map,
            } => {
                assert!(!sound_enabled);
                assert!(!show_mini_map);
            }
            ScreenView::Playing(_) => panic!("should still be in the menu"),
        }

        tap(&mut machine, KeyCode::Enter);
        match machine.view() {
            ScreenView::Playing(session) => {
                assert!(!session.config().sound_enabled);
                assert!(!session.config().show_mini_map);
            }
            ScreenView::Menu { .. } => panic!("session should have started"),
        }
    }

    #[test]
    fn escape_quits_from_menu_but_not_from_play() {
        let mut machine = machine();
        tap(&mut machine, KeyCode::Enter);
        assert_eq!(tap(&mut machine, KeyCode::Escape), ScreenCommand::None);
        assert_eq!(playing_state(&machine), Some(GameState::Playing));

        let mut menu = self::machine();
        assert_eq!(tap(&mut menu, KeyCode::Escape), ScreenCommand::Quit);
    }

    #[test]
    fn s_key_moves_while_playing() {
        let mut machine = machine();
        tap(&mut machine, KeyCode::Enter);
        machine.handle_key(KeyCode::KeyS, true);
        machine.advance(Duration::from_millis(100));
        match machine.view() {
            ScreenView::Playing(session) => assert!(session.player_position().y > 175.0),
            ScreenView::Menu { .. } => panic!("expected play screen"),
        }
    }

    #[test]
    fn acknowledged_game_over_returns_to_menu() {
        let mut machine = machine();
        tap(&mut machine, KeyCode::Enter);
        for _ in 0..300 {
            machine.advance(Duration::from_secs(1));
        }
        assert_eq!(playing_state(&machine), Some(GameState::GameOver));

        tap(&mut machine, KeyCode::Escape);
        assert!(!machine.is_playing());

        tap(&mut machine, KeyCode::Enter);
        assert_eq!(playing_state(&machine), Some(GameState::Playing));
    }

    #[test]
    fn pause_and_map_keys_drive_the_session() {
        let mut machine = machine();
        tap(&mut machine, KeyCode::Enter);
        tap(&mut machine, KeyCode::KeyP);
        assert_eq!(playing_state(&machine), Some(GameState::Paused));
        tap(&mut machine, KeyCode::Escape);
        tap(&mut machine, KeyCode::KeyM);
        assert_eq!(playing_state(&machine), Some(GameState::MapView));
    }
}
