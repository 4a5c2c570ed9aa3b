use std::time::Duration;

use lightsout_engine::{
    Circle, GameEvent, GameEventKind, GameState, InputAction, Rect, Room, RoomCategory, Session,
    SessionConfig, SpatialLayout, Vec2,
};

const ONE_SECOND: Duration = Duration::from_secs(1);

fn new_session() -> Session {
    Session::new(SessionConfig::default())
}

fn tap(session: &mut Session, action: InputAction) {
    session.press(action);
    session.release(action);
}

fn task_centers(session: &Session) -> Vec<Vec2> {
    session
        .layout()
        .tasks()
        .iter()
        .map(|task| task.marker.center)
        .collect()
}

fn complete_every_task(session: &mut Session) {
    for center in task_centers(session) {
        session.debug_place_player(center);
        tap(session, InputAction::Interact);
    }
}

fn run_to_game_over(session: &mut Session) {
    for _ in 0..300 {
        session.advance(ONE_SECOND);
    }
    assert_eq!(session.state(), GameState::GameOver);
}

#[test]
fn idle_session_loses_when_time_runs_out() {
    let mut session = new_session();
    for _ in 0..299 {
        session.advance(ONE_SECOND);
    }
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.remaining_seconds(), 1);

    session.advance(ONE_SECOND);
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.remaining_seconds(), 0);
    assert!(session.drain_events().contains(&GameEvent::StateChanged {
        from: GameState::Playing,
        to: GameState::GameOver,
    }));
}

#[test]
fn completing_all_tasks_wins_on_next_countdown_tick() {
    let mut session = new_session();
    session.advance(Duration::from_secs(30));
    complete_every_task(&mut session);
    assert_eq!(session.completed_tasks(), 9);

    session.advance(ONE_SECOND);
    assert_eq!(session.state(), GameState::GameWon);
    assert!(session.remaining_seconds() > 0);

    let completions: Vec<u32> = session
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::TaskCompleted { count, .. } => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(completions, (1..=9).collect::<Vec<_>>());
}

#[test]
fn win_overrides_time_out_on_the_same_tick() {
    let mut session = new_session();
    complete_every_task(&mut session);
    session.advance(Duration::from_secs(300));
    assert_eq!(session.state(), GameState::GameWon);
}

#[test]
fn vent_interaction_teleports_without_touching_tasks() {
    let mut session = new_session();
    let source = session.layout().vents()[0].bounds.center();
    let destination_index = session.vent_graph().destination_of(0).expect("vent 0 routes");
    let destination = session.layout().vents()[destination_index].bounds.center();

    session.debug_place_player(source);
    tap(&mut session, InputAction::Interact);

    assert_eq!(session.player_position(), destination);
    assert_eq!(session.completed_tasks(), 0);
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::VentUsed {
            from: 0,
            to: destination_index,
        }]
    );
}

/// One room whose only task circle sits on top of vent 0.
fn task_over_vent_session() -> Session {
    let layout = SpatialLayout::from_parts(
        vec![Room {
            bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
            name: "Overlap".to_string(),
            category: RoomCategory::Default,
        }],
        Vec::new(),
        vec![
            Rect::new(40.0, 40.0, 40.0, 40.0),
            Rect::new(140.0, 140.0, 40.0, 40.0),
        ],
        vec![Circle::inscribed(45.0, 45.0, 30.0)],
        Rect::new(0.0, 0.0, 200.0, 200.0),
    );
    Session::with_layout(SessionConfig::default(), layout)
}

#[test]
fn pending_task_over_vent_completes_instead_of_venting() {
    let mut session = task_over_vent_session();
    let overlap = Vec2::new(60.0, 60.0);
    session.debug_place_player(overlap);
    tap(&mut session, InputAction::Interact);

    assert_eq!(session.player_position(), overlap);
    assert_eq!(session.completed_tasks(), 1);
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::TaskCompleted {
            name: "Task 1".to_string(),
            count: 1,
        }]
    );
}

#[test]
fn completed_task_over_vent_lets_the_vent_fire() {
    let mut session = task_over_vent_session();
    session.debug_place_player(Vec2::new(60.0, 60.0));
    tap(&mut session, InputAction::Interact);
    session.drain_events();

    tap(&mut session, InputAction::Interact);

    let destination = session.layout().vents()[1].bounds.center();
    assert_eq!(session.player_position(), destination);
    assert_eq!(session.completed_tasks(), 1);
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::VentUsed { from: 0, to: 1 }]
    );
}

#[test]
fn pause_freezes_remaining_time() {
    let mut session = new_session();
    session.advance(Duration::from_secs(10));
    assert_eq!(session.remaining_seconds(), 290);

    tap(&mut session, InputAction::TogglePause);
    assert_eq!(session.state(), GameState::Paused);
    for _ in 0..60 {
        session.advance(ONE_SECOND);
    }
    assert_eq!(session.remaining_seconds(), 290);

    tap(&mut session, InputAction::TogglePause);
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.remaining_seconds(), 290);

    session.advance(ONE_SECOND);
    assert_eq!(session.remaining_seconds(), 289);
}

#[test]
fn active_time_excludes_every_paused_and_map_interval() {
    let mut session = new_session();
    let frame = Duration::from_millis(16);
    let mut real = Duration::ZERO;
    let mut frozen = Duration::ZERO;

    // Alternate play, pause and map view with uneven frame counts.
    let pattern = [
        (None, 37),
        (Some(InputAction::TogglePause), 90),
        (Some(InputAction::TogglePause), 12),
        (Some(InputAction::ToggleMapView), 45),
        (Some(InputAction::Acknowledge), 200),
        (Some(InputAction::TogglePause), 7),
        (Some(InputAction::Acknowledge), 64),
    ];
    for (action, frames) in pattern {
        if let Some(action) = action {
            tap(&mut session, action);
        }
        let paused = session.state() != GameState::Playing;
        for _ in 0..frames {
            session.advance(frame);
            real += frame;
            if paused {
                frozen += frame;
            }
        }
    }

    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.active_elapsed(), real - frozen);
}

#[test]
fn acknowledge_after_game_over_ends_the_session_for_good() {
    let mut session = new_session();
    run_to_game_over(&mut session);
    session.drain_events();

    tap(&mut session, InputAction::Acknowledge);
    assert!(session.has_ended());
    assert_eq!(
        session.drain_events(),
        vec![GameEvent::SessionEnded {
            final_state: GameState::GameOver,
        }]
    );

    for action in InputAction::ALL {
        tap(&mut session, action);
    }
    for _ in 0..10 {
        session.advance(ONE_SECOND);
    }
    assert_eq!(session.state(), GameState::GameOver);
    assert!(session.drain_events().is_empty());
}

#[test]
fn terminal_states_ignore_everything_but_acknowledge() {
    let mut session = new_session();
    run_to_game_over(&mut session);
    session.drain_events();

    let position = session.player_position();
    session.press(InputAction::MoveRight);
    tap(&mut session, InputAction::TogglePause);
    tap(&mut session, InputAction::ToggleMapView);
    session.advance(ONE_SECOND);

    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.player_position(), position);
    assert!(!session.has_ended());
    assert!(session.drain_events().is_empty());
}

#[test]
fn completed_count_never_decreases_and_repeat_interact_is_inert() {
    let mut session = new_session();
    let centers = task_centers(&session);
    let mut last = 0;

    for center in centers.iter().take(4) {
        session.debug_place_player(*center);
        for _ in 0..3 {
            tap(&mut session, InputAction::Interact);
            let count = session.completed_tasks();
            assert!(count >= last);
            last = count;
        }
        session.advance(Duration::from_millis(250));
    }
    assert_eq!(session.completed_tasks(), 4);

    let completions = session
        .drain_events()
        .iter()
        .filter(|event| event.kind() == GameEventKind::TaskCompleted)
        .count();
    assert_eq!(completions, 4);
}

#[test]
fn walking_into_a_wall_slides_along_it() {
    let mut session = new_session();
    // Just above the horizontal wall in the centre room.
    session.debug_place_player(Vec2::new(420.0, 378.0));
    session.press(InputAction::MoveRight);
    session.press(InputAction::MoveDown);
    for _ in 0..3 {
        session.advance(Duration::from_millis(100));
    }
    let position = session.player_position();
    assert_eq!(position.y, 378.0);
    assert!(position.x > 420.0);
    assert!(!session.layout().is_inside_wall(position));
}
