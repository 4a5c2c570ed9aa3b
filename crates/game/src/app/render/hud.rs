use lightsout_engine::{GameState, HudSnapshot};

use super::canvas::{Canvas, Rgba, ScreenRect};
use super::font::{line_advance, text_width};

const HUD_PANEL: ScreenRect = ScreenRect::new(10, 10, 300, 140);
const HUD_PANEL_COLOR: Rgba = [255, 255, 255, 180];
const HUD_TEXT_COLOR: Rgba = [0, 0, 0, 255];
const HUD_TEXT_SCALE: i32 = 2;
const MESSAGE_COLOR: Rgba = [255, 255, 255, 200];
const MESSAGE_SCALE: i32 = 3;
const MESSAGE_BASELINE_OFFSET: i32 = 100;
const WHITE: Rgba = [255, 255, 255, 255];
const TITLE_SCALE: i32 = 8;
const BODY_SCALE: i32 = 3;
const MENU_BACKGROUND: Rgba = [20, 20, 40, 255];
const MENU_TITLE_COLOR: Rgba = [255, 50, 50, 255];
const MENU_DIM_COLOR: Rgba = [176, 198, 220, 255];

pub(crate) fn hud_lines(hud: &HudSnapshot) -> [String; 5] {
    [
        format!("Time Left: {}s", hud.remaining_seconds),
        format!("Tasks: {}/{}", hud.completed, hud.total),
        "Controls:".to_string(),
        "WASD/Arrow - Move".to_string(),
        "M - Map | P - Pause | E - Interact".to_string(),
    ]
}

pub(crate) fn draw_hud(canvas: &mut Canvas<'_>, hud: &HudSnapshot) {
    canvas.fill_rect(HUD_PANEL, HUD_PANEL_COLOR);
    let mut y = HUD_PANEL.y + 14;
    for line in hud_lines(hud) {
        canvas.draw_text(HUD_PANEL.x + 10, y, &line, HUD_TEXT_SCALE, HUD_TEXT_COLOR);
        y += 25;
    }
}

/// Toasts stack upward from near the bottom edge, newest lowest.
pub(crate) fn draw_messages(canvas: &mut Canvas<'_>, hud: &HudSnapshot) {
    let mut y = canvas.height() - MESSAGE_BASELINE_OFFSET;
    for message in hud.messages.iter().rev() {
        draw_centered(canvas, y, message, MESSAGE_SCALE, MESSAGE_COLOR);
        y -= line_advance(MESSAGE_SCALE) + 4;
    }
}

pub(crate) fn overlay_lines(hud: &HudSnapshot) -> Option<(&'static str, Rgba, Vec<String>)> {
    match hud.state {
        GameState::Playing => None,
        GameState::MapView => Some(("", WHITE, vec!["Press M to return to game".to_string()])),
        GameState::Paused => Some((
            "PAUSED",
            WHITE,
            vec!["Press P or ESC to resume".to_string()],
        )),
        GameState::GameOver => Some((
            "GAME OVER",
            [255, 0, 0, 255],
            vec![
                format!("Tasks: {}/{}", hud.completed, hud.total),
                "Press ESC to return to menu".to_string(),
            ],
        )),
        GameState::GameWon => Some((
            "VICTORY!",
            [0, 255, 0, 255],
            vec![
                format!("Time Remaining: {}s", hud.remaining_seconds),
                "Press ESC to return to menu".to_string(),
            ],
        )),
    }
}

pub(crate) fn draw_overlay(canvas: &mut Canvas<'_>, hud: &HudSnapshot) {
    let Some((title, title_color, lines)) = overlay_lines(hud) else {
        return;
    };

    let backdrop_alpha = match hud.state {
        GameState::Paused => 150,
        GameState::GameOver | GameState::GameWon => 200,
        _ => 0,
    };
    if backdrop_alpha > 0 {
        canvas.fill_rect(
            ScreenRect::new(0, 0, canvas.width(), canvas.height()),
            [0, 0, 0, backdrop_alpha],
        );
    }

    if title.is_empty() {
        // Map view keeps the station visible; the hint sits at the bottom.
        let y = canvas.height() - line_advance(BODY_SCALE) * 2;
        for line in &lines {
            draw_centered(canvas, y, line, BODY_SCALE, title_color);
        }
        return;
    }

    let mut y = canvas.height() / 2 - line_advance(TITLE_SCALE);
    draw_centered(canvas, y, title, TITLE_SCALE, title_color);
    y += line_advance(TITLE_SCALE) + 10;
    for line in &lines {
        draw_centered(canvas, y, line, BODY_SCALE, WHITE);
        y += line_advance(BODY_SCALE) + 10;
    }
}

pub(crate) fn menu_lines(sound_enabled: bool, show_mini_map: bool) -> [String; 5] {
    let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
    [
        format!("Version {}", env!("CARGO_PKG_VERSION")),
        "ENTER - Start Game".to_string(),
        format!("S - Sound: {}", on_off(sound_enabled)),
        format!("N - Mini-map: {}", on_off(show_mini_map)),
        "ESC - Exit".to_string(),
    ]
}

pub(crate) fn draw_menu(canvas: &mut Canvas<'_>, sound_enabled: bool, show_mini_map: bool) {
    canvas.clear(MENU_BACKGROUND);
    let mut y = canvas.height() / 4;
    draw_centered(canvas, y, "LIGHTS OUT", TITLE_SCALE, MENU_TITLE_COLOR);
    y += line_advance(TITLE_SCALE) + 20;
    for (index, line) in menu_lines(sound_enabled, show_mini_map).iter().enumerate() {
        let color = if index == 0 { MENU_DIM_COLOR } else { WHITE };
        draw_centered(canvas, y, line, BODY_SCALE, color);
        y += line_advance(BODY_SCALE) + 14;
    }
}

fn draw_centered(canvas: &mut Canvas<'_>, y: i32, text: &str, scale: i32, color: Rgba) {
    let x = (canvas.width() - text_width(text, scale)) / 2;
    canvas.draw_text(x, y, text, scale, color);
}
