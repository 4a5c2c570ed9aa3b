use lightsout_engine::{GameState, Rect, RoomCategory, Session, Vec2, MAP_EXTENT};

use super::canvas::{Canvas, Rgba, ScreenRect};

const ROOM_BORDER_COLOR: Rgba = [0, 0, 0, 255];
const ROOM_LABEL_COLOR: Rgba = [0, 0, 0, 255];
const WALL_COLOR: Rgba = [100, 100, 100, 255];
const VENT_COLOR: Rgba = [80, 80, 80, 255];
const TASK_PENDING_COLOR: Rgba = [255, 200, 0, 255];
const TASK_DONE_COLOR: Rgba = [0, 255, 0, 255];
const PLAYER_BODY_COLOR: Rgba = [0, 0, 255, 255];
const PLAYER_VISOR_COLOR: Rgba = [0, 191, 255, 255];
const MINI_MAP_BACKDROP_COLOR: Rgba = [0, 0, 0, 180];
const MINI_MAP_PLAYER_COLOR: Rgba = [255, 0, 0, 255];
const ROOM_LABEL_SCALE: i32 = 2;
const PLAYER_RADIUS: f32 = 15.0;
const MINI_MAP_MARGIN: i32 = 20;
const LIGHT_RADIUS: f32 = 200.0;
const LIGHT_MID_STOP: f32 = 0.8;
const LIGHT_MID_ALPHA: f32 = 100.0;
const LIGHT_EDGE_ALPHA: f32 = 220.0;

/// Uniform scale plus translation from map units to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Camera {
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl Camera {
    /// Places `focus` at the screen-space point `(anchor_x, anchor_y)`.
    pub(crate) fn focused(focus: Vec2, anchor_x: f32, anchor_y: f32, scale: f32) -> Self {
        Self {
            origin_x: anchor_x - focus.x * scale,
            origin_y: anchor_y - focus.y * scale,
            scale,
        }
    }

    pub(crate) fn world_to_screen(&self, point: Vec2) -> (f32, f32) {
        (
            self.origin_x + point.x * self.scale,
            self.origin_y + point.y * self.scale,
        )
    }

    fn project(&self, rect: Rect) -> ScreenRect {
        let (left, top) = self.world_to_screen(Vec2::new(rect.x, rect.y));
        let (right, bottom) = self.world_to_screen(Vec2::new(rect.right(), rect.bottom()));
        let left = left.round() as i32;
        let top = top.round() as i32;
        ScreenRect::new(
            left,
            top,
            right.round() as i32 - left,
            bottom.round() as i32 - top,
        )
    }
}

pub(crate) fn room_color(category: RoomCategory) -> Rgba {
    match category {
        RoomCategory::Default => [200, 200, 200, 255],
        RoomCategory::Storage => [180, 230, 180, 255],
        RoomCategory::Reactor => [230, 180, 180, 255],
        RoomCategory::Admin => [180, 180, 230, 255],
    }
}

fn darker(color: Rgba) -> Rgba {
    let scale = |channel: u8| (f32::from(channel) * 0.7) as u8;
    [scale(color[0]), scale(color[1]), scale(color[2]), color[3]]
}

/// Camera for the current mode: follows the player in play, fits the whole
/// station in map view.
pub(crate) fn camera_for(session: &Session, width: i32, height: i32) -> Camera {
    let center_x = width as f32 * 0.5;
    let center_y = height as f32 * 0.5;
    if session.state() == GameState::MapView {
        let scale = width.min(height).max(1) as f32 / MAP_EXTENT;
        let map_center = Vec2::new(MAP_EXTENT * 0.5, MAP_EXTENT * 0.5);
        Camera::focused(map_center, center_x, center_y, scale)
    } else {
        Camera::focused(session.player_position(), center_x, center_y, 1.0)
    }
}

pub(crate) fn draw_station(canvas: &mut Canvas<'_>, session: &Session, camera: &Camera) {
    let layout = session.layout();
    for room in layout.rooms() {
        let rect = camera.project(room.bounds);
        canvas.fill_rect(rect, room_color(room.category));
        canvas.rect_outline(rect, ROOM_BORDER_COLOR);
        if camera.scale >= 0.75 {
            canvas.draw_text(
                rect.x + 10,
                rect.y + 10,
                &room.name,
                ROOM_LABEL_SCALE,
                ROOM_LABEL_COLOR,
            );
        }
    }

    for wall in layout.walls() {
        let rect = camera.project(wall.bounds);
        canvas.fill_rect(rect, WALL_COLOR);
        canvas.rect_outline(rect, ROOM_BORDER_COLOR);
    }

    for vent in layout.vents() {
        let rect = camera.project(vent.bounds);
        canvas.fill_rect(rect, VENT_COLOR);
        canvas.rect_outline(rect, ROOM_BORDER_COLOR);
    }

    let registry = session.task_registry();
    for task in layout.tasks() {
        let (x, y) = camera.world_to_screen(task.marker.center);
        let color = if registry.is_complete(task.index) {
            TASK_DONE_COLOR
        } else {
            TASK_PENDING_COLOR
        };
        canvas.fill_circle(x, y, task.marker.radius * camera.scale, color);
    }
}

pub(crate) fn draw_player(canvas: &mut Canvas<'_>, session: &Session, camera: &Camera) {
    let (x, y) = camera.world_to_screen(session.player_position());
    let radius = (PLAYER_RADIUS * camera.scale).max(3.0);
    canvas.fill_circle(x, y, radius, PLAYER_BODY_COLOR);
    let visor_width = (radius * 1.2) as i32;
    let visor_height = (radius * 0.5).max(1.0) as i32;
    canvas.fill_rect(
        ScreenRect::new(
            (x - radius * 0.6) as i32,
            (y - radius * 0.7) as i32,
            visor_width,
            visor_height,
        ),
        PLAYER_VISOR_COLOR,
    );
}

/// Darkness alpha at `distance` pixels from the light centre.
pub(crate) fn light_alpha(distance: f32) -> u8 {
    let t = (distance / LIGHT_RADIUS).max(0.0);
    let alpha = if t <= LIGHT_MID_STOP {
        LIGHT_MID_ALPHA * (t / LIGHT_MID_STOP)
    } else if t <= 1.0 {
        let edge_t = (t - LIGHT_MID_STOP) / (1.0 - LIGHT_MID_STOP);
        LIGHT_MID_ALPHA + (LIGHT_EDGE_ALPHA - LIGHT_MID_ALPHA) * edge_t
    } else {
        LIGHT_EDGE_ALPHA
    };
    alpha.round().clamp(0.0, 255.0) as u8
}

/// Radial darkness centred on the screen, where the player is drawn.
pub(crate) fn draw_lighting(canvas: &mut Canvas<'_>) {
    let center_x = canvas.width() as f32 * 0.5;
    let center_y = canvas.height() as f32 * 0.5;
    for py in 0..canvas.height() {
        let dy = py as f32 + 0.5 - center_y;
        for px in 0..canvas.width() {
            let dx = px as f32 + 0.5 - center_x;
            let alpha = light_alpha((dx * dx + dy * dy).sqrt());
            if alpha > 0 {
                canvas.blend_pixel(px, py, [0, 0, 0, alpha]);
            }
        }
    }
}

pub(crate) fn mini_map_rect(width: i32, height: i32) -> ScreenRect {
    let size = width.min(height) / 4;
    ScreenRect::new(width - size - MINI_MAP_MARGIN, MINI_MAP_MARGIN, size, size)
}

pub(crate) fn draw_mini_map(canvas: &mut Canvas<'_>, session: &Session) {
    let area = mini_map_rect(canvas.width(), canvas.height());
    if area.width <= 0 {
        return;
    }
    canvas.fill_rect(area, MINI_MAP_BACKDROP_COLOR);
    canvas.set_clip(area);

    let scale = area.width as f32 / MAP_EXTENT;
    let camera = Camera::focused(
        session.player_position(),
        area.x as f32 + area.width as f32 * 0.5,
        area.y as f32 + area.height as f32 * 0.5,
        scale,
    );
    let layout = session.layout();
    for room in layout.rooms() {
        canvas.fill_rect(camera.project(room.bounds), darker(room_color(room.category)));
    }
    for vent in layout.vents() {
        canvas.fill_rect(camera.project(vent.bounds), [80, 80, 80, 150]);
    }
    let registry = session.task_registry();
    for task in layout.tasks() {
        let (x, y) = camera.world_to_screen(task.marker.center);
        let color = if registry.is_complete(task.index) {
            [0, 255, 0, 150]
        } else {
            [255, 165, 0, 150]
        };
        canvas.fill_circle(x, y, (task.marker.radius * scale).max(1.5), color);
    }
    let (x, y) = camera.world_to_screen(session.player_position());
    canvas.fill_circle(x, y, 3.0, MINI_MAP_PLAYER_COLOR);

    canvas.reset_clip();
}
