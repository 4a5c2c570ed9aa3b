mod canvas;
mod font;
mod hud;
mod world;

use std::sync::Arc;

use lightsout_engine::GameState;
use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::screen::ScreenView;
use canvas::{Canvas, Rgba};

const CLEAR_COLOR: Rgba = [16, 18, 24, 255];

pub(crate) struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            width: size.width,
            height: size.height,
        })
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render(&mut self, view: &ScreenView<'_>) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let mut canvas = Canvas::new(self.pixels.frame_mut(), self.width, self.height);
        draw_screen(&mut canvas, view);
        self.pixels.render()
    }
}

/// Composes one full frame: station, player, darkness, mini-map, HUD, toasts
/// and the state overlay, in that order.
fn draw_screen(canvas: &mut Canvas<'_>, view: &ScreenView<'_>) {
    let session = match view {
        ScreenView::Menu {
            sound_enabled,
            show_mini_map,
        } => {
            hud::draw_menu(canvas, *sound_enabled, *show_mini_map);
            return;
        }
        ScreenView::Playing(session) => *session,
    };

    canvas.clear(CLEAR_COLOR);
    let camera = world::camera_for(session, canvas.width(), canvas.height());
    world::draw_station(canvas, session, &camera);
    world::draw_player(canvas, session, &camera);

    let hud = session.hud_snapshot();
    if hud.state == GameState::Playing {
        world::draw_lighting(canvas);
    }
    if hud.state != GameState::MapView {
        if session.config().show_mini_map {
            world::draw_mini_map(canvas, session);
        }
        hud::draw_hud(canvas, &hud);
        hud::draw_messages(canvas, &hud);
    }
    hud::draw_overlay(canvas, &hud);
}

#[cfg(test)]
mod tests {
    use lightsout_engine::{InputAction, Session, SessionConfig};

    use super::*;

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;

    fn render_to_buffer(view: &ScreenView<'_>) -> Vec<u8> {
        let mut frame = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
        let mut canvas = Canvas::new(&mut frame, WIDTH, HEIGHT);
        draw_screen(&mut canvas, view);
        frame
    }

    fn centre_pixel(frame: &[u8]) -> [u8; 4] {
        let offset = (((HEIGHT / 2) * WIDTH + WIDTH / 2) * 4) as usize;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn menu_fills_whole_frame() {
        let frame = render_to_buffer(&ScreenView::Menu {
            sound_enabled: true,
            show_mini_map: true,
        });
        assert!(frame.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn every_session_state_renders_without_panicking() {
        let mut session = Session::new(SessionConfig::default());
        let _ = render_to_buffer(&ScreenView::Playing(&session));

        session.press(InputAction::ToggleMapView);
        let _ = render_to_buffer(&ScreenView::Playing(&session));
        session.press(InputAction::ToggleMapView);

        session.press(InputAction::TogglePause);
        let _ = render_to_buffer(&ScreenView::Playing(&session));
        session.press(InputAction::TogglePause);

        for _ in 0..300 {
            session.advance(std::time::Duration::from_secs(1));
        }
        assert_eq!(session.state(), GameState::GameOver);
        let _ = render_to_buffer(&ScreenView::Playing(&session));
    }

    #[test]
    fn player_is_drawn_at_screen_centre_while_playing() {
        let session = Session::new(SessionConfig::default());
        let frame = render_to_buffer(&ScreenView::Playing(&session));
        let [r, g, b, _] = centre_pixel(&frame);
        assert!(b > r && b > g, "centre should be the player body, got {r},{g},{b}");
    }
}
