use std::collections::HashSet;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lightsout_engine::SessionConfig;
use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::audio::{self, AudioDirector};
use super::bootstrap::AppWiring;
use super::render::Renderer;
use super::screen::{ScreenCommand, ScreenMachine};

#[derive(Debug, Clone)]
pub(crate) struct LoopConfig {
    pub(crate) window_title: String,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) max_frame_delta: Duration,
    pub(crate) max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Lights Out".to_string(),
            window_width: 800,
            window_height: 800,
            max_frame_delta: Duration::from_millis(250),
            max_render_fps: Some(120),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub(crate) fn run(app: AppWiring) -> ExitCode {
    if let Err(err) = run_app(app.loop_config, app.session_config) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run_app(config: LoopConfig, session_config: SessionConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta = config.max_frame_delta;
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let mut screens = ScreenMachine::new(
        session_config,
        AudioDirector::new(audio::open_output_sink()),
    );
    let mut input_collector = InputCollector::default();

    info!(
        window_width = config.window_width,
        window_height = config.window_height,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    input_collector.clear();
                    screens.release_all();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let Some((key, pressed)) = input_collector.filter_key_event(&event) else {
                        return;
                    };
                    if screens.handle_key(key, pressed) == ScreenCommand::Quit {
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    screens.advance(clamp_frame_delta(raw_frame_dt, max_frame_delta));

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    if let Err(error) = renderer.render(&screens.view()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(was_playing = screens.is_playing(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Turns raw key events into press/release edges. OS key repeat and
/// duplicate presses are dropped so control actions fire once per press.
#[derive(Debug, Default)]
struct InputCollector {
    keys_down: HashSet<KeyCode>,
}

impl InputCollector {
    fn filter_key_event(&mut self, key_event: &KeyEvent) -> Option<(KeyCode, bool)> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        self.filter_key(code, key_event.state)
    }

    fn filter_key(&mut self, code: KeyCode, state: ElementState) -> Option<(KeyCode, bool)> {
        match state {
            ElementState::Pressed => self.keys_down.insert(code).then_some((code, true)),
            ElementState::Released => self.keys_down.remove(&code).then_some((code, false)),
        }
    }

    fn clear(&mut self) {
        self.keys_down.clear();
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}
