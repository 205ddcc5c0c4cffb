use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use tracing::{debug, info};

use crate::error::AppError;
use crate::graphics::FrameBuffer;
use crate::input::InputMapper;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::terminal::{viewport_size, Canvas, Presenter, TerminalSession};
use crate::ui::{self, DebugInfo, Layout};

/// Longest step fed to the animations, so a stalled terminal does not skip the fade
const MAX_FRAME_STEP: f64 = 0.1;

/// Event loop driving the scene, renderer and terminal
pub struct App {
    scene: Scene,
    renderer: Renderer,
    mapper: InputMapper,
    presenter: Presenter,
    frame_interval: Duration,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl App {
    pub fn new(scene: Scene, renderer: Renderer, target_fps: u32) -> Self {
        App {
            scene,
            renderer,
            mapper: InputMapper::default(),
            presenter: Presenter::default(),
            frame_interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn run(&mut self, session: &mut TerminalSession) -> Result<(), AppError> {
        info!(
            planet = self.scene.carousel().current().name,
            fps = 1.0 / self.frame_interval.as_secs_f64(),
            "viewer started"
        );
        let mut last_frame = Instant::now();

        while self.scene.is_running() {
            let (columns, rows) = viewport_size();
            let layout = Layout::new(columns, rows);

            // Handle input until the next frame is due
            let deadline = last_frame + self.frame_interval;
            loop {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if !event::poll(timeout)? {
                    break;
                }
                let event = event::read()?;
                if let Event::Resize(columns, rows) = event {
                    debug!(columns, rows, "terminal resized");
                    self.presenter.invalidate();
                }
                if let Some(action) = self.mapper.map(&event, &layout) {
                    self.scene.apply(action);
                }
                if !self.scene.is_running() {
                    break;
                }
            }
            if !self.scene.is_running() {
                break;
            }

            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f64().min(MAX_FRAME_STEP);
            last_frame = now;

            self.scene.poll_textures();
            self.scene.tick(dt);
            self.draw(session.out(), &layout)?;
        }

        info!("viewer stopped");
        Ok(())
    }

    fn draw<W: Write>(&mut self, out: &mut W, layout: &Layout) -> Result<(), AppError> {
        self.update_fps();

        let mut frame = FrameBuffer::new(layout.columns as usize, layout.rows as usize * 2);
        let disc = self.renderer.render(&self.scene, &mut frame);

        let mut canvas = Canvas::from_frame(&frame);
        let debug = DebugInfo {
            fps: self.fps,
            light: self.renderer.light_position(),
        };
        ui::draw_overlay(&mut canvas, layout, &self.scene, disc.as_ref(), &debug);
        self.presenter.present(out, &canvas)?;
        Ok(())
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;

    #[test]
    fn draws_a_full_frame_into_any_writer() {
        let scene = Scene::new(5, CameraSettings::default());
        let mut app = App::new(scene, Renderer::new(12, 24, 50), 30);
        let mut out = Vec::new();
        app.draw(&mut out, &Layout::new(60, 20)).expect("in-memory write");
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("Saturn"));
        assert!(written.contains('▀'));
    }

    #[test]
    fn frame_interval_follows_target_fps() {
        let scene = Scene::new(0, CameraSettings::default());
        let app = App::new(scene, Renderer::new(8, 8, 0), 0);
        assert_eq!(app.frame_interval, Duration::from_secs(1));
        let scene = Scene::new(0, CameraSettings::default());
        let app = App::new(scene, Renderer::new(8, 8, 0), 20);
        assert_eq!(app.frame_interval, Duration::from_millis(50));
    }
}
