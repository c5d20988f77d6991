//! Core engine implementation

use std::time::Duration;

use crate::{
    application::Application,
    core::config::{CanvasConfig, EngineConfig},
    foundation::time::{Stopwatch, Timer},
    render::{Canvas, DrawCommand, RenderError},
};
use thiserror::Error;

/// Timing information handed to the application each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Zero-based frame index
    pub index: u64,
    /// Fixed time step of this frame in seconds
    pub delta_time: f32,
    /// Virtual time elapsed since the loop started, including this frame
    pub elapsed: f32,
    /// Whether this is the final frame of a bounded run
    pub is_last: bool,
}

impl FrameContext {
    /// Frame step as a `Duration`
    pub fn delta(&self) -> Duration {
        Duration::from_secs_f32(self.delta_time)
    }
}

/// Main engine struct
///
/// The engine owns the drawing surface and the virtual clock, and runs the
/// single-threaded frame loop. Every callback happens on the loop's thread, so
/// applications mutate their state without any locking.
pub struct Engine {
    /// Drawing surface
    canvas: Canvas,

    /// Commands queued for the current frame
    draw_list: Vec<DrawCommand>,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, canvas: &CanvasConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        config
            .validate()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;
        canvas
            .validate()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        let mut canvas_surface = Canvas::new(canvas.width, canvas.height, canvas.clear_color);
        if let Some(path) = &canvas.background_image {
            // A missing background leaves the surface blank
            if let Err(e) = canvas_surface.load_background(path) {
                log::warn!("Background image unavailable: {}", e);
            }
        }

        Ok(Self {
            canvas: canvas_surface,
            draw_list: Vec::new(),
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(
        config: EngineConfig,
        canvas: &CanvasConfig,
        app: &mut T,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config, canvas)?;

        // Initialize application
        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        let wall_clock = Stopwatch::start_new();
        let result = engine.main_loop(app);

        // Teardown runs even when a frame failed
        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} ms wall clock)",
            engine.timer.frame_count(),
            wall_clock.elapsed_millis()
        );
        result
    }

    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let delta_time = self.config.frame_delta();
        let frame_budget = Duration::from_secs_f32(delta_time);

        while self.running {
            if self.frames_exhausted() {
                break;
            }

            let pacing = Stopwatch::start_new();
            self.timer.advance(delta_time);

            let index = self.timer.frame_count() - 1;
            let frame = FrameContext {
                index,
                delta_time,
                elapsed: self.timer.total_time(),
                is_last: self.config.max_frames.is_some_and(|max| index + 1 >= max),
            };

            app.update(self, &frame)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            app.render(self, &frame)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;

            if self.config.realtime {
                if let Some(remaining) = frame_budget.checked_sub(pacing.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }

        Ok(())
    }

    fn frames_exhausted(&self) -> bool {
        self.config
            .max_frames
            .is_some_and(|max| self.timer.frame_count() >= max)
    }

    /// Queue draw commands for the current frame
    pub fn draw(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.draw_list.extend(commands);
    }

    /// Commands queued so far this frame
    pub fn draw_list(&self) -> &[DrawCommand] {
        &self.draw_list
    }

    /// Rasterize the queued commands onto the canvas and clear the queue
    pub fn present(&mut self) -> Result<(), RenderError> {
        let commands = std::mem::take(&mut self.draw_list);
        self.canvas.paint(&commands);
        log::trace!("Presented {} draw commands", commands.len());
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will request another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the drawing surface
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
