//! Application trait and lifecycle management

use crate::engine::{Engine, FrameContext};
use crate::render::RenderError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a simulation with the engine's frame loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized. Use this to set up your
    /// initial simulation state and load assets.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame. Implement your simulation step here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `frame` - Timing information for this frame
    fn update(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update. The default implementation rasterizes whatever
    /// was queued on the engine's draw list.
    fn render(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
        let _ = frame;
        engine.present()?;
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called when the frame loop stops. Use this to export results and
    /// release resources.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Rendering error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}
