//! # Engine Configuration
//!
//! Configuration structures for the frame loop and the drawing surface.
//!
//! ## Design Goals
//!
//! - **Serializable**: Support for multiple config file formats (TOML, RON)
//! - **Type Safe**: Strong typing with validation and defaults
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging, frame rate, run length and pacing
//! - **Canvas Config**: Surface dimensions and background layer

use serde::{Serialize, Deserialize};

use crate::foundation::math::Rgba;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core frame loop behavior: logging, the fixed frame rate used for the
/// virtual clock, optional run length and wall-clock pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Frames per second of the virtual clock
    pub target_fps: u32,
    /// Stop after this many frames (`None` runs until quit is requested)
    pub max_frames: Option<u64>,
    /// Sleep between frames so the loop runs at `target_fps` in real time
    pub realtime: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: 60,
            max_frames: None,
            realtime: false,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Stop after a fixed number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Pace frames against the wall clock
    pub fn with_realtime(mut self, enabled: bool) -> Self {
        self.realtime = enabled;
        self
    }

    /// Duration of one frame in seconds
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("Target FPS must be at least 1".to_string()));
        }

        if self.target_fps > 1000 {
            return Err(ConfigError::Invalid("Target FPS should not exceed 1000".to_string()));
        }

        // A zero-frame run never reaches its last frame
        if self.max_frames == Some(0) {
            return Err(ConfigError::Invalid("Frame limit must be at least 1".to_string()));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Canvas Configuration
///
/// Size of the drawing surface and the optional background image drawn
/// beneath every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Background image path (scaled to the surface once loaded)
    pub background_image: Option<String>,
    /// Fill color used where no background image is drawn
    pub clear_color: Rgba,
}

impl CanvasConfig {
    /// Create a canvas configuration with the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background_image: None,
            clear_color: Rgba::BLACK,
        }
    }

    /// Set background image path
    pub fn with_background(mut self, path: impl Into<String>) -> Self {
        self.background_image = Some(path.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(1280, 720).with_background("resources/world-map.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta_from_fps() {
        let config = EngineConfig::default().with_target_fps(50);
        assert!((config.frame_delta() - 0.02).abs() < f32::EPSILON);
    }

    #[test]
    fn test_engine_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default().with_target_fps(0).validate().is_err());
    }

    #[test]
    fn test_zero_frame_limit_is_rejected() {
        assert!(EngineConfig::default().with_max_frames(0).validate().is_err());
        assert!(EngineConfig::default().with_max_frames(1).validate().is_ok());
    }

    #[test]
    fn test_canvas_validation() {
        assert!(CanvasConfig::default().validate().is_ok());
        assert!(CanvasConfig::new(0, 720).validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("target_fps = 30").unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.log_level, "info");
        assert!(config.max_frames.is_none());
    }
}
