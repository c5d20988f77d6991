//! # Core Engine Module
//!
//! Shared configuration types used by the frame loop and the canvas.
//!
//! ## Organization
//!
//! - **Config**: Engine and canvas configuration
//! - **Foundation**: Low-level utilities (math, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    EngineConfig,
    CanvasConfig,
    Config,
    ConfigError,
};
