//! # Meteor Engine
//!
//! A small headless engine for frame-driven 2D simulations with an optional
//! retained 3D scene description.
//!
//! ## Features
//!
//! - **Frame Loop**: Fixed-step virtual clock driving an [`Application`]
//! - **Interval Timers**: Wall-clock style periodic callbacks on the same thread
//! - **Software Canvas**: Draw-command lists rasterized into an RGBA surface
//! - **Retained Scenes**: Plain-data 3D scene graphs with frame-to-frame diffing
//! - **Widgets**: Buttons and panels with hit testing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meteor_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(120);
//!     let mut app = MyApp;
//!     Engine::run(config, &CanvasConfig::new(640, 480), &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod scene;
pub mod ui;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError, FrameContext};
pub use crate::core::config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError, FrameContext,
        foundation::{
            math::{Vec2, Vec3, Rgba},
            time::{Timer, Stopwatch, IntervalTimer},
        },
        render::{Canvas, DrawCommand, Paint, ColorStop},
        scene::{Scene, SceneNode, SceneDiff},
        ui::{UIButton, UIPanel, Anchor},
        core::config::{CanvasConfig, Config, ConfigError},
    };
}
