//! 2D rendering
//!
//! Frames are described as lists of [`DrawCommand`]s and rasterized by a
//! software [`Canvas`] into an RGBA surface. The canvas keeps a background
//! layer beneath the per-frame overlay.

pub mod paint;
pub mod commands;
pub mod canvas;

pub use paint::{Paint, ColorStop};
pub use commands::{DrawCommand, TextLabel};
pub use canvas::Canvas;

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Asset backing a layer failed to load
    #[error("Asset error: {0}")]
    Asset(#[from] crate::assets::AssetError),

    /// Encoding or writing an image failed
    #[error("Image output failed: {0}")]
    Image(#[from] image::ImageError),
}
