//! Canvas draw commands

use crate::foundation::math::{Rgba, Vec2};
use crate::render::paint::Paint;

/// One drawing operation on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the overlay, revealing the background layer
    Clear,
    /// Filled circle
    FillCircle {
        /// Circle center in pixels
        center: Vec2,
        /// Radius in pixels
        radius: f32,
        /// Fill style
        paint: Paint,
    },
    /// Filled axis-aligned rectangle
    FillRect {
        /// Top-left corner in pixels
        origin: Vec2,
        /// Width and height in pixels
        size: Vec2,
        /// Fill style
        paint: Paint,
    },
    /// Text label anchored at its baseline start
    Text(TextLabel),
}

impl DrawCommand {
    /// Convenience constructor for a text command
    pub fn text(text: impl Into<String>, position: Vec2, size_px: f32, color: Rgba) -> Self {
        Self::Text(TextLabel {
            text: text.into(),
            position,
            size_px,
            color,
        })
    }
}

/// Text placed on the canvas
///
/// The software rasterizer does not draw glyphs; labels are kept alongside
/// the pixel surface for consumers that overlay text themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Label contents
    pub text: String,
    /// Baseline start in pixels
    pub position: Vec2,
    /// Font size in pixels
    pub size_px: f32,
    /// Text color
    pub color: Rgba,
}
