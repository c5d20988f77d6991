//! Panel widget - rectangular backgrounds

use crate::foundation::math::{Rgba, Vec2};
use crate::render::{DrawCommand, Paint};
use crate::ui::{UIElement, UILayout};

/// UI panel component - a colored rectangle background
#[derive(Debug, Clone)]
pub struct UIPanel {
    /// Base element properties
    pub element: UIElement,

    /// Background color (RGBA)
    pub color: Rgba,
}

impl Default for UIPanel {
    fn default() -> Self {
        Self {
            element: UIElement::default(),
            color: Rgba::new(0, 0, 0, 0.6),
        }
    }
}

impl UIPanel {
    /// Background command
    pub fn draw_commands(&self, screen_width: f32, screen_height: f32) -> Vec<DrawCommand> {
        if !self.element.visible {
            return Vec::new();
        }
        vec![DrawCommand::FillRect {
            origin: UILayout::calculate_position(&self.element, screen_width, screen_height),
            size: Vec2::new(self.element.size.0, self.element.size.1),
            paint: Paint::Solid(self.color),
        }]
    }
}
