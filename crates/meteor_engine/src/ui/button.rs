//! Button widget - interactive clickable buttons

use crate::foundation::math::{Rgba, Vec2};
use crate::render::{DrawCommand, Paint};
use crate::ui::{UIElement, UILayout};

/// Button state for visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Normal resting state
    Normal,
    /// Pointer is hovering over button
    Hovered,
}

/// UI button component
#[derive(Debug, Clone)]
pub struct UIButton {
    /// Base element properties
    pub element: UIElement,

    /// Button label text
    pub text: String,

    /// Font size for label
    pub font_size: f32,

    /// Current button state
    pub state: ButtonState,

    /// Resting background color
    pub normal_color: Rgba,
    /// Hover state color
    pub hover_color: Rgba,

    /// Text color
    pub text_color: Rgba,
    /// Text color while hovered
    pub hover_text_color: Rgba,
}

impl Default for UIButton {
    fn default() -> Self {
        Self {
            element: UIElement::default(),
            text: String::new(),
            font_size: 16.0,
            state: ButtonState::Normal,
            normal_color: Rgba::new(255, 255, 255, 0.2),
            hover_color: Rgba::new(255, 255, 255, 0.6),
            text_color: Rgba::WHITE,
            hover_text_color: Rgba::BLACK,
        }
    }
}

impl UIButton {
    /// Create a button with a label
    pub fn new(text: impl Into<String>, element: UIElement) -> Self {
        Self {
            element,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Get the current color based on button state
    pub fn current_color(&self) -> Rgba {
        match self.state {
            ButtonState::Normal => self.normal_color,
            ButtonState::Hovered => self.hover_color,
        }
    }

    /// Whether a click at `point` lands on this button
    pub fn hit(&self, screen_width: f32, screen_height: f32, point: Vec2) -> bool {
        UILayout::contains_point(&self.element, screen_width, screen_height, point)
    }

    /// Update hover state from the pointer position
    pub fn update_hover(&mut self, screen_width: f32, screen_height: f32, pointer: Vec2) {
        self.state = if UILayout::contains_point(&self.element, screen_width, screen_height, pointer) {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        };
    }

    /// Background and label commands
    pub fn draw_commands(&self, screen_width: f32, screen_height: f32) -> Vec<DrawCommand> {
        if !self.element.visible {
            return Vec::new();
        }
        let origin = UILayout::calculate_position(&self.element, screen_width, screen_height);
        let size = Vec2::new(self.element.size.0, self.element.size.1);
        let text_color = if self.state == ButtonState::Hovered {
            self.hover_text_color
        } else {
            self.text_color
        };

        vec![
            DrawCommand::FillRect {
                origin,
                size,
                paint: Paint::Solid(self.current_color()),
            },
            DrawCommand::text(
                self.text.clone(),
                Vec2::new(origin.x + 16.0, origin.y + size.y * 0.5 + self.font_size * 0.35),
                self.font_size,
                text_color,
            ),
        ]
    }
}
