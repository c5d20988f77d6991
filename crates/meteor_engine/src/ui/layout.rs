//! UI layout calculations
//!
//! Converts UI element data to screen-space coordinates and answers hit tests.

use crate::foundation::math::Vec2;
use crate::ui::UIElement;

/// Layout calculator for UI elements
pub struct UILayout;

impl UILayout {
    /// Calculate screen position from element properties
    ///
    /// # Returns
    /// Screen position in pixels (top-left origin)
    pub fn calculate_position(element: &UIElement, screen_width: f32, screen_height: f32) -> Vec2 {
        let (anchor_x, anchor_y) = element.anchor.to_normalized();

        Vec2::new(
            anchor_x * screen_width + element.position.0,
            anchor_y * screen_height + element.position.1,
        )
    }

    /// Calculate bounding box for an element
    ///
    /// # Returns
    /// (min_x, min_y, max_x, max_y) in screen pixels
    pub fn calculate_bounds(element: &UIElement, screen_width: f32, screen_height: f32) -> (f32, f32, f32, f32) {
        let pos = Self::calculate_position(element, screen_width, screen_height);
        (pos.x, pos.y, pos.x + element.size.0, pos.y + element.size.1)
    }

    /// Check if a point is inside a visible element's bounds
    pub fn contains_point(element: &UIElement, screen_width: f32, screen_height: f32, point: Vec2) -> bool {
        if !element.visible {
            return false;
        }
        let (min_x, min_y, max_x, max_y) = Self::calculate_bounds(element, screen_width, screen_height);
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Anchor;

    #[test]
    fn test_top_right_anchor_uses_negative_offset() {
        let element = UIElement {
            position: (-120.0, 20.0),
            size: (100.0, 30.0),
            anchor: Anchor::TopRight,
            visible: true,
        };
        let pos = UILayout::calculate_position(&element, 800.0, 600.0);
        assert_eq!(pos, Vec2::new(680.0, 20.0));
    }

    #[test]
    fn test_hit_testing() {
        let element = UIElement {
            position: (10.0, 10.0),
            size: (50.0, 20.0),
            ..Default::default()
        };
        assert!(UILayout::contains_point(&element, 800.0, 600.0, Vec2::new(30.0, 15.0)));
        assert!(!UILayout::contains_point(&element, 800.0, 600.0, Vec2::new(70.0, 15.0)));

        let hidden = UIElement { visible: false, ..element };
        assert!(!UILayout::contains_point(&hidden, 800.0, 600.0, Vec2::new(30.0, 15.0)));
    }
}
