//! Start / Pause / Reset control surface

use std::fmt;
use std::str::FromStr;

use meteor_engine::foundation::math::Vec2;
use meteor_engine::render::DrawCommand;
use meteor_engine::ui::{Anchor, UIButton, UIElement, UIPanel};

const MARGIN: f32 = 20.0;
const PADDING: f32 = 10.0;
const BUTTON_GAP: f32 = 5.0;
const BUTTON_SIZE: (f32, f32) = (80.0, 34.0);

/// User command from the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Set the run flag
    Start,
    /// Clear the run flag
    Pause,
    /// Clear the run flag and all simulation state
    Reset,
}

impl ControlAction {
    /// All actions in button order
    pub const ALL: [Self; 3] = [Self::Start, Self::Pause, Self::Reset];

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Pause => "Pause",
            Self::Reset => "Reset",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ControlAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown control action '{}'", s))
    }
}

/// Translucent panel in the top-right corner holding the three buttons
#[derive(Debug, Clone)]
pub struct ControlSurface {
    width: f32,
    height: f32,
    panel: UIPanel,
    buttons: Vec<(ControlAction, UIButton)>,
}

impl ControlSurface {
    /// Lay out the surface for a `width` x `height` canvas
    pub fn new(width: f32, height: f32) -> Self {
        let panel_w = PADDING * 2.0 + BUTTON_GAP * 2.0 + BUTTON_SIZE.0;
        let panel_h = PADDING * 2.0 + (BUTTON_GAP * 2.0 + BUTTON_SIZE.1) * ControlAction::ALL.len() as f32;
        let panel_x = -MARGIN - panel_w;

        let panel = UIPanel {
            element: UIElement {
                position: (panel_x, MARGIN),
                size: (panel_w, panel_h),
                anchor: Anchor::TopRight,
                visible: true,
            },
            ..Default::default()
        };

        let buttons = ControlAction::ALL
            .into_iter()
            .enumerate()
            .map(|(i, action)| {
                let y = MARGIN + PADDING + BUTTON_GAP + i as f32 * (BUTTON_SIZE.1 + BUTTON_GAP * 2.0);
                let element = UIElement {
                    position: (panel_x + PADDING + BUTTON_GAP, y),
                    size: BUTTON_SIZE,
                    anchor: Anchor::TopRight,
                    visible: true,
                };
                (action, UIButton::new(action.label(), element))
            })
            .collect();

        Self {
            width,
            height,
            panel,
            buttons,
        }
    }

    /// Action of the button under `(x, y)`, if any
    pub fn click(&self, x: f32, y: f32) -> Option<ControlAction> {
        let point = Vec2::new(x, y);
        self.buttons
            .iter()
            .find(|(_, button)| button.hit(self.width, self.height, point))
            .map(|(action, _)| *action)
    }

    /// Update hover highlighting for a pointer at `(x, y)`
    pub fn hover(&mut self, x: f32, y: f32) {
        let point = Vec2::new(x, y);
        for (_, button) in &mut self.buttons {
            button.update_hover(self.width, self.height, point);
        }
    }

    /// Center of an action's button in canvas pixels
    pub fn button_center(&self, action: ControlAction) -> Option<Vec2> {
        let (_, button) = self.buttons.iter().find(|(a, _)| *a == action)?;
        let (anchor_x, anchor_y) = button.element.anchor.to_normalized();
        Some(Vec2::new(
            anchor_x * self.width + button.element.position.0 + button.element.size.0 * 0.5,
            anchor_y * self.height + button.element.position.1 + button.element.size.1 * 0.5,
        ))
    }

    /// Panel and buttons
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = self.panel.draw_commands(self.width, self.height);
        for (_, button) in &self.buttons {
            commands.extend(button.draw_commands(self.width, self.height));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteor_engine::ui::ButtonState;

    #[test]
    fn test_buttons_are_stacked_in_order() {
        let surface = ControlSurface::new(800.0, 600.0);
        let centers: Vec<_> = ControlAction::ALL
            .iter()
            .map(|a| surface.button_center(*a).unwrap())
            .collect();
        assert!(centers[0].y < centers[1].y && centers[1].y < centers[2].y);
        assert!(centers.iter().all(|c| c.x > 600.0 && c.x < 800.0));
    }

    #[test]
    fn test_click_hits_each_button() {
        let surface = ControlSurface::new(800.0, 600.0);
        for action in ControlAction::ALL {
            let center = surface.button_center(action).unwrap();
            assert_eq!(surface.click(center.x, center.y), Some(action));
        }
    }

    #[test]
    fn test_click_outside_buttons_is_ignored() {
        let surface = ControlSurface::new(800.0, 600.0);
        assert_eq!(surface.click(100.0, 100.0), None);
        // Panel padding is not a button
        assert_eq!(surface.click(800.0 - MARGIN - 2.0, MARGIN + 2.0), None);
    }

    #[test]
    fn test_hover_highlights_single_button() {
        let mut surface = ControlSurface::new(800.0, 600.0);
        let center = surface.button_center(ControlAction::Pause).unwrap();
        surface.hover(center.x, center.y);

        let states: Vec<_> = surface.buttons.iter().map(|(_, b)| b.state).collect();
        assert_eq!(states, vec![ButtonState::Normal, ButtonState::Hovered, ButtonState::Normal]);
    }

    #[test]
    fn test_draw_commands_cover_panel_and_buttons() {
        let surface = ControlSurface::new(800.0, 600.0);
        let commands = surface.draw_commands();
        // Panel rect plus rect and label per button
        assert_eq!(commands.len(), 1 + 3 * 2);
        let labels: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(label) => Some(label.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Start", "Pause", "Reset"]);
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("pause".parse::<ControlAction>(), Ok(ControlAction::Pause));
        assert_eq!(" RESET ".parse::<ControlAction>(), Ok(ControlAction::Reset));
        assert!("stop".parse::<ControlAction>().is_err());
    }
}
