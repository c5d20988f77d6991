//! UI widgets
//!
//! Screen-space buttons and panels with anchoring, hit testing and draw
//! command generation.

pub mod core;
pub mod button;
pub mod panel;
pub mod layout;

pub use self::core::{Anchor, UIElement};
pub use button::{UIButton, ButtonState};
pub use panel::UIPanel;
pub use layout::UILayout;
