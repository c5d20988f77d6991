//! Fill styles: solid colors and gradients

use crate::foundation::math::{Rgba, Vec2};

/// Color at a normalized position along a gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `0.0..=1.0`
    pub offset: f32,
    /// Color at this position
    pub color: Rgba,
}

impl ColorStop {
    /// Create a new color stop
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Fill style for shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Single color
    Solid(Rgba),
    /// Gradient from `center` (offset 0) out to `radius` (offset 1)
    RadialGradient {
        /// Gradient origin
        center: Vec2,
        /// Distance at which the last stop applies
        radius: f32,
        /// Color stops in ascending offset order
        stops: Vec<ColorStop>,
    },
    /// Gradient along the line from `start` (offset 0) to `end` (offset 1)
    LinearGradient {
        /// Gradient start point
        start: Vec2,
        /// Gradient end point
        end: Vec2,
        /// Color stops in ascending offset order
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Color of this paint at `point`
    pub fn color_at(&self, point: Vec2) -> Rgba {
        match self {
            Self::Solid(color) => *color,
            Self::RadialGradient { center, radius, stops } => {
                let t = if *radius > 0.0 { (point - center).norm() / radius } else { 1.0 };
                sample_stops(stops, t)
            }
            Self::LinearGradient { start, end, stops } => {
                let axis = end - start;
                let length_sq = axis.norm_squared();
                let t = if length_sq > 0.0 { (point - start).dot(&axis) / length_sq } else { 0.0 };
                sample_stops(stops, t)
            }
        }
    }
}

fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::TRANSPARENT;
    };

    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            let local = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
            return lo.color.lerp(hi.color, local);
        }
    }
    last.color
}
