//! Math utilities and types
//!
//! Provides the vector aliases used by simulations and an RGBA color type with
//! CSS-style semantics (8-bit channels, floating point alpha).

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Color with 8-bit RGB channels and an alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Opacity (0 = transparent, 1 = opaque)
    pub a: f32,
}

impl Rgba {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque orange (CSS `orange`)
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    /// Opaque yellow
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Opaque green (CSS `green`)
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    /// Create a color from channels and alpha
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
        Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Linear interpolation between two colors (channels and alpha)
    pub fn lerp(self, other: Self, t: f32) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Alpha as an 8-bit value
    pub fn alpha_u8(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Convert latitude/longitude in degrees to a point on a sphere
///
/// Uses a Y-up frame where longitude 0 faces `+X` and longitude 90° faces `-Z`:
/// `x = -r·sinφ·cosθ, y = r·cosφ, z = r·sinφ·sinθ` with
/// `φ = 90° - lat` and `θ = lng + 180°`.
pub fn lat_lng_to_cartesian(lat: f32, lng: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgba::from_hex("#0a1f44"), Some(Rgba::rgb(10, 31, 68)));
        assert_eq!(Rgba::from_hex("0a1f44"), None);
        assert_eq!(Rgba::from_hex("#0a1f4"), None);
        assert_eq!(Rgba::from_hex("#zz1f44"), None);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Rgba::new(255, 0, 0, 0.6);
        let b = Rgba::new(255, 165, 0, 0.4);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);

        let mid = a.lerp(b, 0.5);
        assert_eq!(mid.g, 83);
        assert_relative_eq!(mid.a, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_display_matches_css() {
        assert_eq!(Rgba::new(255, 200, 0, 0.5).to_string(), "rgba(255,200,0,0.5)");
    }

    #[test]
    fn test_lat_lng_poles_and_equator() {
        let north = lat_lng_to_cartesian(90.0, 0.0, 100.0);
        assert_relative_eq!(north.y, 100.0, epsilon = 1e-3);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-3);

        // Equator at longitude 0 faces +X (theta = 180°)
        let origin = lat_lng_to_cartesian(0.0, 0.0, 100.0);
        assert_relative_eq!(origin.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-3);

        let east = lat_lng_to_cartesian(0.0, 90.0, 100.0);
        assert_relative_eq!(east.z, -100.0, epsilon = 1e-3);
        assert_relative_eq!(east.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(origin.z, 0.0, epsilon = 1e-3);

        let p = lat_lng_to_cartesian(12.5, -70.0, 1.2);
        assert_relative_eq!(p.norm(), 1.2, epsilon = 1e-4);
    }
}
