//! Simulation entities

use meteor_engine::foundation::math::{Rgba, Vec2};

/// A falling object before impact
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Center in canvas pixels
    pub position: Vec2,

    /// Displacement per frame
    pub velocity: Vec2,

    /// Drawn radius in pixels
    pub radius: f32,
}

impl Meteor {
    /// Create a new meteor
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Move one frame along the velocity
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }
}

/// Color of an explosion particle by age in frames
///
/// Bright yellow while fresh, cooling through orange and red to a dark
/// crimson ember.
pub fn explosion_color(age: u32) -> Rgba {
    match age {
        0..=4 => Rgba::rgb(255, 200, 0),
        5..=9 => Rgba::rgb(255, 100, 0),
        10..=19 => Rgba::rgb(200, 0, 0),
        _ => Rgba::rgb(120, 0, 50),
    }
}

/// One fragment of an explosion
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center in canvas pixels
    pub position: Vec2,

    /// Displacement per frame
    pub velocity: Vec2,

    /// Drawn radius in pixels
    pub radius: f32,

    /// Opacity in `0.0..=1.0`
    pub opacity: f32,

    /// Frames lived
    pub age: u32,

    /// Current color (opaque, `opacity` applies on top)
    pub color: Rgba,
}

impl Particle {
    /// Fresh particle at `origin`
    pub fn new(origin: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position: origin,
            velocity,
            radius,
            opacity: 1.0,
            age: 0,
            color: explosion_color(0),
        }
    }

    /// Advance one frame: move, fall, shrink and fade
    pub fn step(&mut self, gravity: f32, decay: f32) {
        self.position += self.velocity;
        self.velocity.y += gravity;
        self.radius *= decay;
        self.opacity *= decay;
        self.color = explosion_color(self.age);
        self.age += 1;
    }

    /// Whether the particle is still visible enough to keep
    pub fn is_visible(&self, fade_threshold: f32) -> bool {
        self.opacity > fade_threshold
    }
}

/// Particle burst sharing an origin
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    /// Impact point the burst started from
    pub origin: Vec2,

    /// Live particles
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Advance every particle one frame and drop the faded ones
    pub fn step(&mut self, gravity: f32, decay: f32, fade_threshold: f32) {
        for particle in &mut self.particles {
            particle.step(gravity, decay);
        }
        self.particles.retain(|p| p.is_visible(fade_threshold));
    }

    /// Whether every particle has faded
    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Permanent record of where an explosion happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Impact point in canvas pixels
    pub position: Vec2,
}
