//! Per-frame overlay composition

use meteor_engine::foundation::math::Rgba;
use meteor_engine::render::{ColorStop, DrawCommand, Paint};

use crate::components::Particle;
use crate::controls::ControlSurface;
use crate::heatmap::HeatmapRenderer;
use crate::simulation::Simulation;

/// Builds the overlay draw list for one frame
///
/// Layers, bottom to top: meteors, explosion particles, heatmap, controls.
#[derive(Debug, Clone, Default)]
pub struct FramePainter {
    heatmap: HeatmapRenderer,
}

impl FramePainter {
    /// Create a painter using the given heatmap renderer
    pub fn new(heatmap: HeatmapRenderer) -> Self {
        Self { heatmap }
    }

    /// Draw commands for the current simulation state
    pub fn paint(&self, simulation: &Simulation, controls: &ControlSurface) -> Vec<DrawCommand> {
        let (width, height) = simulation.dimensions();
        let mut commands = vec![DrawCommand::Clear];

        commands.extend(simulation.meteors().iter().map(|meteor| DrawCommand::FillCircle {
            center: meteor.position,
            radius: meteor.radius,
            paint: Paint::Solid(Rgba::WHITE),
        }));

        commands.extend(
            simulation
                .explosions()
                .iter()
                .flat_map(|explosion| explosion.particles.iter())
                .map(particle_glow),
        );

        commands.extend(self.heatmap.render(simulation.impacts(), width, height));
        commands.extend(controls.draw_commands());
        commands
    }
}

fn particle_glow(particle: &Particle) -> DrawCommand {
    DrawCommand::FillCircle {
        center: particle.position,
        radius: particle.radius,
        paint: Paint::RadialGradient {
            center: particle.position,
            radius: particle.radius,
            stops: vec![
                ColorStop::new(0.0, particle.color.with_alpha(particle.opacity)),
                ColorStop::new(1.0, particle.color.with_alpha(0.0)),
            ],
        },
    }
}
