//! Meteor Madness application
//!
//! Wires the simulation, spawner, painter, control surface and globe into the
//! engine's frame loop.

use std::fmt;
use std::str::FromStr;

use meteor_engine::{AppError, Application, Engine, FrameContext};

use crate::components::Impact;
use crate::config::MeteorConfig;
use crate::controls::{ControlAction, ControlSurface};
use crate::globe::GlobeView;
use crate::heatmap::HeatmapRenderer;
use crate::painter::FramePainter;
use crate::simulation::{Simulation, SimulationStats};
use crate::spawner::MeteorSpawner;

/// Control action applied at a given frame
///
/// Parsed from `FRAME:ACTION`, e.g. `120:pause`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    /// Frame index the action fires on
    pub frame: u64,
    /// Action to apply
    pub action: ControlAction,
}

impl FromStr for ScheduledAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, action) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected FRAME:ACTION, got '{}'", s))?;
        let frame = frame
            .trim()
            .parse()
            .map_err(|e| format!("Invalid frame '{}': {}", frame, e))?;
        Ok(Self {
            frame,
            action: action.parse()?,
        })
    }
}

impl fmt::Display for ScheduledAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.frame, self.action)
    }
}

/// Frame-loop application running the meteor shower
pub struct MeteorMadnessApp {
    config: MeteorConfig,
    simulation: Simulation,
    spawner: MeteorSpawner,
    controls: ControlSurface,
    painter: FramePainter,
    globe: GlobeView,
    schedule: Vec<ScheduledAction>,
    frames_rastered: u64,
}

impl MeteorMadnessApp {
    /// Create the application from its configuration
    pub fn new(config: MeteorConfig) -> Self {
        let width = config.canvas.width as f32;
        let height = config.canvas.height as f32;

        Self {
            simulation: Simulation::new(config.simulation.clone(), width, height),
            spawner: MeteorSpawner::new(config.simulation.spawn_interval()),
            controls: ControlSurface::new(width, height),
            painter: FramePainter::new(HeatmapRenderer::new(config.heatmap.clone())),
            globe: GlobeView::new(config.globe.clone()),
            schedule: Vec::new(),
            frames_rastered: 0,
            config,
        }
    }

    /// Apply `actions` at their frames
    pub fn with_schedule(mut self, mut actions: Vec<ScheduledAction>) -> Self {
        actions.sort_by_key(|a| a.frame);
        self.schedule = actions;
        self
    }

    /// Apply a control action as if its button had been clicked
    pub fn apply(&mut self, action: ControlAction) {
        let was_running = self.simulation.is_running();
        self.simulation.apply(action);
        // The spawn clock restarts whenever the run flag flips
        if was_running != self.simulation.is_running() {
            self.spawner.reset();
        }
    }

    /// Forward a pointer click; returns the action it triggered
    pub fn click(&mut self, x: f32, y: f32) -> Option<ControlAction> {
        let action = self.controls.click(x, y)?;
        log::debug!("{} clicked", action);
        self.apply(action);
        Some(action)
    }

    /// Forward a pointer move so the button under it is highlighted
    pub fn hover(&mut self, x: f32, y: f32) {
        self.controls.hover(x, y);
    }

    /// Simulation state
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Globe data model
    pub fn globe(&self) -> &GlobeView {
        &self.globe
    }

    /// Mutable globe data model
    pub fn globe_mut(&mut self) -> &mut GlobeView {
        &mut self.globe
    }

    /// Control surface
    pub fn controls(&self) -> &ControlSurface {
        &self.controls
    }

    /// Summary counts
    pub fn stats(&self) -> SimulationStats {
        self.simulation.stats()
    }

    /// Frames that were rasterized
    pub fn frames_rastered(&self) -> u64 {
        self.frames_rastered
    }

    fn run_schedule(&mut self, frame: u64) {
        let due = self.schedule.iter().take_while(|a| a.frame <= frame).count();
        let actions: Vec<_> = self.schedule.drain(..due).collect();
        for scheduled in actions {
            log::info!("Frame {}: {}", frame, scheduled.action);
            self.apply(scheduled.action);
        }
    }

    fn should_raster(&self, frame: &FrameContext) -> bool {
        let every = u64::from(self.config.output.raster_every);
        frame.is_last || (every > 0 && frame.index % every == 0)
    }

    fn mirror_on_globe(&mut self, impacts: &[Impact]) {
        let (width, height) = self.simulation.dimensions();
        for impact in impacts {
            // World map is equirectangular
            let lng = impact.position.x / width * 360.0 - 180.0;
            let lat = 90.0 - impact.position.y / height * 180.0;
            self.globe.trigger_explosion(lat, lng);
        }
    }
}

impl Application for MeteorMadnessApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let canvas = engine.canvas();
        if canvas.width() != self.config.canvas.width || canvas.height() != self.config.canvas.height {
            return Err(AppError::Config(format!(
                "Canvas is {}x{} but the simulation expects {}x{}",
                canvas.width(),
                canvas.height(),
                self.config.canvas.width,
                self.config.canvas.height
            )));
        }

        self.simulation.seed_initial();
        log::info!(
            "Meteor Madness initialized: {} meteors on a {}x{} canvas, ground at y={:.0}",
            self.simulation.meteors().len(),
            canvas.width(),
            canvas.height(),
            self.simulation.ground_level()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
        self.run_schedule(frame.index);

        self.spawner.advance(frame.delta(), &mut self.simulation);

        let before = self.simulation.impacts().len();
        let report = self.simulation.tick();
        if report.landed > 0 {
            let fresh = self.simulation.impacts()[before..].to_vec();
            self.mirror_on_globe(&fresh);
        }

        self.globe.update(frame.delta_time);
        let diff = self.globe.sync();
        if !diff.is_empty() {
            log::trace!(
                "Globe: +{} -{} ~{}",
                diff.added.len(),
                diff.removed.len(),
                diff.changed.len()
            );
        }

        if self.should_raster(frame) {
            engine.draw(self.painter.paint(&self.simulation, &self.controls));
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
        if engine.draw_list().is_empty() {
            return Ok(());
        }
        engine.present()?;
        self.frames_rastered += 1;

        if frame.is_last {
            if let Some(path) = &self.config.output.snapshot_path {
                engine.canvas().save_png(path)?;
                log::info!("Snapshot written to {}", path);
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let stats = self.simulation.stats();
        log::info!(
            "Finished after {} frames ({:.1}s simulated): {} impacts, {} meteors, {} live particles, {} meteors spawned, {} frames rastered",
            engine.timer().frame_count(),
            engine.timer().total_time(),
            stats.impacts,
            stats.meteors,
            stats.particles,
            self.spawner.total_spawned(),
            self.frames_rastered
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteor_engine::foundation::math::Rgba;
    use meteor_engine::render::DrawCommand;

    fn config() -> MeteorConfig {
        let mut config = MeteorConfig::default();
        config.canvas.width = 320;
        config.canvas.height = 240;
        config.canvas.background_image = None;
        config.simulation.seed = Some(8);
        config
    }

    #[test]
    fn test_schedule_parsing() {
        let parsed: ScheduledAction = "120:pause".parse().unwrap();
        assert_eq!(
            parsed,
            ScheduledAction {
                frame: 120,
                action: ControlAction::Pause
            }
        );
        assert_eq!(parsed.to_string(), "120:Pause");
        assert!("pause".parse::<ScheduledAction>().is_err());
        assert!("x:pause".parse::<ScheduledAction>().is_err());
        assert!("10:jump".parse::<ScheduledAction>().is_err());
    }

    #[test]
    fn test_click_routes_to_simulation() {
        let mut app = MeteorMadnessApp::new(config());
        let pause = app.controls().button_center(ControlAction::Pause).unwrap();
        assert_eq!(app.click(pause.x, pause.y), Some(ControlAction::Pause));
        assert!(!app.simulation().is_running());
        assert_eq!(app.click(5.0, 5.0), None);
    }

    #[test]
    fn test_hover_highlights_button_in_drawn_controls() {
        let mut app = MeteorMadnessApp::new(config());
        let start = app.controls().button_center(ControlAction::Start).unwrap();
        app.hover(start.x, start.y);

        let label_color = |app: &MeteorMadnessApp, name: &str| {
            app.controls().draw_commands().into_iter().find_map(|c| match c {
                DrawCommand::Text(label) if label.text == name => Some(label.color),
                _ => None,
            })
        };
        assert_eq!(label_color(&app, "Start"), Some(Rgba::BLACK));
        assert_eq!(label_color(&app, "Pause"), Some(Rgba::WHITE));

        // Moving off the panel clears the highlight
        app.hover(5.0, 5.0);
        assert_eq!(label_color(&app, "Start"), Some(Rgba::WHITE));
    }

    #[test]
    fn test_schedule_applies_in_order() {
        let mut app = MeteorMadnessApp::new(config()).with_schedule(vec![
            ScheduledAction {
                frame: 5,
                action: ControlAction::Start,
            },
            ScheduledAction {
                frame: 2,
                action: ControlAction::Reset,
            },
        ]);

        app.run_schedule(1);
        assert!(app.simulation().is_running());
        app.run_schedule(2);
        assert!(!app.simulation().is_running());
        app.run_schedule(5);
        assert!(app.simulation().is_running());
        assert!(app.schedule.is_empty());
    }

    #[test]
    fn test_impacts_are_mirrored_on_globe() {
        let mut app = MeteorMadnessApp::new(config());
        let impact = Impact {
            position: meteor_engine::foundation::math::Vec2::new(160.0, 120.0),
        };
        app.mirror_on_globe(&[impact]);
        let effect = &app.globe().explosions()[0];
        // Map center is lat 0, lng 0
        let expected = meteor_engine::foundation::math::lat_lng_to_cartesian(0.0, 0.0, 1.2);
        assert!((effect.position - expected).norm() < 1e-5);
    }
}
