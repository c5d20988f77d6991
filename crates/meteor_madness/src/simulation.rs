//! Meteor simulation controller
//!
//! [`Simulation`] owns every piece of per-frame state: falling meteors,
//! explosion bursts, the impact history and the run flag. The frame loop calls
//! [`Simulation::tick`] once per frame and the spawner calls
//! [`Simulation::spawn`] on its own period; both run on the same thread.

use std::f32::consts::TAU;

use meteor_engine::foundation::math::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::components::{Explosion, Impact, Meteor, Particle};
use crate::config::{PauseMode, SimulationConfig};
use crate::controls::ControlAction;

/// Counts describing the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationStats {
    /// Falling meteors
    pub meteors: usize,
    /// Explosions with live particles
    pub explosions: usize,
    /// Live particles across all explosions
    pub particles: usize,
    /// Impacts recorded since the last reset
    pub impacts: usize,
    /// Run flag
    pub running: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Meteors that reached the ground this tick
    pub landed: usize,
    /// Explosions that finished fading this tick
    pub finished_explosions: usize,
}

/// Meteor shower state and physics
pub struct Simulation {
    config: SimulationConfig,
    width: f32,
    height: f32,
    running: bool,
    meteors: Vec<Meteor>,
    explosions: Vec<Explosion>,
    impacts: Vec<Impact>,
    rng: StdRng,
}

impl Simulation {
    /// Create an empty simulation for a `width` x `height` canvas
    pub fn new(config: SimulationConfig, width: f32, height: f32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            running: config.start_running,
            config,
            width,
            height,
            meteors: Vec::new(),
            explosions: Vec::new(),
            impacts: Vec::new(),
            rng,
        }
    }

    /// Y coordinate past which meteors explode
    pub fn ground_level(&self) -> f32 {
        self.config.ground_ratio * self.height
    }

    /// Scatter the initial meteors above the ground line
    pub fn seed_initial(&mut self) {
        let ground = self.ground_level();
        for _ in 0..self.config.initial_meteors {
            let y = self.rng.gen::<f32>() * ground;
            let meteor = self.random_meteor(y);
            self.meteors.push(meteor);
        }
        log::debug!("Seeded {} initial meteors", self.config.initial_meteors);
    }

    /// Add one meteor at the top edge if the run flag is set
    ///
    /// Returns whether a meteor was added.
    pub fn spawn(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let meteor = self.random_meteor(0.0);
        self.meteors.push(meteor);
        true
    }

    fn random_meteor(&mut self, y: f32) -> Meteor {
        let x = self.rng.gen::<f32>() * self.width;
        let vx = self.config.meteor_vx.sample(&mut self.rng);
        let vy = self.config.meteor_vy.sample(&mut self.rng);
        let radius = self.config.meteor_radius.sample(&mut self.rng);
        Meteor::new(Vec2::new(x, y), Vec2::new(vx, vy), radius)
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        if self.running {
            let ground = self.ground_level();
            let mut landed = Vec::new();
            self.meteors.retain_mut(|meteor| {
                meteor.advance();
                if meteor.position.y > ground {
                    landed.push(meteor.position);
                    false
                } else {
                    true
                }
            });

            report.landed = landed.len();
            for point in landed {
                self.create_explosion(point);
            }
        }

        let frozen = !self.running && self.config.pause_mode == PauseMode::FreezeAll;
        if !frozen {
            let (gravity, decay, threshold) = (self.config.gravity, self.config.decay, self.config.fade_threshold);
            for explosion in &mut self.explosions {
                explosion.step(gravity, decay, threshold);
            }
            let before = self.explosions.len();
            self.explosions.retain(|e| !e.is_finished());
            report.finished_explosions = before - self.explosions.len();
        }

        log::trace!(
            "Tick: {} meteors, {} explosions, {} impacts",
            self.meteors.len(),
            self.explosions.len(),
            self.impacts.len()
        );
        report
    }

    /// Burst of particles at `point` plus one impact record
    pub fn create_explosion(&mut self, point: Vec2) {
        self.impacts.push(Impact { position: point });

        let particles = (0..self.config.particles_per_explosion)
            .map(|_| {
                let angle = self.rng.gen::<f32>() * TAU;
                let speed = self.config.particle_speed.sample(&mut self.rng);
                let radius = self.config.particle_radius.sample(&mut self.rng);
                Particle::new(point, Vec2::new(angle.cos(), angle.sin()) * speed, radius)
            })
            .collect();

        self.explosions.push(Explosion { origin: point, particles });
        log::debug!("Impact #{} at ({:.1}, {:.1})", self.impacts.len(), point.x, point.y);
    }

    /// Set the run flag
    pub fn start(&mut self) {
        self.running = true;
        log::info!("Simulation started");
    }

    /// Clear the run flag
    pub fn pause(&mut self) {
        self.running = false;
        log::info!("Simulation paused");
    }

    /// Clear the run flag and drop all meteors, explosions and impacts
    pub fn reset(&mut self) {
        self.running = false;
        self.meteors.clear();
        self.explosions.clear();
        self.impacts.clear();
        log::info!("Simulation reset");
    }

    /// Apply a control surface action
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::Start => self.start(),
            ControlAction::Pause => self.pause(),
            ControlAction::Reset => self.reset(),
        }
    }

    /// Run flag
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Falling meteors
    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    /// Explosions with live particles
    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Impact history since the last reset
    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    /// Live particles across all explosions
    pub fn particle_count(&self) -> usize {
        self.explosions.iter().map(|e| e.particles.len()).sum()
    }

    /// Canvas size the simulation runs in
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Physics settings
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Summary counts
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            meteors: self.meteors.len(),
            explosions: self.explosions.len(),
            particles: self.particle_count(),
            impacts: self.impacts.len(),
            running: self.running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn simulation() -> Simulation {
        Simulation::new(seeded(1), 800.0, 600.0)
    }

    #[test]
    fn test_initial_meteors_sit_above_ground() {
        let mut sim = simulation();
        sim.seed_initial();
        assert_eq!(sim.meteors().len(), 20);
        for meteor in sim.meteors() {
            assert!(meteor.position.y >= 0.0 && meteor.position.y < 480.0);
            assert!(meteor.position.x >= 0.0 && meteor.position.x < 800.0);
            assert!(meteor.velocity.y >= 2.0 && meteor.velocity.y < 5.0);
            assert!(meteor.radius >= 5.0 && meteor.radius < 8.0);
        }
    }

    #[test]
    fn test_spawn_starts_at_top_edge() {
        let mut sim = simulation();
        assert!(sim.spawn());
        assert_relative_eq!(sim.meteors()[0].position.y, 0.0);
    }

    #[test]
    fn test_meteor_crossing_ground_becomes_one_explosion_and_impact() {
        let mut sim = simulation();
        sim.meteors.push(Meteor::new(Vec2::new(100.0, 478.0), Vec2::new(0.5, 3.0), 6.0));
        sim.meteors.push(Meteor::new(Vec2::new(300.0, 10.0), Vec2::new(0.0, 3.0), 6.0));

        let report = sim.tick();

        assert_eq!(report.landed, 1);
        assert_eq!(sim.meteors().len(), 1);
        assert_eq!(sim.explosions().len(), 1);
        assert_eq!(sim.explosions()[0].particles.len(), 50);
        assert_eq!(sim.impacts().len(), 1);
        assert_relative_eq!(sim.impacts()[0].position.x, 100.5);
        assert_relative_eq!(sim.impacts()[0].position.y, 481.0);
    }

    #[test]
    fn test_meteor_exactly_on_ground_is_kept() {
        let mut sim = simulation();
        sim.meteors.push(Meteor::new(Vec2::new(0.0, 477.0), Vec2::new(0.0, 3.0), 6.0));
        sim.tick();
        assert_eq!(sim.meteors().len(), 1);
        assert!(sim.impacts().is_empty());
    }

    #[test]
    fn test_new_explosion_advances_in_same_tick() {
        let mut sim = simulation();
        sim.meteors.push(Meteor::new(Vec2::new(100.0, 479.0), Vec2::new(0.0, 3.0), 6.0));
        sim.tick();
        for particle in &sim.explosions()[0].particles {
            assert_relative_eq!(particle.opacity, 0.96);
            assert_eq!(particle.age, 1);
        }
    }

    #[test]
    fn test_particle_burst_parameters_within_ranges() {
        let mut sim = simulation();
        sim.create_explosion(Vec2::new(50.0, 50.0));
        for particle in &sim.explosions()[0].particles {
            let speed = particle.velocity.norm();
            assert!(speed >= 2.0 - 1e-4 && speed < 7.0 + 1e-4);
            assert!(particle.radius >= 2.0 && particle.radius < 7.0);
            assert_relative_eq!(particle.opacity, 1.0);
        }
    }

    #[test]
    fn test_explosions_fade_out_completely() {
        let mut sim = simulation();
        sim.create_explosion(Vec2::new(50.0, 50.0));
        let mut finished = 0;
        for _ in 0..80 {
            finished += sim.tick().finished_explosions;
        }
        assert_eq!(finished, 1);
        assert!(sim.explosions().is_empty());
        // Impacts outlive their explosions
        assert_eq!(sim.impacts().len(), 1);
    }

    #[test]
    fn test_pause_stops_spawning_and_meteor_motion_but_not_particles() {
        let mut sim = simulation();
        sim.spawn();
        sim.create_explosion(Vec2::new(50.0, 50.0));
        sim.pause();

        let meteor_before = sim.meteors()[0].clone();
        assert!(!sim.spawn());
        sim.tick();

        assert_eq!(sim.meteors().len(), 1);
        assert_eq!(sim.meteors()[0], meteor_before);
        assert_relative_eq!(sim.explosions()[0].particles[0].opacity, 0.96);
    }

    #[test]
    fn test_freeze_all_pause_holds_particles() {
        let config = SimulationConfig {
            pause_mode: PauseMode::FreezeAll,
            ..seeded(3)
        };
        let mut sim = Simulation::new(config, 800.0, 600.0);
        sim.create_explosion(Vec2::new(50.0, 50.0));
        sim.pause();
        sim.tick();
        assert_relative_eq!(sim.explosions()[0].particles[0].opacity, 1.0);

        sim.start();
        sim.tick();
        assert_relative_eq!(sim.explosions()[0].particles[0].opacity, 0.96);
    }

    #[test]
    fn test_reset_clears_everything_and_start_resumes() {
        let mut sim = simulation();
        sim.seed_initial();
        sim.create_explosion(Vec2::new(10.0, 500.0));

        sim.apply(ControlAction::Reset);
        assert!(!sim.is_running());
        assert_eq!(sim.stats(), SimulationStats::default());
        assert!(!sim.spawn());

        sim.apply(ControlAction::Start);
        assert!(sim.spawn());
        assert_eq!(sim.meteors().len(), 1);
    }

    #[test]
    fn test_impacts_never_decrease_without_reset() {
        let mut sim = simulation();
        sim.seed_initial();
        let mut last = 0;
        for frame in 0..600 {
            if frame % 30 == 0 {
                sim.spawn();
            }
            sim.tick();
            assert!(sim.impacts().len() >= last);
            last = sim.impacts().len();
        }
        assert!(last > 0);
    }

    #[test]
    fn test_same_seed_same_history() {
        let run = |seed| {
            let mut sim = Simulation::new(seeded(seed), 640.0, 480.0);
            sim.seed_initial();
            for _ in 0..200 {
                sim.tick();
            }
            sim.impacts().to_vec()
        };
        assert_eq!(run(11), run(11));
    }
}
