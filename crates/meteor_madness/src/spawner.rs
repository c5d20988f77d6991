//! Periodic meteor spawner

use std::time::Duration;

use meteor_engine::foundation::time::IntervalTimer;

use crate::simulation::Simulation;

/// Adds one meteor per elapsed period while the simulation runs
///
/// The timer keeps ticking while paused; periods that elapse then are simply
/// dropped because [`Simulation::spawn`] refuses to add meteors.
#[derive(Debug, Clone)]
pub struct MeteorSpawner {
    interval: IntervalTimer,
    spawned: u64,
}

impl MeteorSpawner {
    /// Create a spawner firing every `period`
    pub fn new(period: Duration) -> Self {
        Self {
            interval: IntervalTimer::new(period),
            spawned: 0,
        }
    }

    /// Advance the spawn clock by `delta` and spawn for every elapsed period
    ///
    /// Returns the number of meteors added.
    pub fn advance(&mut self, delta: Duration, simulation: &mut Simulation) -> usize {
        let fired = self.interval.advance(delta);
        let added = (0..fired).filter(|_| simulation.spawn()).count();
        self.spawned += added as u64;
        if added > 0 {
            log::trace!("Spawned {} meteor(s)", added);
        }
        added
    }

    /// Discard the partially elapsed period
    pub fn reset(&mut self) {
        self.interval.reset();
    }

    /// Spawn period
    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Meteors spawned over the spawner's lifetime
    pub fn total_spawned(&self) -> u64 {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn simulation() -> Simulation {
        let config = SimulationConfig {
            seed: Some(5),
            ..Default::default()
        };
        Simulation::new(config, 800.0, 600.0)
    }

    #[test]
    fn test_spawns_once_per_period() {
        let mut sim = simulation();
        let mut spawner = MeteorSpawner::new(Duration::from_millis(500));
        let frame = Duration::from_millis(100);

        let added: usize = (0..10).map(|_| spawner.advance(frame, &mut sim)).sum();
        assert_eq!(added, 2);
        assert_eq!(sim.meteors().len(), 2);
    }

    #[test]
    fn test_long_frame_catches_up() {
        let mut sim = simulation();
        let mut spawner = MeteorSpawner::new(Duration::from_millis(500));
        assert_eq!(spawner.advance(Duration::from_millis(1600), &mut sim), 3);
        assert_eq!(spawner.total_spawned(), 3);
    }

    #[test]
    fn test_paused_simulation_drops_spawns() {
        let mut sim = simulation();
        sim.pause();
        let mut spawner = MeteorSpawner::new(Duration::from_millis(500));
        assert_eq!(spawner.advance(Duration::from_secs(2), &mut sim), 0);
        assert!(sim.meteors().is_empty());

        // Clock kept running, so the next spawn follows a full period after resume
        sim.start();
        assert_eq!(spawner.advance(Duration::from_millis(499), &mut sim), 0);
        assert_eq!(spawner.advance(Duration::from_millis(1), &mut sim), 1);
    }

    #[test]
    fn test_reset_discards_partial_period() {
        let mut sim = simulation();
        let mut spawner = MeteorSpawner::new(Duration::from_millis(500));
        spawner.advance(Duration::from_millis(400), &mut sim);
        spawner.reset();
        assert_eq!(spawner.advance(Duration::from_millis(400), &mut sim), 0);
    }
}
