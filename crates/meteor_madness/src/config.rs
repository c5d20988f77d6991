//! Simulator configuration
//!
//! Every tuning constant of the simulation lives here with its default, so a
//! TOML or RON file can override any subset of them.

use std::time::Duration;

use meteor_engine::core::config::{CanvasConfig, Config, ConfigError, EngineConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::globe::EXPLOSION_START_SCALE;

/// Top-level simulator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    /// Frame loop settings
    pub engine: EngineConfig,

    /// Drawing surface settings
    pub canvas: CanvasConfig,

    /// Meteor and particle physics
    pub simulation: SimulationConfig,

    /// Heatmap and legend
    pub heatmap: HeatmapConfig,

    /// Asteroid API endpoint
    pub api: ApiConfig,

    /// 3D globe view
    pub globe: GlobeConfig,

    /// Snapshot output
    pub output: OutputConfig,
}

impl Config for MeteorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.canvas.validate()?;
        self.simulation.validate()?;
        self.heatmap.validate()?;
        self.globe.validate()?;
        Ok(())
    }
}

/// Half-open sampling interval `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Inclusive lower bound
    pub min: f32,
    /// Exclusive upper bound
    pub max: f32,
}

impl ValueRange {
    /// Create a new range
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a uniform sample
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{} range is inverted: [{}, {})",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What Pause stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseMode {
    /// Pause stops spawning and meteor motion; explosions keep fading
    #[default]
    SpawnOnly,
    /// Pause also freezes explosion particles
    FreezeAll,
}

/// Meteor and particle physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed (`None` seeds from entropy)
    pub seed: Option<u64>,
    /// Whether the run flag starts set
    pub start_running: bool,
    /// What Pause stops
    pub pause_mode: PauseMode,

    /// Meteors placed at startup
    pub initial_meteors: usize,
    /// Milliseconds between spawns
    pub spawn_interval_ms: u64,
    /// Ground line as a fraction of canvas height
    pub ground_ratio: f32,
    /// Horizontal meteor velocity (pixels per frame)
    pub meteor_vx: ValueRange,
    /// Vertical meteor velocity (pixels per frame)
    pub meteor_vy: ValueRange,
    /// Meteor radius in pixels
    pub meteor_radius: ValueRange,

    /// Particles per explosion
    pub particles_per_explosion: usize,
    /// Particle launch speed (pixels per frame)
    pub particle_speed: ValueRange,
    /// Particle starting radius in pixels
    pub particle_radius: ValueRange,
    /// Added to particle vertical velocity each frame
    pub gravity: f32,
    /// Per-frame multiplier for particle radius and opacity
    pub decay: f32,
    /// Particles are kept while opacity stays above this
    pub fade_threshold: f32,
}

impl SimulationConfig {
    /// Spawn period as a `Duration`
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("Spawn interval must be positive".to_string()));
        }
        if !(self.ground_ratio > 0.0 && self.ground_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "Ground ratio must be in (0, 1], got {}",
                self.ground_ratio
            )));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(ConfigError::Invalid(format!("Decay must be in (0, 1), got {}", self.decay)));
        }
        if self.fade_threshold <= 0.0 {
            return Err(ConfigError::Invalid("Fade threshold must be positive".to_string()));
        }
        self.meteor_vx.validate("meteor_vx")?;
        self.meteor_vy.validate("meteor_vy")?;
        self.meteor_radius.validate("meteor_radius")?;
        self.particle_speed.validate("particle_speed")?;
        self.particle_radius.validate("particle_radius")?;
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_running: true,
            pause_mode: PauseMode::SpawnOnly,
            initial_meteors: 20,
            spawn_interval_ms: 500,
            ground_ratio: 0.8,
            meteor_vx: ValueRange::new(-1.0, 1.0),
            meteor_vy: ValueRange::new(2.0, 5.0),
            meteor_radius: ValueRange::new(5.0, 8.0),
            particles_per_explosion: 50,
            particle_speed: ValueRange::new(2.0, 7.0),
            particle_radius: ValueRange::new(2.0, 7.0),
            gravity: 0.05,
            decay: 0.96,
            fade_threshold: 0.05,
        }
    }
}

/// Heatmap, legend and risk grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Radius of the glow painted at each impact
    pub glow_radius: f32,
    /// Side of a risk grid cell in pixels
    pub cell_size: f32,
    /// Impacts per unit of cell opacity
    pub risk_divisor: f32,
    /// Highest cell opacity
    pub risk_cap: f32,
    /// Legend top-left corner
    pub legend_origin: (f32, f32),
    /// Legend bar width and height
    pub legend_size: (f32, f32),
}

impl HeatmapConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid("Risk cell size must be positive".to_string()));
        }
        if self.risk_divisor <= 0.0 {
            return Err(ConfigError::Invalid("Risk divisor must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            glow_radius: 50.0,
            cell_size: 50.0,
            risk_divisor: 5.0,
            risk_cap: 0.5,
            legend_origin: (20.0, 20.0),
            legend_size: (20.0, 100.0),
        }
    }
}

/// Asteroid API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// 3D globe view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Earth sphere radius
    pub earth_radius: f32,
    /// Sphere segments for the earth mesh
    pub earth_segments: u32,
    /// Earth color as `#rrggbb`
    pub earth_color: String,
    /// Asteroid markers are placed in `[-spread, spread)` on each axis
    pub marker_spread: f32,
    /// Marker radius per kilometer of diameter
    pub marker_scale: f32,
    /// Explosion effects stop growing at this scale
    pub explosion_max_scale: f32,
    /// Scale added per second
    pub explosion_growth_rate: f32,
    /// Opacity removed per second
    pub explosion_fade_rate: f32,
}

impl GlobeConfig {
    /// Validate the configuration
    ///
    /// Effects are only removed once they grow past `explosion_max_scale`, so
    /// growth must be positive and the cap must lie above the start scale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.earth_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Earth radius must be positive, got {}",
                self.earth_radius
            )));
        }
        if !(self.explosion_growth_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Explosion growth rate must be positive, got {}",
                self.explosion_growth_rate
            )));
        }
        if !(self.explosion_max_scale > EXPLOSION_START_SCALE) {
            return Err(ConfigError::Invalid(format!(
                "Explosion max scale must exceed {}, got {}",
                EXPLOSION_START_SCALE, self.explosion_max_scale
            )));
        }
        if !(self.explosion_fade_rate >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Explosion fade rate must not be negative, got {}",
                self.explosion_fade_rate
            )));
        }
        Ok(())
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            earth_radius: 1.2,
            earth_segments: 64,
            earth_color: "#0a1f44".to_string(),
            marker_spread: 2.0,
            marker_scale: 0.002,
            explosion_max_scale: 5.0,
            explosion_growth_rate: 3.0,
            explosion_fade_rate: 2.0,
        }
    }
}

/// Snapshot output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG written after the final frame
    pub snapshot_path: Option<String>,
    /// Rasterize every N frames (0 rasterizes only the final frame)
    pub raster_every: u32,
}
