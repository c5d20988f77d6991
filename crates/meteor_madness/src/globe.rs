//! Asteroid globe scene
//!
//! [`GlobeView`] holds the plain data behind the 3D view (asteroid markers
//! and running explosion effects) and rebuilds a [`Scene`] from it every
//! frame. [`GlobeView::sync`] diffs the new scene against the one built on
//! the previous call.

use meteor_engine::foundation::math::{lat_lng_to_cartesian, Rgba, Vec3};
use meteor_engine::scene::{Camera, Light, Material, Scene, SceneDiff, SceneNode, StarField};
use rand::Rng;

use crate::api::AsteroidRecord;
use crate::config::GlobeConfig;

const MARKER_SEGMENTS: u32 = 16;
const EXPLOSION_SEGMENTS: u32 = 16;
/// Scale a globe explosion effect starts at
pub const EXPLOSION_START_SCALE: f32 = 0.1;

/// Asteroid placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidMarker {
    /// Asteroid designation
    pub name: String,
    /// Scene position
    pub position: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// Drawn red instead of yellow
    pub hazardous: bool,
}

/// Expanding, fading sphere at an impact site
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeExplosion {
    id: u64,
    /// Position on the earth's surface
    pub position: Vec3,
    /// Current uniform scale
    pub scale: f32,
    /// Current opacity
    pub opacity: f32,
}

impl GlobeExplosion {
    fn step(&mut self, dt: f32, config: &GlobeConfig) {
        if self.scale < config.explosion_max_scale {
            self.scale += config.explosion_growth_rate * dt;
            self.opacity = (self.opacity - config.explosion_fade_rate * dt).max(0.0);
        }
    }

    /// Whether the effect has reached full size
    pub fn is_finished(&self, config: &GlobeConfig) -> bool {
        self.scale >= config.explosion_max_scale
    }
}

/// Data model for the asteroid globe
pub struct GlobeView {
    config: GlobeConfig,
    earth_color: Rgba,
    markers: Vec<AsteroidMarker>,
    explosions: Vec<GlobeExplosion>,
    next_explosion_id: u64,
    previous: Scene,
}

impl GlobeView {
    /// Create an empty globe
    pub fn new(config: GlobeConfig) -> Self {
        let earth_color = Rgba::from_hex(&config.earth_color).unwrap_or_else(|| {
            log::warn!("Invalid earth color '{}', using default", config.earth_color);
            Rgba::rgb(10, 31, 68)
        });

        Self {
            config,
            earth_color,
            markers: Vec::new(),
            explosions: Vec::new(),
            next_explosion_id: 0,
            previous: Scene::default(),
        }
    }

    /// Replace the markers with one per record at a random position
    pub fn set_asteroids<R: Rng + ?Sized>(&mut self, records: &[AsteroidRecord], rng: &mut R) {
        let spread = self.config.marker_spread;
        let mut coordinate = || rng.gen::<f32>() * spread * 2.0 - spread;

        self.markers = records
            .iter()
            .map(|record| AsteroidMarker {
                name: record.name.clone(),
                position: Vec3::new(coordinate(), coordinate(), coordinate()),
                radius: record.diameter_km as f32 * self.config.marker_scale,
                hazardous: record.hazardous,
            })
            .collect();
        log::debug!("Placed {} asteroid markers", self.markers.len());
    }

    /// Start an explosion effect at a surface coordinate
    pub fn trigger_explosion(&mut self, lat: f32, lng: f32) {
        let id = self.next_explosion_id;
        self.next_explosion_id += 1;
        self.explosions.push(GlobeExplosion {
            id,
            position: lat_lng_to_cartesian(lat, lng, self.config.earth_radius),
            scale: EXPLOSION_START_SCALE,
            opacity: 1.0,
        });
    }

    /// Advance explosion effects by `dt` seconds and drop finished ones
    ///
    /// Returns the number of effects that ended.
    pub fn update(&mut self, dt: f32) -> usize {
        let config = &self.config;
        for explosion in &mut self.explosions {
            explosion.step(dt, config);
        }
        let before = self.explosions.len();
        self.explosions.retain(|e| !e.is_finished(config));
        before - self.explosions.len()
    }

    /// Asteroid markers
    pub fn markers(&self) -> &[AsteroidMarker] {
        &self.markers
    }

    /// Running explosion effects
    pub fn explosions(&self) -> &[GlobeExplosion] {
        &self.explosions
    }

    /// Build the scene for the current state
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(Camera::default());
        scene.add_light(Light::Ambient { intensity: 0.5 });
        scene.add_light(Light::Directional {
            position: Vec3::new(5.0, 5.0, 5.0),
            intensity: 1.0,
        });
        scene.stars = Some(StarField::default());

        scene.insert(SceneNode::sphere(
            "earth",
            self.config.earth_radius,
            self.config.earth_segments,
            Vec3::zeros(),
            Material::standard(self.earth_color).wireframe(),
        ));

        for (i, marker) in self.markers.iter().enumerate() {
            let color = if marker.hazardous { Rgba::RED } else { Rgba::YELLOW };
            scene.insert(SceneNode::sphere(
                format!("asteroid-{}", i),
                marker.radius,
                MARKER_SEGMENTS,
                marker.position,
                Material::standard(color),
            ));
        }

        for explosion in &self.explosions {
            scene.insert(
                SceneNode::sphere(
                    format!("explosion-{}", explosion.id),
                    1.0,
                    EXPLOSION_SEGMENTS,
                    explosion.position,
                    Material::basic_transparent(Rgba::ORANGE, explosion.opacity),
                )
                .with_scale(explosion.scale),
            );
        }

        scene
    }

    /// Rebuild the scene and report what changed since the last call
    pub fn sync(&mut self) -> SceneDiff {
        let scene = self.build_scene();
        let diff = scene.diff(&self.previous);
        self.previous = scene;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn record(name: &str, diameter_km: f64, hazardous: bool) -> AsteroidRecord {
        AsteroidRecord {
            name: name.to_string(),
            diameter_km,
            velocity_kms: 10.0,
            distance_km: 1.0e6,
            hazardous,
        }
    }

    fn globe_with_markers() -> GlobeView {
        let mut globe = GlobeView::new(GlobeConfig::default());
        let mut rng = StdRng::seed_from_u64(4);
        globe.set_asteroids(&[record("safe", 0.5, false), record("danger", 2.0, true)], &mut rng);
        globe
    }

    #[test]
    fn test_markers_are_sized_and_placed_in_cube() {
        let globe = globe_with_markers();
        assert_relative_eq!(globe.markers()[0].radius, 0.001);
        assert_relative_eq!(globe.markers()[1].radius, 0.004);
        for marker in globe.markers() {
            assert!(marker.position.iter().all(|c| (-2.0..2.0).contains(c)));
        }
    }

    #[test]
    fn test_scene_contents() {
        let scene = globe_with_markers().build_scene();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.lights.len(), 2);
        assert!(scene.stars.is_some());

        let earth = scene.node("earth").unwrap();
        assert!(earth.material.wireframe);
        assert_eq!(earth.material.color, Rgba::rgb(10, 31, 68));
        assert_eq!(scene.node("asteroid-0").unwrap().material.color, Rgba::YELLOW);
        assert_eq!(scene.node("asteroid-1").unwrap().material.color, Rgba::RED);
    }

    #[test]
    fn test_explosion_grows_fades_and_ends() {
        let mut globe = GlobeView::new(GlobeConfig::default());
        globe.trigger_explosion(0.0, 0.0);

        globe.update(0.1);
        let effect = &globe.explosions()[0];
        assert_relative_eq!(effect.scale, 0.4, epsilon = 1e-6);
        assert_relative_eq!(effect.opacity, 0.8, epsilon = 1e-6);

        let mut ended = 0;
        for _ in 0..20 {
            ended += globe.update(0.1);
        }
        assert_eq!(ended, 1);
        assert!(globe.explosions().is_empty());
    }

    #[test]
    fn test_explosion_sits_on_earth_surface() {
        let mut globe = GlobeView::new(GlobeConfig::default());
        globe.trigger_explosion(45.0, 90.0);
        assert_relative_eq!(globe.explosions()[0].position.norm(), 1.2, epsilon = 1e-5);
    }

    #[test]
    fn test_sync_reports_incremental_changes() {
        let mut globe = globe_with_markers();
        let first = globe.sync();
        assert_eq!(first.added.len(), 3);
        assert!(first.environment_changed);

        assert!(globe.sync().is_empty());

        globe.trigger_explosion(10.0, 20.0);
        let added = globe.sync();
        assert_eq!(added.added, vec!["explosion-0".to_string()]);

        globe.update(0.05);
        assert_eq!(globe.sync().changed, vec!["explosion-0".to_string()]);

        for _ in 0..100 {
            globe.update(0.05);
        }
        assert_eq!(globe.sync().removed, vec!["explosion-0".to_string()]);
    }
}
