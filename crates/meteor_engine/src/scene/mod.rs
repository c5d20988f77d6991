//! Retained-mode 3D scene description
//!
//! A [`Scene`] is plain data: camera, lights and a keyed set of nodes. It is
//! rebuilt from the simulation's data model each frame and compared with the
//! previous frame through [`Scene::diff`], so a presentation layer only needs
//! to apply the reported changes.

pub mod scene_graph;

pub use scene_graph::{Scene, SceneNode, SceneDiff, Geometry, Material};

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Rgba, Vec3};

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::zeros(),
            fov_degrees: 45.0,
        }
    }
}

/// Scene light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    /// Uniform light from every direction
    Ambient {
        /// Light intensity
        intensity: f32,
    },
    /// Parallel light shining from `position` towards the origin
    Directional {
        /// Light position
        position: Vec3,
        /// Light intensity
        intensity: f32,
    },
}

/// Procedural star backdrop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarField {
    /// Radius of the star sphere
    pub radius: f32,
    /// Number of stars
    pub count: u32,
    /// Star color
    pub color: Rgba,
}

impl Default for StarField {
    fn default() -> Self {
        Self {
            radius: 100.0,
            count: 5000,
            color: Rgba::WHITE,
        }
    }
}
