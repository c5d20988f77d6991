//! Scene nodes and frame-to-frame diffing

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Rgba, Vec3};
use crate::scene::{Camera, Light, StarField};

/// Node geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Width and height segments
        segments: u32,
    },
}

/// Surface appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub color: Rgba,
    /// Opacity (only meaningful when `transparent` is set)
    pub opacity: f32,
    /// Blend with what is behind
    pub transparent: bool,
    /// Draw edges only
    pub wireframe: bool,
    /// Ignore scene lights
    pub unlit: bool,
}

impl Material {
    /// Opaque lit material
    pub const fn standard(color: Rgba) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            wireframe: false,
            unlit: false,
        }
    }

    /// Unlit material with the given opacity
    pub const fn basic_transparent(color: Rgba, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            transparent: true,
            wireframe: false,
            unlit: true,
        }
    }

    /// Same material drawn as wireframe
    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// A drawable node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Stable identifier used for diffing
    pub id: String,
    /// Shape
    pub geometry: Geometry,
    /// World position
    pub position: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Appearance
    pub material: Material,
}

impl SceneNode {
    /// Sphere node at `position`
    pub fn sphere(id: impl Into<String>, radius: f32, segments: u32, position: Vec3, material: Material) -> Self {
        Self {
            id: id.into(),
            geometry: Geometry::Sphere { radius, segments },
            position,
            scale: 1.0,
            material,
        }
    }

    /// Set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Changes between two scenes, by node id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDiff {
    /// Nodes only in the new scene
    pub added: Vec<String>,
    /// Nodes only in the old scene
    pub removed: Vec<String>,
    /// Nodes present in both with different contents
    pub changed: Vec<String>,
    /// Camera, lights or backdrop differ
    pub environment_changed: bool,
}

impl SceneDiff {
    /// Whether nothing changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty() && !self.environment_changed
    }
}

/// Complete retained scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Viewpoint
    pub camera: Camera,
    /// Lights in insertion order
    pub lights: Vec<Light>,
    /// Optional star backdrop
    pub stars: Option<StarField>,
    nodes: BTreeMap<String, SceneNode>,
}

impl Scene {
    /// Create an empty scene with the given camera
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Add a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Insert or replace a node by id
    pub fn insert(&mut self, node: SceneNode) -> Option<SceneNode> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Remove a node by id
    pub fn remove(&mut self, id: &str) -> Option<SceneNode> {
        self.nodes.remove(id)
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Nodes ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Changes needed to turn `previous` into `self`
    pub fn diff(&self, previous: &Self) -> SceneDiff {
        let mut diff = SceneDiff {
            environment_changed: self.camera != previous.camera
                || self.lights != previous.lights
                || self.stars != previous.stars,
            ..Default::default()
        };

        for (id, node) in &self.nodes {
            match previous.nodes.get(id) {
                None => diff.added.push(id.clone()),
                Some(old) if old != node => diff.changed.push(id.clone()),
                Some(_) => {}
            }
        }
        diff.removed = previous
            .nodes
            .keys()
            .filter(|id| !self.nodes.contains_key(*id))
            .cloned()
            .collect();

        diff
    }
}
