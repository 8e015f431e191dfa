//! Scene container.
//!
//! A `Scene` owns every object and light. It is filled during setup and is
//! read-only while rendering, which is what lets worker threads share it
//! without locks.

use rtt_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::geometry::Geometry;
use crate::material::{Color, Material};

/// Default object capacity of a scene.
pub const DEFAULT_MAX_OBJECTS: usize = 32;

/// Default light capacity of a scene.
pub const DEFAULT_MAX_LIGHTS: usize = 32;

/// A shape paired with its material.
#[derive(Clone, Debug)]
pub struct Object {
    pub geometry: Geometry,
    pub material: Material,
}

impl Object {
    pub fn new(geometry: impl Into<Geometry>, material: Material) -> Self {
        Self {
            geometry: geometry.into(),
            material,
        }
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Light color scaled by intensity.
    #[inline]
    pub fn power(&self) -> Color {
        self.color * self.intensity
    }
}

/// Hard capacity limits for a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneLimits {
    pub max_objects: usize,
    pub max_lights: usize,
}

impl Default for SceneLimits {
    fn default() -> Self {
        Self {
            max_objects: DEFAULT_MAX_OBJECTS,
            max_lights: DEFAULT_MAX_LIGHTS,
        }
    }
}

/// A complete scene: objects, lights and their capacity limits.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name
    pub name: String,

    objects: Vec<Object>,
    lights: Vec<Light>,
    limits: SceneLimits,
}

impl Scene {
    /// Create an empty scene with the default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_limits(name, SceneLimits::default())
    }

    /// Create an empty scene with explicit limits.
    pub fn with_limits(name: impl Into<String>, limits: SceneLimits) -> Self {
        Self {
            name: name.into(),
            objects: Vec::with_capacity(limits.max_objects),
            lights: Vec::with_capacity(limits.max_lights),
            limits,
        }
    }

    /// Add an object and return its index.
    ///
    /// The scene is left unchanged if it is already full.
    pub fn add_object(&mut self, object: Object) -> SceneResult<usize> {
        if self.objects.len() >= self.limits.max_objects {
            log::warn!(
                "Scene '{}' rejected {} object: capacity {} reached",
                self.name,
                object.geometry.kind(),
                self.limits.max_objects
            );
            return Err(SceneError::ObjectCapacityExceeded {
                capacity: self.limits.max_objects,
            });
        }
        let id = self.objects.len();
        log::debug!("Scene '{}' object {}: {}", self.name, id, object.geometry.kind());
        self.objects.push(object);
        Ok(id)
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: Light) -> SceneResult<usize> {
        if self.lights.len() >= self.limits.max_lights {
            log::warn!(
                "Scene '{}' rejected light: capacity {} reached",
                self.name,
                self.limits.max_lights
            );
            return Err(SceneError::LightCapacityExceeded {
                capacity: self.limits.max_lights,
            });
        }
        let id = self.lights.len();
        self.lights.push(light);
        Ok(id)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn limits(&self) -> SceneLimits {
        self.limits
    }
}
