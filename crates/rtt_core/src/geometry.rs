//! Analytic shapes and the geometry sum type.

use rtt_math::Vec3;

use crate::mesh::Mesh;

/// A sphere given by centre and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

/// An infinite plane through `point`, facing along `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }
}

/// Every shape the renderer knows how to intersect.
#[derive(Clone, Debug)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Mesh(Mesh),
}

impl Geometry {
    /// Short name of the shape kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere(_) => "sphere",
            Geometry::Plane(_) => "plane",
            Geometry::Mesh(_) => "mesh",
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Self {
        Geometry::Plane(plane)
    }
}

impl From<Mesh> for Geometry {
    fn from(mesh: Mesh) -> Self {
        Geometry::Mesh(mesh)
    }
}
