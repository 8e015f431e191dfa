//! Triangle mesh geometry.
//!
//! A mesh is a flat triangle list: every three consecutive vertices form one
//! triangle. Shading is flat, so each triangle uses the normal stored on its
//! first vertex.

use rtt_math::{Aabb, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::geometry::Sphere;

/// A mesh vertex: position plus shading normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle mesh with precomputed bounding volumes.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,

    /// Bounding sphere (centre of the box, radius of its half diagonal)
    bound: Sphere,

    /// Axis-aligned bounding box
    aabb: Aabb,
}

impl Mesh {
    /// Create a mesh from a triangle list.
    ///
    /// Fails if the vertex list is empty or its length is not a multiple of 3.
    pub fn new(vertices: Vec<Vertex>) -> SceneResult<Self> {
        if vertices.is_empty() || vertices.len() % 3 != 0 {
            return Err(SceneError::InvalidMesh {
                vertex_count: vertices.len(),
            });
        }

        let aabb = Aabb::enclosing(vertices.iter().map(|v| v.position));
        let bound = Sphere::new(aabb.centroid(), aabb.half_diagonal());

        Ok(Self {
            vertices,
            bound,
            aabb,
        })
    }

    /// Two flat triangles covering the quad `a b c d` (given in winding order).
    pub fn from_quad(corners: [Vec3; 4], normal: Vec3) -> SceneResult<Self> {
        let normal = normal.normalize_or_zero();
        let [a, b, c, d] = corners.map(|p| Vertex::new(p, normal));
        Self::new(vec![a, b, c, a, c, d])
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate over the mesh triangles.
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> {
        self.vertices.chunks_exact(3)
    }

    pub fn bounding_sphere(&self) -> Sphere {
        self.bound
    }

    pub fn aabb(&self) -> Aabb {
        self.aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_quad(
            [
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            Vec3::Z,
        )
        .unwrap()
    }

    #[test]
    fn test_quad_has_two_triangles() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().count(), 2);
        assert!(mesh.vertices().iter().all(|v| v.normal == Vec3::Z));
    }

    #[test]
    fn test_bounds() {
        let mesh = quad();
        let aabb = mesh.aabb();
        assert_eq!(aabb.x.min, -1.0);
        assert_eq!(aabb.y.max, 1.0);

        let bound = mesh.bounding_sphere();
        assert!(bound.center.length() < 1e-4);
        assert!((bound.radius - 2.0_f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_vertex_count() {
        let v = Vertex::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(
            Mesh::new(vec![v; 4]).unwrap_err(),
            SceneError::InvalidMesh { vertex_count: 4 }
        );
        assert_eq!(
            Mesh::new(Vec::new()).unwrap_err(),
            SceneError::InvalidMesh { vertex_count: 0 }
        );
    }
}
