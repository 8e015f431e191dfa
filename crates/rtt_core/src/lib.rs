//! rtt core - scene container and data model.
//!
//! This crate provides:
//!
//! - **Geometry**: `Sphere`, `Plane`, `Mesh` and the closed `Geometry` sum type
//! - **Shading data**: `Material`, `Light`, `Color`
//! - **Scene container**: `Scene` with capacity-checked object and light storage
//!
//! Scenes are built once, then handed to the renderer behind an `Arc` and
//! only read from that point on.
//!
//! # Example
//!
//! ```
//! use rtt_core::{Geometry, Light, Material, Object, Scene, Sphere};
//! use rtt_math::Vec3;
//!
//! let mut scene = Scene::new("demo");
//! scene.add_object(Object::new(
//!     Geometry::Sphere(Sphere::new(Vec3::ZERO, 1.0)),
//!     Material::default(),
//! ))?;
//! scene.add_light(Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, 10.0))?;
//! assert_eq!(scene.object_count(), 1);
//! # Ok::<(), rtt_core::SceneError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod scene;

pub use error::{SceneError, SceneResult};
pub use geometry::{Geometry, Plane, Sphere};
pub use material::{Color, Material, COPPER_RF0, GOLD_RF0};
pub use mesh::{Mesh, Vertex};
pub use scene::{Light, Object, Scene, SceneLimits, DEFAULT_MAX_LIGHTS, DEFAULT_MAX_OBJECTS};
