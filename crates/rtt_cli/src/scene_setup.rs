//! Built-in demo scene: a closed box with two spheres and an emissive ceiling.

use std::f32::consts::PI;

use anyhow::Result;
use rtt_core::{Color, Light, Material, Mesh, Object, Scene, Sphere, GOLD_RF0};
use rtt_math::Vec3;
use rtt_renderer::Camera;

/// Camera looking down +X into the open side of the box.
pub fn demo_camera() -> Camera {
    Camera::new()
        .with_position(Vec3::new(-10.0, 0.0, 3.0), Vec3::X, Vec3::Z)
        .with_film(0.28, 0.35)
}

fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32, g as f32, b as f32) / 255.0
}

/// Build the demo box. The point lights are optional; the emitters light the
/// scene on their own.
pub fn demo_scene(with_point_lights: bool) -> Result<Scene> {
    let mut scene = Scene::new("demo_box");

    let base = Material::default();
    let gold = Material::conductor(GOLD_RF0);
    let emissive = Material::emitter(Color::ONE, 100.0);
    let left = Material {
        diffuse: rgb8(254, 105, 36),
        ..base
    };
    let right = Material {
        diffuse: rgb8(120, 204, 237),
        ..base
    };

    scene.add_object(Object::new(Sphere::new(Vec3::new(1.0, 0.8, 1.0), 1.0), gold))?;
    scene.add_object(Object::new(Sphere::new(Vec3::new(0.0, -1.0, 1.0), 1.0), base))?;
    scene.add_object(Object::new(Sphere::new(Vec3::new(0.0, 2.1, 0.5), 0.5), emissive))?;

    let walls = [
        // right
        (
            [
                Vec3::new(3.0, 3.0, 0.0),
                Vec3::new(-3.0, 3.0, 0.0),
                Vec3::new(-3.0, 3.0, 6.0),
                Vec3::new(3.0, 3.0, 6.0),
            ],
            Vec3::NEG_Y,
            right,
        ),
        // left
        (
            [
                Vec3::new(3.0, -3.0, 0.0),
                Vec3::new(-3.0, -3.0, 0.0),
                Vec3::new(-3.0, -3.0, 6.0),
                Vec3::new(3.0, -3.0, 6.0),
            ],
            Vec3::Y,
            left,
        ),
        // back
        (
            [
                Vec3::new(3.0, -3.0, 0.0),
                Vec3::new(3.0, 3.0, 0.0),
                Vec3::new(3.0, 3.0, 6.0),
                Vec3::new(3.0, -3.0, 6.0),
            ],
            Vec3::NEG_X,
            base,
        ),
        // bottom
        (
            [
                Vec3::new(3.0, -3.0, 0.0),
                Vec3::new(-3.0, -3.0, 0.0),
                Vec3::new(-3.0, 3.0, 0.0),
                Vec3::new(3.0, 3.0, 0.0),
            ],
            Vec3::Z,
            base,
        ),
        // top
        (
            [
                Vec3::new(3.0, -3.0, 6.0),
                Vec3::new(3.0, 3.0, 6.0),
                Vec3::new(-3.0, 3.0, 6.0),
                Vec3::new(-3.0, -3.0, 6.0),
            ],
            Vec3::NEG_Z,
            base,
        ),
        // ceiling lamp
        (
            [
                Vec3::new(0.5, -0.5, 5.9),
                Vec3::new(0.5, 0.5, 5.9),
                Vec3::new(-0.5, 0.5, 5.9),
                Vec3::new(-0.5, -0.5, 5.9),
            ],
            Vec3::NEG_Z,
            emissive,
        ),
    ];

    for (corners, normal, material) in walls {
        scene.add_object(Object::new(Mesh::from_quad(corners, normal)?, material))?;
    }

    if with_point_lights {
        scene.add_light(Light::new(
            Vec3::new(0.0, 0.0, 5.0),
            Color::new(0.8, 0.6, 0.5),
            60.0 * 17.5 / (4.0 * PI),
        ))?;
        scene.add_light(Light::new(
            Vec3::new(2.5, 0.0, 1.5),
            Color::new(0.4, 0.6, 0.8),
            20.0 * 17.5 / (4.0 * PI),
        ))?;
    }

    Ok(scene)
}
