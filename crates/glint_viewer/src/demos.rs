//! Built-in demo scenes.

use glint_core::{Color, Material, Plane, Primitive, Sphere};
use glint_math::Vec3;
use glint_renderer::Camera;

use crate::description::SceneDescription;

/// Names accepted by [`by_name`].
pub const DEMO_NAMES: [&str; 3] = ["kernel_box", "basic", "refraction"];

pub fn by_name(name: &str) -> Option<SceneDescription> {
    match name {
        "kernel_box" => Some(kernel_box()),
        "basic" => Some(basic()),
        "refraction" => Some(refraction()),
        _ => None,
    }
}

fn grey() -> Material {
    Material::diffuse(Color::splat(0.5))
}

fn wall(center: Vec3, normal: Vec3) -> Primitive {
    Plane::new(center, normal, 4.0, grey()).into()
}

/// Floor, back, side, ceiling and front walls of the box.
fn room() -> Vec<Primitive> {
    vec![
        wall(Vec3::new(0.0, -0.5, 0.0), Vec3::Y),
        wall(Vec3::new(0.0, 1.5, -2.0), Vec3::Z),
        wall(Vec3::new(2.0, 1.5, 0.0), Vec3::NEG_X),
        wall(Vec3::new(-2.0, 1.5, 0.0), Vec3::X),
        wall(Vec3::new(0.0, 3.5, 0.0), Vec3::NEG_Y),
        wall(Vec3::new(0.0, 1.5, 4.0), Vec3::NEG_Z),
    ]
}

/// Closed room lit by a blue and a red panel, with a diffuse and a mirror
/// sphere.
pub fn kernel_box() -> SceneDescription {
    let mut primitives = room();
    primitives.extend::<[Primitive; 4]>([
        Plane::new(
            Vec3::new(1.99, 0.5, 0.0),
            Vec3::NEG_X,
            1.0,
            Material::emissive(Color::splat(0.5), Color::new(0.09, 0.09, 1.7)),
        )
        .into(),
        Plane::new(
            Vec3::new(-1.99, 0.5, 0.0),
            Vec3::X,
            1.0,
            Material::emissive(Color::splat(0.5), Color::new(1.7, 0.09, 0.09)),
        )
        .into(),
        Sphere::new(Vec3::new(-0.5, -0.2, 1.0), 0.3, grey()).into(),
        Sphere::new(Vec3::new(1.0, 0.0, -0.5), 0.5, grey().with_reflection(1.0)).into(),
    ]);

    let camera = Camera::new().with_position(Vec3::new(0.0, 1.0, 5.0));
    SceneDescription::new(camera, Color::splat(0.01), primitives)
}

/// Glass ball resting on a huge ground sphere under a sky-colored
/// background.
pub fn basic() -> SceneDescription {
    let primitives = vec![
        Sphere::new(
            Vec3::ZERO,
            0.5,
            Material::diffuse(Color::new(0.7, 0.5, 0.5)).with_refraction(1.0),
        )
        .into(),
        Sphere::new(
            Vec3::new(0.0, -100.5, 0.5),
            100.0,
            Material::diffuse(Color::new(0.5, 0.7, 0.5)),
        )
        .into(),
    ];

    SceneDescription::new(pitched_camera(), Color::new(0.5, 0.7, 1.0), primitives)
}

/// Glass ball on a floor next to a small, very bright panel.
pub fn refraction() -> SceneDescription {
    let primitives = vec![
        wall(Vec3::new(0.0, -0.5, 0.0), Vec3::Y),
        Plane::new(
            Vec3::new(-1.0, -0.5, 0.0),
            Vec3::Z,
            0.5,
            Material::emissive(Color::splat(0.5), Color::splat(10.0)),
        )
        .into(),
        Sphere::new(
            Vec3::new(0.0, -0.5, -0.3),
            0.5,
            Material::diffuse(Color::new(0.7, 0.5, 0.5)).with_refraction(1.0),
        )
        .into(),
    ];

    SceneDescription::new(pitched_camera(), Color::splat(0.01), primitives)
}

fn pitched_camera() -> Camera {
    Camera::new()
        .with_position(Vec3::new(0.0, 1.0, 2.0))
        .with_rotation(Vec3::new(-35.0, 0.0, 0.0))
}
