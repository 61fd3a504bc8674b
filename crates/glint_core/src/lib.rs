//! Glint Core - Scene store for the progressive path tracer.
//!
//! This crate provides:
//!
//! - **Materials**: albedo, emission and the specular/transmissive mixture weights
//! - **Primitives**: analytic spheres, clipped planes and thin laser markers
//! - **Scene**: the validated, immutable primitive lists a frame is rendered from
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Material, Primitive, Scene, Sphere};
//! use glint_math::Vec3;
//!
//! let ball = Sphere::new(Vec3::ZERO, 0.5, Material::diffuse(Vec3::splat(0.5)));
//! let scene = Scene::new([Primitive::from(ball)])?;
//! println!("{} primitives, {} emissive", scene.primitive_count(), scene.emissive_count());
//! ```

pub mod material;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use material::{Color, Material};
pub use primitive::{Laser, Plane, Primitive, PrimitiveError, Sphere, LASER_RADIUS};
pub use scene::{Scene, SceneError, SceneResult};
