//! Path integrator.
//!
//! A pixel sample is built from two subpaths:
//!
//! - the camera subpath bounces from the eye until it misses, reaches a light
//!   or runs out of bounces;
//! - the light subpath starts on the emissive primitive picked by the
//!   intersector's reservoir, bounces, and finally tries to connect to the
//!   camera subpath's last hit with a shadow ray.
//!
//! A failed connection is not an error: the light contribution is just zero.

use glint_core::{Color, Scene};
use glint_math::{Ray, Vec3};

use crate::intersect::{intersect, Intersection, LightSample};
use crate::renderer::RenderConfig;
use crate::rng::PixelRng;
use crate::scatter::scatter;

/// Relative index of refraction used by every dielectric lobe.
pub const RELATIVE_IOR: f32 = 0.5;

/// Why a camera subpath stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Escaped the scene; throughput was tinted by the background.
    Miss,
    /// Reached an emissive surface; its emission was added.
    LightHit,
    /// Used its last bounce on a non-emissive surface; forced to black.
    BudgetExhausted,
}

/// Outcome of a camera subpath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPath {
    /// Radiance carried back to the eye
    pub color: Color,
    pub termination: Termination,
    /// Number of intersection queries made
    pub bounces: u32,
    /// Last surface point hit, where the light subpath connects
    pub endpoint: Option<Vec3>,
    /// Latest emissive primitive picked along the way
    pub light: Option<LightSample>,
}

/// Trace the camera subpath for a primary ray.
pub fn trace_camera_path(scene: &Scene, ray: Ray, config: &RenderConfig, rng: &mut PixelRng) -> CameraPath {
    let mut path = CameraPath {
        color: Color::ONE,
        termination: Termination::BudgetExhausted,
        bounces: 0,
        endpoint: None,
        light: None,
    };
    let mut ray = ray;

    for bounce in 0..config.max_bounces {
        let Intersection { hit, light } = intersect(scene, &ray, rng);
        path.bounces = bounce + 1;
        if light.is_some() {
            path.light = light;
        }

        let Some(hit) = hit else {
            path.color *= config.background;
            path.termination = Termination::Miss;
            return path;
        };
        path.endpoint = Some(hit.point);

        if hit.material.is_emissive() {
            path.color += hit.material.emissive;
            path.termination = Termination::LightHit;
            return path;
        }

        if path.bounces == config.max_bounces {
            break;
        }

        path.color *= hit.material.color;
        let direction = scatter(ray.direction, hit.normal, &hit.material, RELATIVE_IOR, rng);
        ray = Ray::new(hit.point, direction);
    }

    // Never reached a light within the bounce budget
    path.color = Color::ZERO;
    path.termination = Termination::BudgetExhausted;
    path
}

/// Trace a light subpath from `light` and connect it to `target`.
///
/// Intermediate bounces scatter like the camera subpath and attenuate the
/// carried emission by albedo. The last bounce aims straight at `target`;
/// the connection counts only if the first thing that ray hits lies within
/// `config.connection_tolerance` of the target. Returns the radiance to add,
/// or `None` when the path is lost or occluded.
pub fn trace_light_path(
    scene: &Scene,
    light: &LightSample,
    target: Vec3,
    config: &RenderConfig,
    rng: &mut PixelRng,
) -> Option<Color> {
    let mut throughput = light.emission;
    let mut ray = Ray::new(light.position, light.normal);

    for bounce in 1..=config.light_max_bounces {
        if bounce == config.light_max_bounces {
            let Some(shadow) = Ray::towards(ray.origin, target) else {
                // Already standing on the target
                return Some(throughput);
            };
            let hit = intersect(scene, &shadow, rng).hit?;
            return (hit.point.distance(target) <= config.connection_tolerance).then_some(throughput);
        }

        let hit = intersect(scene, &ray, rng).hit?;
        throughput *= hit.material.color;
        let direction = scatter(ray.direction, hit.normal, &hit.material, RELATIVE_IOR, rng);
        ray = Ray::new(hit.point, direction);
    }

    None
}

/// One radiance estimate for a primary ray: the camera subpath, plus the
/// light subpath's connection when it succeeds.
pub fn radiance(scene: &Scene, ray: Ray, config: &RenderConfig, rng: &mut PixelRng) -> Color {
    let path = trace_camera_path(scene, ray, config, rng);
    let mut color = path.color;

    if let (Some(light), Some(target)) = (path.light, path.endpoint) {
        if let Some(contribution) = trace_light_path(scene, &light, target, config, rng) {
            color += contribution;
        }
    }

    color
}
