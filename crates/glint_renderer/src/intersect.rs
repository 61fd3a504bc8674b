//! Ray/scene intersection and emissive sampling.
//!
//! A single pass over the scene finds the nearest hit and, on the side,
//! picks one emissive primitive with a size-one streaming reservoir. The
//! pick is random: it does not depend on which primitive the ray hits, nor on
//! distance.

use glint_core::{Color, Laser, Material, Plane, Scene, Sphere, LASER_RADIUS};
use glint_math::{Interval, Ray, Vec3};

use crate::rng::PixelRng;

/// Minimum hit distance, guards against self-intersection.
pub const EPSILON: f32 = 1e-6;

/// Hits at or beyond this distance are ignored.
pub const MAX_DISTANCE: f32 = 1000.0;

/// A laser is only tested by rays almost perpendicular to its plane.
const LASER_ALIGNMENT: f32 = 1e-2;

/// Record of the nearest ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal (outward for spheres, the facing side for planes)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
}

/// An emissive primitive picked for next-event estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Where light paths start
    pub position: Vec3,
    /// Unit direction light paths start along
    pub normal: Vec3,
    /// Radiance emitted by the primitive
    pub emission: Color,
}

/// Streaming weighted reservoir of size one.
///
/// Each offered candidate draws a value; when it falls below the current
/// threshold the candidate replaces the held one and a new threshold is drawn.
#[derive(Debug, Clone, Copy)]
pub struct LightReservoir {
    chosen: Option<LightSample>,
    threshold: f32,
}

impl LightReservoir {
    /// Start an empty reservoir with a freshly drawn threshold.
    pub fn new(rng: &mut PixelRng) -> Self {
        Self {
            chosen: None,
            threshold: rng.next_f32(),
        }
    }

    /// Offer a candidate. The sample is only built if it is adopted.
    pub fn offer(&mut self, rng: &mut PixelRng, candidate: impl FnOnce() -> LightSample) {
        if rng.next_f32() < self.threshold {
            self.chosen = Some(candidate());
            self.threshold = rng.next_f32();
        }
    }

    /// The candidate held at the end of the stream, if any was adopted.
    pub fn chosen(&self) -> Option<LightSample> {
        self.chosen
    }
}

/// Result of one intersection query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intersection {
    /// Nearest hit, if the ray hits anything closer than `MAX_DISTANCE`
    pub hit: Option<Hit>,
    /// Emissive primitive picked during this query
    pub light: Option<LightSample>,
}

/// Distance along `ray` to the front of a sphere.
///
/// Only the smaller root is considered; a ray starting inside the sphere
/// passes through it.
pub fn hit_sphere(sphere: &Sphere, ray: &Ray) -> Option<f32> {
    let oc = ray.origin - sphere.center;

    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - sphere.radius * sphere.radius;

    let delta = b * b - 4.0 * c;
    if delta < 0.0 {
        return None;
    }

    let t = (-b - delta.sqrt()) / 2.0;
    (t > EPSILON).then_some(t)
}

/// Distance along `ray` to an infinite one-sided plane with unit `normal`.
///
/// Rays travelling along the normal, or parallel to the plane, never hit it.
pub fn hit_infinite_plane(center: Vec3, normal: Vec3, ray: &Ray) -> Option<f32> {
    let denom = (-normal).dot(ray.direction);
    if denom <= 0.0 {
        return None;
    }

    let t = (center - ray.origin).dot(-normal) / denom;
    (t > -EPSILON).then_some(t)
}

/// Hit on a plane clipped to its axis-aligned cube, closer than `max_t`.
pub fn hit_plane(plane: &Plane, ray: &Ray, max_t: f32) -> Option<(f32, Vec3)> {
    let normal = plane.normal.normalize();
    let t = hit_infinite_plane(plane.center, normal, ray)?;
    if t >= max_t {
        return None;
    }

    let point = ray.at(t);
    plane.clip_box().contains(point).then_some((t, point))
}

/// Hit on a laser marker, closer than `max_t`.
pub fn hit_laser(laser: &Laser, ray: &Ray, max_t: f32) -> Option<(f32, Vec3)> {
    let normal = laser.normal.normalize();
    if normal.cross(ray.direction.normalize()).length() >= LASER_ALIGNMENT {
        return None;
    }

    let t = hit_infinite_plane(laser.center, normal, ray)?;
    if t >= max_t {
        return None;
    }

    let point = ray.at(t);
    (point.distance(laser.center) <= LASER_RADIUS).then_some((t, point))
}

/// Light sample for an emissive sphere: the surface point facing `from`.
fn sphere_light(sphere: &Sphere, from: Vec3) -> LightSample {
    let normal = (from - sphere.center).try_normalize().unwrap_or(Vec3::Y);
    LightSample {
        position: sphere.center + normal * sphere.radius,
        normal,
        emission: sphere.material.emissive,
    }
}

fn flat_light(center: Vec3, normal: Vec3, emission: Color) -> LightSample {
    LightSample {
        position: center,
        normal: normal.normalize(),
        emission,
    }
}

/// Find the nearest hit of `ray` in `scene`.
///
/// Spheres are tested first, then planes, then lasers; a later primitive only
/// replaces the current hit when it is strictly closer. Every emissive
/// primitive is offered to the light reservoir along the way, hit or not.
pub fn intersect(scene: &Scene, ray: &Ray, rng: &mut PixelRng) -> Intersection {
    let mut reservoir = LightReservoir::new(rng);
    let mut closest: Option<Hit> = None;
    let mut closest_t = MAX_DISTANCE;

    for sphere in scene.spheres() {
        if sphere.material.is_emissive() {
            reservoir.offer(rng, || sphere_light(sphere, ray.origin));
        }

        let Some(t) = hit_sphere(sphere, ray) else {
            continue;
        };

        if Interval::new(EPSILON, closest_t).surrounds(t) {
            let point = ray.at(t);
            closest_t = t;
            closest = Some(Hit {
                t,
                point,
                normal: (point - sphere.center).normalize(),
                material: sphere.material,
            });
        }
    }

    for plane in scene.planes() {
        if plane.material.is_emissive() {
            reservoir.offer(rng, || {
                flat_light(plane.center, plane.normal, plane.material.emissive)
            });
        }

        if let Some((t, point)) = hit_plane(plane, ray, closest_t) {
            closest_t = t;
            closest = Some(Hit {
                t,
                point,
                normal: plane.normal.normalize(),
                material: plane.material,
            });
        }
    }

    for laser in scene.lasers() {
        let material = laser.material();
        if material.is_emissive() {
            reservoir.offer(rng, || flat_light(laser.center, laser.normal, laser.emission));
        }

        if let Some((t, point)) = hit_laser(laser, ray, closest_t) {
            closest_t = t;
            closest = Some(Hit {
                t,
                point,
                normal: laser.normal.normalize(),
                material,
            });
        }
    }

    Intersection {
        hit: closest,
        light: reservoir.chosen(),
    }
}
