//! Scatter model.
//!
//! Outgoing directions are a linear blend of a diffuse, a mirror and a
//! dielectric lobe, weighted by the material. The blend is not a normalized
//! BSDF; throughput is carried separately by the integrator as albedo.

use glint_core::Material;
use glint_math::Vec3;

use crate::rng::PixelRng;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `eta`.
///
/// Returns the zero vector on total internal reflection.
#[inline]
pub fn refract(i: Vec3, n: Vec3, eta: f32) -> Vec3 {
    let cos_i = n.dot(i);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * i - (eta * cos_i + k.sqrt()) * n
    }
}

/// Schlick's approximation for reflectance
#[inline]
pub fn reflectance(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Pick the outgoing direction for a ray arriving along `incoming` at a
/// surface with unit `normal`.
///
/// The diffuse lobe offsets the normal by a random point in the unit cube.
/// The mirror lobe is present when `reflection > 0`. The dielectric lobe is
/// present when `refraction > 0` and chooses, by Schlick reflectance against
/// a uniform draw, between a mirror bounce and a Snell refraction with
/// relative index `ior`.
pub fn scatter(incoming: Vec3, normal: Vec3, material: &Material, ior: f32, rng: &mut PixelRng) -> Vec3 {
    let cos_theta = (-incoming).dot(normal).min(1.0);

    let diffuse = normal + rng.next_vec3();

    let reflected = if material.reflection > 0.0 {
        reflect(incoming, normal)
    } else {
        Vec3::ZERO
    };

    let refracted = if material.refraction > 0.0 {
        if reflectance(cos_theta, ior) >= rng.next_unit() {
            if material.reflection > 0.0 {
                reflected
            } else {
                reflect(incoming, normal)
            }
        } else {
            refract(incoming, normal, ior)
        }
    } else {
        Vec3::ZERO
    };

    let direction = diffuse * material.diffuse_weight()
        + reflected * material.reflection
        + refracted * material.refraction;

    // Catch degenerate scatter direction
    direction.try_normalize().unwrap_or(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FrameSeeds;
    use glint_core::Color;
    use glint_math::Vec2;

    fn rng() -> PixelRng {
        PixelRng::new(Vec2::new(5.5, 7.5), FrameSeeds::new(-0.4, 0.66, 0.21))
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_head_on_keeps_direction() {
        let out = refract(Vec3::NEG_Y, Vec3::Y, 0.5);
        assert!((out - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_total_internal_reflection_is_zero() {
        let grazing = Vec3::new(1.0, -0.1, 0.0).normalize();
        assert_eq!(refract(grazing, Vec3::Y, 1.5), Vec3::ZERO);
    }

    #[test]
    fn test_refract_bends_toward_normal_when_eta_below_one() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incoming, Vec3::Y, 0.5);
        assert!((out.length() - 1.0).abs() < 1e-5);
        // sin of the outgoing angle is half the incoming one
        assert!((out.x - incoming.x * 0.5).abs() < 1e-5);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_schlick_reflectance() {
        // Head-on reflectance is r0
        let r0 = ((1.0 - 1.5_f32) / (1.0 + 1.5)).powi(2);
        assert!((reflectance(1.0, 1.5) - r0).abs() < 1e-6);
        // Grazing reflectance tends to one
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pure_mirror_reflects_exactly() {
        let mirror = Material::diffuse(Color::ONE).with_reflection(1.0);
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = scatter(incoming, Vec3::Y, &mirror, 0.5, &mut rng());
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((out - expected).length() < 1e-6);
    }

    #[test]
    fn test_diffuse_is_unit_and_varies() {
        let diffuse = Material::diffuse(Color::splat(0.5));
        let mut rng = rng();
        let first = scatter(Vec3::NEG_Y, Vec3::Y, &diffuse, 0.5, &mut rng);
        let mut varied = false;
        for _ in 0..200 {
            let out = scatter(Vec3::NEG_Y, Vec3::Y, &diffuse, 0.5, &mut rng);
            assert!((out.length() - 1.0).abs() < 1e-5);
            assert!(out.is_finite());
            varied |= (out - first).length() > 1e-3;
        }
        assert!(varied);
    }

    #[test]
    fn test_glass_picks_reflection_or_refraction() {
        let glass = Material::diffuse(Color::ONE).with_refraction(1.0);
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let mirrored = reflect(incoming, Vec3::Y);
        let bent = refract(incoming, Vec3::Y, 0.5).normalize();

        let mut rng = rng();
        for _ in 0..100 {
            let out = scatter(incoming, Vec3::Y, &glass, 0.5, &mut rng);
            let is_mirror = (out - mirrored).length() < 1e-5;
            let is_bent = (out - bent).length() < 1e-5;
            assert!(is_mirror || is_bent, "unexpected direction {:?}", out);
        }
    }

    #[test]
    fn test_degenerate_blend_falls_back_to_normal() {
        // Mirror and refraction weights cancel the diffuse lobe; a head-on
        // reflection plus a head-on refraction sum to zero.
        let mat = Material::diffuse(Color::ONE)
            .with_reflection(0.5)
            .with_refraction(0.5);
        let mut rng = rng();
        for _ in 0..50 {
            let out = scatter(Vec3::NEG_Y, Vec3::Y, &mat, 1.0, &mut rng);
            assert!(out.is_finite());
            assert!((out.length() - 1.0).abs() < 1e-5);
        }
    }
}
