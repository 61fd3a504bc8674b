//! Scene store.
//!
//! A `Scene` holds one primitive list per kind. It is validated once when it
//! is built and never mutated afterwards; editing a scene means building a new
//! one and handing it to the renderer as a whole.

use thiserror::Error;

use crate::primitive::{Laser, Plane, Primitive, PrimitiveError, Sphere};

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid {kind} at index {index}: {source}")]
    InvalidPrimitive {
        index: usize,
        kind: &'static str,
        #[source]
        source: PrimitiveError,
    },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Validated primitive lists a frame is rendered from.
///
/// Each kind keeps submission order, which is also the order the intersector
/// visits them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    lasers: Vec<Laser>,
}

impl Scene {
    /// Build a scene from a list of primitives.
    ///
    /// Fails on the first primitive with invalid geometry or material; the
    /// error carries its position in `primitives`.
    pub fn new(primitives: impl IntoIterator<Item = Primitive>) -> SceneResult<Self> {
        let mut scene = Self::default();

        for (index, primitive) in primitives.into_iter().enumerate() {
            primitive
                .validate()
                .map_err(|source| SceneError::InvalidPrimitive {
                    index,
                    kind: primitive.kind(),
                    source,
                })?;

            match primitive {
                Primitive::Sphere(s) => scene.spheres.push(s),
                Primitive::Plane(p) => scene.planes.push(p),
                Primitive::Laser(l) => scene.lasers.push(l),
            }
        }

        log::debug!(
            "Built scene: {} spheres, {} planes, {} lasers ({} emissive)",
            scene.spheres.len(),
            scene.planes.len(),
            scene.lasers.len(),
            scene.emissive_count()
        );

        Ok(scene)
    }

    /// A scene with no primitives; every ray misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    /// Total number of primitives of all kinds.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.lasers.len()
    }

    /// Number of primitives that emit light.
    pub fn emissive_count(&self) -> usize {
        self.spheres.iter().filter(|s| s.material.is_emissive()).count()
            + self.planes.iter().filter(|p| p.material.is_emissive()).count()
            + self.lasers.iter().filter(|l| l.material().is_emissive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    /// All primitives, spheres first, then planes, then lasers.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive> + '_ {
        self.spheres
            .iter()
            .copied()
            .map(Primitive::from)
            .chain(self.planes.iter().copied().map(Primitive::from))
            .chain(self.lasers.iter().copied().map(Primitive::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};
    use glint_math::Vec3;

    fn grey() -> Material {
        Material::diffuse(Color::splat(0.5))
    }

    #[test]
    fn test_scene_splits_by_kind() {
        let scene = Scene::new([
            Primitive::from(Plane::new(Vec3::ZERO, Vec3::Y, 4.0, grey())),
            Primitive::from(Sphere::new(Vec3::ZERO, 0.5, grey())),
            Primitive::from(Laser::new(Vec3::ZERO, Vec3::X, Color::Y)),
            Primitive::from(Sphere::new(Vec3::ONE, 0.3, grey())),
        ])
        .unwrap();

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.planes().len(), 1);
        assert_eq!(scene.lasers().len(), 1);
        assert_eq!(scene.primitive_count(), 4);
        assert_eq!(scene.emissive_count(), 1);

        // Submission order is kept within a kind
        assert_eq!(scene.spheres()[0].center, Vec3::ZERO);
        assert_eq!(scene.spheres()[1].center, Vec3::ONE);
    }

    #[test]
    fn test_scene_reports_bad_primitive_index() {
        let err = Scene::new([
            Primitive::from(Sphere::new(Vec3::ZERO, 0.5, grey())),
            Primitive::from(Sphere::new(Vec3::ZERO, -0.5, grey())),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            SceneError::InvalidPrimitive {
                index: 1,
                kind: "sphere",
                source: PrimitiveError::NonPositiveRadius(-0.5),
            }
        );
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new(Vec::<Primitive>::new()).unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene, Scene::empty());
        assert_eq!(scene.emissive_count(), 0);
    }

    #[test]
    fn test_primitives_iterates_in_kind_order() {
        let scene = Scene::new([
            Primitive::from(Laser::new(Vec3::ZERO, Vec3::X, Color::ONE)),
            Primitive::from(Sphere::new(Vec3::ZERO, 0.5, grey())),
        ])
        .unwrap();

        let kinds: Vec<_> = scene.primitives().map(|p| p.kind()).collect();
        assert_eq!(kinds, vec!["sphere", "laser"]);
    }
}
