//! Analytic primitives.
//!
//! The primitive set is closed: `Primitive` is a tagged variant dispatched by
//! the intersector, with one concrete struct per kind.

use glint_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Color, Material};

/// Radius of the disk a laser marker is hit within.
pub const LASER_RADIUS: f32 = 0.01;

/// Reasons a single primitive is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("plane size must be positive, got {0}")]
    NonPositiveSize(f32),

    #[error("normal has zero length")]
    ZeroNormal,

    #[error("{0} is not finite")]
    NonFinite(&'static str),

    #[error("material color {0} outside [0, 1]")]
    ColorOutOfRange(Vec3),

    #[error("material emissive {0} is negative")]
    NegativeEmission(Vec3),

    #[error("material {field} {value} outside [0, 1]")]
    WeightOutOfRange { field: &'static str, value: f32 },
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    #[serde(default)]
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    fn validate(&self) -> Result<(), PrimitiveError> {
        if !self.center.is_finite() {
            return Err(PrimitiveError::NonFinite("sphere center"));
        }
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(PrimitiveError::NonPositiveRadius(self.radius));
        }
        self.material.validate()
    }
}

/// An infinite plane clipped to an axis-aligned cube.
///
/// Hits are kept only inside `[center - size, center + size]` on all three
/// world axes, whatever the plane's orientation. A tilted plane is therefore
/// bounded by the cube's cross-section, not by a square in its own frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub center: Vec3,
    /// Facing direction; need not be normalized.
    pub normal: Vec3,
    /// Half-extent of the clip cube.
    pub size: f32,
    #[serde(default)]
    pub material: Material,
}

impl Plane {
    /// Create a new plane.
    pub fn new(center: Vec3, normal: Vec3, size: f32, material: Material) -> Self {
        Self {
            center,
            normal,
            size,
            material,
        }
    }

    /// The clip volume hits must fall inside.
    pub fn clip_box(&self) -> Aabb {
        Aabb::cube(self.center, self.size)
    }

    fn validate(&self) -> Result<(), PrimitiveError> {
        if !self.center.is_finite() {
            return Err(PrimitiveError::NonFinite("plane center"));
        }
        if !self.normal.is_finite() {
            return Err(PrimitiveError::NonFinite("plane normal"));
        }
        if self.normal.length_squared() == 0.0 {
            return Err(PrimitiveError::ZeroNormal);
        }
        if !(self.size > 0.0) || !self.size.is_finite() {
            return Err(PrimitiveError::NonPositiveSize(self.size));
        }
        self.material.validate()
    }
}

/// A thin emissive beam marker.
///
/// Its material is always white and non-specular; only the emission is
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub center: Vec3,
    pub normal: Vec3,
    #[serde(default)]
    pub emission: Color,
}

impl Laser {
    /// Create a new laser marker.
    pub fn new(center: Vec3, normal: Vec3, emission: Color) -> Self {
        Self {
            center,
            normal,
            emission,
        }
    }

    /// White material carrying the laser's emission.
    pub fn material(&self) -> Material {
        Material::emissive(Color::ONE, self.emission)
    }

    fn validate(&self) -> Result<(), PrimitiveError> {
        if !self.center.is_finite() {
            return Err(PrimitiveError::NonFinite("laser center"));
        }
        if !self.normal.is_finite() {
            return Err(PrimitiveError::NonFinite("laser normal"));
        }
        if self.normal.length_squared() == 0.0 {
            return Err(PrimitiveError::ZeroNormal);
        }
        self.material().validate()
    }
}

/// Any primitive the scene store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Laser(Laser),
}

impl Primitive {
    /// Short name of the variant, for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Plane(_) => "plane",
            Primitive::Laser(_) => "laser",
        }
    }

    /// The material attached to this primitive.
    pub fn material(&self) -> Material {
        match self {
            Primitive::Sphere(s) => s.material,
            Primitive::Plane(p) => p.material,
            Primitive::Laser(l) => l.material(),
        }
    }

    /// Check geometry and material.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        match self {
            Primitive::Sphere(s) => s.validate(),
            Primitive::Plane(p) => p.validate(),
            Primitive::Laser(l) => l.validate(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<Laser> for Primitive {
    fn from(laser: Laser) -> Self {
        Primitive::Laser(laser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_validation() {
        let ok = Sphere::new(Vec3::ZERO, 0.5, Material::default());
        assert!(Primitive::from(ok).validate().is_ok());

        let flat = Sphere::new(Vec3::ZERO, 0.0, Material::default());
        assert_eq!(
            Primitive::from(flat).validate(),
            Err(PrimitiveError::NonPositiveRadius(0.0))
        );

        let nan = Sphere::new(Vec3::ZERO, f32::NAN, Material::default());
        assert!(Primitive::from(nan).validate().is_err());
    }

    #[test]
    fn test_plane_validation() {
        let ok = Plane::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 4.0, Material::default());
        assert!(Primitive::from(ok).validate().is_ok());

        let no_normal = Plane::new(Vec3::ZERO, Vec3::ZERO, 4.0, Material::default());
        assert_eq!(
            Primitive::from(no_normal).validate(),
            Err(PrimitiveError::ZeroNormal)
        );

        let negative = Plane::new(Vec3::ZERO, Vec3::Y, -1.0, Material::default());
        assert_eq!(
            Primitive::from(negative).validate(),
            Err(PrimitiveError::NonPositiveSize(-1.0))
        );
    }

    #[test]
    fn test_plane_clip_box_is_a_cube() {
        let plane = Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, 4.0, Material::default());
        let clip = plane.clip_box();
        assert_eq!((clip.x.min, clip.x.max), (-4.0, 4.0));
        assert_eq!((clip.y.min, clip.y.max), (-4.5, 3.5));
        assert_eq!((clip.z.min, clip.z.max), (-4.0, 4.0));
    }

    #[test]
    fn test_laser_material_is_white() {
        let laser = Laser::new(Vec3::ZERO, Vec3::X, Color::new(0.0, 1.0, 0.0));
        let mat = Primitive::from(laser).material();
        assert_eq!(mat.color, Color::ONE);
        assert_eq!(mat.emissive, Color::new(0.0, 1.0, 0.0));
        assert_eq!(mat.reflection, 0.0);
        assert_eq!(mat.refraction, 0.0);
    }

    #[test]
    fn test_primitive_json_tagging() {
        let json = r#"{
            "type": "plane",
            "center": [0.0, -0.5, 0.0],
            "normal": [0.0, 1.0, 0.0],
            "size": 4.0
        }"#;
        let prim: Primitive = serde_json::from_str(json).unwrap();
        assert_eq!(prim.kind(), "plane");
        match prim {
            Primitive::Plane(p) => {
                assert_eq!(p.size, 4.0);
                assert_eq!(p.material, Material::default());
            }
            other => panic!("expected a plane, got {:?}", other),
        }
    }
}
