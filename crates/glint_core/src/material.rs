//! Surface material description.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::primitive::PrimitiveError;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface reflects, transmits and emits light.
///
/// The scatter model blends three lobes linearly: a diffuse lobe weighted by
/// `1 - min(reflection + refraction, 1)`, a mirror lobe weighted by
/// `reflection` and a dielectric lobe weighted by `refraction`. The two
/// weights are not renormalized when they sum past one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Albedo (RGB, 0-1)
    pub color: Color,

    /// Emitted radiance; any positive channel makes the surface a light
    pub emissive: Color,

    /// Fraction treated as mirror reflection (0-1)
    pub reflection: f32,

    /// Fraction treated as dielectric transmission (0-1)
    pub refraction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::splat(0.5), // Grey default
            emissive: Color::ZERO,
            reflection: 0.0,
            refraction: 0.0,
        }
    }
}

impl Material {
    /// Create a material from all four components.
    pub fn new(color: Color, emissive: Color, reflection: f32, refraction: f32) -> Self {
        Self {
            color,
            emissive,
            reflection,
            refraction,
        }
    }

    /// A purely diffuse, non-emissive material.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, Color::ZERO, 0.0, 0.0)
    }

    /// A light source with the given albedo and emitted radiance.
    pub fn emissive(color: Color, emissive: Color) -> Self {
        Self::new(color, emissive, 0.0, 0.0)
    }

    /// Set the mirror fraction.
    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }

    /// Set the transmissive fraction.
    pub fn with_refraction(mut self, refraction: f32) -> Self {
        self.refraction = refraction;
        self
    }

    /// Check if this material is a light source.
    pub fn is_emissive(&self) -> bool {
        self.emissive.length_squared() > 0.0
    }

    /// Weight of the diffuse lobe: `1 - min(reflection + refraction, 1)`.
    pub fn diffuse_weight(&self) -> f32 {
        1.0 - (self.reflection + self.refraction).min(1.0)
    }

    /// Check every component against its allowed range.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        if !self.color.is_finite() {
            return Err(PrimitiveError::NonFinite("material color"));
        }
        if !self.emissive.is_finite() {
            return Err(PrimitiveError::NonFinite("material emissive"));
        }
        if self.color.min_element() < 0.0 || self.color.max_element() > 1.0 {
            return Err(PrimitiveError::ColorOutOfRange(self.color));
        }
        if self.emissive.min_element() < 0.0 {
            return Err(PrimitiveError::NegativeEmission(self.emissive));
        }
        for (field, value) in [("reflection", self.reflection), ("refraction", self.refraction)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PrimitiveError::WeightOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_weight_clamps_instead_of_renormalizing() {
        let mat = Material::diffuse(Color::ONE)
            .with_reflection(0.8)
            .with_refraction(0.6);
        assert_eq!(mat.diffuse_weight(), 0.0);

        let mat = Material::diffuse(Color::ONE).with_reflection(0.25);
        assert!((mat.diffuse_weight() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_is_emissive() {
        assert!(!Material::default().is_emissive());
        assert!(Material::emissive(Color::ONE, Color::new(0.0, 0.0, 0.1)).is_emissive());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Material::default().validate().is_ok());
        assert!(Material::emissive(Color::ONE, Color::splat(10.0)).validate().is_ok());

        let too_bright = Material::diffuse(Color::new(1.2, 0.5, 0.5));
        assert_eq!(
            too_bright.validate(),
            Err(PrimitiveError::ColorOutOfRange(too_bright.color))
        );

        let negative = Material::emissive(Color::ONE, Color::new(-1.0, 0.0, 0.0));
        assert!(matches!(
            negative.validate(),
            Err(PrimitiveError::NegativeEmission(_))
        ));

        let mirror = Material::default().with_reflection(1.5);
        assert_eq!(
            mirror.validate(),
            Err(PrimitiveError::WeightOutOfRange {
                field: "reflection",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mat: Material = serde_json::from_str(r#"{ "reflection": 1.0 }"#).unwrap();
        assert_eq!(mat.color, Color::splat(0.5));
        assert_eq!(mat.emissive, Color::ZERO);
        assert_eq!(mat.reflection, 1.0);
    }
}
