//! Camera for ray generation.

use glint_math::{euler_rotation_degrees, Mat3, Ray, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::renderer::{ConfigError, ConfigResult};

/// Pinhole camera: a position, an Euler orientation and a focal length.
///
/// The camera looks down -Z in its own space. `rotation` holds angles in
/// degrees about X, Y and Z, applied in that order.
///
/// Moving or turning the camera does not invalidate accumulated frames by
/// itself; whoever mutates it is expected to reset the render chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub focal_length: f32,
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            focal_length: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set camera orientation (degrees about X, Y, Z).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Check that the camera produces finite rays looking forward.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::InvalidCamera("position"));
        }
        if !self.rotation.is_finite() {
            return Err(ConfigError::InvalidCamera("rotation"));
        }
        if !(self.focal_length > 0.0) || !self.focal_length.is_finite() {
            return Err(ConfigError::InvalidFocalLength(self.focal_length));
        }
        Ok(())
    }

    /// Camera-to-world rotation.
    pub fn rotation_matrix(&self) -> Mat3 {
        euler_rotation_degrees(self.rotation)
    }

    /// Generate the ray through a screen coordinate.
    ///
    /// `pixel` is measured from the bottom-left corner of the image, in
    /// pixels, with pixel centers at half-integers. `jitter` is the frame's
    /// offset in [-1, 1] on each axis and moves the sample by up to half a
    /// pixel. The shorter image side spans one unit at the focal plane.
    ///
    /// `width` and `height` must be non-zero.
    pub fn generate_ray(&self, pixel: Vec2, jitter: Vec2, width: u32, height: u32) -> Ray {
        let width = width as f32;
        let height = height as f32;
        let denom = width.min(height);

        let local = Vec3::new(
            (pixel.x + jitter.x * 0.5 - width / 2.0) / denom,
            (pixel.y + jitter.y * 0.5 - height / 2.0) / denom,
            -self.focal_length,
        );

        let direction = (self.rotation_matrix() * local).normalize();
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_looks_down_negative_z() {
        let camera = Camera::new().with_position(Vec3::new(0.0, 0.0, 2.0));
        let ray = camera.generate_ray(Vec2::new(50.0, 40.0), Vec2::ZERO, 100, 80);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 2.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_shorter_side_spans_one_unit() {
        let camera = Camera::new();
        // Right edge of a square image: x offset 0.5 at focal length 1
        let ray = camera.generate_ray(Vec2::new(100.0, 50.0), Vec2::ZERO, 100, 100);
        let expected = Vec3::new(0.5, 0.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-6);
    }

    #[test]
    fn test_jitter_moves_half_a_pixel() {
        let camera = Camera::new();
        let a = camera.generate_ray(Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), 100, 100);
        let b = camera.generate_ray(Vec2::new(50.5, 50.0), Vec2::ZERO, 100, 100);
        assert!((a.direction - b.direction).length() < 1e-6);
    }

    #[test]
    fn test_rotation_turns_the_view() {
        let camera = Camera::new().with_rotation(Vec3::new(0.0, 90.0, 0.0));
        let ray = camera.generate_ray(Vec2::new(50.0, 50.0), Vec2::ZERO, 100, 100);
        // Yaw 90 degrees about Y turns -Z into -X
        assert!((ray.direction - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_validate_focal_length() {
        assert!(Camera::new().validate().is_ok());

        for focal_length in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let camera = Camera {
                focal_length,
                ..Camera::new()
            };
            assert!(matches!(camera.validate(), Err(ConfigError::InvalidFocalLength(_))));
        }

        let spun = Camera::new().with_rotation(Vec3::new(0.0, f32::INFINITY, 0.0));
        assert_eq!(spun.validate(), Err(ConfigError::InvalidCamera("rotation")));
    }

    #[test]
    fn test_directions_are_unit_length() {
        let camera = Camera::new().with_rotation(Vec3::new(-35.0, 10.0, 5.0));
        for (x, y) in [(0.5, 0.5), (639.5, 0.5), (320.0, 479.5)] {
            let ray = camera.generate_ray(Vec2::new(x, y), Vec2::new(-0.3, 0.8), 640, 480);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}
