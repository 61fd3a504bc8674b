// Rotation utilities.
//
// Camera orientation is stored as three Euler angles in degrees.

use glam::{Mat3, Vec3};

/// Build the combined rotation for Euler angles given in degrees.
///
/// The X rotation is applied first, then Y, then Z, so the returned matrix is
/// `Rz * Ry * Rx`.
pub fn euler_rotation_degrees(degrees: Vec3) -> Mat3 {
    Mat3::from_rotation_z(degrees.z.to_radians())
        * Mat3::from_rotation_y(degrees.y.to_radians())
        * Mat3::from_rotation_x(degrees.x.to_radians())
}
