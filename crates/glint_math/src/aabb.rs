use crate::{Interval, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Finite planes use it as their clip volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create a cube of half-width `half_extent` centered at `center`.
    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        Self {
            x: Interval::centered(center.x, half_extent),
            y: Interval::centered(center.y, half_extent),
            z: Interval::centered(center.z, half_extent),
        }
    }

    /// Returns true if the point lies inside the box, boundaries included.
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}
