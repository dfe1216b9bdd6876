//! Vertex position type

use std::fmt;
use std::ops::Sub;

/// 3D vector, used as a grid vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Create a new 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    /// Build a position from up to three leading coordinates.
    ///
    /// Missing components are zero, so 1D and 2D grids land on the x axis
    /// and in the xy plane.
    pub fn from_coords(coords: &[f64]) -> Self {
        let get = |i: usize| coords.get(i).copied().unwrap_or(0.0);
        Vector3::new(get(0), get(1), get(2))
    }

    /// Components in x, y, z order
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Vector3::ZERO
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(c: [f64; 3]) -> Self {
        Vector3::new(c[0], c[1], c[2])
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
