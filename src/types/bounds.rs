//! Bounding box of a grid's vertex positions

use super::Vector3;
use std::fmt;

/// Axis-aligned extents of a set of vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    pub min: Vector3,
    pub max: Vector3,
}

impl BoundingBox3D {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        BoundingBox3D { min, max }
    }

    /// Smallest box holding every point, `None` when there are no points
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            BoundingBox3D::new(*first, *first),
            |mut bbox, point| {
                bbox.expand_to_include(*point);
                bbox
            },
        ))
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Grow the box so it holds `point`
    pub fn expand_to_include(&mut self, point: Vector3) {
        let (lo, hi, p) = (self.min.to_array(), self.max.to_array(), point.to_array());
        self.min = Vector3::new(lo[0].min(p[0]), lo[1].min(p[1]), lo[2].min(p[2]));
        self.max = Vector3::new(hi[0].max(p[0]), hi[1].max(p[1]), hi[2].max(p[2]));
    }
}

impl fmt::Display for BoundingBox3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.min, self.max)
    }
}
