//! Grid elements: edges, faces and the combined face numbering

use std::fmt;

/// An edge between two vertices, by vertex index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    /// Create a new edge
    pub const fn new(start: usize, end: usize) -> Self {
        Edge { start, end }
    }

    /// Both endpoints, start first
    pub fn vertices(&self) -> [usize; 2] {
        [self.start, self.end]
    }
}

impl From<[usize; 2]> for Edge {
    fn from(v: [usize; 2]) -> Self {
        Edge::new(v[0], v[1])
    }
}

/// The face kinds UGX can store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Triangle,
    Quad,
}

impl FaceKind {
    /// Number of vertices of a face of this kind
    pub const fn arity(self) -> usize {
        match self {
            FaceKind::Triangle => 3,
            FaceKind::Quad => 4,
        }
    }

    /// Kind of a face with `arity` vertices, if UGX can store it
    pub const fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            3 => Some(FaceKind::Triangle),
            4 => Some(FaceKind::Quad),
            _ => None,
        }
    }
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceKind::Triangle => write!(f, "triangle"),
            FaceKind::Quad => write!(f, "quad"),
        }
    }
}

/// A polygonal face, vertex indices in winding order.
///
/// The model accepts any arity so a host polygon can be carried as-is; only
/// triangles and quads can be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Face {
    pub vertices: Vec<usize>,
}

impl Face {
    /// Create a face from its vertex indices
    pub fn new(vertices: Vec<usize>) -> Self {
        Face { vertices }
    }

    pub fn triangle(v: [usize; 3]) -> Self {
        Face::new(v.to_vec())
    }

    pub fn quad(v: [usize; 4]) -> Self {
        Face::new(v.to_vec())
    }

    /// Number of vertices
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }

    /// Triangle or quad; `None` for any other arity
    pub fn kind(&self) -> Option<FaceKind> {
        FaceKind::from_arity(self.arity())
    }
}

/// A face position split into its per-kind list.
///
/// Subsets and selectors reference faces by a single combined index:
/// triangles take `[0, triangle_count)` and quads follow, so combined index
/// `triangle_count + j` is quad `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceIndex {
    Triangle(usize),
    Quad(usize),
}

impl FaceIndex {
    /// Split a combined index, `None` if it is past the last quad
    pub fn split(combined: usize, triangle_count: usize, quad_count: usize) -> Option<Self> {
        if combined < triangle_count {
            Some(FaceIndex::Triangle(combined))
        } else if combined - triangle_count < quad_count {
            Some(FaceIndex::Quad(combined - triangle_count))
        } else {
            None
        }
    }

    /// Inverse of [`FaceIndex::split`]
    pub fn combined(self, triangle_count: usize) -> usize {
        match self {
            FaceIndex::Triangle(i) => i,
            FaceIndex::Quad(j) => triangle_count + j,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_kind() {
        assert_eq!(Face::triangle([0, 1, 2]).kind(), Some(FaceKind::Triangle));
        assert_eq!(Face::quad([0, 1, 2, 3]).kind(), Some(FaceKind::Quad));
        assert_eq!(Face::new(vec![0, 1, 2, 3, 4]).kind(), None);
        assert_eq!(Face::new(vec![0, 1]).kind(), None);
    }

    #[test]
    fn test_split_combined_index() {
        // 2 triangles, 3 quads
        assert_eq!(FaceIndex::split(0, 2, 3), Some(FaceIndex::Triangle(0)));
        assert_eq!(FaceIndex::split(1, 2, 3), Some(FaceIndex::Triangle(1)));
        assert_eq!(FaceIndex::split(3, 2, 3), Some(FaceIndex::Quad(1)));
        assert_eq!(FaceIndex::split(2, 2, 3), Some(FaceIndex::Quad(0)));
        assert_eq!(FaceIndex::split(4, 2, 3), Some(FaceIndex::Quad(2)));
        assert_eq!(FaceIndex::split(5, 2, 3), None);
    }

    #[test]
    fn test_combined_is_inverse_of_split() {
        for combined in 0..5 {
            let split = FaceIndex::split(combined, 2, 3).unwrap();
            assert_eq!(split.combined(2), combined);
        }
    }
}
