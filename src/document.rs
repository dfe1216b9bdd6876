//! Grid document structure

use crate::error::{check_bounds, Result, Section, UgxError};
use crate::geometry::{Edge, Face, FaceIndex, FaceKind};
use crate::io::ugx::Element;
use crate::notification::NotificationCollection;
use crate::selector::Selector;
use crate::subset::{Subset, SubsetMembers};
use crate::types::{BoundingBox3D, Color, Vector3};

/// Grid name written when the document does not carry one
pub const DEFAULT_GRID_NAME: &str = "defGrid";

/// The host-facing form of a grid: plain parallel sequences.
///
/// This is what a host hands to [`MeshDocument::build`] and receives from
/// [`MeshDocument::materialize`]. `face_subsets` is indexed by combined face
/// index (all triangles, then all quads).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshParts {
    pub vertices: Vec<Vector3>,
    pub edges: Vec<Edge>,
    pub triangles: Vec<[usize; 3]>,
    pub quads: Vec<[usize; 4]>,
    pub subsets: Vec<Subset>,
    /// Subset id per vertex; empty means "all in subset 0"
    pub vertex_subsets: Vec<usize>,
    /// Subset id per edge; empty means "all in subset 0"
    pub edge_subsets: Vec<usize>,
    /// Subset id per combined face index; empty means "all in subset 0"
    pub face_subsets: Vec<usize>,
}

/// A UG4 grid: geometry, subset table and per-element subset membership.
///
/// Every element belongs to exactly one subset, stored in the parallel
/// `*_subsets` arrays. A subset's id is its position in `subsets`, so
/// reordering the table must go through [`MeshDocument::move_subset`] or
/// [`MeshDocument::remove_subset`], which renumber the membership arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    /// `name` attribute of the `<grid>` element
    pub name: String,

    /// Vertex positions; a vertex's index is its position here
    pub vertices: Vec<Vector3>,

    pub edges: Vec<Edge>,

    /// Faces in document order. Decoded grids hold all triangles before all
    /// quads, so face positions equal combined face indices.
    pub faces: Vec<Face>,

    /// Subsets of the default subset handler, id = position
    pub subsets: Vec<Subset>,

    pub vertex_subsets: Vec<usize>,
    pub edge_subsets: Vec<usize>,
    /// Subset id per face position
    pub face_subsets: Vec<usize>,

    /// Saved selection, if the file had one
    pub selector: Option<Selector>,

    /// The `markSH` subset handler as read, uninterpreted
    pub mark_handler: Option<Element>,

    /// The projection handler as read, uninterpreted
    pub projection_handler: Option<Element>,

    /// Notifications collected during the last read
    pub notifications: NotificationCollection,
}

impl MeshDocument {
    /// Create a new empty grid document
    pub fn new() -> Self {
        MeshDocument {
            name: DEFAULT_GRID_NAME.to_string(),
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            subsets: Vec::new(),
            vertex_subsets: Vec::new(),
            edge_subsets: Vec::new(),
            face_subsets: Vec::new(),
            selector: None,
            mark_handler: None,
            projection_handler: None,
            notifications: NotificationCollection::new(),
        }
    }

    /// Build a validated document from host data.
    ///
    /// Faces are stored triangles first, then quads. Empty membership arrays
    /// put every element of that kind into subset 0; non-empty ones must have
    /// one entry per element.
    pub fn build(parts: MeshParts) -> Result<Self> {
        let MeshParts {
            vertices,
            edges,
            triangles,
            quads,
            subsets,
            vertex_subsets,
            edge_subsets,
            face_subsets,
        } = parts;

        let mut faces = Vec::with_capacity(triangles.len() + quads.len());
        faces.extend(triangles.into_iter().map(Face::triangle));
        faces.extend(quads.into_iter().map(Face::quad));

        let vertex_subsets = membership_or_default(vertex_subsets, vertices.len(), Section::VertexSubsets)?;
        let edge_subsets = membership_or_default(edge_subsets, edges.len(), Section::EdgeSubsets)?;
        let face_subsets = membership_or_default(face_subsets, faces.len(), Section::FaceSubsets)?;

        let doc = MeshDocument {
            vertices,
            edges,
            faces,
            subsets,
            vertex_subsets,
            edge_subsets,
            face_subsets,
            ..MeshDocument::new()
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Split the document back into host data.
    ///
    /// Triangles and quads keep their relative order and `face_subsets` is
    /// indexed by combined face index. Fails with `MalformedGeometry` if a
    /// face is neither a triangle nor a quad.
    pub fn materialize(&self) -> Result<MeshParts> {
        let combined = self.combined_face_numbering()?;

        let mut triangles = Vec::with_capacity(self.triangle_count());
        let mut quads = Vec::with_capacity(self.quad_count());
        let mut face_subsets = vec![0; self.faces.len()];

        for (position, face) in self.faces.iter().enumerate() {
            match *face.vertices.as_slice() {
                [a, b, c] => triangles.push([a, b, c]),
                [a, b, c, d] => quads.push([a, b, c, d]),
                _ => {
                    return Err(UgxError::MalformedGeometry {
                        face: position,
                        arity: face.arity(),
                    })
                }
            }
            if let Some(&subset) = self.face_subsets.get(position) {
                face_subsets[combined[position]] = subset;
            }
        }

        Ok(MeshParts {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            triangles,
            quads,
            subsets: self.subsets.clone(),
            vertex_subsets: self.vertex_subsets.clone(),
            edge_subsets: self.edge_subsets.clone(),
            face_subsets,
        })
    }

    // ==================== Elements ====================

    /// Append a vertex in subset 0, returning its index
    pub fn add_vertex(&mut self, position: Vector3) -> usize {
        self.vertices.push(position);
        self.vertex_subsets.push(0);
        self.vertices.len() - 1
    }

    /// Append an edge in subset 0, returning its index
    pub fn add_edge(&mut self, start: usize, end: usize) -> Result<usize> {
        for (position, &v) in [start, end].iter().enumerate() {
            self.check_vertex(Section::Edges, self.edges.len() * 2 + position, v)?;
        }
        self.edges.push(Edge::new(start, end));
        self.edge_subsets.push(0);
        Ok(self.edges.len() - 1)
    }

    /// Append a face in subset 0, returning its position.
    ///
    /// Vertex indices are checked; the arity is not, so any host polygon can
    /// be stored. Encoding rejects faces that are not triangles or quads.
    pub fn add_face(&mut self, vertices: Vec<usize>) -> Result<usize> {
        for (position, &v) in vertices.iter().enumerate() {
            self.check_vertex(Section::Triangles, position, v)?;
        }
        self.faces.push(Face::new(vertices));
        self.face_subsets.push(0);
        Ok(self.faces.len() - 1)
    }

    fn check_vertex(&self, section: Section, position: usize, index: usize) -> Result<()> {
        if index >= self.vertices.len() {
            return Err(UgxError::out_of_range(section, position, index, self.vertices.len()));
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.count_faces(FaceKind::Triangle)
    }

    pub fn quad_count(&self) -> usize {
        self.count_faces(FaceKind::Quad)
    }

    fn count_faces(&self, kind: FaceKind) -> usize {
        self.faces.iter().filter(|f| f.kind() == Some(kind)).count()
    }

    /// Split a combined face index into its triangle or quad position
    pub fn split_face_index(&self, combined: usize) -> Option<FaceIndex> {
        FaceIndex::split(combined, self.triangle_count(), self.quad_count())
    }

    /// Combined face index of a triangle or quad position
    pub fn combined_face_index(&self, index: FaceIndex) -> usize {
        index.combined(self.triangle_count())
    }

    /// Combined face index for every face position.
    ///
    /// For a triangles-first document this is the identity. Fails with
    /// `MalformedGeometry` on the first face that is neither a triangle nor
    /// a quad.
    pub fn combined_face_numbering(&self) -> Result<Vec<usize>> {
        let mut kinds = Vec::with_capacity(self.faces.len());
        for (position, face) in self.faces.iter().enumerate() {
            let kind = face.kind().ok_or(UgxError::MalformedGeometry {
                face: position,
                arity: face.arity(),
            })?;
            kinds.push(kind);
        }

        let triangle_count = kinds.iter().filter(|k| **k == FaceKind::Triangle).count();
        let (mut next_triangle, mut next_quad) = (0, 0);
        Ok(kinds
            .into_iter()
            .map(|kind| match kind {
                FaceKind::Triangle => {
                    next_triangle += 1;
                    FaceIndex::Triangle(next_triangle - 1).combined(triangle_count)
                }
                FaceKind::Quad => {
                    next_quad += 1;
                    FaceIndex::Quad(next_quad - 1).combined(triangle_count)
                }
            })
            .collect())
    }

    /// Bounding box of all vertices, `None` for an empty grid
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(&self.vertices)
    }

    // ==================== Validation ====================

    /// Check every index invariant of the document.
    ///
    /// Face arity is not checked here; see [`MeshDocument::combined_face_numbering`].
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();

        for (i, edge) in self.edges.iter().enumerate() {
            for (k, v) in edge.vertices().into_iter().enumerate() {
                check_index(Section::Edges, i * 2 + k, v, vertex_count)?;
            }
        }

        let mut position = 0;
        for face in &self.faces {
            let section = match face.kind() {
                Some(FaceKind::Quad) => Section::Quads,
                _ => Section::Triangles,
            };
            for &v in &face.vertices {
                check_index(section, position, v, vertex_count)?;
                position += 1;
            }
        }

        check_membership(&self.vertex_subsets, self.vertices.len(), self.subsets.len(), Section::VertexSubsets)?;
        check_membership(&self.edge_subsets, self.edges.len(), self.subsets.len(), Section::EdgeSubsets)?;
        check_membership(&self.face_subsets, self.faces.len(), self.subsets.len(), Section::FaceSubsets)?;

        if let Some(selector) = &self.selector {
            check_bounds(&selector.vertices, vertex_count, Section::SelectorVertices)?;
            check_bounds(&selector.edges, self.edges.len(), Section::SelectorEdges)?;
            check_bounds(&selector.faces, self.faces.len(), Section::SelectorFaces)?;
        }

        Ok(())
    }

    // ==================== Subset table ====================

    /// Add the standard first subset if the table is empty.
    ///
    /// Returns `true` if a subset was added.
    pub fn ensure_default_subset(&mut self) -> bool {
        if !self.subsets.is_empty() {
            return false;
        }
        self.subsets.push(Subset::default_subset());
        true
    }

    /// Append a subset and return its id
    pub fn add_subset(&mut self, name: impl Into<String>, color: Color) -> usize {
        self.subsets.push(Subset::new(name, color));
        self.subsets.len() - 1
    }

    /// Remove a subset.
    ///
    /// Its members move to subset 0 (after removal), and every id above the
    /// removed one shifts down by one. The last remaining subset cannot be
    /// removed.
    pub fn remove_subset(&mut self, id: usize) -> Result<Subset> {
        self.check_subset(id)?;
        if self.subsets.len() == 1 {
            return Err(UgxError::InvalidSubset(
                "at least one subset must be defined".to_string(),
            ));
        }

        let removed = self.subsets.remove(id);
        self.renumber_members(|s| match s {
            s if s == id => 0,
            s if s > id => s - 1,
            s => s,
        });
        Ok(removed)
    }

    /// Move subset `from` to position `to`, renumbering every member.
    ///
    /// The subsets in between shift by one towards `from`.
    pub fn move_subset(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_subset(from)?;
        self.check_subset(to)?;
        if from == to {
            return Ok(());
        }

        let subset = self.subsets.remove(from);
        self.subsets.insert(to, subset);
        self.renumber_members(|s| {
            if s == from {
                to
            } else if from < to && s > from && s <= to {
                s - 1
            } else if to < from && s >= to && s < from {
                s + 1
            } else {
                s
            }
        });
        Ok(())
    }

    /// Put the given vertices into `subset`
    pub fn assign_vertices(&mut self, vertices: &[usize], subset: usize) -> Result<()> {
        self.check_subset(subset)?;
        check_bounds(vertices, self.vertex_subsets.len(), Section::VertexSubsets)?;
        for &v in vertices {
            self.vertex_subsets[v] = subset;
        }
        Ok(())
    }

    /// Put the given edges into `subset`
    pub fn assign_edges(&mut self, edges: &[usize], subset: usize) -> Result<()> {
        self.check_subset(subset)?;
        check_bounds(edges, self.edge_subsets.len(), Section::EdgeSubsets)?;
        for &e in edges {
            self.edge_subsets[e] = subset;
        }
        Ok(())
    }

    /// Put the given faces (by face position) into `subset`
    pub fn assign_faces(&mut self, faces: &[usize], subset: usize) -> Result<()> {
        self.check_subset(subset)?;
        check_bounds(faces, self.face_subsets.len(), Section::FaceSubsets)?;
        for &f in faces {
            self.face_subsets[f] = subset;
        }
        Ok(())
    }

    /// Members of one subset, ascending by element position
    pub fn subset_members(&self, subset: usize) -> Result<SubsetMembers> {
        self.check_subset(subset)?;
        let members_of = |ids: &[usize]| -> Vec<usize> {
            ids.iter()
                .enumerate()
                .filter(|&(_, &s)| s == subset)
                .map(|(i, _)| i)
                .collect()
        };
        Ok(SubsetMembers {
            vertices: members_of(&self.vertex_subsets),
            edges: members_of(&self.edge_subsets),
            faces: members_of(&self.face_subsets),
        })
    }

    fn check_subset(&self, id: usize) -> Result<()> {
        if id >= self.subsets.len() {
            return Err(UgxError::InvalidSubset(format!(
                "subset {} does not exist ({} defined)",
                id,
                self.subsets.len()
            )));
        }
        Ok(())
    }

    fn renumber_members(&mut self, map: impl Fn(usize) -> usize) {
        for s in self
            .vertex_subsets
            .iter_mut()
            .chain(self.edge_subsets.iter_mut())
            .chain(self.face_subsets.iter_mut())
        {
            *s = map(*s);
        }
    }
}

impl Default for MeshDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn check_index(section: Section, position: usize, index: usize, limit: usize) -> Result<()> {
    if index >= limit {
        return Err(UgxError::out_of_range(section, position, index, limit));
    }
    Ok(())
}

fn check_membership(ids: &[usize], element_count: usize, subset_count: usize, section: Section) -> Result<()> {
    if ids.len() != element_count {
        return Err(UgxError::MalformedDocument(format!(
            "{} has {} entries for {} elements",
            section,
            ids.len(),
            element_count
        )));
    }
    check_bounds(ids, subset_count, section)
}

fn membership_or_default(ids: Vec<usize>, element_count: usize, section: Section) -> Result<Vec<usize>> {
    if ids.is_empty() {
        return Ok(vec![0; element_count]);
    }
    if ids.len() != element_count {
        return Err(UgxError::MalformedDocument(format!(
            "{} has {} entries for {} elements",
            section,
            ids.len(),
            element_count
        )));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_subset_quad() -> MeshDocument {
        let mut doc = MeshDocument::new();
        doc.add_subset("inner", Color::rgb(1.0, 0.0, 0.0));
        doc.add_subset("boundary", Color::rgb(0.0, 0.0, 1.0));
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            doc.add_vertex(Vector3::new(x, y, 0.0));
        }
        for i in 0..4 {
            doc.add_edge(i, (i + 1) % 4).unwrap();
        }
        doc.add_face(vec![0, 1, 2, 3]).unwrap();
        doc
    }

    #[test]
    fn test_new_document() {
        let doc = MeshDocument::new();
        assert_eq!(doc.name, "defGrid");
        assert_eq!(doc.vertex_count(), 0);
        assert!(doc.subsets.is_empty());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_add_edge_out_of_range() {
        let mut doc = MeshDocument::new();
        doc.add_vertex(Vector3::ZERO);
        let err = doc.add_edge(0, 1).unwrap_err();
        assert!(matches!(err, UgxError::IndexOutOfRange { index: 1, limit: 1, .. }));
    }

    #[test]
    fn test_build_defaults_membership_to_zero() {
        let doc = MeshDocument::build(MeshParts {
            vertices: vec![Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)],
            edges: vec![Edge::new(0, 1)],
            triangles: vec![[0, 1, 2]],
            subsets: vec![Subset::default_subset()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(doc.vertex_subsets, vec![0, 0, 0]);
        assert_eq!(doc.edge_subsets, vec![0]);
        assert_eq!(doc.face_subsets, vec![0]);
    }

    #[test]
    fn test_build_rejects_membership_length_mismatch() {
        let err = MeshDocument::build(MeshParts {
            vertices: vec![Vector3::ZERO, Vector3::ZERO],
            subsets: vec![Subset::default_subset()],
            vertex_subsets: vec![0],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UgxError::MalformedDocument(_)));
    }

    #[test]
    fn test_build_rejects_unknown_subset() {
        let err = MeshDocument::build(MeshParts {
            vertices: vec![Vector3::ZERO],
            subsets: vec![Subset::default_subset()],
            vertex_subsets: vec![1],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            UgxError::IndexOutOfRange { section: Section::VertexSubsets, index: 1, limit: 1, .. }
        ));
    }

    #[test]
    fn test_build_places_triangles_before_quads() {
        let doc = MeshDocument::build(MeshParts {
            vertices: vec![Vector3::ZERO; 5],
            triangles: vec![[0, 1, 2], [2, 3, 4]],
            quads: vec![[0, 1, 2, 3]],
            subsets: vec![Subset::default_subset(), Subset::new("b", Color::WHITE)],
            face_subsets: vec![0, 0, 1],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(doc.faces[2], Face::quad([0, 1, 2, 3]));
        assert_eq!(doc.face_subsets, vec![0, 0, 1]);
    }

    #[test]
    fn test_materialize_renumbers_interleaved_faces() {
        let mut doc = MeshDocument::new();
        doc.add_subset("a", Color::WHITE);
        doc.add_subset("b", Color::BLACK);
        for _ in 0..5 {
            doc.add_vertex(Vector3::ZERO);
        }
        doc.add_face(vec![0, 1, 2, 3]).unwrap();
        doc.add_face(vec![0, 1, 2]).unwrap();
        doc.assign_faces(&[0], 1).unwrap();

        let parts = doc.materialize().unwrap();
        assert_eq!(parts.triangles, vec![[0, 1, 2]]);
        assert_eq!(parts.quads, vec![[0, 1, 2, 3]]);
        // triangle 0 is combined 0, quad 0 is combined 1
        assert_eq!(parts.face_subsets, vec![0, 1]);
    }

    #[test]
    fn test_materialize_rejects_pentagon() {
        let mut doc = MeshDocument::new();
        doc.ensure_default_subset();
        for _ in 0..5 {
            doc.add_vertex(Vector3::ZERO);
        }
        doc.add_face(vec![0, 1, 2, 3, 4]).unwrap();
        let err = doc.materialize().unwrap_err();
        assert!(matches!(err, UgxError::MalformedGeometry { face: 0, arity: 5 }));
    }

    #[test]
    fn test_split_face_index() {
        let mut doc = MeshDocument::new();
        for _ in 0..4 {
            doc.add_vertex(Vector3::ZERO);
        }
        for _ in 0..2 {
            doc.add_face(vec![0, 1, 2]).unwrap();
        }
        for _ in 0..3 {
            doc.add_face(vec![0, 1, 2, 3]).unwrap();
        }
        assert_eq!(doc.split_face_index(1), Some(FaceIndex::Triangle(1)));
        assert_eq!(doc.split_face_index(2), Some(FaceIndex::Quad(0)));
        assert_eq!(doc.split_face_index(3), Some(FaceIndex::Quad(1)));
        assert_eq!(doc.split_face_index(5), None);
        assert_eq!(doc.combined_face_index(FaceIndex::Quad(2)), 4);
    }

    #[test]
    fn test_validate_checks_selector() {
        let mut doc = two_subset_quad();
        doc.selector = Some(Selector {
            edges: vec![4],
            ..Default::default()
        });
        let err = doc.validate().unwrap_err();
        assert!(matches!(
            err,
            UgxError::IndexOutOfRange { section: Section::SelectorEdges, index: 4, limit: 4, .. }
        ));
    }

    #[test]
    fn test_ensure_default_subset() {
        let mut doc = MeshDocument::new();
        assert!(doc.ensure_default_subset());
        assert!(!doc.ensure_default_subset());
        assert_eq!(doc.subsets, vec![Subset::default_subset()]);
    }

    #[test]
    fn test_remove_subset_renumbers() {
        let mut doc = two_subset_quad();
        doc.add_subset("extra", Color::WHITE);
        doc.assign_edges(&[0, 1], 1).unwrap();
        doc.assign_edges(&[2], 2).unwrap();

        let removed = doc.remove_subset(1).unwrap();
        assert_eq!(removed.name, "boundary");
        assert_eq!(doc.subsets.len(), 2);
        assert_eq!(doc.edge_subsets, vec![0, 0, 1, 0]);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_remove_last_subset_fails() {
        let mut doc = MeshDocument::new();
        doc.ensure_default_subset();
        assert!(matches!(doc.remove_subset(0), Err(UgxError::InvalidSubset(_))));
    }

    #[test]
    fn test_move_subset_renumbers() {
        let mut doc = two_subset_quad();
        doc.add_subset("third", Color::WHITE);
        doc.assign_vertices(&[1], 1).unwrap();
        doc.assign_vertices(&[2], 2).unwrap();

        doc.move_subset(2, 0).unwrap();
        assert_eq!(doc.subsets[0].name, "third");
        assert_eq!(doc.subsets[1].name, "inner");
        assert_eq!(doc.subsets[2].name, "boundary");
        assert_eq!(doc.vertex_subsets, vec![1, 2, 0, 1]);

        doc.move_subset(0, 2).unwrap();
        assert_eq!(doc.subsets[2].name, "third");
        assert_eq!(doc.vertex_subsets, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_assign_rejects_bad_subset() {
        let mut doc = two_subset_quad();
        assert!(matches!(
            doc.assign_faces(&[0], 5),
            Err(UgxError::InvalidSubset(_))
        ));
        assert!(matches!(
            doc.assign_faces(&[1], 1),
            Err(UgxError::IndexOutOfRange { .. })
        ));
        assert_eq!(doc.face_subsets, vec![0]);
    }

    #[test]
    fn test_subset_members() {
        let mut doc = two_subset_quad();
        doc.assign_vertices(&[3, 1], 1).unwrap();
        doc.assign_faces(&[0], 1).unwrap();
        let members = doc.subset_members(1).unwrap();
        assert_eq!(members.vertices, vec![1, 3]);
        assert!(members.edges.is_empty());
        assert_eq!(members.faces, vec![0]);
    }
}
