//! Grid summary information.
//!
//! A compact overview of a grid: element counts, extents and the size of
//! every subset.

use std::fmt;

use crate::document::MeshDocument;
use crate::subset::group_by_subset;
use crate::types::{BoundingBox3D, Color};

/// Member counts of one subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetSummary {
    /// Subset id (position in the subset table).
    pub id: usize,
    pub name: String,
    pub color: Color,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

/// Summary of a grid document.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    /// Name of the grid.
    pub name: String,
    pub vertices: usize,
    pub edges: usize,
    pub triangles: usize,
    pub quads: usize,
    /// Faces that are neither triangles nor quads (not encodable).
    pub other_faces: usize,
    /// Extents of all vertices, `None` for an empty grid.
    pub bounds: Option<BoundingBox3D>,
    pub subsets: Vec<SubsetSummary>,
    /// Number of notifications collected by the read.
    pub notifications: usize,
}

impl GridSummary {
    /// Summarize a document.
    pub fn from_document(document: &MeshDocument) -> Self {
        let subset_count = document.subsets.len();
        let vertex_groups = group_by_subset(&document.vertex_subsets, subset_count);
        let edge_groups = group_by_subset(&document.edge_subsets, subset_count);
        let face_groups = group_by_subset(&document.face_subsets, subset_count);

        let subsets = document
            .subsets
            .iter()
            .enumerate()
            .map(|(id, subset)| SubsetSummary {
                id,
                name: subset.name.clone(),
                color: subset.color,
                vertices: vertex_groups[id].len(),
                edges: edge_groups[id].len(),
                faces: face_groups[id].len(),
            })
            .collect();

        let triangles = document.triangle_count();
        let quads = document.quad_count();

        GridSummary {
            name: document.name.clone(),
            vertices: document.vertex_count(),
            edges: document.edge_count(),
            triangles,
            quads,
            other_faces: document.face_count() - triangles - quads,
            bounds: document.bounding_box(),
            subsets,
            notifications: document.notifications.len(),
        }
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "grid \"{}\"", self.name)?;
        writeln!(f, "  vertices:  {}", self.vertices)?;
        writeln!(f, "  edges:     {}", self.edges)?;
        writeln!(f, "  triangles: {}", self.triangles)?;
        writeln!(f, "  quads:     {}", self.quads)?;
        if self.other_faces > 0 {
            writeln!(f, "  other faces: {}", self.other_faces)?;
        }
        match &self.bounds {
            Some(bounds) => writeln!(f, "  bounds:    {}", bounds)?,
            None => writeln!(f, "  bounds:    (empty)")?,
        }
        writeln!(f, "  subsets:   {}", self.subsets.len())?;
        for s in &self.subsets {
            writeln!(
                f,
                "    [{}] {} {}: {} vertices, {} edges, {} faces",
                s.id, s.name, s.color, s.vertices, s.edges, s.faces
            )?;
        }
        if self.notifications > 0 {
            writeln!(f, "  notifications: {}", self.notifications)?;
        }
        Ok(())
    }
}
