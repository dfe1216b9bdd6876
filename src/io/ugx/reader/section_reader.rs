//! UGX section readers

use super::UgxReaderConfiguration;
use crate::document::MeshDocument;
use crate::error::{check_bounds, Result, Section, UgxError};
use crate::geometry::{Edge, Face};
use crate::io::ugx::element::Element;
use crate::io::ugx::tokens::{parse_indices, parse_numbers};
use crate::io::ugx::{DEFAULT_SUBSET_HANDLER, MARK_SUBSET_HANDLER};
use crate::notification::{NotificationCollection, NotificationType};
use crate::selector::Selector;
use crate::subset::Subset;
use crate::types::{Color, Vector3};

/// Top-level elements that may appear at most once
const SINGLE_SECTIONS: [&str; 6] = [
    "vertices",
    "edges",
    "triangles",
    "quads",
    "selector",
    "projection_handler",
];

/// Membership bookkeeping for one element kind while subsets are applied
struct Claims {
    owner: Vec<Option<usize>>,
}

impl Claims {
    fn new(count: usize) -> Self {
        Claims {
            owner: vec![None; count],
        }
    }

    /// Claim `indices` for `subset`, returning how many were already claimed
    /// by an earlier subset.
    fn claim(&mut self, indices: &[usize], subset: usize) -> usize {
        let mut reclaimed = 0;
        for &i in indices {
            if matches!(self.owner[i], Some(prev) if prev != subset) {
                reclaimed += 1;
            }
            self.owner[i] = Some(subset);
        }
        reclaimed
    }

    fn into_ids(self) -> Vec<usize> {
        self.owner.into_iter().map(|s| s.unwrap_or(0)).collect()
    }
}

/// Section reader for interpreting a parsed `<grid>` element
pub(super) struct SectionReader<'a> {
    grid: &'a Element,
    config: &'a UgxReaderConfiguration,
    notifications: NotificationCollection,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader
    pub fn new(grid: &'a Element, config: &'a UgxReaderConfiguration) -> Self {
        Self {
            grid,
            config,
            notifications: NotificationCollection::new(),
        }
    }

    /// Read every section of the grid into a new document
    pub fn read_grid(mut self) -> Result<MeshDocument> {
        self.check_top_level()?;

        let mut doc = MeshDocument::new();
        if let Some(name) = self.grid.attribute("name") {
            doc.name = name.to_string();
        }

        doc.vertices = self.read_vertices()?;
        doc.edges = self.read_edges(doc.vertices.len())?;

        let triangles = self.read_faces("triangles", Section::Triangles, 3, doc.vertices.len())?;
        let quads = self.read_faces("quads", Section::Quads, 4, doc.vertices.len())?;
        let triangle_count = triangles.len();
        doc.faces = triangles.into_iter().chain(quads).collect();
        tracing::debug!(
            vertices = doc.vertices.len(),
            edges = doc.edges.len(),
            triangles = triangle_count,
            quads = doc.faces.len() - triangle_count,
            "geometry read"
        );

        self.read_subset_handler(&mut doc)?;
        doc.selector = self.read_selector(&doc)?;

        doc.mark_handler = self.subset_handler(MARK_SUBSET_HANDLER).cloned();
        doc.projection_handler = self.grid.child("projection_handler").cloned();

        doc.notifications = self.notifications;
        Ok(doc)
    }

    /// Reject duplicated sections and report elements the codec does not read
    fn check_top_level(&mut self) -> Result<()> {
        for name in SINGLE_SECTIONS {
            if self.grid.children_named(name).count() > 1 {
                return Err(UgxError::MalformedDocument(format!(
                    "<{}> appears more than once",
                    name
                )));
            }
        }

        for child in &self.grid.children {
            let known = child.name == "subset_handler" || SINGLE_SECTIONS.contains(&child.name.as_str());
            if known {
                continue;
            }
            if self.config.strict {
                return Err(UgxError::MalformedDocument(format!(
                    "unsupported element <{}>",
                    child.name
                )));
            }
            self.notifications.notify(
                NotificationType::NotSupported,
                format!("<{}> skipped", child.name),
            );
        }
        Ok(())
    }

    /// Read the `<vertices>` section
    fn read_vertices(&self) -> Result<Vec<Vector3>> {
        let element = self.grid.child("vertices").ok_or_else(|| {
            UgxError::MalformedDocument("grid has no <vertices> element".to_string())
        })?;

        let dim = match element.attribute("coords") {
            None => 3,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(d @ 1..=3) => d,
                _ => {
                    return Err(UgxError::MalformedDocument(format!(
                        "unsupported vertex dimension coords={:?}",
                        value
                    )))
                }
            },
        };

        let coords = parse_numbers(&element.text, Section::Vertices)?;
        if coords.len() % dim != 0 {
            return Err(UgxError::VertexCount {
                count: coords.len(),
                group: dim,
            });
        }
        Ok(coords.chunks_exact(dim).map(Vector3::from_coords).collect())
    }

    /// Read the `<edges>` section; a missing element means no edges
    fn read_edges(&self, vertex_count: usize) -> Result<Vec<Edge>> {
        let Some(element) = self.grid.child("edges") else {
            return Ok(Vec::new());
        };

        let indices = parse_indices(&element.text, Section::Edges)?;
        if indices.len() % 2 != 0 {
            return Err(UgxError::EdgeCount {
                count: indices.len(),
            });
        }
        check_bounds(&indices, vertex_count, Section::Edges)?;
        Ok(indices.chunks_exact(2).map(|e| Edge::new(e[0], e[1])).collect())
    }

    /// Read a `<triangles>` or `<quads>` section; a missing element means none
    fn read_faces(&self, name: &str, section: Section, arity: usize, vertex_count: usize) -> Result<Vec<Face>> {
        let Some(element) = self.grid.child(name) else {
            return Ok(Vec::new());
        };

        let indices = parse_indices(&element.text, section)?;
        if indices.len() % arity != 0 {
            return Err(UgxError::FaceCount {
                kind: section,
                count: indices.len(),
                group: arity,
            });
        }
        check_bounds(&indices, vertex_count, section)?;
        Ok(indices.chunks_exact(arity).map(|f| Face::new(f.to_vec())).collect())
    }

    /// The subset handler with the given `name` attribute
    fn subset_handler(&self, name: &str) -> Option<&'a Element> {
        self.grid
            .children_named("subset_handler")
            .find(|sh| sh.attribute("name") == Some(name))
    }

    /// The handler holding the grid's subsets: `defSH`, or else the first
    /// subset handler that is not the mark handler.
    fn default_subset_handler(&self) -> Option<&'a Element> {
        self.subset_handler(DEFAULT_SUBSET_HANDLER).or_else(|| {
            self.grid
                .children_named("subset_handler")
                .find(|sh| sh.attribute("name") != Some(MARK_SUBSET_HANDLER))
        })
    }

    /// Read the subset table and apply subset membership
    fn read_subset_handler(&mut self, doc: &mut MeshDocument) -> Result<()> {
        let handler = self.default_subset_handler();

        for extra in self.grid.children_named("subset_handler") {
            let is_default = handler.is_some_and(|h| std::ptr::eq(h, extra));
            if !is_default && extra.attribute("name") != Some(MARK_SUBSET_HANDLER) {
                self.notifications.notify(
                    NotificationType::NotSupported,
                    format!(
                        "subset handler {:?} skipped",
                        extra.attribute("name").unwrap_or_default()
                    ),
                );
            }
        }

        let mut vertices = Claims::new(doc.vertices.len());
        let mut edges = Claims::new(doc.edges.len());
        let mut faces = Claims::new(doc.faces.len());

        if let Some(handler) = handler {
            for (id, element) in handler.children_named("subset").enumerate() {
                doc.subsets.push(self.read_subset(id, element)?);

                let mut reclaimed = 0;
                for child in &element.children {
                    match child.name.as_str() {
                        "vertices" => {
                            let list = read_members(child, Section::SubsetVertices(id), doc.vertices.len())?;
                            reclaimed += vertices.claim(&list, id);
                        }
                        "edges" => {
                            let list = read_members(child, Section::SubsetEdges(id), doc.edges.len())?;
                            reclaimed += edges.claim(&list, id);
                        }
                        "faces" => {
                            let list = read_members(child, Section::SubsetFaces(id), doc.faces.len())?;
                            reclaimed += faces.claim(&list, id);
                        }
                        "triangles" | "quads" => {
                            let list = self.read_per_kind_faces(child, id, doc.faces.len())?;
                            reclaimed += faces.claim(&list, id);
                        }
                        other => self.notifications.notify(
                            NotificationType::NotSupported,
                            format!("<{}> in subset {} skipped", other, id),
                        ),
                    }
                }

                if reclaimed > 0 {
                    self.notifications.notify(
                        NotificationType::Warning,
                        format!(
                            "subset {} takes over {} element(s) already listed by an earlier subset",
                            id, reclaimed
                        ),
                    );
                }
            }
        }

        doc.vertex_subsets = vertices.into_ids();
        doc.edge_subsets = edges.into_ids();
        doc.face_subsets = faces.into_ids();

        let has_elements = !(doc.vertices.is_empty() && doc.edges.is_empty() && doc.faces.is_empty());
        if has_elements && doc.ensure_default_subset() {
            self.notifications.notify(
                NotificationType::Warning,
                "grid defines no subsets; all elements placed in a default subset",
            );
        }

        tracing::debug!(subsets = doc.subsets.len(), "subsets read");
        Ok(())
    }

    /// Read name and color of one `<subset>`
    fn read_subset(&mut self, id: usize, element: &Element) -> Result<Subset> {
        let name = element.attribute("name").ok_or_else(|| {
            UgxError::MalformedDocument(format!("subset {} has no name attribute", id))
        })?;
        let color_text = element.attribute("color").ok_or_else(|| {
            UgxError::MalformedDocument(format!("subset {} has no color attribute", id))
        })?;

        let components = parse_numbers(color_text, Section::SubsetColor(id))?;
        let color = Color::from_components(&components).ok_or_else(|| {
            UgxError::MalformedDocument(format!(
                "subset {} color has {} components, expected 3 or 4",
                id,
                components.len()
            ))
        })?;
        if !color.is_normalized() {
            self.notifications.notify(
                NotificationType::Warning,
                format!("subset {} color {} is outside [0, 1]", id, color),
            );
        }

        Ok(Subset::new(name, color))
    }

    /// Read a legacy `<triangles>` or `<quads>` member list.
    ///
    /// Both lists hold combined face indices; the element name does not shift
    /// or restrict the numbering.
    fn read_per_kind_faces(
        &mut self,
        element: &Element,
        id: usize,
        face_count: usize,
    ) -> Result<Vec<usize>> {
        if !self.config.accept_per_kind_face_lists {
            return Err(UgxError::MalformedDocument(format!(
                "subset {} uses a per-kind <{}> list",
                id, element.name
            )));
        }

        let list = read_members(element, Section::SubsetFaces(id), face_count)?;

        self.notifications.notify(
            NotificationType::Info,
            format!("subset {} lists faces by kind in <{}>", id, element.name),
        );
        Ok(list)
    }

    /// Read the optional `<selector>` block
    fn read_selector(&self, doc: &MeshDocument) -> Result<Option<Selector>> {
        let Some(element) = self.grid.child("selector") else {
            return Ok(None);
        };

        let list = |name: &str, section: Section, limit: usize| -> Result<Vec<usize>> {
            match element.child(name) {
                Some(child) => read_members(child, section, limit),
                None => Ok(Vec::new()),
            }
        };

        Ok(Some(Selector {
            vertices: list("vertices", Section::SelectorVertices, doc.vertices.len())?,
            edges: list("edges", Section::SelectorEdges, doc.edges.len())?,
            faces: list("faces", Section::SelectorFaces, doc.faces.len())?,
        }))
    }
}

/// Parse an index list and check it against `limit`
fn read_members(element: &Element, section: Section, limit: usize) -> Result<Vec<usize>> {
    let indices = parse_indices(&element.text, section)?;
    check_bounds(&indices, limit, section)?;
    Ok(indices)
}
