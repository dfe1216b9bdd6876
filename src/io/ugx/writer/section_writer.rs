//! UGX section writers
//!
//! Writes the children of `<grid>` in the order UG4 expects: geometry,
//! the default subset handler, the mark subset handler, the selector and the
//! projection handler.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::UgxWriterConfiguration;
use crate::document::MeshDocument;
use crate::error::Result;
use crate::geometry::FaceKind;
use crate::io::ugx::tokens::{join_indices, join_numbers};
use crate::io::ugx::{
    default_mark_handler, default_projection_handler, DEFAULT_SELECTOR, DEFAULT_SUBSET_HANDLER,
    SUBSET_STATE,
};
use crate::subset::group_by_subset;

/// Writes the `<grid>` element of one document
pub struct SectionWriter<'a, W: Write> {
    writer: &'a mut Writer<W>,
    document: &'a MeshDocument,
    /// Combined face index of every face position
    combined: &'a [usize],
}

impl<'a, W: Write> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(writer: &'a mut Writer<W>, document: &'a MeshDocument, combined: &'a [usize]) -> Self {
        Self {
            writer,
            document,
            combined,
        }
    }

    /// Write the whole grid
    pub fn write_grid(&mut self, config: &UgxWriterConfiguration) -> Result<()> {
        let mut grid = BytesStart::new("grid");
        grid.push_attribute(("name", self.document.name.as_str()));
        self.writer.write_event(Event::Start(grid))?;

        self.write_vertices()?;
        self.write_edges()?;
        self.write_faces(FaceKind::Triangle)?;
        self.write_faces(FaceKind::Quad)?;
        self.write_subset_handler()?;

        match (&self.document.mark_handler, config.pass_through_handlers) {
            (Some(mark), true) => mark.write_to(&mut *self.writer)?,
            _ => default_mark_handler().write_to(&mut *self.writer)?,
        }

        self.write_selector()?;

        match (&self.document.projection_handler, config.pass_through_handlers) {
            (Some(projection), true) => projection.write_to(&mut *self.writer)?,
            _ => default_projection_handler().write_to(&mut *self.writer)?,
        }

        self.writer.write_event(Event::End(BytesEnd::new("grid")))?;
        Ok(())
    }

    fn write_vertices(&mut self) -> Result<()> {
        let coords = join_numbers(self.document.vertices.iter().flat_map(|v| v.to_array()));
        self.write_list("vertices", &[("coords", "3")], &coords)
    }

    /// `<edges>` is written even for an edgeless grid
    fn write_edges(&mut self) -> Result<()> {
        let indices = join_indices(self.document.edges.iter().flat_map(|e| e.vertices()));
        self.write_list("edges", &[], &indices)
    }

    fn write_faces(&mut self, kind: FaceKind) -> Result<()> {
        let indices = join_indices(
            self.document
                .faces
                .iter()
                .filter(|f| f.kind() == Some(kind))
                .flat_map(|f| f.vertices.iter().copied()),
        );
        if indices.is_empty() {
            return Ok(());
        }
        let name = match kind {
            FaceKind::Triangle => "triangles",
            FaceKind::Quad => "quads",
        };
        self.write_list(name, &[], &indices)
    }

    fn write_subset_handler(&mut self) -> Result<()> {
        let doc = self.document;
        let subset_count = doc.subsets.len();

        let vertex_groups = group_by_subset(&doc.vertex_subsets, subset_count);
        let edge_groups = group_by_subset(&doc.edge_subsets, subset_count);

        // face members are listed by combined index
        let mut combined_face_subsets = vec![0; doc.faces.len()];
        for (position, &subset) in doc.face_subsets.iter().enumerate() {
            combined_face_subsets[self.combined[position]] = subset;
        }
        let face_groups = group_by_subset(&combined_face_subsets, subset_count);

        let mut handler = BytesStart::new("subset_handler");
        handler.push_attribute(("name", DEFAULT_SUBSET_HANDLER));
        self.writer.write_event(Event::Start(handler))?;

        for (id, subset) in doc.subsets.iter().enumerate() {
            let color = join_numbers(subset.color.to_array());
            let mut start = BytesStart::new("subset");
            start.push_attribute(("name", subset.name.as_str()));
            start.push_attribute(("color", color.as_str()));
            start.push_attribute(("state", SUBSET_STATE));

            let members = [
                ("vertices", &vertex_groups[id]),
                ("edges", &edge_groups[id]),
                ("faces", &face_groups[id]),
            ];
            if members.iter().all(|(_, m)| m.is_empty()) {
                self.writer.write_event(Event::Empty(start))?;
                continue;
            }

            self.writer.write_event(Event::Start(start))?;
            for (name, list) in members {
                self.write_members(name, list.iter().copied())?;
            }
            self.writer.write_event(Event::End(BytesEnd::new("subset")))?;
        }

        self.writer.write_event(Event::End(BytesEnd::new("subset_handler")))?;
        tracing::debug!(subsets = subset_count, "subset handler written");
        Ok(())
    }

    /// The selector is omitted when nothing is selected
    fn write_selector(&mut self) -> Result<()> {
        let doc = self.document;
        let selector = match &doc.selector {
            Some(selector) if !selector.is_empty() => selector,
            _ => return Ok(()),
        };

        let mut start = BytesStart::new("selector");
        start.push_attribute(("name", DEFAULT_SELECTOR));
        self.writer.write_event(Event::Start(start))?;

        self.write_members("vertices", selector.vertices.iter().copied())?;
        self.write_members("edges", selector.edges.iter().copied())?;
        let combined = self.combined;
        self.write_members("faces", selector.faces.iter().map(|&f| combined[f]))?;

        self.writer.write_event(Event::End(BytesEnd::new("selector")))?;
        Ok(())
    }

    /// Write a member list, skipping it entirely when empty
    fn write_members(&mut self, name: &str, indices: impl Iterator<Item = usize>) -> Result<()> {
        let text = join_indices(indices);
        if text.is_empty() {
            return Ok(());
        }
        self.write_list(name, &[], &text)
    }

    /// Write `<name attrs>text</name>`, or an empty element when there is no text
    fn write_list(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        let mut start = BytesStart::new(name);
        for &attribute in attributes {
            start.push_attribute(attribute);
        }

        if text.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}
