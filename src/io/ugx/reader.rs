//! UGX file reader

mod section_reader;

use section_reader::SectionReader;

use super::element::Element;
use crate::document::MeshDocument;
use crate::error::{Result, UgxError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Configuration for the UGX reader.
#[derive(Debug, Clone)]
pub struct UgxReaderConfiguration {
    /// Accept `<triangles>` / `<quads>` member lists inside a `<subset>`
    /// (per-kind numbering) in addition to the combined `<faces>` list.
    ///
    /// Default: `true`. When `false` such lists are a `MalformedDocument`.
    pub accept_per_kind_face_lists: bool,

    /// When `true`, top-level elements the codec does not read (volumes,
    /// constrained vertices, ...) are a `MalformedDocument` error instead of
    /// a `NotSupported` notification.
    ///
    /// Default: `false`.
    pub strict: bool,
}

impl Default for UgxReaderConfiguration {
    fn default() -> Self {
        Self {
            accept_per_kind_face_lists: true,
            strict: false,
        }
    }
}

/// UGX file reader
pub struct UgxReader {
    source: String,
    config: UgxReaderConfiguration,
}

impl UgxReader {
    /// Create a reader over UGX text already in memory
    pub fn from_string(text: impl Into<String>) -> Self {
        Self {
            source: text.into(),
            config: UgxReaderConfiguration::default(),
        }
    }

    /// Create a new UGX reader from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::from_string(source))
    }

    /// Create a new UGX reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading grid from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: UgxReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the UGX document and return a MeshDocument
    pub fn read(self) -> Result<MeshDocument> {
        let root = Element::parse_document(&self.source)?;
        if root.name != "grid" {
            return Err(UgxError::MalformedDocument(format!(
                "root element is <{}>, expected <grid>",
                root.name
            )));
        }

        let document = SectionReader::new(&root, &self.config).read_grid()?;
        tracing::debug!(
            vertices = document.vertex_count(),
            edges = document.edge_count(),
            faces = document.face_count(),
            subsets = document.subsets.len(),
            notifications = document.notifications.len(),
            "grid decoded"
        );
        Ok(document)
    }
}
