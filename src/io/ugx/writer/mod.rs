//! UGX writer module

mod section_writer;

use section_writer::SectionWriter;

use crate::document::MeshDocument;
use crate::error::{Result, UgxError};
use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Configuration for the UGX writer.
#[derive(Debug, Clone)]
pub struct UgxWriterConfiguration {
    /// Spaces per nesting level; `0` writes everything on one line.
    ///
    /// Default: `2`.
    pub indent: usize,

    /// Write the document's retained mark subset handler and projection
    /// handler instead of the fixed default blocks.
    ///
    /// Default: `false`.
    pub pass_through_handlers: bool,
}

impl Default for UgxWriterConfiguration {
    fn default() -> Self {
        Self {
            indent: 2,
            pass_through_handlers: false,
        }
    }
}

/// UGX file writer
///
/// The whole document is rendered into memory before anything reaches the
/// destination, so a failed encode leaves no partial file behind.
pub struct UgxWriter<'a> {
    document: &'a MeshDocument,
    config: UgxWriterConfiguration,
}

impl<'a> UgxWriter<'a> {
    /// Create a new UGX writer
    pub fn new(document: &'a MeshDocument) -> Self {
        Self {
            document,
            config: UgxWriterConfiguration::default(),
        }
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: UgxWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let buffer = self.write_to_vec()?;
        fs::write(path, &buffer)?;
        tracing::info!("Saved grid to {:?} ({} bytes)", path, buffer.len());
        Ok(())
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        let buffer = self.write_to_vec()?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a string
    pub fn write_to_string(&self) -> Result<String> {
        String::from_utf8(self.write_to_vec()?)
            .map_err(|e| UgxError::Xml(format!("writer produced invalid UTF-8: {e}")))
    }

    /// Write to a byte vector
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        // Face arity first: a pentagon is a geometry error, not a bounds error.
        let combined = self.document.combined_face_numbering()?;
        self.document.validate()?;

        let mut buffer = Vec::new();
        let mut xml = if self.config.indent > 0 {
            Writer::new_with_indent(&mut buffer, b' ', self.config.indent)
        } else {
            Writer::new(&mut buffer)
        };

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        SectionWriter::new(&mut xml, self.document, &combined).write_grid(&self.config)?;

        tracing::debug!(bytes = buffer.len(), "grid encoded");
        Ok(buffer)
    }

    /// Get a reference to the document
    pub fn document(&self) -> &MeshDocument {
        self.document
    }
}
