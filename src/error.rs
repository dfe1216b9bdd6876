//! Error types for the ugxrust library

use std::fmt;
use std::io;
use thiserror::Error;

/// Grid section an index or token belongs to.
///
/// Carried by parse and bounds errors so a failure can be traced back to the
/// element that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Vertices,
    Edges,
    Triangles,
    Quads,
    /// Member list of the subset with the given id.
    SubsetVertices(usize),
    SubsetEdges(usize),
    SubsetFaces(usize),
    SelectorVertices,
    SelectorEdges,
    SelectorFaces,
    /// Per-element subset id arrays of a [`MeshParts`](crate::document::MeshParts).
    VertexSubsets,
    EdgeSubsets,
    FaceSubsets,
    SubsetColor(usize),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertices => write!(f, "vertices"),
            Self::Edges => write!(f, "edges"),
            Self::Triangles => write!(f, "triangles"),
            Self::Quads => write!(f, "quads"),
            Self::SubsetVertices(id) => write!(f, "subset {} vertices", id),
            Self::SubsetEdges(id) => write!(f, "subset {} edges", id),
            Self::SubsetFaces(id) => write!(f, "subset {} faces", id),
            Self::SelectorVertices => write!(f, "selector vertices"),
            Self::SelectorEdges => write!(f, "selector edges"),
            Self::SelectorFaces => write!(f, "selector faces"),
            Self::VertexSubsets => write!(f, "vertex subset ids"),
            Self::EdgeSubsets => write!(f, "edge subset ids"),
            Self::FaceSubsets => write!(f, "face subset ids"),
            Self::SubsetColor(id) => write!(f, "subset {} color", id),
        }
    }
}

/// Main error type for ugxrust operations
#[derive(Debug, Error)]
pub enum UgxError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The XML layer rejected the input or output
    #[error("XML error: {0}")]
    Xml(String),

    /// A face that is neither a triangle nor a quad
    #[error("Malformed geometry: face {face} has {arity} vertices (only triangles and quads are supported)")]
    MalformedGeometry { face: usize, arity: usize },

    /// Vertex coordinate count is not a multiple of the coordinate dimension
    #[error("Vertex count error: {count} coordinates cannot be grouped by {group}")]
    VertexCount { count: usize, group: usize },

    /// Edge index count is odd
    #[error("Edge count error: {count} indices cannot be grouped in pairs")]
    EdgeCount { count: usize },

    /// Triangle or quad index count is not a multiple of the face arity
    #[error("Face count error: {count} {kind} indices cannot be grouped by {group}")]
    FaceCount {
        kind: Section,
        count: usize,
        group: usize,
    },

    /// Dangling reference to a vertex, edge, face or subset
    #[error("Index out of range in {section} at position {position}: {index} >= {limit}")]
    IndexOutOfRange {
        section: Section,
        position: usize,
        index: usize,
        limit: usize,
    },

    /// A token that is not a valid number for its section
    #[error("Invalid number in {section} at position {position}: {token:?}")]
    InvalidNumber {
        section: Section,
        position: usize,
        token: String,
    },

    /// Missing required section or unparsable structure
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Subset table operation that would break the subset invariants
    #[error("Invalid subset operation: {0}")]
    InvalidSubset(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl UgxError {
    pub(crate) fn out_of_range(section: Section, position: usize, index: usize, limit: usize) -> Self {
        UgxError::IndexOutOfRange {
            section,
            position,
            index,
            limit,
        }
    }
}

/// Result type alias for ugxrust operations
pub type Result<T> = std::result::Result<T, UgxError>;

/// Check every index against `limit`, reporting the first offender
pub(crate) fn check_bounds(indices: &[usize], limit: usize, section: Section) -> Result<()> {
    match indices.iter().position(|&i| i >= limit) {
        Some(position) => Err(UgxError::out_of_range(section, position, indices[position], limit)),
        None => Ok(()),
    }
}

impl From<quick_xml::Error> for UgxError {
    fn from(e: quick_xml::Error) -> Self {
        UgxError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for UgxError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        UgxError::Xml(e.to_string())
    }
}

impl From<String> for UgxError {
    fn from(s: String) -> Self {
        UgxError::Custom(s)
    }
}

impl From<&str> for UgxError {
    fn from(s: &str) -> Self {
        UgxError::Custom(s.to_string())
    }
}
