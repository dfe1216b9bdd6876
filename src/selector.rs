//! Saved selection snapshot

/// The `<selector>` block: which vertices, edges and faces were selected when
/// the grid was written.
///
/// Face indices use the document's face numbering (combined numbering for a
/// decoded document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
    pub faces: Vec<usize>,
}

impl Selector {
    /// Create an empty selector
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    /// Total number of selected elements
    pub fn len(&self) -> usize {
        self.vertices.len() + self.edges.len() + self.faces.len()
    }
}
