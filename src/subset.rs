//! Subsets: named, colored groups every vertex, edge and face belongs to

use crate::types::Color;

/// A subset of the default subset handler.
///
/// A subset has no stored id; its id is its position in
/// [`MeshDocument::subsets`](crate::MeshDocument::subsets).
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    /// Display name (conventionally unique, not enforced)
    pub name: String,
    /// Display color
    pub color: Color,
}

impl Subset {
    /// Create a new subset
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Subset {
            name: name.into(),
            color,
        }
    }

    /// The subset a grid receives when it has none.
    pub fn default_subset() -> Self {
        Subset::new("Subset 0", Color::DEFAULT_SUBSET)
    }
}

/// Members of one subset, each list ascending by element position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetMembers {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
    pub faces: Vec<usize>,
}

impl SubsetMembers {
    /// True when the subset has no members of any kind
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }
}

/// Collect the members of every subset in a single pass over a membership array.
///
/// `ids[i]` is the subset of element `i`; the result has `subset_count` lists.
pub(crate) fn group_by_subset(ids: &[usize], subset_count: usize) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); subset_count];
    for (element, &subset) in ids.iter().enumerate() {
        if let Some(group) = groups.get_mut(subset) {
            group.push(element);
        }
    }
    groups
}
