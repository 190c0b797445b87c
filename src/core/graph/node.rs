//! Graph vertices
//!
//! A node is identified structurally: two nodes are the same node iff their
//! id, kind and artefacts are all equal.

use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// Tag describing what a node represents
///
/// The graph is generic over this tag. Domain layers provide a concrete enum
/// and implement the marker trait for it.
pub trait NodeKind: Copy + Eq + Hash + fmt::Debug + fmt::Display {}

/// Handle to the canonical instance of a node inside a [`Graph`](super::Graph)
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Immutable typed vertex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Node<T> {
    id: String,
    #[serde(rename = "type")]
    kind: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    artefacts: Vec<String>,
}

impl<T: NodeKind> Node<T> {
    /// Create a node with no artefacts
    pub fn new(id: impl Into<String>, kind: T) -> Self {
        Node {
            id: id.into(),
            kind,
            artefacts: Vec::new(),
        }
    }

    /// Create a node carrying an auxiliary payload
    ///
    /// Artefacts take part in equality, so the same id and kind with different
    /// artefacts are different nodes.
    pub fn with_artefacts(id: impl Into<String>, kind: T, artefacts: Vec<String>) -> Self {
        Node {
            id: id.into(),
            kind,
            artefacts,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> T {
        self.kind
    }

    pub fn artefacts(&self) -> &[String] {
        &self.artefacts
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
