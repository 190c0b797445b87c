//! Directed graph relations

use super::node::{Node, NodeKind};
use crate::naming::edge_type_label;
use std::fmt;

/// Type of an edge: the kinds of its `(previous, next)` endpoints
pub type EdgeType<T> = (T, T);

/// Owned directed relation from `previous` to `next`
///
/// Used to insert relations into a [`Graph`](super::Graph). Stored edges are
/// read back as [`EdgeRef`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<T> {
    pub previous: Node<T>,
    pub next: Node<T>,
}

impl<T: NodeKind> Edge<T> {
    pub fn new(previous: Node<T>, next: Node<T>) -> Self {
        Edge { previous, next }
    }

    pub fn edge_type(&self) -> EdgeType<T> {
        (self.previous.kind(), self.next.kind())
    }
}

/// Borrowed view of an edge stored in a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef<'g, T> {
    pub previous: &'g Node<T>,
    pub next: &'g Node<T>,
}

impl<T: NodeKind> EdgeRef<'_, T> {
    pub fn edge_type(&self) -> EdgeType<T> {
        (self.previous.kind(), self.next.kind())
    }

    /// Owned copy of this edge
    pub fn to_edge(&self) -> Edge<T> {
        Edge::new(self.previous.clone(), self.next.clone())
    }
}

impl<T: NodeKind> fmt::Display for EdgeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (previous, next) = self.edge_type();
        write!(
            f,
            "{} -[{}]-> {}",
            self.previous,
            edge_type_label(&previous.to_string(), &next.to_string()),
            self.next
        )
    }
}
