//! Generic typed graph
//!
//! Provides the storage and traversal layer used by the policy model:
//! - Structural node identity with get-or-add deduplication
//! - Deduplicated directed edges, typed by their endpoint kinds
//! - One-hop and transitive traversal in either direction, optionally
//!   restricted to a single edge type
//!
//! The graph owns every node. Edges refer to nodes through [`NodeId`]
//! handles, so each `(id, kind, artefacts)` triple exists exactly once.

mod edge;
mod node;
mod traversal;

pub use edge::{Edge, EdgeRef, EdgeType};
pub use node::{Node, NodeId, NodeKind};
pub use traversal::{Neighbors, Walk};

use ahash::{AHashMap, AHashSet, RandomState};
use std::hash::BuildHasher;
use traversal::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StoredEdge {
    previous: NodeId,
    next: NodeId,
}

/// Container of nodes and edges
///
/// Insertion order is kept for both nodes and edges, which makes every
/// traversal deterministic.
#[derive(Debug, Clone)]
pub struct Graph<T: NodeKind> {
    nodes: Vec<Node<T>>,
    /// Node hash -> handles of the stored nodes with that hash
    index: AHashMap<u64, Vec<NodeId>>,
    hasher: RandomState,
    edges: Vec<StoredEdge>,
    edge_index: AHashSet<StoredEdge>,
    /// Per node, positions in `edges` where the node is `previous`
    outgoing: Vec<Vec<usize>>,
    /// Per node, positions in `edges` where the node is `next`
    incoming: Vec<Vec<usize>>,
}

impl<T: NodeKind> Graph<T> {
    /// Create an empty graph
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            index: AHashMap::new(),
            hasher: RandomState::new(),
            edges: Vec::new(),
            edge_index: AHashSet::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Create a graph seeded with `nodes` and no edges
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node<T>>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.get_or_add(node);
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, T>> + '_ {
        self.edges.iter().map(move |edge| self.edge_ref(edge))
    }

    /// Canonical node behind a handle, if the handle belongs to this graph
    pub fn resolve(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Handle of the stored node structurally equal to `node`
    pub fn node_id(&self, node: &Node<T>) -> Option<NodeId> {
        self.lookup(BuildHasher::hash_one(&self.hasher, node), node)
    }

    /// Canonical stored instance structurally equal to `node`
    pub fn get_node(&self, node: &Node<T>) -> Option<&Node<T>> {
        self.node_id(node).map(|id| &self.nodes[id.0])
    }

    /// First node with the given kind and id, ignoring artefacts
    pub fn find_node(&self, kind: T, id: &str) -> Option<&Node<T>> {
        self.nodes
            .iter()
            .find(|node| node.kind() == kind && node.id() == id)
    }

    /// Return the canonical node equal to `node`, inserting it if it is new
    pub fn get_or_add(&mut self, node: Node<T>) -> NodeId {
        let hash = BuildHasher::hash_one(&self.hasher, &node);
        if let Some(id) = self.lookup(hash, &node) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.index.entry(hash).or_default().push(id);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Insert a directed edge, adding any endpoint not yet in the graph
    ///
    /// Returns `false` when an equal edge was already present.
    pub fn add_edge(&mut self, edge: Edge<T>) -> bool {
        let previous = self.get_or_add(edge.previous);
        let next = self.get_or_add(edge.next);
        self.link(previous, next)
    }

    /// Insert a directed edge between two nodes already in the graph
    ///
    /// Returns `false` without touching the graph when either handle is out
    /// of range, and when the edge was already present.
    pub(crate) fn link(&mut self, previous: NodeId, next: NodeId) -> bool {
        if !self.contains(previous) || !self.contains(next) {
            return false;
        }

        let stored = StoredEdge { previous, next };
        if !self.edge_index.insert(stored) {
            return false;
        }

        let position = self.edges.len();
        self.edges.push(stored);
        self.outgoing[previous.0].push(position);
        self.incoming[next.0].push(position);
        true
    }

    /// Edges whose type is one of `edge_types`
    ///
    /// An empty slice matches no edge. Use [`Graph::edges`] for an unfiltered
    /// listing.
    pub fn edges_by_types<'g>(
        &'g self,
        edge_types: &'g [EdgeType<T>],
    ) -> impl Iterator<Item = EdgeRef<'g, T>> + 'g {
        self.edges
            .iter()
            .filter(move |edge| edge_types.contains(&self.stored_edge_type(edge)))
            .map(move |edge| self.edge_ref(edge))
    }

    /// Direct predecessors of `node`
    pub fn parents_of(&self, node: &Node<T>, edge_type: Option<EdgeType<T>>) -> Neighbors<'_, T> {
        Neighbors::new(self, self.node_id(node), edge_type, Direction::Up)
    }

    /// Direct successors of `node`
    pub fn children_of(&self, node: &Node<T>, edge_type: Option<EdgeType<T>>) -> Neighbors<'_, T> {
        Neighbors::new(self, self.node_id(node), edge_type, Direction::Down)
    }

    /// Every node reachable from `node` along edges
    pub fn all_children_of(&self, node: &Node<T>, edge_type: Option<EdgeType<T>>) -> Walk<'_, T> {
        Walk::new(self, self.node_id(node), edge_type, Direction::Down)
    }

    /// Every node `node` is reachable from
    pub fn all_parents_of(&self, node: &Node<T>, edge_type: Option<EdgeType<T>>) -> Walk<'_, T> {
        Walk::new(self, self.node_id(node), edge_type, Direction::Up)
    }

    fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn lookup(&self, hash: u64, node: &Node<T>) -> Option<NodeId> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| &self.nodes[id.0] == node)
    }

    fn stored_edge_type(&self, edge: &StoredEdge) -> EdgeType<T> {
        (
            self.nodes[edge.previous.0].kind(),
            self.nodes[edge.next.0].kind(),
        )
    }

    fn edge_ref(&self, edge: &StoredEdge) -> EdgeRef<'_, T> {
        EdgeRef {
            previous: &self.nodes[edge.previous.0],
            next: &self.nodes[edge.next.0],
        }
    }
}

impl<T: NodeKind> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
