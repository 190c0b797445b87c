//! Directional, type-filtered traversal
//!
//! One-hop lookups come back as [`Neighbors`]; transitive lookups as a lazy
//! [`Walk`]. A walk yields every node found one hop away, then expands each
//! of those nodes in turn with the same direction and type filter. Nothing is
//! deduplicated across paths: a node reachable along two paths is yielded
//! twice. No cycle guard is applied unless [`Walk::max_depth`] is set.

use super::edge::EdgeType;
use super::node::{Node, NodeId, NodeKind};
use super::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Direction {
    /// Follow edges backwards, from `next` to `previous`
    Up,
    /// Follow edges forwards, from `previous` to `next`
    Down,
}

impl<T: NodeKind> Graph<T> {
    /// Nodes one hop away from `from` in `direction`
    ///
    /// With a filter, only edges of exactly that type are considered, so a
    /// relation stored under another edge type stays invisible.
    pub(super) fn step(
        &self,
        from: NodeId,
        edge_type: Option<EdgeType<T>>,
        direction: Direction,
    ) -> Vec<NodeId> {
        let adjacent = match direction {
            Direction::Up => &self.incoming[from.0],
            Direction::Down => &self.outgoing[from.0],
        };

        adjacent
            .iter()
            .map(|&edge| self.edges[edge])
            .filter(|edge| edge_type.map_or(true, |wanted| self.stored_edge_type(edge) == wanted))
            .map(|edge| match direction {
                Direction::Up => edge.previous,
                Direction::Down => edge.next,
            })
            .collect()
    }
}

/// Nodes exactly one hop away, in edge insertion order
pub struct Neighbors<'g, T: NodeKind> {
    graph: &'g Graph<T>,
    found: std::vec::IntoIter<NodeId>,
}

impl<'g, T: NodeKind> Neighbors<'g, T> {
    pub(super) fn new(
        graph: &'g Graph<T>,
        from: Option<NodeId>,
        edge_type: Option<EdgeType<T>>,
        direction: Direction,
    ) -> Self {
        let found = from
            .map(|id| graph.step(id, edge_type, direction))
            .unwrap_or_default();

        Neighbors {
            graph,
            found: found.into_iter(),
        }
    }
}

impl<'g, T: NodeKind> Iterator for Neighbors<'g, T> {
    type Item = &'g Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.found.next().map(|id| &self.graph.nodes[id.0])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.found.size_hint()
    }
}

/// Pending expansion of one batch of discovered nodes
struct Frame {
    nodes: std::vec::IntoIter<NodeId>,
    depth: usize,
}

/// Lazy transitive traversal
pub struct Walk<'g, T: NodeKind> {
    graph: &'g Graph<T>,
    edge_type: Option<EdgeType<T>>,
    direction: Direction,
    max_depth: Option<usize>,
    /// Discovered but not yet yielded
    ready: std::collections::VecDeque<NodeId>,
    /// Discovered batches whose members still have to be expanded
    stack: Vec<Frame>,
    start: Option<NodeId>,
}

impl<'g, T: NodeKind> Walk<'g, T> {
    pub(super) fn new(
        graph: &'g Graph<T>,
        from: Option<NodeId>,
        edge_type: Option<EdgeType<T>>,
        direction: Direction,
    ) -> Self {
        Walk {
            graph,
            edge_type,
            direction,
            max_depth: None,
            ready: Default::default(),
            stack: Vec::new(),
            start: from,
        }
    }

    /// Stop expanding past `depth` hops from the start node
    ///
    /// `max_depth(1)` is equivalent to a one-hop lookup. `max_depth(0)` yields
    /// nothing. Without a limit a cyclic relation never terminates.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Apply an optional limit, leaving the walk unbounded for `None`
    pub fn limit(self, depth: Option<usize>) -> Self {
        match depth {
            Some(depth) => self.max_depth(depth),
            None => self,
        }
    }

    fn within_limit(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    /// Expand `node` found at `depth`, queueing its neighbours at `depth + 1`
    fn expand(&mut self, node: NodeId, depth: usize) {
        let next_depth = depth + 1;
        if !self.within_limit(next_depth) {
            return;
        }

        let found = self.graph.step(node, self.edge_type, self.direction);
        if found.is_empty() {
            return;
        }

        self.ready.extend(found.iter().copied());
        self.stack.push(Frame {
            nodes: found.into_iter(),
            depth: next_depth,
        });
    }
}

impl<'g, T: NodeKind> Iterator for Walk<'g, T> {
    type Item = &'g Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.expand(start, 0);
        }

        loop {
            if let Some(id) = self.ready.pop_front() {
                return Some(&self.graph.nodes[id.0]);
            }

            let frame = self.stack.last_mut()?;
            let depth = frame.depth;
            match frame.nodes.next() {
                Some(node) => self.expand(node, depth),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
