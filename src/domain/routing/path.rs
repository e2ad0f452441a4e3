use serde::Serialize;
use std::fmt;

use crate::domain::routing::edge_weigher::EdgeWeigher;
use crate::domain::routing::weight::Weight;
use crate::domain::topology::connect_point::{ConnectPoint, ElementId};
use crate::domain::topology::edge::Edge;

/// A loop-free sequence of contiguous edges together with its total cost.
///
/// A path always holds at least one edge, and the `dst` of every edge is the
/// `src` element of the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    edges: Vec<Edge>,
    cost: Weight,
}

impl Path {
    /// Caller guarantees `edges` is non-empty and contiguous.
    pub(crate) fn new(edges: Vec<Edge>, cost: Weight) -> Self {
        debug_assert!(!edges.is_empty());
        Self { edges, cost }
    }

    /// Builds a path from hand-picked edges, costed by `weigher`.
    ///
    /// Returns `None` for an empty list, for edges that do not chain, or when an
    /// element is visited twice.
    pub fn from_edges(edges: Vec<Edge>, weigher: &dyn EdgeWeigher) -> Option<Self> {
        if edges.is_empty() || edges.windows(2).any(|pair| pair[0].dst.element != pair[1].src.element) {
            return None;
        }

        let cost = edges.iter().fold(weigher.initial_weight(), |cost, edge| cost.merge(weigher.weight(edge)));
        let path = Path { edges, cost };

        path.is_loop_free().then_some(path)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn cost(&self) -> Weight {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn src(&self) -> &ConnectPoint {
        &self.edges[0].src
    }

    pub fn dst(&self) -> &ConnectPoint {
        &self.edges[self.edges.len() - 1].dst
    }

    /// Visited elements in order, both ends included.
    pub fn vertices(&self) -> Vec<&ElementId> {
        std::iter::once(&self.src().element).chain(self.edges.iter().map(|edge| &edge.dst.element)).collect()
    }

    /// Edges that count towards path aggregates, i.e. everything but host attachment links.
    pub fn core_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| !edge.is_edge_link())
    }

    pub fn is_loop_free(&self) -> bool {
        let vertices = self.vertices();
        vertices.iter().enumerate().all(|(i, vertex)| !vertices[..i].contains(vertex))
    }

    /// Mirror image of the path, traversed from `dst` back to `src`.
    ///
    /// The cost is carried over unchanged. It is not re-weighed.
    pub fn reversed(&self) -> Path {
        Path { edges: self.edges.iter().rev().map(Edge::reversed).collect(), cost: self.cost }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<String> = self.edges.iter().map(|edge| edge.to_string()).collect();
        write!(f, "{}; cost={}", links.join("==>"), self.cost)
    }
}
