use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::routing::edge_weigher::{EdgeWeigher, is_excluded};
use crate::domain::routing::path::Path;
use crate::domain::routing::weight::Weight;
use crate::domain::topology::connect_point::ElementId;
use crate::domain::topology::graph::{EdgeId, TopologyGraph};

/// Number of candidate paths requested when the caller does not say otherwise.
pub const K_NUMBER_OF_PATHS: usize = 10;

/// Entry of the Dijkstra frontier.
///
/// Ordered so that `BinaryHeap` pops the lowest cost first and, among equal costs,
/// the entry pushed first. That keeps tie-breaking tied to discovery order.
#[derive(Debug, Clone)]
struct FrontierEntry {
    cost: f64,
    sequence: u64,
    vertex: ElementId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-heap behavior.
        other.cost.total_cmp(&self.cost).then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Edge list of a path in the graph plus the vertices it visits.
#[derive(Debug, Clone)]
struct Route {
    edge_ids: Vec<EdgeId>,
    vertices: Vec<ElementId>,
    cost: f64,
}

/// Yen-style K shortest loop-free paths over a `TopologyGraph`.
///
/// Edges the weigher rates non-viable, inactive links and optical links are
/// never traversed. Results come back in non-decreasing cost order; equal-cost
/// paths keep the order in which they were discovered, so two searches over the
/// same snapshot always agree.
pub struct KShortestPathsSearch<'a> {
    graph: &'a TopologyGraph,
    weigher: &'a dyn EdgeWeigher,
}

impl<'a> KShortestPathsSearch<'a> {
    pub fn new(graph: &'a TopologyGraph, weigher: &'a dyn EdgeWeigher) -> Self {
        Self { graph, weigher }
    }

    /// Up to `k` shortest paths from `src` to `dst`.
    ///
    /// Empty when `k` is 0, when `src == dst`, when either end is not in the graph
    /// or when `dst` is unreachable.
    pub fn search(&self, src: &ElementId, dst: &ElementId, k: usize) -> Vec<Path> {
        if k == 0 || src == dst {
            return Vec::new();
        }
        if !self.graph.contains_vertex(src) || !self.graph.contains_vertex(dst) {
            log::debug!("NoPathFound: {} => {} (unknown endpoint)", src, dst);
            return Vec::new();
        }

        let Some(first) = self.shortest_route(src, dst, &HashSet::new(), &HashSet::new()) else {
            log::debug!("NoPathFound: {} => {}", src, dst);
            return Vec::new();
        };

        let mut accepted: Vec<Route> = vec![first];
        let mut candidates: Vec<Route> = Vec::new();

        while accepted.len() < k {
            let last = accepted[accepted.len() - 1].clone();

            for spur_index in 0..last.edge_ids.len() {
                let spur_vertex = &last.vertices[spur_index];
                let root_edges = &last.edge_ids[..spur_index];

                // Block the next hop of every accepted path sharing this root.
                let banned_edges: HashSet<EdgeId> = accepted
                    .iter()
                    .filter(|route| route.edge_ids.len() > spur_index && route.edge_ids[..spur_index] == *root_edges)
                    .map(|route| route.edge_ids[spur_index])
                    .collect();
                let banned_vertices: HashSet<ElementId> = last.vertices[..spur_index].iter().cloned().collect();

                let Some(spur) = self.shortest_route(spur_vertex, dst, &banned_edges, &banned_vertices) else {
                    continue;
                };

                let mut edge_ids = root_edges.to_vec();
                edge_ids.extend(spur.edge_ids);
                let mut vertices = last.vertices[..spur_index].to_vec();
                vertices.extend(spur.vertices);

                let known = accepted.iter().chain(candidates.iter()).any(|route| route.edge_ids == edge_ids);
                if !known {
                    let cost = self.route_cost(&edge_ids);
                    candidates.push(Route { edge_ids, vertices, cost });
                }
            }

            if candidates.is_empty() {
                break;
            }

            // Cheapest candidate, earliest discovered on ties.
            let best = candidates
                .iter()
                .enumerate()
                .fold(0, |best, (index, route)| if route.cost < candidates[best].cost { index } else { best });
            accepted.push(candidates.remove(best));
        }

        accepted.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        log::debug!("Found {} path(s) for {} => {} (k = {}).", accepted.len(), src, dst, k);

        accepted.into_iter().filter_map(|route| self.to_path(route)).collect()
    }

    fn traversal_weight(&self, edge_id: EdgeId, banned_edges: &HashSet<EdgeId>, banned_vertices: &HashSet<ElementId>) -> Option<f64> {
        if banned_edges.contains(&edge_id) {
            return None;
        }
        let edge = self.graph.edge(edge_id)?;
        if is_excluded(edge) || banned_vertices.contains(&edge.dst.element) {
            return None;
        }

        let weight = self.weigher.weight(edge);
        weight.is_viable().then(|| weight.value())
    }

    /// Dijkstra from `src` to `dst` that ignores the banned edges and vertices.
    fn shortest_route(
        &self,
        src: &ElementId,
        dst: &ElementId,
        banned_edges: &HashSet<EdgeId>,
        banned_vertices: &HashSet<ElementId>,
    ) -> Option<Route> {
        let initial = self.weigher.initial_weight().value();

        let mut distances: HashMap<ElementId, f64> = HashMap::new();
        let mut predecessors: HashMap<ElementId, (ElementId, EdgeId)> = HashMap::new();
        let mut settled: HashSet<ElementId> = HashSet::new();
        let mut frontier = BinaryHeap::new();
        let mut sequence: u64 = 0;

        distances.insert(src.clone(), initial);
        frontier.push(FrontierEntry { cost: initial, sequence, vertex: src.clone() });

        while let Some(FrontierEntry { cost, vertex, .. }) = frontier.pop() {
            if !settled.insert(vertex.clone()) {
                continue;
            }
            if vertex == *dst {
                break;
            }

            for (edge_id, edge) in self.graph.outgoing(&vertex) {
                let Some(weight) = self.traversal_weight(edge_id, banned_edges, banned_vertices) else {
                    continue;
                };

                let next = &edge.dst.element;
                if settled.contains(next) {
                    continue;
                }

                let candidate = cost + weight;
                let improves = distances.get(next).is_none_or(|known| candidate < *known);
                if improves {
                    distances.insert(next.clone(), candidate);
                    predecessors.insert(next.clone(), (vertex.clone(), edge_id));
                    sequence += 1;
                    frontier.push(FrontierEntry { cost: candidate, sequence, vertex: next.clone() });
                }
            }
        }

        if !settled.contains(dst) {
            return None;
        }

        let mut edge_ids = Vec::new();
        let mut vertices = vec![dst.clone()];
        let mut current = dst.clone();
        while current != *src {
            let (previous, edge_id) = predecessors.get(&current)?.clone();
            edge_ids.push(edge_id);
            vertices.push(previous.clone());
            current = previous;
        }
        edge_ids.reverse();
        vertices.reverse();

        let cost = distances.get(dst).copied()?;
        Some(Route { edge_ids, vertices, cost })
    }

    /// Re-sums the weights of a full edge list in traversal order.
    fn route_cost(&self, edge_ids: &[EdgeId]) -> f64 {
        edge_ids
            .iter()
            .filter_map(|edge_id| self.graph.edge(*edge_id))
            .fold(self.weigher.initial_weight(), |cost, edge| cost.merge(self.weigher.weight(edge)))
            .value()
    }

    fn to_path(&self, route: Route) -> Option<Path> {
        let edges = route.edge_ids.iter().map(|edge_id| self.graph.edge(*edge_id).cloned()).collect::<Option<Vec<_>>>()?;
        Some(Path::new(edges, Weight::new(route.cost)))
    }
}
