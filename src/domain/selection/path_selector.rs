use crate::domain::constraint::ConstraintPipeline;
use crate::domain::routing::edge_weigher::EdgeWeigher;
use crate::domain::routing::k_shortest_paths::KShortestPathsSearch;
use crate::domain::routing::path::Path;
use crate::domain::topology::connect_point::ElementId;
use crate::domain::topology::graph::TopologyGraph;
use crate::error::EngineError;

/// Outcome of a single-direction path selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Source equals destination. Nothing to route.
    SameEndpoint,
    Found(Path),
    /// No path exists between the endpoints.
    Disconnected,
    /// `candidates` paths exist but every one of them failed the constraints.
    ConstraintViolated { candidates: usize },
}

impl Selection {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Selection::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Picks the cheapest constraint-satisfying path among the K shortest ones.
///
/// Ranking uses the edge weigher cost. The constraints only gate.
#[derive(Clone, Copy)]
pub struct PathSelector<'a> {
    graph: &'a TopologyGraph,
    weigher: &'a dyn EdgeWeigher,
}

impl<'a> PathSelector<'a> {
    pub fn new(graph: &'a TopologyGraph, weigher: &'a dyn EdgeWeigher) -> Self {
        Self { graph, weigher }
    }

    pub fn graph(&self) -> &'a TopologyGraph {
        self.graph
    }

    /// Up to `k` candidate paths, cheapest first, before any constraint is applied.
    pub fn candidates(&self, src: &ElementId, dst: &ElementId, k: usize) -> Vec<Path> {
        KShortestPathsSearch::new(self.graph, self.weigher).search(src, dst, k)
    }

    /// # Errors
    /// `EngineError::ReliabilityModelDomain` when a constraint hits a link length the model rejects.
    pub fn select(&self, src: &ElementId, dst: &ElementId, k: usize, constraints: &ConstraintPipeline) -> Result<Selection, EngineError> {
        if src == dst {
            return Ok(Selection::SameEndpoint);
        }

        let candidates = self.candidates(src, dst, k);
        if candidates.is_empty() {
            return Ok(Selection::Disconnected);
        }

        let total = candidates.len();
        let mut best: Option<Path> = None;

        for path in candidates {
            if !constraints.validate(&path)? {
                continue;
            }
            // Strictly lower only, so the first of equal-cost survivors wins.
            if best.as_ref().is_none_or(|current| path.cost() < current.cost()) {
                best = Some(path);
            }
        }

        match best {
            Some(path) => Ok(Selection::Found(path)),
            None => {
                log::debug!("ConstraintViolated: none of {} candidate(s) for {} => {} satisfies the constraints.", total, src, dst);
                Ok(Selection::ConstraintViolated { candidates: total })
            }
        }
    }
}
