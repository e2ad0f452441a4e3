use serde::Serialize;

use crate::domain::reliability::ReliabilityModel;
use crate::domain::routing::weight::Weight;
use crate::domain::topology::edge::{Edge, LinkType};

/// Fixed cost of a conventional link: a fixed penalty of 100 plus a perfect-delivery term of 1.
pub const ETHERNET_DEFAULT_COST: f64 = 101.0;

pub const DEFAULT_HOP_COST: f64 = 1.0;

/// Hop cost of an indirect link, large enough that any direct detour is preferred.
pub const INDIRECT_HOP_COST: f64 = i16::MAX as f64;

/// Link types that no path may ever traverse.
pub const EXCLUDED_LINK_TYPES: [LinkType; 1] = [LinkType::Optical];

/// Maps a topology edge to the scalar weight the path search minimises.
pub trait EdgeWeigher: Send + Sync {
    fn weight(&self, edge: &Edge) -> Weight;

    fn initial_weight(&self) -> Weight {
        Weight::INITIAL
    }

    fn non_viable_weight(&self) -> Weight {
        Weight::NON_VIABLE
    }
}

/// Edges the search may never use, whatever weigher is in effect.
/// A malformed `latency` or `bandwidth` annotation excludes the edge as well.
pub fn is_excluded(edge: &Edge) -> bool {
    if !edge.is_active() || EXCLUDED_LINK_TYPES.contains(&edge.link_type) {
        return true;
    }

    match edge.malformed_measure() {
        Some(e) => {
            log::debug!("InvalidAnnotation: {} on link {}, excluding it.", e, edge);
            true
        }
        None => false,
    }
}

/// Reliability-aware weigher. Millimeter-wave links cost `1 + 1/Ps(length)`,
/// everything else costs `ETHERNET_DEFAULT_COST`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReliabilityWeigher {
    pub model: ReliabilityModel,
}

impl ReliabilityWeigher {
    pub fn new(model: ReliabilityModel) -> Self {
        Self { model }
    }
}

impl EdgeWeigher for ReliabilityWeigher {
    fn weight(&self, edge: &Edge) -> Weight {
        if is_excluded(edge) {
            return self.non_viable_weight();
        }

        let length = match edge.length() {
            Ok(Some(length)) => length,
            Ok(None) => return Weight::new(ETHERNET_DEFAULT_COST),
            Err(e) => {
                log::warn!("InvalidAnnotation: {} on link {}, treating it as non-viable.", e, edge);
                return self.non_viable_weight();
            }
        };

        match self.model.success_probability(length) {
            // Ps = 0 yields an infinite weight, which is non-viable as well.
            Ok(ps) => Weight::new(1.0 + 1.0 / ps),
            Err(e) => {
                log::warn!("InvalidAnnotation: {} on link {}, treating it as non-viable.", e, edge);
                self.non_viable_weight()
            }
        }
    }
}

/// Plain hop-count weigher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HopCountWeigher;

impl EdgeWeigher for HopCountWeigher {
    fn weight(&self, edge: &Edge) -> Weight {
        if is_excluded(edge) {
            return self.non_viable_weight();
        }

        match edge.link_type {
            LinkType::Indirect => Weight::new(INDIRECT_HOP_COST),
            _ => Weight::new(DEFAULT_HOP_COST),
        }
    }
}

/// Weigher selected by a request's `use_reliability_weighting` flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum WeigherKind {
    Reliability(ReliabilityWeigher),
    HopCount(HopCountWeigher),
}

impl WeigherKind {
    pub fn select(use_reliability_weighting: bool, model: ReliabilityModel) -> Self {
        if use_reliability_weighting { WeigherKind::Reliability(ReliabilityWeigher::new(model)) } else { WeigherKind::HopCount(HopCountWeigher) }
    }
}

impl EdgeWeigher for WeigherKind {
    fn weight(&self, edge: &Edge) -> Weight {
        match self {
            WeigherKind::Reliability(weigher) => weigher.weight(edge),
            WeigherKind::HopCount(weigher) => weigher.weight(edge),
        }
    }
}
