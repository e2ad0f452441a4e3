use serde::Serialize;

use crate::domain::constraint::metrics;
use crate::domain::reliability::ReliabilityModel;
use crate::domain::routing::path::Path;
use crate::domain::topology::edge::{Edge, LinkType};
use crate::error::EngineError;

/// Contribution of an edge that fails a gating constraint.
const REJECTED: f64 = -1.0;
const ACCEPTED: f64 = 1.0;

/// A requirement a candidate path must meet.
///
/// Each variant knows its per-edge cost contribution and its path-level validity predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constraint {
    /// Aggregate packet loss must stay strictly below `ceiling`.
    PacketLoss { ceiling: f64 },
    /// Summed latency in ms must stay strictly below `ceiling`.
    Latency { ceiling: f64 },
    /// Every core link must offer at least `floor` Mbps.
    Bandwidth { floor: f64 },
    /// No link of the path may have one of these types.
    LinkTypeExclusion { excluded: Vec<LinkType> },
    /// Marker asking for an independently computed reverse path.
    AsymmetricPath,
}

impl Constraint {
    pub fn not_optical() -> Self {
        Constraint::LinkTypeExclusion { excluded: vec![LinkType::Optical] }
    }

    /// Per-edge contribution to the constraint-specific cost. A negative value marks the edge unusable.
    ///
    /// # Errors
    /// `EngineError::ReliabilityModelDomain` when a packet-loss constraint meets a length the model rejects.
    pub fn cost(&self, edge: &Edge, model: &ReliabilityModel) -> Result<f64, EngineError> {
        let contribution = match self {
            Constraint::PacketLoss { .. } => match edge.length() {
                Ok(Some(length)) => model.success_probability(length)?,
                Ok(None) => ACCEPTED,
                Err(_) => REJECTED,
            },
            Constraint::Latency { .. } => match edge.latency() {
                Ok(latency) => latency.unwrap_or(0.0),
                Err(_) => REJECTED,
            },
            Constraint::Bandwidth { floor } => match edge.bandwidth() {
                Ok(bandwidth) if bandwidth.unwrap_or(0.0) >= *floor => ACCEPTED,
                _ => REJECTED,
            },
            Constraint::LinkTypeExclusion { excluded } => {
                if excluded.contains(&edge.link_type) {
                    REJECTED
                } else {
                    ACCEPTED
                }
            }
            Constraint::AsymmetricPath => 0.0,
        };

        Ok(contribution)
    }

    /// Whether `path` satisfies this constraint.
    ///
    /// # Errors
    /// `EngineError::ReliabilityModelDomain` when the packet-loss aggregate cannot be computed.
    pub fn validate(&self, path: &Path, model: &ReliabilityModel) -> Result<bool, EngineError> {
        let valid = match self {
            Constraint::PacketLoss { ceiling } => metrics::packet_loss(path, model)?.is_some_and(|loss| loss < *ceiling),
            Constraint::Latency { ceiling } => metrics::total_latency(path).is_some_and(|latency| latency < *ceiling),
            Constraint::Bandwidth { floor } => path
                .core_edges()
                .all(|edge| matches!(edge.bandwidth(), Ok(bandwidth) if bandwidth.unwrap_or(0.0) >= *floor)),
            Constraint::LinkTypeExclusion { excluded } => path.edges().iter().all(|edge| !excluded.contains(&edge.link_type)),
            Constraint::AsymmetricPath => true,
        };

        Ok(valid)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Constraint::PacketLoss { .. } => "PacketLoss",
            Constraint::Latency { .. } => "Latency",
            Constraint::Bandwidth { .. } => "Bandwidth",
            Constraint::LinkTypeExclusion { .. } => "LinkTypeExclusion",
            Constraint::AsymmetricPath => "AsymmetricPath",
        }
    }
}
