use serde::Serialize;
use std::fmt;

use crate::domain::constraint::{ConstraintPipeline, metrics};
use crate::domain::routing::path::Path;
use crate::domain::routing::weight::Weight;
use crate::domain::selection::path_selector::PathSelector;
use crate::domain::topology::connect_point::ElementId;
use crate::error::EngineError;

/// Aggregates of one candidate path, as shown in the candidate listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub links: Vec<String>,
    pub cost: Weight,
    pub packet_loss: Option<f64>,
    pub latency: Option<f64>,
    pub min_bandwidth: Option<f64>,
    /// Whether the path satisfies every active constraint.
    pub valid: bool,
}

impl PathReport {
    pub fn evaluate(path: &Path, constraints: &ConstraintPipeline) -> Result<Self, EngineError> {
        Ok(PathReport {
            links: path.edges().iter().map(|edge| edge.to_string()).collect(),
            cost: path.cost(),
            packet_loss: metrics::packet_loss(path, constraints.model())?,
            latency: metrics::total_latency(path),
            min_bandwidth: metrics::min_bandwidth(path),
            valid: constraints.validate(path)?,
        })
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |value| format!("{:.6}", value));

        write!(
            f,
            "{}; cost={} packetLoss={} latency={} minBandwidth={} {}",
            self.links.join("==>"),
            self.cost,
            optional(self.packet_loss),
            optional(self.latency),
            optional(self.min_bandwidth),
            if self.valid { "OK" } else { "REJECTED" }
        )
    }
}

/// Every candidate between two elements, cheapest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub src: ElementId,
    pub dst: ElementId,
    pub max_paths: usize,
    pub candidates: Vec<PathReport>,
    /// Number of candidates that satisfy the constraints.
    pub satisfying: usize,
}

impl CandidateReport {
    pub fn build(selector: &PathSelector<'_>, src: &ElementId, dst: &ElementId, max_paths: usize, constraints: &ConstraintPipeline) -> Result<Self, EngineError> {
        let candidates = selector
            .candidates(src, dst, max_paths)
            .iter()
            .map(|path| PathReport::evaluate(path, constraints))
            .collect::<Result<Vec<_>, _>>()?;
        let satisfying = candidates.iter().filter(|report| report.valid).count();

        Ok(CandidateReport { src: src.clone(), dst: dst.clone(), max_paths, candidates, satisfying })
    }
}

impl fmt::Display for CandidateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} => {}: {} candidate(s), {} satisfying", self.src, self.dst, self.candidates.len(), self.satisfying)?;
        for (index, candidate) in self.candidates.iter().enumerate() {
            writeln!(f, "  #{} {}", index + 1, candidate)?;
        }
        Ok(())
    }
}
