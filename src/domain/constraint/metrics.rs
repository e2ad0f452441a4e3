//! Path-level aggregates over core links. Host attachment links never count.
//!
//! A `None` aggregate means one of the links carries an annotation that does not
//! parse, which makes the path unusable for any constraint that reads it.

use crate::domain::reliability::ReliabilityModel;
use crate::domain::routing::path::Path;
use crate::error::{AnnotationError, EngineError};

/// Product of `Ps` over the links carrying a length. Links without one count as `1.0`.
///
/// # Errors
/// `EngineError::ReliabilityModelDomain` when a length parses but the model rejects it.
pub fn total_success_probability(path: &Path, model: &ReliabilityModel) -> Result<Option<f64>, EngineError> {
    let mut total = 1.0;

    for edge in path.core_edges() {
        match edge.length() {
            Ok(Some(length)) => total *= model.success_probability(length)?,
            Ok(None) => {}
            Err(e) => {
                warn_malformed(&e, path);
                return Ok(None);
            }
        }
    }

    Ok(Some(total))
}

/// `1 - Π Ps` over the path.
pub fn packet_loss(path: &Path, model: &ReliabilityModel) -> Result<Option<f64>, EngineError> {
    Ok(total_success_probability(path, model)?.map(|ps| 1.0 - ps))
}

/// Sum of link latencies in milliseconds, missing values counting as `0`.
pub fn total_latency(path: &Path) -> Option<f64> {
    let mut total = 0.0;

    for edge in path.core_edges() {
        match edge.latency() {
            Ok(latency) => total += latency.unwrap_or(0.0),
            Err(e) => {
                warn_malformed(&e, path);
                return None;
            }
        }
    }

    Some(total)
}

/// Bottleneck bandwidth in Mbps, missing values counting as `0`.
/// `None` for a path made of attachment links only.
pub fn min_bandwidth(path: &Path) -> Option<f64> {
    let mut minimum: Option<f64> = None;

    for edge in path.core_edges() {
        match edge.bandwidth() {
            Ok(bandwidth) => {
                let bandwidth = bandwidth.unwrap_or(0.0);
                minimum = Some(minimum.map_or(bandwidth, |current| current.min(bandwidth)));
            }
            Err(e) => {
                warn_malformed(&e, path);
                return None;
            }
        }
    }

    minimum
}

fn warn_malformed(error: &AnnotationError, path: &Path) {
    log::warn!("InvalidAnnotation: {} on path {}", error, path);
}
