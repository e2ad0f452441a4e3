use serde::Serialize;

use crate::domain::constraint::ConstraintPipeline;
use crate::domain::routing::path::Path;
use crate::domain::selection::link_collection::LinkCollection;
use crate::domain::selection::path_selector::{PathSelector, Selection};
use crate::domain::topology::connect_point::ElementId;
use crate::error::EngineError;

/// Why a plan could not be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotFoundReason {
    Disconnected,
    ConstraintViolated { candidates: usize },
}

/// Forward and reverse path of a routed plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidirectionalPaths {
    pub forward: Path,
    pub reverse: Path,
    /// The reverse path was searched on its own instead of mirrored.
    pub asymmetric: bool,
}

impl BidirectionalPaths {
    /// Flow compiler input for both directions, forward first.
    pub fn link_collections(&self) -> Result<(LinkCollection, LinkCollection), EngineError> {
        Ok((LinkCollection::try_from(&self.forward)?, LinkCollection::try_from(&self.reverse)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Plan {
    /// Both ends are the same element. No paths are needed.
    Empty,
    Routed(BidirectionalPaths),
    NotFound { src: ElementId, dst: ElementId, reason: NotFoundReason },
}

/// Computes a path pair connecting two elements in both directions.
#[derive(Clone, Copy)]
pub struct BidirectionalPlanner<'a> {
    selector: PathSelector<'a>,
    max_paths: usize,
}

impl<'a> BidirectionalPlanner<'a> {
    pub fn new(selector: PathSelector<'a>, max_paths: usize) -> Self {
        Self { selector, max_paths }
    }

    /// Selects the forward path, then either mirrors it or searches the reverse
    /// direction independently. The reverse search runs when `asymmetric` is set
    /// or the pipeline carries `Constraint::AsymmetricPath`.
    ///
    /// A mirrored reverse path keeps the forward cost and assumes every link has a
    /// usable counterpart in the opposite direction.
    pub fn plan(&self, src: &ElementId, dst: &ElementId, constraints: &ConstraintPipeline, asymmetric: bool) -> Result<Plan, EngineError> {
        if src == dst {
            tracing::info!(%src, "Source equals destination, returning an empty plan.");
            return Ok(Plan::Empty);
        }

        let asymmetric = asymmetric || constraints.is_asymmetric();
        let forward = match self.selector.select(src, dst, self.max_paths, constraints)? {
            Selection::Found(path) => path,
            other => return Ok(self.not_found(src, dst, other)),
        };

        let reverse = if asymmetric {
            match self.selector.select(dst, src, self.max_paths, constraints)? {
                Selection::Found(path) => path,
                other => return Ok(self.not_found(dst, src, other)),
            }
        } else {
            forward.reversed()
        };

        tracing::info!(%src, %dst, asymmetric, forward_cost = %forward.cost(), reverse_cost = %reverse.cost(), "Plan computed.");

        Ok(Plan::Routed(BidirectionalPaths { forward, reverse, asymmetric }))
    }

    fn not_found(&self, src: &ElementId, dst: &ElementId, selection: Selection) -> Plan {
        let reason = match selection {
            Selection::ConstraintViolated { candidates } => NotFoundReason::ConstraintViolated { candidates },
            _ => NotFoundReason::Disconnected,
        };
        tracing::info!(%src, %dst, ?reason, "PathNotFound");

        Plan::NotFound { src: src.clone(), dst: dst.clone(), reason }
    }
}
