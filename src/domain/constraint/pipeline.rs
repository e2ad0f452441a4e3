use serde::Serialize;

use crate::domain::constraint::path_constraint::Constraint;
use crate::domain::reliability::ReliabilityModel;
use crate::domain::routing::path::Path;
use crate::domain::routing::weight::Weight;
use crate::error::EngineError;

/// Ordered list of constraints combined by logical AND.
///
/// Carries the reliability model its packet-loss constraints evaluate against.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstraintPipeline {
    constraints: Vec<Constraint>,
    model: ReliabilityModel,
}

impl ConstraintPipeline {
    pub fn new(model: ReliabilityModel) -> Self {
        Self { constraints: Vec::new(), model }
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Puts `LinkTypeExclusion({Optical})` first unless an equal exclusion is already present.
    pub fn ensure_not_optical(mut self) -> Self {
        let not_optical = Constraint::not_optical();
        if !self.constraints.contains(&not_optical) {
            self.constraints.insert(0, not_optical);
        }
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn model(&self) -> &ReliabilityModel {
        &self.model
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn is_asymmetric(&self) -> bool {
        self.constraints.contains(&Constraint::AsymmetricPath)
    }

    /// True iff every constraint accepts `path`. Stops at the first rejection.
    pub fn validate(&self, path: &Path) -> Result<bool, EngineError> {
        for constraint in &self.constraints {
            if !constraint.validate(path, &self.model)? {
                log::debug!("ConstraintViolated: {} rejected {}", constraint.name(), path);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Sum of all constraint contributions over the core links of `path`.
    pub fn effective_cost(&self, path: &Path) -> Result<Weight, EngineError> {
        let mut total = 0.0;

        for edge in path.core_edges() {
            for constraint in &self.constraints {
                let contribution = constraint.cost(edge, &self.model)?;
                if contribution < 0.0 {
                    return Ok(Weight::NON_VIABLE);
                }
                total += contribution;
            }
        }

        Ok(Weight::new(total))
    }
}
