use serde::Serialize;

use crate::api::request_dto::PathRequestDto;
use crate::domain::constraint::{Constraint, ConstraintPipeline};
use crate::domain::reliability::{PropagationModel, ReliabilityModel};
use crate::domain::routing::edge_weigher::WeigherKind;
use crate::domain::routing::k_shortest_paths::K_NUMBER_OF_PATHS;
use crate::error::ConversionError;

pub const DEFAULT_PACKET_LOSS_CEILING: f64 = 0.1;

/// Parameters of one path-selection request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRequest {
    pub max_paths: usize,
    pub packet_loss_ceiling: f64,
    /// `None` leaves latency unbounded.
    pub latency_ceiling: Option<f64>,
    pub bandwidth_floor: f64,
    pub asymmetric: bool,
    pub use_reliability_weighting: bool,
    pub propagation_model: PropagationModel,
}

impl Default for PathRequest {
    fn default() -> Self {
        Self {
            max_paths: K_NUMBER_OF_PATHS,
            packet_loss_ceiling: DEFAULT_PACKET_LOSS_CEILING,
            latency_ceiling: None,
            bandwidth_floor: 0.0,
            asymmetric: false,
            use_reliability_weighting: true,
            propagation_model: PropagationModel::default(),
        }
    }
}

impl PathRequest {
    /// Checks the bounds every request must respect: at least one candidate path,
    /// a packet-loss ceiling in `[0, 1]` and non-negative latency and bandwidth bounds.
    pub fn validate(&self) -> Result<(), ConversionError> {
        let invalid = |field: &'static str, value: &dyn std::fmt::Display| {
            Err(ConversionError::InvalidRequestField { field, value: value.to_string() })
        };

        if self.max_paths == 0 {
            return invalid("maxPaths", &self.max_paths);
        }
        if !(0.0..=1.0).contains(&self.packet_loss_ceiling) {
            return invalid("packetLossCeiling", &self.packet_loss_ceiling);
        }
        if let Some(ceiling) = self.latency_ceiling.filter(|c| c.is_nan() || *c < 0.0) {
            return invalid("latencyCeiling", &ceiling);
        }
        if self.bandwidth_floor.is_nan() || self.bandwidth_floor < 0.0 {
            return invalid("bandwidthFloor", &self.bandwidth_floor);
        }

        Ok(())
    }

    pub fn model(&self) -> ReliabilityModel {
        ReliabilityModel::new(self.propagation_model)
    }

    pub fn weigher(&self) -> WeigherKind {
        WeigherKind::select(self.use_reliability_weighting, self.model())
    }

    /// Constraint pipeline of this request, with the not-optical exclusion first.
    ///
    /// Latency and bandwidth only gate when a bound is actually set.
    pub fn constraints(&self) -> ConstraintPipeline {
        let mut pipeline = ConstraintPipeline::new(self.model()).with(Constraint::PacketLoss { ceiling: self.packet_loss_ceiling });

        if let Some(ceiling) = self.latency_ceiling {
            pipeline.push(Constraint::Latency { ceiling });
        }
        if self.bandwidth_floor > 0.0 {
            pipeline.push(Constraint::Bandwidth { floor: self.bandwidth_floor });
        }
        if self.asymmetric {
            pipeline.push(Constraint::AsymmetricPath);
        }

        pipeline.ensure_not_optical()
    }
}

impl TryFrom<PathRequestDto> for PathRequest {
    type Error = ConversionError;

    fn try_from(dto: PathRequestDto) -> Result<Self, Self::Error> {
        let defaults = PathRequest::default();

        let propagation_model = match &dto.propagation_model {
            Some(model) => model.parse()?,
            None => defaults.propagation_model,
        };

        let request = PathRequest {
            max_paths: dto.max_paths.unwrap_or(defaults.max_paths),
            packet_loss_ceiling: dto.packet_loss_ceiling.unwrap_or(defaults.packet_loss_ceiling),
            latency_ceiling: dto.latency_ceiling.or(defaults.latency_ceiling),
            bandwidth_floor: dto.bandwidth_floor.unwrap_or(defaults.bandwidth_floor),
            asymmetric: dto.asymmetric.unwrap_or(defaults.asymmetric),
            use_reliability_weighting: dto.use_reliability_weighting.unwrap_or(defaults.use_reliability_weighting),
            propagation_model,
        };
        request.validate()?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topology::edge::LinkType;

    #[test]
    fn default_pipeline_excludes_optical_first() {
        let pipeline = PathRequest::default().constraints();

        assert_eq!(pipeline.constraints()[0], Constraint::LinkTypeExclusion { excluded: vec![LinkType::Optical] });
        assert_eq!(pipeline.constraints()[1], Constraint::PacketLoss { ceiling: 0.1 });
        assert_eq!(pipeline.constraints().len(), 2);
        assert!(!pipeline.is_asymmetric());
    }

    #[test]
    fn missing_dto_fields_take_defaults() {
        let dto: PathRequestDto = serde_json::from_str(r#"{ "maxPaths": 3, "latencyCeiling": 12.5, "propagationModel": "73" }"#).unwrap();
        let request = PathRequest::try_from(dto).unwrap();

        assert_eq!(request.max_paths, 3);
        assert_eq!(request.latency_ceiling, Some(12.5));
        assert_eq!(request.packet_loss_ceiling, DEFAULT_PACKET_LOSS_CEILING);
        assert_eq!(request.propagation_model, PropagationModel::Mmwave73GHz);
        assert!(request.use_reliability_weighting);
    }

    #[test]
    fn out_of_range_bounds_are_rejected() {
        let ceiling = PathRequestDto { packet_loss_ceiling: Some(1.5), ..Default::default() };
        assert_eq!(
            PathRequest::try_from(ceiling),
            Err(ConversionError::InvalidRequestField { field: "packetLossCeiling", value: "1.5".to_string() })
        );

        let max_paths = PathRequestDto { max_paths: Some(0), ..Default::default() };
        assert_eq!(
            PathRequest::try_from(max_paths),
            Err(ConversionError::InvalidRequestField { field: "maxPaths", value: "0".to_string() })
        );

        let latency = PathRequestDto { latency_ceiling: Some(-1.0), ..Default::default() };
        assert!(PathRequest::try_from(latency).is_err());

        let bandwidth = PathRequestDto { bandwidth_floor: Some(-10.0), ..Default::default() };
        assert!(PathRequest::try_from(bandwidth).is_err());

        let edges = PathRequestDto { packet_loss_ceiling: Some(0.0), max_paths: Some(1), ..Default::default() };
        assert!(PathRequest::try_from(edges).is_ok());
    }

    #[test]
    fn unknown_propagation_model_is_rejected() {
        let dto = PathRequestDto { propagation_model: Some("60".to_string()), ..Default::default() };
        assert_eq!(PathRequest::try_from(dto), Err(ConversionError::UnknownPropagationModel("60".to_string())));
    }
}
