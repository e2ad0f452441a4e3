use serde::Deserialize;

/// Path request file. Every field is optional, missing ones take the engine defaults.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PathRequestDto {
    pub max_paths: Option<usize>,
    pub packet_loss_ceiling: Option<f64>,
    pub latency_ceiling: Option<f64>,
    pub bandwidth_floor: Option<f64>,
    pub asymmetric: Option<bool>,
    pub use_reliability_weighting: Option<bool>,
    pub propagation_model: Option<String>,
}
