pub mod propagation_model;
pub mod success_probability;

pub use propagation_model::{NlosExponent, PropagationModel};
pub use success_probability::{ReliabilityModel, success_probability};
