use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to build topology snapshot: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("Path computation failed: {0}")]
    EngineError(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed snapshot or request data, detected while converting DTOs into domain values.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("Invalid connect point '{0}', expected '<element>/<port>'")]
    InvalidConnectPoint(String),

    #[error("Unknown link type '{0}'")]
    UnknownLinkType(String),

    #[error("Unknown link state '{0}'")]
    UnknownLinkState(String),

    #[error("Unknown link technology '{0}'")]
    UnknownTechnology(String),

    #[error("Unknown propagation model '{0}', expected one of '28', '73', '3gpp'")]
    UnknownPropagationModel(String),

    #[error("Link endpoint references unknown element '{0}'")]
    UnknownElement(String),

    #[error("Host '{host}' is attached to unknown device '{device}'")]
    UnknownHostLocation { host: String, device: String },

    #[error("Request field '{field}' is out of range: {value}")]
    InvalidRequestField { field: &'static str, value: String },
}

/// Hard failures of a path computation. Domain outcomes such as a disconnected
/// topology are not errors, see `Selection` and `Plan`.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Reliability model rejected its input: {0}")]
    ReliabilityModelDomain(#[from] ReliabilityError),

    #[error("Didn't find device id in the link {0}")]
    DeviceIdNotFound(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ReliabilityError {
    #[error("Link length must be a positive finite number of meters, got {0}")]
    InvalidLength(f64),

    #[error("Success probability for length {length} evaluated to {value}, outside [0, 1]")]
    OutOfRange { length: f64, value: f64 },
}

/// A numeric annotation whose text does not parse. Localized to the offending edge.
#[derive(Debug, Error, PartialEq, Clone)]
#[error("Annotation '{key}' carries malformed value '{value}'")]
pub struct AnnotationError {
    pub key: String,
    pub value: String,
}
