use serde::Deserialize;
use std::fmt;

/// Root of a topology snapshot file.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TopologyDto {
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub hosts: Vec<HostDto>,
    #[serde(default)]
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDto {
    pub id: String,
    /// Attachment point as `<device>/<port>`.
    pub location: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub src: String,
    pub dst: String,
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub state: Option<String>,
    pub technology: Option<String>,
    pub length: Option<AnnotationValueDto>,
    pub capacity: Option<AnnotationValueDto>,
    pub bandwidth: Option<AnnotationValueDto>,
    pub latency: Option<AnnotationValueDto>,
    /// Also install the mirrored link with the same annotations.
    #[serde(default)]
    pub bidirectional: bool,
}

/// Annotation values arrive either as JSON numbers or as strings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnnotationValueDto {
    Number(f64),
    Text(String),
}

impl fmt::Display for AnnotationValueDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValueDto::Number(value) => write!(f, "{}", value),
            AnnotationValueDto::Text(value) => write!(f, "{}", value),
        }
    }
}
