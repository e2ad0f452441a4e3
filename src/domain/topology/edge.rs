use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::topology::connect_point::ConnectPoint;
use crate::error::{AnnotationError, ConversionError};

pub const LENGTH: &str = "length";
pub const LATENCY: &str = "latency";
pub const BANDWIDTH: &str = "bandwidth";

/// Older providers annotated latency as `mmlatency` and bandwidth as `capacity`.
const LEGACY_LATENCY: &str = "mmlatency";
const LEGACY_BANDWIDTH: &str = "capacity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LinkType {
    Direct,
    Indirect,
    /// Synthetic link between a host and the device it is attached to.
    Edge,
    Optical,
}

impl FromStr for LinkType {
    type Err = ConversionError;

    fn from_str(link_type: &str) -> Result<LinkType, Self::Err> {
        match link_type.to_ascii_uppercase().as_str() {
            "DIRECT" => Ok(LinkType::Direct),
            "INDIRECT" => Ok(LinkType::Indirect),
            "EDGE" => Ok(LinkType::Edge),
            "OPTICAL" => Ok(LinkType::Optical),
            _ => Err(ConversionError::UnknownLinkType(link_type.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkState {
    Active,
    Inactive,
}

impl FromStr for LinkState {
    type Err = ConversionError;

    fn from_str(state: &str) -> Result<LinkState, Self::Err> {
        match state.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(LinkState::Active),
            "INACTIVE" => Ok(LinkState::Inactive),
            _ => Err(ConversionError::UnknownLinkState(state.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Technology {
    MmWave,
    Ethernet,
    Unspecified,
}

impl FromStr for Technology {
    type Err = ConversionError;

    fn from_str(technology: &str) -> Result<Technology, Self::Err> {
        match technology.to_ascii_lowercase().as_str() {
            "mmwave" | "millimeterwave" => Ok(Technology::MmWave),
            "ethernet" => Ok(Technology::Ethernet),
            "" | "unspecified" => Ok(Technology::Unspecified),
            _ => Err(ConversionError::UnknownTechnology(technology.to_string())),
        }
    }
}

/// Free-form key/value annotations of a link, stored as text the way providers deliver them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Annotations {
    values: BTreeMap<String, String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self { values: BTreeMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    /// Reads a numeric annotation. `Ok(None)` when absent, `Err` when present but not a number.
    pub fn numeric(&self, key: &str) -> Result<Option<f64>, AnnotationError> {
        let Some(text) = self.value(key) else {
            return Ok(None);
        };

        text.trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AnnotationError { key: key.to_string(), value: text.to_string() })
    }

    /// Like `numeric`, but a negative or non-finite value is malformed too.
    pub fn measure(&self, key: &str) -> Result<Option<f64>, AnnotationError> {
        match self.numeric(key)? {
            Some(value) if !value.is_finite() || value < 0.0 => {
                Err(AnnotationError { key: key.to_string(), value: value.to_string() })
            }
            value => Ok(value),
        }
    }

    fn measure_with_fallback(&self, key: &str, fallback: &str) -> Result<Option<f64>, AnnotationError> {
        match self.measure(key)? {
            Some(value) => Ok(Some(value)),
            None => self.measure(fallback),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A directed link of the topology snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub src: ConnectPoint,
    pub dst: ConnectPoint,
    pub link_type: LinkType,
    pub state: LinkState,
    pub technology: Technology,
    pub annotations: Annotations,
}

impl Edge {
    pub fn new(src: ConnectPoint, dst: ConnectPoint) -> Self {
        Self {
            src,
            dst,
            link_type: LinkType::Direct,
            state: LinkState::Active,
            technology: Technology::Unspecified,
            annotations: Annotations::new(),
        }
    }

    pub fn with_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn with_state(mut self, state: LinkState) -> Self {
        self.state = state;
        self
    }

    pub fn with_technology(mut self, technology: Technology) -> Self {
        self.technology = technology;
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.annotations.set(key, value);
        self
    }

    pub fn is_active(&self) -> bool {
        self.state == LinkState::Active
    }

    /// Host attachment links are kept for presentation but skipped by path aggregates.
    pub fn is_edge_link(&self) -> bool {
        self.link_type == LinkType::Edge
    }

    /// First malformed `latency` or `bandwidth` annotation, if any.
    pub fn malformed_measure(&self) -> Option<AnnotationError> {
        self.latency().err().or_else(|| self.bandwidth().err())
    }

    /// Physical length in meters. Present only on millimeter-wave links.
    pub fn length(&self) -> Result<Option<f64>, AnnotationError> {
        self.annotations.numeric(LENGTH)
    }

    /// One-way delay in milliseconds.
    pub fn latency(&self) -> Result<Option<f64>, AnnotationError> {
        self.annotations.measure_with_fallback(LATENCY, LEGACY_LATENCY)
    }

    /// Capacity in Mbps.
    pub fn bandwidth(&self) -> Result<Option<f64>, AnnotationError> {
        self.annotations.measure_with_fallback(BANDWIDTH, LEGACY_BANDWIDTH)
    }

    /// Mirror image of this link: endpoints swapped, everything else preserved.
    pub fn reversed(&self) -> Edge {
        Edge {
            src: self.dst.clone(),
            dst: self.src.clone(),
            link_type: self.link_type,
            state: self.state,
            technology: self.technology,
            annotations: self.annotations.clone(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.src, self.dst)
    }
}
