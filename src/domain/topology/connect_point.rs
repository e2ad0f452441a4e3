use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::utils::id::{DeviceId, HostId};
use crate::error::ConversionError;

/// A vertex of the topology graph: either a forwarding device or a host attached to one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ElementId {
    Device(DeviceId),
    Host(HostId),
}

impl ElementId {
    pub fn is_device(&self) -> bool {
        matches!(self, ElementId::Device(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementId::Device(id) => id.as_str(),
            ElementId::Host(id) => id.as_str(),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DeviceId> for ElementId {
    fn from(id: DeviceId) -> Self {
        ElementId::Device(id)
    }
}

impl From<HostId> for ElementId {
    fn from(id: HostId) -> Self {
        ElementId::Host(id)
    }
}

/// An element plus a port number. Links attach to connect points, not to bare elements.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConnectPoint {
    pub element: ElementId,
    pub port: u64,
}

impl ConnectPoint {
    pub fn new(element: impl Into<ElementId>, port: u64) -> Self {
        Self { element: element.into(), port }
    }

    /// Parses `<device>/<port>` text. The last `/` separates the port.
    pub fn parse_device(text: &str) -> Result<Self, ConversionError> {
        let (element, port) = split_element_port(text)?;
        Ok(Self::new(DeviceId::new(element), port))
    }
}

impl fmt::Display for ConnectPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.element, self.port)
    }
}

impl FromStr for ConnectPoint {
    type Err = ConversionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        ConnectPoint::parse_device(text)
    }
}

fn split_element_port(text: &str) -> Result<(&str, u64), ConversionError> {
    let (element, port) = text.rsplit_once('/').ok_or_else(|| ConversionError::InvalidConnectPoint(text.to_string()))?;

    if element.is_empty() {
        return Err(ConversionError::InvalidConnectPoint(text.to_string()));
    }

    let port = port.trim().parse::<u64>().map_err(|_| ConversionError::InvalidConnectPoint(text.to_string()))?;

    Ok((element, port))
}
