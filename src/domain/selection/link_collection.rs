use serde::Serialize;

use crate::domain::routing::path::Path;
use crate::domain::topology::connect_point::{ConnectPoint, ElementId};
use crate::domain::topology::edge::Edge;
use crate::error::EngineError;

/// What the flow compiler needs to install one direction of a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkCollection {
    pub one: ElementId,
    pub two: ElementId,
    pub ingress: ConnectPoint,
    pub egress: ConnectPoint,
    /// Every link of the path except host attachment links.
    pub links: Vec<Edge>,
}

impl TryFrom<&Path> for LinkCollection {
    type Error = EngineError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let first = &path.edges()[0];
        let last = &path.edges()[path.len() - 1];

        Ok(LinkCollection {
            one: path.src().element.clone(),
            two: path.dst().element.clone(),
            ingress: device_point(first)?,
            egress: device_point(last)?,
            links: path.core_edges().cloned().collect(),
        })
    }
}

/// Device side of a link, preferring its source.
fn device_point(edge: &Edge) -> Result<ConnectPoint, EngineError> {
    if edge.src.element.is_device() {
        Ok(edge.src.clone())
    } else if edge.dst.element.is_device() {
        Ok(edge.dst.clone())
    } else {
        Err(EngineError::DeviceIdNotFound(edge.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::edge_weigher::HopCountWeigher;
    use crate::domain::topology::edge::LinkType;
    use crate::domain::utils::id::{DeviceId, HostId};

    #[test]
    fn host_to_host_path_uses_device_side_of_attachment_links() {
        let h1 = ConnectPoint::new(HostId::new("h1"), 0);
        let h2 = ConnectPoint::new(HostId::new("h2"), 0);
        let s1 = ConnectPoint::new(DeviceId::new("of:1"), 1);
        let s1_out = ConnectPoint::new(DeviceId::new("of:1"), 2);
        let s2_in = ConnectPoint::new(DeviceId::new("of:2"), 2);
        let s2 = ConnectPoint::new(DeviceId::new("of:2"), 1);

        let edges = vec![
            Edge::new(h1, s1.clone()).with_type(LinkType::Edge),
            Edge::new(s1_out, s2_in),
            Edge::new(s2.clone(), h2).with_type(LinkType::Edge),
        ];
        let path = Path::from_edges(edges, &HopCountWeigher).unwrap();
        let collection = LinkCollection::try_from(&path).unwrap();

        assert_eq!(collection.ingress, s1);
        assert_eq!(collection.egress, s2);
        assert_eq!(collection.links.len(), 1);
        assert_eq!(collection.one, ElementId::Host(HostId::new("h1")));
    }

    #[test]
    fn link_without_device_is_rejected() {
        let edge = Edge::new(ConnectPoint::new(HostId::new("h1"), 0), ConnectPoint::new(HostId::new("h2"), 0));
        let path = Path::from_edges(vec![edge], &HopCountWeigher).unwrap();

        assert!(matches!(LinkCollection::try_from(&path), Err(EngineError::DeviceIdNotFound(_))));
    }
}
