use slotmap::{SlotMap, new_key_type};
use std::collections::{BTreeSet, HashMap};

use crate::api::topology_dto::{LinkDto, TopologyDto};
use crate::domain::topology::connect_point::{ConnectPoint, ElementId};
use crate::domain::topology::edge::{BANDWIDTH, Edge, LATENCY, LENGTH, LinkState, LinkType, Technology};
use crate::domain::utils::id::{DeviceId, HostId};
use crate::error::ConversionError;

new_key_type! {
    pub struct EdgeId;
}

/// Port used on the host side of a synthetic host attachment link.
const HOST_PORT: u64 = 0;

/// Immutable snapshot of the topology a path request is evaluated against.
///
/// The graph holds:
/// * **Vertices**: devices and hosts.
/// * **Edges**: directed links, keyed by `EdgeId`.
/// * **Adjacency**: outgoing edges per vertex, in insertion order so that searches are reproducible.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    vertices: BTreeSet<ElementId>,

    edges: SlotMap<EdgeId, Edge>,

    adjacency: HashMap<ElementId, Vec<EdgeId>>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self { vertices: BTreeSet::new(), edges: SlotMap::with_key(), adjacency: HashMap::new() }
    }

    pub fn add_device(&mut self, device: DeviceId) {
        self.vertices.insert(ElementId::Device(device));
    }

    /// Adds a host and the two edge links connecting it to its attachment device.
    pub fn add_host(&mut self, host: HostId, location: ConnectPoint) -> Result<(), ConversionError> {
        if !self.vertices.contains(&location.element) {
            return Err(ConversionError::UnknownHostLocation { host: host.to_string(), device: location.element.to_string() });
        }

        let host_point = ConnectPoint::new(host.clone(), HOST_PORT);
        self.vertices.insert(ElementId::Host(host));

        self.add_edge(Edge::new(host_point.clone(), location.clone()).with_type(LinkType::Edge))?;
        self.add_edge(Edge::new(location, host_point).with_type(LinkType::Edge))?;

        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, ConversionError> {
        for point in [&edge.src, &edge.dst] {
            if !self.vertices.contains(&point.element) {
                log::error!("InvalidLinkConfiguration: endpoint {} of link {} is not part of the topology.", point.element, edge);
                return Err(ConversionError::UnknownElement(point.element.to_string()));
            }
        }

        let source = edge.src.element.clone();
        let edge_id = self.edges.insert(edge);
        self.adjacency.entry(source).or_default().push(edge_id);

        Ok(edge_id)
    }

    pub fn contains_vertex(&self, vertex: &ElementId) -> bool {
        self.vertices.contains(vertex)
    }

    /// Resolves a bare id against the snapshot, devices first.
    pub fn element(&self, id: &str) -> Option<ElementId> {
        [ElementId::Device(DeviceId::new(id)), ElementId::Host(HostId::new(id))]
            .into_iter()
            .find(|element| self.vertices.contains(element))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &ElementId> {
        self.vertices.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    /// Outgoing edges of `vertex` in insertion order.
    pub fn outgoing<'a>(&'a self, vertex: &ElementId) -> impl Iterator<Item = (EdgeId, &'a Edge)> + use<'a> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(*edge_id).map(|edge| (*edge_id, edge)))
    }

    fn edge_from_dto(dto: &LinkDto) -> Result<Edge, ConversionError> {
        let src: ConnectPoint = dto.src.parse()?;
        let dst: ConnectPoint = dto.dst.parse()?;

        let link_type = match &dto.typ {
            Some(typ) => typ.parse()?,
            None => LinkType::Direct,
        };
        let state = match &dto.state {
            Some(state) => state.parse()?,
            None => LinkState::Active,
        };
        let technology: Technology = match &dto.technology {
            Some(technology) => technology.parse()?,
            None => Technology::Unspecified,
        };

        let mut edge = Edge::new(src, dst).with_type(link_type).with_state(state).with_technology(technology);

        if let Some(length) = &dto.length {
            edge.annotations.set(LENGTH, length);
        }
        if let Some(latency) = &dto.latency {
            edge.annotations.set(LATENCY, latency);
        }
        // An explicit bandwidth wins over the provider's capacity figure.
        if let Some(bandwidth) = dto.bandwidth.as_ref().or(dto.capacity.as_ref()) {
            edge.annotations.set(BANDWIDTH, bandwidth);
        }

        Ok(edge)
    }
}

impl TryFrom<TopologyDto> for TopologyGraph {
    type Error = ConversionError;

    fn try_from(dto: TopologyDto) -> Result<Self, Self::Error> {
        let mut graph = TopologyGraph::new();

        // 1. Devices.
        for device in &dto.devices {
            graph.add_device(DeviceId::new(device.clone()));
        }

        // 2. Links, mirrored where requested.
        for link in &dto.links {
            let edge = TopologyGraph::edge_from_dto(link)?;
            let mirrored = link.bidirectional.then(|| edge.reversed());
            graph.add_edge(edge)?;
            if let Some(mirrored) = mirrored {
                graph.add_edge(mirrored)?;
            }
        }

        // 3. Hosts and their attachment links.
        for host in &dto.hosts {
            let location = ConnectPoint::parse_device(&host.location)?;
            graph.add_host(HostId::new(host.id.clone()), location)?;
        }

        if graph.edge_count() == 0 {
            log::info!("EmptyTopology: the snapshot contains {} vertices and no links.", graph.vertex_count());
        }

        Ok(graph)
    }
}
