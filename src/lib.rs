use crate::api::request_dto::PathRequestDto;
use crate::api::topology_dto::TopologyDto;
use crate::domain::request::PathRequest;
use crate::domain::topology::graph::TopologyGraph;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a topology snapshot file into a graph.
pub fn load_topology(file_path: &str) -> Result<TopologyGraph> {
    let dto: TopologyDto = parse_json_file::<TopologyDto>(file_path)?;
    log::info!("Topology file '{}' parsed: {} device(s), {} host(s), {} link(s).", file_path, dto.devices.len(), dto.hosts.len(), dto.links.len());

    let graph = TopologyGraph::try_from(dto)?;
    log::info!("Topology snapshot built: {} vertices, {} directed edges.", graph.vertex_count(), graph.edge_count());

    Ok(graph)
}

/// Loads a path request file. Missing fields take the defaults of `PathRequest`.
pub fn load_request(file_path: &str) -> Result<PathRequest> {
    let dto: PathRequestDto = parse_json_file::<PathRequestDto>(file_path)?;
    let request = PathRequest::try_from(dto)?;
    log::debug!("Path request loaded from '{}': {:?}", file_path, request);

    Ok(request)
}
