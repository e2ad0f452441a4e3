pub mod edge_weigher;
pub mod k_shortest_paths;
pub mod path;
pub mod weight;
