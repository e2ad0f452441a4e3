pub mod connect_point;
pub mod edge;
pub mod graph;
