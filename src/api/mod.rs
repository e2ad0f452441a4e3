pub mod request_dto;
pub mod topology_dto;
