pub mod constraint;
pub mod reliability;
pub mod report;
pub mod request;
pub mod routing;
pub mod selection;
pub mod topology;
pub mod utils;
