pub mod metrics;
pub mod path_constraint;
pub mod pipeline;

pub use path_constraint::Constraint;
pub use pipeline::ConstraintPipeline;
