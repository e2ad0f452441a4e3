pub mod bidirectional_planner;
pub mod link_collection;
pub mod path_selector;

pub use bidirectional_planner::{BidirectionalPaths, BidirectionalPlanner, NotFoundReason, Plan};
pub use link_collection::LinkCollection;
pub use path_selector::{PathSelector, Selection};
