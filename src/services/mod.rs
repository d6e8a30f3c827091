pub mod access;
pub mod assignment;
pub mod chart;
pub mod grid;
pub mod layout;

pub use access::Authorizer;
pub use assignment::AssignmentEngine;
pub use chart::ChartAggregator;
pub use grid::{generate_grid, GridSpec};
pub use layout::LayoutService;
