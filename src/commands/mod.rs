//! Command implementations behind the CLI surface.

pub mod dashboard;
pub mod flamegraph;
pub mod table;

// Re-export main entry points
pub use dashboard::{execute_dashboard, DashboardArgs};
pub use flamegraph::{execute_flamegraph, validate_flamegraph_args, FlamegraphArgs};
pub use table::{execute_table, validate_table_args, TableArgs};
