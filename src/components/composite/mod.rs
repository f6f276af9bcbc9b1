//! Composite Components
//!
//! Components assembled from several primitives.

pub mod data_table;
pub mod status_badge;

pub use data_table::DataTable;
pub use status_badge::StatusBadge;
