//! DataTable Component
//!
//! A reusable client-side table: search, sort, column visibility and pagination
//! over rows supplied by the caller.

pub mod column;
pub mod data_table;
pub mod pagination;
pub mod row;
pub mod state;

pub use column::Column;
pub use data_table::{
    ColumnToggle, DataTable, HeaderCell, SearchBox, SortIndicator, TableBody, TableView,
};
pub use pagination::Pagination;
pub use row::{CellValue, TableRow};
pub use state::{SortDirection, TableState};
