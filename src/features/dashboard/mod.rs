//! Dashboard - Status Counts and Recent Requests

pub mod controller;
pub mod page;

pub use controller::{DashboardController, DashboardStats};
pub use page::DashboardView;
