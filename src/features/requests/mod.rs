//! Requests - List and Creation

pub mod controller;
pub mod create;
pub mod page;

pub use controller::RequestsController;
pub use create::CreateRequestController;
