//! Admin - Request Type Catalogue and User Management

pub mod request_types;
pub mod users;

pub use request_types::RequestTypesController;
pub use users::UsersController;
