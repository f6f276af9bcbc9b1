//! Request Detail - Status, Routing and Comments

pub mod controller;

pub use controller::RequestDetailController;
