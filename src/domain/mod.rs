//! Domain - Pure Data Structures
//!
//! Records of the hosted collections and the session/role model. Nothing here
//! performs IO.

pub mod comment;
pub mod config;
pub mod profile;
pub mod request;
pub mod request_type;
pub mod role;
pub mod session;
pub mod team;
