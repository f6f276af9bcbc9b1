//! Request Portal Library
//!
//! Role-based internal request tracking portal: a generic data table engine,
//! the session and access model, and the feature controllers behind each page.

pub mod app;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;
