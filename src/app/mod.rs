//! Application Layer
//!
//! Routing, access decisions, the portal shell and the demo entry point.

pub mod access;
pub mod application;
pub mod navigation;
pub mod workspace;
