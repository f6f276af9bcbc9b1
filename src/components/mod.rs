//! Components - Reusable View Models
//!
//! Pure components that don't depend on services or do I/O.

pub mod composite;
