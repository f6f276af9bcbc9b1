//! Helper Utilities

pub mod fs;
pub mod logging;
