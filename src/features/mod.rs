//! Features - Vertical Feature Slices
//!
//! Each feature owns its controller and, where it has one, its page model.

pub mod account;
pub mod admin;
pub mod dashboard;
pub mod request_detail;
pub mod requests;
