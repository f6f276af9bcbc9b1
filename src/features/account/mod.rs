//! Account - Profile Settings and Password Reset

pub mod controller;

pub use controller::{AccountController, PasswordResetForm};
