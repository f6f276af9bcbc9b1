//! State - Session and Appearance State
//!
//! Long-lived state shared by the shell and the feature controllers.

pub mod auth_state;
pub mod theme_state;

pub use auth_state::AuthState;
pub use theme_state::{ThemeState, ThemeTarget};
