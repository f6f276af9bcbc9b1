//! Service Layer
//!
//! Abstractions over the hosted backend and the in-process implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Feature controllers            │
//! └──────────────────────────────────────────────┘
//!          │ DataService / AuthService    │ Notifier
//!          ▼                              ▼
//! ┌─────────────────────┐   ┌────────────────────┐
//! │   MemoryBackend     │   │  toast queue       │
//! │ (collections, auth) │   │  (crossbeam)       │
//! └─────────────────────┘   └────────────────────┘
//!          │ session change
//!          ▼
//! ┌──────────────────────────────────────────────┐
//! │                 AuthState                    │
//! └──────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod collection;
pub mod data;
pub mod memory;
pub mod notifier;

pub use auth::{AuthService, SignUp, Subscription};
pub use collection::{Collection, Query, Record};
pub use data::DataService;
pub use memory::{MemoryBackend, Operation};
pub use notifier::{Notification, NotificationLevel, Notifier};

/// A backend serving both collections and auth
pub trait Backend: DataService + AuthService + 'static {}

impl<T> Backend for T where T: DataService + AuthService + 'static {}
