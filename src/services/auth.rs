//! Auth Service
//!
//! Session lookup, credential flows and session change notifications.

use std::future::Future;

use crate::domain::session::{AuthSession, AuthUser};
use crate::error::Result;

/// Registration payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Handle of a session change subscription
///
/// Dropping it, or calling [`Subscription::unsubscribe`], releases the
/// listener. After release the callback is never invoked again.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Async auth operations
pub trait AuthService: Send + Sync {
    /// Current session, if any
    fn get_session(&self) -> impl Future<Output = Result<Option<AuthSession>>> + Send;

    /// Register `callback` for every later session change
    fn on_session_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<AuthSession>) + Send + Sync + 'static;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession>> + Send;

    /// Create an auth user; does not open a session
    fn sign_up(&self, request: &SignUp) -> impl Future<Output = Result<AuthUser>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send;

    /// Change the password of the current session's user
    fn update_password(&self, password: &str) -> impl Future<Output = Result<()>> + Send;
}
