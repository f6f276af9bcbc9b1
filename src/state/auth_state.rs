//! AuthState - Session Lifecycle
//!
//! Tracks the current session and resolves its profile and role. Session
//! changes arrive from the auth service through a channel and are applied by
//! [`AuthState::process_events`]. Every resolution carries a generation
//! number; a resolution that finishes after a newer one started, or after
//! [`AuthState::teardown`], is discarded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::{Receiver, Sender};
use serde_json::json;

use crate::domain::profile::{Profile, ProfileRecord};
use crate::domain::role::{Role, RoleAssignment};
use crate::domain::session::{AuthSession, AuthUser, SessionState, UserSession};
use crate::error::Result;
use crate::services::collection::{Collection, Query, to_record};
use crate::services::data::{find_one, list_as};
use crate::services::{Backend, SignUp, Subscription};

#[derive(Debug, Default)]
struct Tracker {
    state: SessionState,
    generation: u64,
    torn_down: bool,
}

struct Shared<B> {
    backend: Arc<B>,
    tracker: Mutex<Tracker>,
    subscription: Mutex<Option<Subscription>>,
    events: Receiver<Option<AuthSession>>,
}

/// Shared handle to the session state
pub struct AuthState<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for AuthState<B> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<B: Backend> AuthState<B> {
    /// Create the state and subscribe to session changes
    pub fn new(backend: Arc<B>) -> Self {
        let (tx, rx): (Sender<Option<AuthSession>>, _) = crossbeam_channel::unbounded();
        let subscription = backend.on_session_change(move |session| {
            let _ = tx.send(session);
        });
        Self {
            shared: Arc::new(Shared {
                backend,
                tracker: Mutex::new(Tracker::default()),
                subscription: Mutex::new(Some(subscription)),
                events: rx,
            }),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.shared.backend
    }

    pub fn state(&self) -> SessionState {
        self.tracker().state.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.tracker().state.profile().cloned()
    }

    pub fn is_torn_down(&self) -> bool {
        self.tracker().torn_down
    }

    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.shared
            .tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Lifecycle ====================

    /// Resolve the session that exists at startup
    pub async fn initialize(&self) {
        let session = match self.shared.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed, continuing signed out");
                None
            }
        };
        self.resolve(session).await;
    }

    /// Apply queued session changes; only the latest one matters
    pub async fn process_events(&self) {
        if let Some(session) = self.shared.events.try_iter().last() {
            self.resolve(session).await;
        }
    }

    /// Resolve `session` into the tracked state
    pub async fn resolve(&self, session: Option<AuthSession>) {
        let generation = {
            let mut tracker = self.tracker();
            if tracker.torn_down {
                return;
            }
            tracker.generation += 1;
            match &session {
                None => {
                    tracker.state = SessionState::Unauthenticated;
                    return;
                }
                Some(session) => {
                    let same_user = tracker
                        .state
                        .session()
                        .is_some_and(|current| current.user.id == session.user.id);
                    if !same_user {
                        tracker.state = SessionState::Pending;
                    }
                }
            }
            tracker.generation
        };

        let Some(session) = session else {
            return;
        };
        let profile = self.fetch_profile(&session.user).await;

        let mut tracker = self.tracker();
        if tracker.torn_down || tracker.generation != generation {
            tracing::debug!(generation, "discarding stale session resolution");
            return;
        }
        tracing::info!(user = %session.user.id, role = %profile.role, "session resolved");
        tracker.state = SessionState::Resolved(UserSession {
            user: session.user,
            profile,
        });
    }

    /// Release the subscription; later resolutions become no-ops
    pub fn teardown(&self) {
        self.tracker().torn_down = true;
        let subscription = self
            .shared
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    /// Directory record and role assignments merged over the session user
    ///
    /// Lookup failures are logged and fall back to defaults.
    async fn fetch_profile(&self, user: &AuthUser) -> Profile {
        let backend = self.shared.backend.as_ref();
        let record: Option<ProfileRecord> =
            match find_one(backend, Collection::Profiles, Query::new().eq("id", user.id.as_str()))
                .await
            {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(user = %user.id, error = %e, "profile lookup failed");
                    None
                }
            };

        let roles_query = Query::new().eq("user_id", user.id.as_str());
        let assignments: Vec<RoleAssignment> =
            match list_as(backend, Collection::UserRoles, &roles_query).await {
                Ok(assignments) => assignments,
                Err(e) => {
                    tracing::warn!(user = %user.id, error = %e, "role lookup failed");
                    Vec::new()
                }
            };

        Profile::resolve(user, record.as_ref(), &assignments)
    }

    // ==================== Credential flows ====================

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        self.shared.backend.sign_in(email, password).await?;
        self.process_events().await;
        Ok(())
    }

    /// Create the auth user, its directory entry and a requester role
    pub async fn sign_up(&self, request: &SignUp) -> Result<AuthUser> {
        let backend = self.shared.backend.as_ref();
        let user = backend.sign_up(request).await?;

        let profile = ProfileRecord {
            id: user.id.clone(),
            full_name: Some(request.full_name.clone()),
            email: Some(request.email.clone()),
            created_at: None,
        };
        backend.insert(Collection::Profiles, to_record(&profile)?).await?;

        let role = json!({ "user_id": user.id, "role": Role::Requester });
        backend.insert(Collection::UserRoles, to_record(&role)?).await?;
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.shared.backend.sign_out().await?;
        self.process_events().await;
        self.resolve(None).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AuthService, MemoryBackend};
    use crate::services::memory::Operation;
    use std::time::Duration;

    fn backend_with_user(roles: &[Role]) -> (Arc<MemoryBackend>, AuthUser) {
        let backend = MemoryBackend::new();
        let user = backend.add_user("ada@example.com", "secret1", Some("Ada Meta"));
        let rows = roles
            .iter()
            .map(|role| to_record(&RoleAssignment::new(user.id.clone(), *role)).unwrap());
        backend.seed(Collection::UserRoles, rows);
        (Arc::new(backend), user)
    }

    #[tokio::test]
    async fn starts_pending_then_unauthenticated() {
        let (backend, _) = backend_with_user(&[]);
        let auth = AuthState::new(backend);
        assert!(auth.state().is_pending());
        auth.initialize().await;
        assert_eq!(auth.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn sign_in_resolves_highest_role() {
        let (backend, user) = backend_with_user(&[Role::Requester, Role::Admin]);
        let auth = AuthState::new(backend);
        auth.initialize().await;
        auth.sign_in("ada@example.com", "secret1").await.unwrap();

        let profile = auth.profile().unwrap();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.full_name, "Ada Meta");
    }

    #[tokio::test]
    async fn lookup_failures_fall_back_to_defaults() {
        let (backend, _) = backend_with_user(&[Role::Admin]);
        backend.fail_on(Collection::UserRoles, Operation::List);
        backend.fail_on(Collection::Profiles, Operation::List);
        let auth = AuthState::new(backend);
        auth.sign_in("ada@example.com", "secret1").await.unwrap();

        let profile = auth.profile().unwrap();
        assert_eq!(profile.role, Role::Requester);
        assert_eq!(profile.full_name, "Ada Meta");
    }

    #[tokio::test]
    async fn sign_out_clears_profile() {
        let (backend, _) = backend_with_user(&[Role::Backoffice]);
        let auth = AuthState::new(backend);
        auth.sign_in("ada@example.com", "secret1").await.unwrap();
        assert!(auth.profile().is_some());
        auth.sign_out().await.unwrap();
        assert_eq!(auth.state(), SessionState::Unauthenticated);
        assert!(auth.profile().is_none());
    }

    #[tokio::test]
    async fn sign_up_creates_profile_and_requester_role() {
        let backend = Arc::new(MemoryBackend::new());
        let auth = AuthState::new(backend.clone());
        let user = auth
            .sign_up(&SignUp {
                email: "new@example.com".into(),
                password: "secret1".into(),
                full_name: "New Person".into(),
            })
            .await
            .unwrap();

        let profiles = backend.rows(Collection::Profiles);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0]["full_name"], "New Person");
        let roles = backend.rows(Collection::UserRoles);
        assert_eq!(roles[0]["user_id"], user.id.as_str());
        assert_eq!(roles[0]["role"], "requester");
        // Registration does not sign in
        assert!(auth.profile().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn resolution_after_teardown_is_discarded() {
        let backend = MemoryBackend::new().with_latency(Duration::from_millis(50));
        backend.add_user("ada@example.com", "secret1", None);
        let backend = Arc::new(backend);
        let auth = AuthState::new(backend.clone());
        auth.initialize().await;
        let session = backend.sign_in("ada@example.com", "secret1").await.unwrap();

        let pending = tokio::spawn({
            let auth = auth.clone();
            async move { auth.resolve(Some(session)).await }
        });
        while !auth.state().is_pending() {
            tokio::task::yield_now().await;
        }

        auth.teardown();
        assert_eq!(backend.listener_count(), 0);
        pending.await.unwrap();
        assert!(auth.state().is_pending());
        assert!(auth.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_resolution_wins_over_late_one() {
        let backend = MemoryBackend::new().with_latency(Duration::from_millis(50));
        backend.add_user("ada@example.com", "secret1", None);
        let backend = Arc::new(backend);
        let auth = AuthState::new(backend.clone());
        auth.initialize().await;
        let session = backend.sign_in("ada@example.com", "secret1").await.unwrap();

        let late = tokio::spawn({
            let auth = auth.clone();
            async move { auth.resolve(Some(session)).await }
        });
        while !auth.state().is_pending() {
            tokio::task::yield_now().await;
        }
        auth.resolve(None).await;
        late.await.unwrap();
        assert_eq!(auth.state(), SessionState::Unauthenticated);
    }
}
