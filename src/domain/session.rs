//! Session - Authenticated User and Session Lifecycle

use serde::{Deserialize, Serialize};

use super::profile::Profile;
use super::role::Role;

/// User as known by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `full_name` from the sign-up metadata
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Live session issued by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
}

/// Session with its resolved profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user: AuthUser,
    pub profile: Profile,
}

impl UserSession {
    pub fn role(&self) -> Role {
        self.profile.role
    }
}

/// Where the current session stands
///
/// `Pending` covers both the initial lookup and an in-flight profile/role
/// resolution; access checks must not decide while in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Pending,
    Unauthenticated,
    Resolved(UserSession),
}

impl SessionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }

    pub fn session(&self) -> Option<&UserSession> {
        match self {
            SessionState::Resolved(session) => Some(session),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.session().map(|s| &s.profile)
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(UserSession::role)
    }
}
