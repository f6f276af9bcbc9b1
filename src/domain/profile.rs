//! Profile - Directory Entry of a User
//!
//! A [`Profile`] is always complete: missing directory data falls back to the
//! session metadata, then to fixed defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::{Role, RoleAssignment, primary_assignment, resolve_role};
use super::session::AuthUser;
use crate::constants::FALLBACK_DISPLAY_NAME;

/// One row of the `profiles` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Resolved profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub team_key: Option<String>,
}

impl Profile {
    /// Merge the directory record and role assignments over the session user
    pub fn resolve(
        user: &AuthUser,
        record: Option<&ProfileRecord>,
        assignments: &[RoleAssignment],
    ) -> Self {
        let non_empty = |value: Option<&String>| value.filter(|v| !v.trim().is_empty()).cloned();

        let full_name = non_empty(record.and_then(|r| r.full_name.as_ref()))
            .or_else(|| non_empty(user.full_name.as_ref()))
            .or_else(|| non_empty(user.email.as_ref()))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());

        let email = non_empty(record.and_then(|r| r.email.as_ref()))
            .or_else(|| user.email.clone())
            .unwrap_or_default();

        let role = resolve_role(assignments.iter().map(|a| a.role));
        let team_key = primary_assignment(assignments).and_then(|a| a.team_key.clone());

        Self {
            id: user.id.clone(),
            full_name,
            email,
            role,
            team_key,
        }
    }

    /// Name for "Signed in as"
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            FALLBACK_DISPLAY_NAME
        } else {
            &self.full_name
        }
    }
}
