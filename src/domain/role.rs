//! Role - Access Roles and Role Resolution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Backoffice,
    #[default]
    Requester,
}

/// Highest priority first
pub const ROLE_PRIORITY: [Role; 3] = [Role::Admin, Role::Backoffice, Role::Requester];

impl Role {
    /// Options offered by the user management select, in display order
    pub const OPTIONS: [Role; 3] = [Role::Requester, Role::Backoffice, Role::Admin];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "backoffice" => Some(Role::Backoffice),
            "requester" => Some(Role::Requester),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Backoffice => "backoffice",
            Role::Requester => "requester",
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Backoffice => "Backoffice",
            Role::Requester => "Requester",
        }
    }

    /// Icon shown next to the label in the sidebar footer
    pub fn icon(&self) -> &'static str {
        match self {
            Role::Admin => "shield",
            Role::Backoffice => "briefcase",
            Role::Requester => "user",
        }
    }

    /// Admins and backoffice staff see and manage every request
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Backoffice)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `user_roles` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RoleAssignment {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            team_key: None,
            created_at: None,
        }
    }

    pub fn with_team(mut self, team_key: impl Into<String>) -> Self {
        self.team_key = Some(team_key.into());
        self
    }
}

/// Highest-priority role among `roles`; requester when empty
pub fn resolve_role<I>(roles: I) -> Role
where
    I: IntoIterator<Item = Role>,
{
    let held: Vec<Role> = roles.into_iter().collect();
    ROLE_PRIORITY
        .into_iter()
        .find(|role| held.contains(role))
        .unwrap_or_default()
}

/// Assignment carrying the resolved role, if any
pub fn primary_assignment(assignments: &[RoleAssignment]) -> Option<&RoleAssignment> {
    let role = resolve_role(assignments.iter().map(|a| a.role));
    assignments.iter().find(|a| a.role == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_wins_over_requester() {
        assert_eq!(resolve_role([Role::Requester, Role::Admin]), Role::Admin);
        assert_eq!(resolve_role([Role::Backoffice, Role::Requester]), Role::Backoffice);
        assert_eq!(resolve_role([Role::Requester]), Role::Requester);
    }

    #[test]
    fn no_roles_means_requester() {
        assert_eq!(resolve_role(std::iter::empty()), Role::Requester);
    }

    #[test]
    fn primary_assignment_follows_priority() {
        let assignments = vec![
            RoleAssignment::new("u1", Role::Requester),
            RoleAssignment::new("u1", Role::Backoffice).with_team("it"),
        ];
        let primary = primary_assignment(&assignments).map(|a| a.team_key.as_deref());
        assert_eq!(primary, Some(Some("it")));
        assert!(primary_assignment(&[]).is_none());
    }

    #[test]
    fn wire_form_is_lowercase() {
        let json = serde_json::to_string(&Role::Backoffice).unwrap();
        assert_eq!(json, "\"backoffice\"");
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Admin"), None);
    }
}
