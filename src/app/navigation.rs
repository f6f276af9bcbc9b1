//! Navigation - Routes and Role-Derived Sidebar
//!
//! Defines the portal's routes, their role requirements and the sidebar
//! entries each role sees.

use crate::domain::profile::Profile;
use crate::domain::role::Role;

/// Every route of the portal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: forwards to the dashboard or the sign-in page
    Index,
    Auth,
    PasswordReset,
    Dashboard,
    Requests,
    NewRequest,
    RequestDetail(String),
    AdminRequestTypes,
    AdminUsers,
    Account,
    NotFound(String),
}

const REQUESTER_ONLY: &[Role] = &[Role::Requester];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Route {
    /// Match a path; query string, leading and trailing slashes are ignored
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Route::Index,
            ["auth"] => Route::Auth,
            ["auth", "reset"] => Route::PasswordReset,
            ["dashboard"] => Route::Dashboard,
            ["requests"] => Route::Requests,
            ["requests", "new"] => Route::NewRequest,
            ["requests", id] if !id.is_empty() => Route::RequestDetail((*id).to_string()),
            ["admin", "request-types"] => Route::AdminRequestTypes,
            ["admin", "users"] => Route::AdminUsers,
            ["account"] => Route::Account,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".into(),
            Route::Auth => "/auth".into(),
            Route::PasswordReset => "/auth/reset".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Requests => "/requests".into(),
            Route::NewRequest => "/requests/new".into(),
            Route::RequestDetail(id) => format!("/requests/{id}"),
            Route::AdminRequestTypes => "/admin/request-types".into(),
            Route::AdminUsers => "/admin/users".into(),
            Route::Account => "/account".into(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether a session is required
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Index | Route::Auth | Route::PasswordReset | Route::NotFound(_)
        )
    }

    /// Roles allowed on a protected route; `None` admits any signed-in user
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::NewRequest => Some(REQUESTER_ONLY),
            Route::AdminRequestTypes | Route::AdminUsers => Some(ADMIN_ONLY),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub route: Route,
    pub label: &'static str,
    pub icon: &'static str,
}

impl NavEntry {
    fn new(route: Route, label: &'static str, icon: &'static str) -> Self {
        Self { route, label, icon }
    }

    pub fn path(&self) -> String {
        self.route.path()
    }

    /// Highlight rule: the dashboard matches exactly, others by path prefix
    pub fn is_active(&self, current: &Route) -> bool {
        let own = self.path();
        let current = current.path();
        if self.route == Route::Dashboard {
            return current == own;
        }
        current == own || current.starts_with(&format!("{own}/"))
    }
}

/// Collapsible admin group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSection {
    pub label: &'static str,
    pub icon: &'static str,
    pub entries: Vec<NavEntry>,
    pub expanded: bool,
}

impl AdminSection {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn chevron(&self) -> &'static str {
        if self.expanded { "chevron-down" } else { "chevron-right" }
    }
}

/// Sidebar contents for a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub main: Vec<NavEntry>,
    pub admin: Option<AdminSection>,
}

impl Navigation {
    /// Every entry, admin ones included
    pub fn entries(&self) -> impl Iterator<Item = &NavEntry> {
        self.main
            .iter()
            .chain(self.admin.iter().flat_map(|section| section.entries.iter()))
    }
}

/// Sidebar entries visible to `role`
pub fn derive_navigation(role: Role) -> Navigation {
    let mut main = vec![NavEntry::new(Route::Dashboard, "Dashboard", "home")];
    match role {
        Role::Requester => {
            main.push(NavEntry::new(Route::Requests, "My Requests", "file-text"));
            main.push(NavEntry::new(Route::NewRequest, "New Request", "folder-plus"));
        }
        Role::Admin | Role::Backoffice => {
            main.push(NavEntry::new(Route::Requests, "Requests", "file-text"));
        }
    }

    let admin = (role == Role::Admin).then(|| AdminSection {
        label: "Admin",
        icon: "settings",
        entries: vec![
            NavEntry::new(Route::AdminRequestTypes, "Request Types", "sliders-horizontal"),
            NavEntry::new(Route::AdminUsers, "Users", "users"),
        ],
        expanded: true,
    });

    Navigation { main, admin }
}

/// "Signed in as" block at the bottom of the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarFooter {
    pub caption: &'static str,
    pub name: String,
    pub role_label: &'static str,
    pub role_icon: &'static str,
}

impl SidebarFooter {
    pub fn new(profile: Option<&Profile>) -> Self {
        let role = profile.map(|p| p.role).unwrap_or_default();
        Self {
            caption: "Signed in as:",
            name: profile
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| crate::constants::FALLBACK_DISPLAY_NAME.to_string()),
            role_label: role.label(),
            role_icon: role.icon(),
        }
    }
}
