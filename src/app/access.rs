//! Access - Route Guarding
//!
//! Decides what a route shows for the current session state.

use super::navigation::Route;
use crate::domain::role::Role;
use crate::domain::session::SessionState;

/// Outcome of a route check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session still resolving; show a spinner
    Loading,
    Redirect(Route),
    Render,
}

/// Guard a protected view with an optional role list
///
/// Signed-out users go to the sign-in page. A signed-in user whose role is
/// not listed goes to the dashboard.
pub fn guard(allowed_roles: Option<&[Role]>, session: &SessionState) -> AccessDecision {
    match session {
        SessionState::Pending => AccessDecision::Loading,
        SessionState::Unauthenticated => AccessDecision::Redirect(Route::Auth),
        SessionState::Resolved(session) => match allowed_roles {
            Some(roles) if !roles.contains(&session.role()) => {
                AccessDecision::Redirect(Route::Dashboard)
            }
            _ => AccessDecision::Render,
        },
    }
}

/// Decide any route, public ones included
pub fn authorize(route: &Route, session: &SessionState) -> AccessDecision {
    match route {
        Route::Index => match session {
            SessionState::Pending => AccessDecision::Loading,
            SessionState::Unauthenticated => AccessDecision::Redirect(Route::Auth),
            SessionState::Resolved(_) => AccessDecision::Redirect(Route::Dashboard),
        },
        Route::Auth => match session {
            SessionState::Resolved(_) => AccessDecision::Redirect(Route::Dashboard),
            _ => AccessDecision::Render,
        },
        route if route.is_protected() => guard(route.allowed_roles(), session),
        _ => AccessDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Profile;
    use crate::domain::session::{AuthUser, UserSession};

    fn resolved(role: Role) -> SessionState {
        SessionState::Resolved(UserSession {
            user: AuthUser {
                id: "u1".into(),
                email: None,
                full_name: None,
            },
            profile: Profile {
                id: "u1".into(),
                full_name: "Ada".into(),
                email: String::new(),
                role,
                team_key: None,
            },
        })
    }

    #[test]
    fn pending_never_decides() {
        for path in ["/", "/dashboard", "/admin/users", "/requests/new"] {
            assert_eq!(
                authorize(&Route::parse(path), &SessionState::Pending),
                AccessDecision::Loading
            );
        }
    }

    #[test]
    fn signed_out_goes_to_auth() {
        let decision = authorize(&Route::Account, &SessionState::Unauthenticated);
        assert_eq!(decision, AccessDecision::Redirect(Route::Auth));
        assert_eq!(
            authorize(&Route::Auth, &SessionState::Unauthenticated),
            AccessDecision::Render
        );
    }

    #[test]
    fn requester_on_admin_route_goes_to_dashboard() {
        let decision = authorize(&Route::AdminUsers, &resolved(Role::Requester));
        assert_eq!(decision, AccessDecision::Redirect(Route::Dashboard));
    }

    #[test]
    fn staff_cannot_create_requests() {
        for role in [Role::Admin, Role::Backoffice] {
            assert_eq!(
                authorize(&Route::NewRequest, &resolved(role)),
                AccessDecision::Redirect(Route::Dashboard)
            );
        }
        assert_eq!(
            authorize(&Route::NewRequest, &resolved(Role::Requester)),
            AccessDecision::Render
        );
    }

    #[test]
    fn unrestricted_routes_render_for_every_role() {
        for role in [Role::Admin, Role::Backoffice, Role::Requester] {
            for route in [Route::Dashboard, Route::Requests, Route::Account] {
                assert_eq!(authorize(&route, &resolved(role)), AccessDecision::Render);
            }
        }
    }

    #[test]
    fn index_forwards() {
        assert_eq!(
            authorize(&Route::Index, &resolved(Role::Admin)),
            AccessDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            authorize(&Route::NotFound("/x".into()), &SessionState::Unauthenticated),
            AccessDecision::Render
        );
    }
}
