//! Workspace - Portal Shell
//!
//! Holds the session, the theme and the current route, and hands feature
//! controllers the signed-in profile. Navigation runs every route through the
//! access check and follows redirects.

use std::sync::Arc;

use crate::app::access::{AccessDecision, authorize};
use crate::app::navigation::{Navigation, Route, SidebarFooter, derive_navigation};
use crate::domain::config::PortalConfig;
use crate::domain::profile::Profile;
use crate::domain::session::SessionState;
use crate::features::account::AccountController;
use crate::features::admin::{RequestTypesController, UsersController};
use crate::features::dashboard::DashboardController;
use crate::features::request_detail::RequestDetailController;
use crate::features::requests::{CreateRequestController, RequestsController};
use crate::services::{Backend, Notifier};
use crate::state::{AuthState, ThemeState, ThemeTarget};
use crate::theme::colors::{Palette, PortalColors};
use crate::theme::ThemeMode;
use crate::utils::config_store::PreferenceStore;

/// Redirect chains are at most index → auth → dashboard
const MAX_REDIRECTS: usize = 4;

/// Colors currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub mode: ThemeMode,
    pub palette: Palette,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            palette: PortalColors::palette(ThemeMode::Light),
        }
    }
}

impl ThemeTarget for Appearance {
    fn apply_theme(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.palette = PortalColors::palette(mode);
    }
}

/// Sidebar and settings menu of a signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub navigation: Navigation,
    pub footer: SidebarFooter,
    pub theme_label: &'static str,
    pub theme_icon: &'static str,
}

/// Main shell
pub struct Workspace<B, P> {
    backend: Arc<B>,
    auth: AuthState<B>,
    theme: ThemeState<P>,
    notifier: Notifier,
    config: PortalConfig,
    current: Route,
    admin_expanded: bool,
    appearance: Appearance,
}

impl<B: Backend, P: PreferenceStore> Workspace<B, P> {
    pub fn new(backend: Arc<B>, preferences: P, config: PortalConfig) -> Self {
        let auth = AuthState::new(backend.clone());
        let theme = ThemeState::load(preferences, config.appearance.hint);
        Self {
            backend,
            auth,
            theme,
            notifier: Notifier::new(),
            config,
            current: Route::Index,
            admin_expanded: true,
            appearance: Appearance::default(),
        }
    }

    /// Resolve the startup session and paint the theme
    pub async fn start(&mut self) {
        self.theme.apply(&mut self.appearance);
        self.auth.initialize().await;
    }

    pub fn auth(&self) -> &AuthState<B> {
        &self.auth
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn session(&self) -> SessionState {
        self.auth.state()
    }

    // ==================== Navigation ====================

    /// Go to `path`, following redirects; returns the final decision
    pub async fn navigate(&mut self, path: &str) -> AccessDecision {
        self.auth.process_events().await;
        let mut route = Route::parse(path);
        let state = self.auth.state();

        for _ in 0..MAX_REDIRECTS {
            match authorize(&route, &state) {
                AccessDecision::Redirect(target) => {
                    tracing::debug!(from = %route, to = %target, "redirect");
                    route = target;
                }
                decision => {
                    self.current = route;
                    return decision;
                }
            }
        }
        tracing::warn!(path, "redirect limit reached");
        self.current = route.clone();
        AccessDecision::Redirect(route)
    }

    /// Sidebar for the signed-in user
    pub fn layout(&self) -> Option<Layout> {
        let profile = self.auth.profile()?;
        let mut navigation = derive_navigation(profile.role);
        if let Some(section) = navigation.admin.as_mut() {
            section.expanded = self.admin_expanded;
        }
        Some(Layout {
            navigation,
            footer: SidebarFooter::new(Some(&profile)),
            theme_label: self.theme.mode().toggle_label(),
            theme_icon: self.theme.mode().toggle_icon(),
        })
    }

    pub fn toggle_admin_section(&mut self) {
        self.admin_expanded = !self.admin_expanded;
    }

    /// Flip light/dark; a failed write is reported but the new mode stays
    pub fn toggle_theme(&mut self) -> ThemeMode {
        if let Err(e) = self.theme.toggle() {
            self.notifier.error(e.to_string());
        }
        self.theme.apply(&mut self.appearance);
        self.theme.mode()
    }

    pub async fn sign_out(&mut self) -> AccessDecision {
        if let Err(e) = self.auth.sign_out().await {
            self.notifier.error(e.to_string());
        }
        self.navigate(&Route::Auth.path()).await
    }

    /// Release the session subscription
    pub fn teardown(&self) {
        self.auth.teardown();
    }

    // ==================== Feature controllers ====================

    fn profile(&self) -> Option<Profile> {
        self.auth.profile()
    }

    pub fn dashboard(&self) -> Option<DashboardController<B>> {
        let profile = self.profile()?;
        Some(DashboardController::new(self.backend.clone(), self.notifier.clone(), profile))
    }

    pub fn requests(&self) -> Option<RequestsController<B>> {
        let profile = self.profile()?;
        Some(RequestsController::new(
            self.backend.clone(),
            self.notifier.clone(),
            profile,
            self.config.page_size(),
        ))
    }

    pub fn create_request(&self) -> Option<CreateRequestController<B>> {
        let profile = self.profile()?;
        Some(CreateRequestController::new(self.backend.clone(), self.notifier.clone(), profile))
    }

    pub fn request_detail(&self, request_id: &str) -> Option<RequestDetailController<B>> {
        let profile = self.profile()?;
        Some(RequestDetailController::new(
            self.backend.clone(),
            self.notifier.clone(),
            profile,
            request_id,
        ))
    }

    pub fn request_types(&self) -> RequestTypesController<B> {
        RequestTypesController::new(self.backend.clone(), self.notifier.clone())
    }

    pub fn users(&self) -> UsersController<B> {
        UsersController::new(self.backend.clone(), self.notifier.clone(), self.config.page_size())
    }

    pub fn account(&self) -> Option<AccountController<B>> {
        let profile = self.profile()?;
        Some(AccountController::new(self.backend.clone(), self.notifier.clone(), profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::{Role, RoleAssignment};
    use crate::services::collection::{Collection, to_record};
    use crate::services::MemoryBackend;
    use crate::theme::SystemAppearance;
    use crate::utils::config_store::MemoryPreferenceStore;

    fn backend() -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        let admin = backend.add_user("admin@example.com", "secret1", Some("Ada Admin"));
        let requester = backend.add_user("req@example.com", "secret1", Some("Rex"));
        backend.seed(
            Collection::UserRoles,
            [
                to_record(&RoleAssignment::new(admin.id, Role::Admin)).unwrap(),
                to_record(&RoleAssignment::new(requester.id, Role::Requester)).unwrap(),
            ],
        );
        Arc::new(backend)
    }

    #[tokio::test]
    async fn signed_out_lands_on_auth() {
        let mut workspace =
            Workspace::new(backend(), MemoryPreferenceStore::new(), PortalConfig::default());
        workspace.start().await;
        assert_eq!(workspace.navigate("/").await, AccessDecision::Render);
        assert_eq!(workspace.current_route(), &Route::Auth);
        assert!(workspace.layout().is_none());
        assert!(workspace.dashboard().is_none());
    }

    #[tokio::test]
    async fn requester_is_bounced_from_admin_pages() {
        let mut workspace =
            Workspace::new(backend(), MemoryPreferenceStore::new(), PortalConfig::default());
        workspace.start().await;
        workspace.auth().sign_in("req@example.com", "secret1").await.unwrap();

        assert_eq!(workspace.navigate("/admin/users").await, AccessDecision::Render);
        assert_eq!(workspace.current_route(), &Route::Dashboard);
        assert_eq!(workspace.navigate("/requests/new").await, AccessDecision::Render);
        assert_eq!(workspace.current_route(), &Route::NewRequest);

        let layout = workspace.layout().unwrap();
        assert_eq!(layout.footer.name, "Rex");
        assert_eq!(layout.footer.role_label, "Requester");
        assert!(layout.navigation.admin.is_none());
    }

    #[tokio::test]
    async fn admin_layout_and_sign_out() {
        let mut workspace =
            Workspace::new(backend(), MemoryPreferenceStore::new(), PortalConfig::default());
        workspace.start().await;
        workspace.auth().sign_in("admin@example.com", "secret1").await.unwrap();

        assert_eq!(workspace.navigate("/auth").await, AccessDecision::Render);
        assert_eq!(workspace.current_route(), &Route::Dashboard);
        workspace.toggle_admin_section();
        let layout = workspace.layout().unwrap();
        assert_eq!(layout.footer.role_icon, "shield");
        assert!(!layout.navigation.admin.unwrap().expanded);

        workspace.sign_out().await;
        assert_eq!(workspace.current_route(), &Route::Auth);
        assert!(workspace.layout().is_none());
    }

    #[tokio::test]
    async fn theme_toggle_repaints_and_relabels() {
        let mut config = PortalConfig::default();
        config.appearance.hint = SystemAppearance::Dark;
        let mut workspace = Workspace::new(backend(), MemoryPreferenceStore::new(), config);
        workspace.start().await;
        assert_eq!(workspace.appearance().mode, ThemeMode::Dark);

        assert_eq!(workspace.toggle_theme(), ThemeMode::Light);
        assert!(workspace.appearance().palette.background_image);
        workspace.auth().sign_in("req@example.com", "secret1").await.unwrap();
        assert_eq!(workspace.layout().unwrap().theme_label, "Dark mode");
    }
}
