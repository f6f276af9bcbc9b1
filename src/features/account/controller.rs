//! Account Controller
//!
//! Profile name edits and the password reset form.

use std::sync::Arc;

use serde_json::json;

use crate::app::navigation::Route;
use crate::constants::MIN_PASSWORD_LEN;
use crate::domain::profile::Profile;
use crate::error::{Error, Result};
use crate::services::collection::{Collection, to_record};
use crate::services::{Backend, Notifier};

/// New password and its confirmation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetForm {
    pub password: String,
    pub confirm: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters");
        }
        if self.password != self.confirm {
            return Err("Passwords do not match");
        }
        Ok(())
    }
}

pub struct AccountController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    profile: Profile,
    pub full_name: String,
    pub password_form: PasswordResetForm,
}

impl<B: Backend> AccountController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier, profile: Profile) -> Self {
        Self {
            backend,
            notifier,
            full_name: profile.full_name.clone(),
            profile,
            password_form: PasswordResetForm::default(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Store the edited full name
    pub async fn save_profile(&mut self) -> Result<()> {
        let patch = match to_record(&json!({ "full_name": self.full_name })) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = self
            .backend
            .update(Collection::Profiles, &self.profile.id, patch)
            .await
        {
            return self.fail(e);
        }
        self.profile.full_name = self.full_name.clone();
        self.notifier.success("Profile updated");
        Ok(())
    }

    /// Change the password; on success the sign-in route is returned
    pub async fn reset_password(&mut self) -> Result<Route> {
        if let Err(message) = self.password_form.validate() {
            self.notifier.error(message);
            return Err(Error::invalid(message));
        }
        if let Err(e) = self.backend.update_password(&self.password_form.password).await {
            self.notifier.error(e.to_string());
            return Err(e);
        }
        self.password_form = PasswordResetForm::default();
        self.notifier.success("Password updated");
        Ok(Route::Auth)
    }

    fn fail(&self, error: Error) -> Result<()> {
        self.notifier.error(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::services::collection::Record;
    use crate::services::memory::{MemoryBackend, Operation};
    use crate::services::AuthService;
    use serde_json::Value;

    fn setup() -> (Arc<MemoryBackend>, Notifier, AccountController<MemoryBackend>) {
        let backend = MemoryBackend::new();
        let user = backend.add_user("amy@example.com", "secret1", None);
        let Value::Object(row) = json!({"id": user.id, "full_name": "Amy"}) else {
            unreachable!()
        };
        backend.seed(Collection::Profiles, [row]);
        let backend = Arc::new(backend);
        let notifier = Notifier::new();
        let profile = Profile {
            id: user.id,
            full_name: "Amy".into(),
            email: "amy@example.com".into(),
            role: Role::Requester,
            team_key: None,
        };
        let controller = AccountController::new(backend.clone(), notifier.clone(), profile);
        (backend, notifier, controller)
    }

    #[test]
    fn password_rules() {
        let form = |p: &str, c: &str| PasswordResetForm {
            password: p.into(),
            confirm: c.into(),
        };
        assert_eq!(form("abc", "abc").validate(), Err("Password must be at least 6 characters"));
        assert_eq!(form("abcdef", "abcdeg").validate(), Err("Passwords do not match"));
        assert_eq!(form("abcdef", "abcdef").validate(), Ok(()));
    }

    #[tokio::test]
    async fn save_profile_updates_name() {
        let (backend, notifier, mut controller) = setup();
        controller.full_name = "Amy Pond".into();
        controller.save_profile().await.unwrap();
        assert_eq!(backend.rows(Collection::Profiles)[0]["full_name"], "Amy Pond");
        assert_eq!(controller.profile().full_name, "Amy Pond");
        assert_eq!(notifier.drain()[0].message, "Profile updated");
    }

    #[tokio::test]
    async fn failed_save_keeps_profile() {
        let (backend, notifier, mut controller) = setup();
        backend.fail_on(Collection::Profiles, Operation::Update);
        controller.full_name = "Other".into();
        assert!(controller.save_profile().await.is_err());
        assert_eq!(controller.profile().full_name, "Amy");
        let rows: Vec<Record> = backend.rows(Collection::Profiles);
        assert_eq!(rows[0]["full_name"], "Amy");
        assert_eq!(notifier.drain().len(), 1);
    }

    #[tokio::test]
    async fn reset_password_flow() {
        let (backend, notifier, mut controller) = setup();
        controller.password_form = PasswordResetForm {
            password: "short".into(),
            confirm: "short".into(),
        };
        assert!(controller.reset_password().await.is_err());

        backend.sign_in("amy@example.com", "secret1").await.unwrap();
        controller.password_form = PasswordResetForm {
            password: "brand-new".into(),
            confirm: "brand-new".into(),
        };
        assert_eq!(controller.reset_password().await.unwrap(), Route::Auth);

        let messages: Vec<String> = notifier.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, ["Password must be at least 6 characters", "Password updated"]);
        backend.sign_out().await.unwrap();
        assert!(backend.sign_in("amy@example.com", "brand-new").await.is_ok());
    }
}
