//! Create Request Controller

use std::sync::Arc;

use crate::app::navigation::Route;
use crate::domain::profile::Profile;
use crate::domain::request::{NewRequest, RequestStatus};
use crate::domain::request_type::RequestType;
use crate::error::{Error, Result};
use crate::services::collection::{Collection, Query, to_record};
use crate::services::data::list_as;
use crate::services::{DataService, Notifier};

/// Form fields of the new request page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequestForm {
    pub request_type_id: Option<String>,
    pub title: String,
    pub details: String,
}

/// New request page controller (requesters only)
pub struct CreateRequestController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    profile: Profile,
    request_types: Vec<RequestType>,
    pub form: CreateRequestForm,
}

impl<B: DataService> CreateRequestController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier, profile: Profile) -> Self {
        Self {
            backend,
            notifier,
            profile,
            request_types: Vec::new(),
            form: CreateRequestForm::default(),
        }
    }

    /// Active request types ordered by name
    pub async fn load_types(&mut self) -> Result<()> {
        let query = Query::new().eq("active", true).order_by("name", true);
        match list_as(self.backend.as_ref(), Collection::RequestTypes, &query).await {
            Ok(types) => {
                self.request_types = types;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn request_types(&self) -> &[RequestType] {
        &self.request_types
    }

    /// Insert the request; on success the form resets and the list route is returned
    pub async fn submit(&mut self) -> Result<Route> {
        let Some(type_id) = self.form.request_type_id.clone() else {
            let message = "Please select a request type";
            self.notifier.error(message);
            return Err(Error::invalid(message));
        };
        if self.form.title.trim().is_empty() {
            let message = "Title is required";
            self.notifier.error(message);
            return Err(Error::invalid(message));
        }

        let team_key = self
            .request_types
            .iter()
            .find(|t| t.id == type_id)
            .and_then(|t| t.team_key.clone());
        let payload = NewRequest {
            title: self.form.title.clone(),
            description: Some(self.form.details.clone()),
            requester_id: self.profile.id.clone(),
            request_type_id: type_id,
            team_key,
            status: RequestStatus::Submitted,
        };

        let result = match to_record(&payload) {
            Ok(row) => self.backend.insert(Collection::Requests, row).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.notifier.error(e.to_string());
            return Err(e);
        }

        tracing::info!(requester = %self.profile.id, "request submitted");
        self.notifier.success("Request submitted");
        self.form = CreateRequestForm::default();
        Ok(Route::Requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::services::collection::Record;
    use crate::services::memory::{MemoryBackend, Operation};
    use crate::services::NotificationLevel;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    fn controller() -> (Arc<MemoryBackend>, Notifier, CreateRequestController<MemoryBackend>) {
        let backend = MemoryBackend::new();
        backend.seed(
            Collection::RequestTypes,
            [
                record(json!({"id": "t2", "name": "Monitor", "team_key": "it"})),
                record(json!({"id": "t1", "name": "Access badge", "team_key": "facilities"})),
                record(json!({"id": "t3", "name": "Retired", "active": false})),
            ],
        );
        let backend = Arc::new(backend);
        let notifier = Notifier::new();
        let profile = Profile {
            id: "alice".into(),
            full_name: "Alice".into(),
            email: String::new(),
            role: Role::Requester,
            team_key: None,
        };
        let controller = CreateRequestController::new(backend.clone(), notifier.clone(), profile);
        (backend, notifier, controller)
    }

    #[tokio::test]
    async fn only_active_types_by_name() {
        let (_, _, mut controller) = controller();
        controller.load_types().await.unwrap();
        let names: Vec<&str> = controller.request_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Access badge", "Monitor"]);
    }

    #[tokio::test]
    async fn type_is_required() {
        let (backend, notifier, mut controller) = controller();
        controller.form.title = "Need a screen".into();
        assert!(controller.submit().await.is_err());
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Please select a request type");
        assert!(backend.rows(Collection::Requests).is_empty());
    }

    #[tokio::test]
    async fn submit_routes_to_type_team() {
        let (backend, notifier, mut controller) = controller();
        controller.load_types().await.unwrap();
        controller.form = CreateRequestForm {
            request_type_id: Some("t2".into()),
            title: "Need a screen".into(),
            details: "27 inch".into(),
        };
        assert_eq!(controller.submit().await.unwrap(), Route::Requests);

        let rows = backend.rows(Collection::Requests);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "submitted");
        assert_eq!(rows[0]["team_key"], "it");
        assert_eq!(rows[0]["requester_id"], "alice");
        let notes = notifier.drain();
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].message, "Request submitted");
        assert_eq!(controller.form, CreateRequestForm::default());
    }

    #[tokio::test]
    async fn failed_insert_keeps_form() {
        let (backend, notifier, mut controller) = controller();
        backend.fail_on(Collection::Requests, Operation::Insert);
        controller.form.request_type_id = Some("t1".into());
        controller.form.title = "Badge".into();
        assert!(controller.submit().await.is_err());
        assert_eq!(controller.form.title, "Badge");
        assert_eq!(notifier.drain().len(), 1);
    }
}
