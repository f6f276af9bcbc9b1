//! Admin: Request Types
//!
//! Catalogue maintenance: create types routed to a team, switch them on/off.

use std::sync::Arc;

use serde_json::json;

use crate::domain::request_type::{NewRequestType, RequestType};
use crate::domain::team::Team;
use crate::error::{Error, Result};
use crate::services::collection::{Collection, Query, to_record};
use crate::services::data::list_as;
use crate::services::{DataService, Notifier};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTypeForm {
    pub name: String,
    pub team_key: Option<String>,
}

pub struct RequestTypesController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    teams: Vec<Team>,
    types: Vec<RequestType>,
    pub form: RequestTypeForm,
}

impl<B: DataService> RequestTypesController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            teams: Vec::new(),
            types: Vec::new(),
            form: RequestTypeForm::default(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let by_name = Query::new().order_by("name", true);
        let backend = self.backend.as_ref();
        let loaded = futures::try_join!(
            list_as::<Team, _>(backend, Collection::RequestTeams, &by_name),
            list_as::<RequestType, _>(backend, Collection::RequestTypes, &by_name),
        );
        match loaded {
            Ok((teams, types)) => {
                self.teams = teams;
                self.types = types;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn types(&self) -> &[RequestType] {
        &self.types
    }

    /// "Team: <key>" line under each type
    pub fn team_caption(request_type: &RequestType) -> String {
        format!("Team: {}", request_type.team_key.as_deref().unwrap_or_default())
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.types.is_empty().then_some("No request types yet.")
    }

    /// Validate and insert the form as an active type
    pub async fn create(&mut self) -> Result<()> {
        let name = self.form.name.trim().to_string();
        if name.is_empty() {
            return self.fail(Error::invalid("Type name is required"));
        }
        let Some(team_key) = self.form.team_key.clone().filter(|k| !k.is_empty()) else {
            return self.fail(Error::invalid("Select a team"));
        };

        let payload = NewRequestType {
            name,
            team_key,
            active: true,
        };
        let inserted = match to_record(&payload) {
            Ok(row) => self.backend.insert(Collection::RequestTypes, row).await,
            Err(e) => Err(e),
        };
        if let Err(e) = inserted {
            return self.fail(e);
        }

        self.notifier.success("Request type created");
        self.form = RequestTypeForm::default();
        self.load().await
    }

    pub async fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        let patch = match to_record(&json!({ "active": active })) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = self.backend.update(Collection::RequestTypes, id, patch).await {
            return self.fail(e);
        }
        tracing::info!(request_type = id, active, "request type toggled");
        self.load().await
    }

    fn fail(&self, error: Error) -> Result<()> {
        self.notifier.error(error.to_string());
        Err(error)
    }
}
