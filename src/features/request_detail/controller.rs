//! Request Detail Controller
//!
//! One request with its comment thread. Staff change status and team;
//! requesters may cancel while the request is still submitted.

use std::sync::Arc;

use ahash::AHashMap;
use serde_json::json;

use crate::domain::comment::{Comment, CommentView, NewComment};
use crate::domain::profile::{Profile, ProfileRecord};
use crate::domain::request::{Request, RequestStatus, RequestSummary};
use crate::domain::request_type::RequestType;
use crate::domain::role::Role;
use crate::domain::team::{Team, team_label};
use crate::error::{Error, Result};
use crate::services::collection::{Collection, Query, Record, to_record};
use crate::services::data::{get_as, list_as};
use crate::services::{DataService, Notifier};

/// Request detail page controller
pub struct RequestDetailController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    profile: Profile,
    request_id: String,
    request: Option<RequestSummary>,
    teams: Vec<Team>,
    comments: Vec<CommentView>,
    pub comment_draft: String,
}

impl<B: DataService> RequestDetailController<B> {
    pub fn new(
        backend: Arc<B>,
        notifier: Notifier,
        profile: Profile,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            notifier,
            profile,
            request_id: request_id.into(),
            request: None,
            teams: Vec::new(),
            comments: Vec::new(),
            comment_draft: String::new(),
        }
    }

    // ==================== Loading ====================

    /// Fetch the request, the team list and the comments
    pub async fn load(&mut self) -> Result<()> {
        let loaded = futures::try_join!(
            self.fetch_request(),
            self.fetch_teams(),
            self.fetch_comments()
        );
        match loaded {
            Ok((request, teams, comments)) => {
                self.request = Some(request);
                self.teams = teams;
                self.comments = comments;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    async fn fetch_request(&self) -> Result<RequestSummary> {
        let backend = self.backend.as_ref();
        let request: Request = get_as(backend, Collection::Requests, &self.request_id).await?;

        let type_name = match &request.request_type_id {
            Some(id) => get_as::<RequestType, _>(backend, Collection::RequestTypes, id)
                .await
                .ok()
                .map(|t| t.name),
            None => None,
        };
        let requester_name =
            get_as::<ProfileRecord, _>(backend, Collection::Profiles, &request.requester_id)
                .await
                .ok()
                .and_then(|p| p.full_name);
        Ok(RequestSummary::new(request, type_name, requester_name))
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        let query = Query::new().order_by("name", true);
        list_as(self.backend.as_ref(), Collection::RequestTeams, &query).await
    }

    async fn fetch_comments(&self) -> Result<Vec<CommentView>> {
        let backend = self.backend.as_ref();
        let query = Query::new()
            .eq("request_id", self.request_id.as_str())
            .order_by("created_at", false);
        let comments: Vec<Comment> = list_as(backend, Collection::RequestComments, &query).await?;

        let names: AHashMap<String, String> =
            list_as::<ProfileRecord, _>(backend, Collection::Profiles, &Query::new())
                .await?
                .into_iter()
                .filter_map(|p| p.full_name.map(|name| (p.id, name)))
                .collect();

        Ok(comments
            .into_iter()
            .map(|c| CommentView {
                author_name: c.author_id.as_ref().and_then(|id| names.get(id)).cloned(),
                id: c.id,
                body: c.body,
                created_at: c.created_at,
            })
            .collect())
    }

    // ==================== Accessors ====================

    pub fn request(&self) -> Option<&RequestSummary> {
        self.request.as_ref()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn comments(&self) -> &[CommentView] {
        &self.comments
    }

    /// Staff manage status and routing
    pub fn can_manage(&self) -> bool {
        self.profile.role.is_staff()
    }

    /// Requesters may withdraw a request nobody has picked up yet
    pub fn can_cancel(&self) -> bool {
        self.profile.role == Role::Requester
            && self.request.as_ref().is_some_and(|r| r.status == RequestStatus::Submitted)
    }

    pub fn team_label(&self) -> String {
        team_label(&self.teams, self.request.as_ref().and_then(|r| r.team_key.as_deref()))
    }

    // ==================== Actions ====================

    pub async fn change_status(&mut self, status: RequestStatus) -> Result<()> {
        if !self.can_manage() {
            return self.fail(Error::invalid("Only staff can change the status"));
        }
        self.patch(json!({ "status": status }), "Status updated").await
    }

    pub async fn reassign_team(&mut self, team_key: &str) -> Result<()> {
        if !self.can_manage() {
            return self.fail(Error::invalid("Only staff can reassign requests"));
        }
        self.patch(json!({ "team_key": team_key }), "Request reassigned").await
    }

    pub async fn cancel(&mut self) -> Result<()> {
        if !self.can_cancel() {
            return self.fail(Error::invalid("Only submitted requests can be cancelled"));
        }
        self.patch(json!({ "status": RequestStatus::Cancelled }), "Request cancelled")
            .await
    }

    /// Post the trimmed draft; a blank draft does nothing
    pub async fn add_comment(&mut self) -> Result<()> {
        let body = self.comment_draft.trim().to_string();
        if body.is_empty() {
            return Ok(());
        }
        let payload = NewComment {
            request_id: self.request_id.clone(),
            author_id: self.profile.id.clone(),
            body,
        };
        let inserted = match to_record(&payload) {
            Ok(row) => self.backend.insert(Collection::RequestComments, row).await,
            Err(e) => Err(e),
        };
        if let Err(e) = inserted {
            return self.fail(e);
        }

        self.notifier.success("Comment added");
        self.comment_draft.clear();
        match self.fetch_comments().await {
            Ok(comments) => {
                self.comments = comments;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    async fn patch(&mut self, patch: serde_json::Value, success: &str) -> Result<()> {
        let patch: Record = match to_record(&patch) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = self
            .backend
            .update(Collection::Requests, &self.request_id, patch)
            .await
        {
            return self.fail(e);
        }

        tracing::info!(request = %self.request_id, message = success, "request updated");
        self.notifier.success(success);
        match self.fetch_request().await {
            Ok(request) => {
                self.request = Some(request);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: Error) -> Result<()> {
        self.notifier.error(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::{MemoryBackend, Operation};
    use crate::services::NotificationLevel;
    use serde_json::Value;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    fn profile(id: &str, role: Role) -> Profile {
        Profile {
            id: id.into(),
            full_name: id.into(),
            email: String::new(),
            role,
            team_key: None,
        }
    }

    fn seeded() -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        backend.seed(
            Collection::RequestTeams,
            [
                record(json!({"key": "it", "name": "IT Support"})),
                record(json!({"key": "facilities", "name": "Facilities"})),
            ],
        );
        backend.seed(Collection::RequestTypes, [record(json!({"id": "t1", "name": "Laptop"}))]);
        backend.seed(Collection::Profiles, [record(json!({"id": "alice", "full_name": "Alice"}))]);
        backend.seed(
            Collection::Requests,
            [record(json!({"id": "r1", "title": "New laptop", "requester_id": "alice",
                "request_type_id": "t1", "team_key": "it"}))],
        );
        backend.seed(
            Collection::RequestComments,
            [
                record(json!({"request_id": "r1", "author_id": "alice", "body": "first",
                    "created_at": "2024-01-01T00:00:00Z"})),
                record(json!({"request_id": "r1", "author_id": "ghost", "body": "second",
                    "created_at": "2024-01-02T00:00:00Z"})),
                record(json!({"request_id": "other", "body": "elsewhere"})),
            ],
        );
        Arc::new(backend)
    }

    async fn loaded(
        role: Role,
    ) -> (Arc<MemoryBackend>, Notifier, RequestDetailController<MemoryBackend>) {
        let backend = seeded();
        let notifier = Notifier::new();
        let user = if role == Role::Requester { "alice" } else { "staff" };
        let mut controller = RequestDetailController::new(
            backend.clone(),
            notifier.clone(),
            profile(user, role),
            "r1",
        );
        controller.load().await.unwrap();
        (backend, notifier, controller)
    }

    #[tokio::test]
    async fn load_joins_names_and_orders_comments() {
        let (_, _, controller) = loaded(Role::Backoffice).await;
        let request = controller.request().unwrap();
        assert_eq!(request.type_name.as_deref(), Some("Laptop"));
        assert_eq!(request.requester_name.as_deref(), Some("Alice"));
        assert_eq!(controller.team_label(), "IT Support");

        let bodies: Vec<&str> = controller.comments().iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, ["second", "first"]);
        assert_eq!(controller.comments()[0].author_name, None);
        assert_eq!(controller.comments()[1].author_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn staff_change_status_and_team() {
        let (backend, notifier, mut controller) = loaded(Role::Admin).await;
        assert!(controller.can_manage());
        assert!(!controller.can_cancel());

        controller.change_status(RequestStatus::InReview).await.unwrap();
        assert_eq!(controller.request().unwrap().status, RequestStatus::InReview);
        controller.reassign_team("facilities").await.unwrap();
        assert_eq!(controller.team_label(), "Facilities");

        let messages: Vec<String> = notifier.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, ["Status updated", "Request reassigned"]);
        assert_eq!(backend.rows(Collection::Requests)[0]["status"], "in_review");
    }

    #[tokio::test]
    async fn requester_cancels_only_while_submitted() {
        let (backend, notifier, mut controller) = loaded(Role::Requester).await;
        assert!(!controller.can_manage());
        assert!(controller.can_cancel());
        assert!(controller.change_status(RequestStatus::Approved).await.is_err());

        controller.cancel().await.unwrap();
        assert_eq!(controller.request().unwrap().status, RequestStatus::Cancelled);
        assert!(!controller.can_cancel());
        assert!(controller.cancel().await.is_err());
        assert_eq!(backend.rows(Collection::Requests)[0]["status"], "cancelled");

        let levels: Vec<NotificationLevel> =
            notifier.drain().into_iter().map(|n| n.level).collect();
        assert_eq!(
            levels,
            [NotificationLevel::Error, NotificationLevel::Success, NotificationLevel::Error]
        );
    }

    #[tokio::test]
    async fn comments_are_trimmed_and_blank_ignored() {
        let (backend, notifier, mut controller) = loaded(Role::Requester).await;
        controller.comment_draft = "   ".into();
        controller.add_comment().await.unwrap();
        assert!(notifier.drain().is_empty());

        controller.comment_draft = "  any update?  ".into();
        controller.add_comment().await.unwrap();
        assert_eq!(controller.comments()[0].body, "any update?");
        assert!(controller.comment_draft.is_empty());
        assert_eq!(backend.rows(Collection::RequestComments).len(), 4);
        assert_eq!(notifier.drain()[0].message, "Comment added");
    }

    #[tokio::test]
    async fn failed_update_leaves_request_unchanged() {
        let (backend, notifier, mut controller) = loaded(Role::Backoffice).await;
        backend.fail_on(Collection::Requests, Operation::Update);
        assert!(controller.change_status(RequestStatus::Rejected).await.is_err());
        assert_eq!(controller.request().unwrap().status, RequestStatus::Submitted);
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn missing_request_notifies() {
        let backend = seeded();
        let notifier = Notifier::new();
        let mut controller = RequestDetailController::new(
            backend,
            notifier.clone(),
            profile("x", Role::Admin),
            "nope",
        );
        assert!(controller.load().await.is_err());
        assert!(controller.request().is_none());
        assert_eq!(notifier.drain().len(), 1);
    }
}
