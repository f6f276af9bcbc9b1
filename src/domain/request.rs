//! Request - Workflow Requests and Their Status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Submitted,
    InReview,
    Approved,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    /// Options of the status select, in display order
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Submitted,
        RequestStatus::InReview,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Cancelled,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "submitted",
            RequestStatus::InReview => "in_review",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "Submitted",
            RequestStatus::InReview => "In Review",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the `requests` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub requester_id: String,
    #[serde(default)]
    pub request_type_id: Option<String>,
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub requester_id: String,
    pub request_type_id: String,
    pub team_key: Option<String>,
    pub status: RequestStatus,
}

/// Request joined with its type name and requester name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub team_key: Option<String>,
    pub type_name: Option<String>,
    pub requester_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RequestSummary {
    pub fn new(
        request: Request,
        type_name: Option<String>,
        requester_name: Option<String>,
    ) -> Self {
        Self {
            id: request.id,
            title: request.title,
            description: request.description,
            status: request.status,
            team_key: request.team_key,
            type_name,
            requester_name,
            created_at: request.created_at,
        }
    }

    /// Type name, "Request" when the type is unknown
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or("Request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_and_label() {
        assert_eq!(RequestStatus::parse("in_review"), Some(RequestStatus::InReview));
        assert_eq!(RequestStatus::InReview.label(), "In Review");
        assert_eq!(RequestStatus::parse("pending"), None);
        let json = serde_json::to_value(RequestStatus::InReview).unwrap();
        assert_eq!(json, serde_json::json!("in_review"));
    }

    #[test]
    fn request_row_deserializes() {
        let row = serde_json::json!({
            "id": "r1",
            "title": "Laptop",
            "requester_id": "u1",
            "status": "approved",
            "created_at": "2024-03-01T10:00:00Z"
        });
        let request: Request = serde_json::from_value(row).unwrap();
        assert_eq!(request.status, RequestStatus::Approved);
        assert!(request.team_key.is_none());
    }
}
