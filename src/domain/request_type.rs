//! Request Type - Catalogue of Request Kinds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `request_types` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestType {
    pub id: String,
    pub name: String,
    /// Team that handles requests of this type
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Insert payload for a new request type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRequestType {
    pub name: String,
    pub team_key: String,
    pub active: bool,
}
