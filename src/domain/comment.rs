//! Comment - Discussion on a Request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `request_comments` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub request_id: String,
    #[serde(default)]
    pub author_id: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub request_id: String,
    pub author_id: String,
    pub body: String,
}

/// Comment with its author's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: String,
    pub body: String,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
