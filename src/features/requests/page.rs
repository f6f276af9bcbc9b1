//! Requests Page
//!
//! Column set and header of the requests list.

use crate::components::composite::data_table::{CellValue, Column, DataTable, TableRow};
use crate::components::composite::status_badge::StatusBadge;
use crate::domain::request::RequestSummary;
use crate::domain::role::Role;
use crate::utils::format::format_date;

impl TableRow for RequestSummary {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "description" => self.description.as_deref().into(),
            "type" => self.type_name.as_deref().into(),
            "requester" => self.requester_name.as_deref().into(),
            "status" => self.status.label().into(),
            "team" => self.team_key.as_deref().into(),
            "created_at" => self.created_at.to_rfc3339().into(),
            _ => CellValue::Null,
        }
    }

    fn values(&self) -> Vec<CellValue> {
        ["title", "description", "type", "requester", "status", "team", "created_at"]
            .into_iter()
            .map(|key| self.field(key))
            .collect()
    }
}

/// Columns for `role`; the requester column is staff-only
pub fn request_columns(role: Role) -> Vec<Column<RequestSummary>> {
    let mut columns = vec![
        Column::new("title", "Title"),
        Column::new("type", "Type").render(|r: &RequestSummary| r.type_label().to_string()),
    ];
    if role.is_staff() {
        columns.push(Column::new("requester", "Requester").render(|r: &RequestSummary| {
            r.requester_name.clone().unwrap_or_else(|| "-".to_string())
        }));
    }
    columns.push(
        Column::new("status", "Status")
            .render(|r: &RequestSummary| StatusBadge::for_request(r.status).label),
    );
    columns.push(
        Column::new("created_at", "Created")
            .render(|r: &RequestSummary| format_date(&r.created_at)),
    );
    columns
}

/// Searchable request table with the list's empty message
pub fn requests_table(role: Role, page_size: usize) -> DataTable<RequestSummary> {
    DataTable::new(request_columns(role))
        .page_size(page_size)
        .searchable(true)
        .search_placeholder("Search requests...")
        .empty_message("No requests found.")
}

/// Page header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestsPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// "New Request" action, requesters only
    pub show_new_request: bool,
}

impl RequestsPage {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Requester => Self {
                title: "Requests",
                subtitle: "Track your submitted requests.",
                show_new_request: true,
            },
            Role::Admin | Role::Backoffice => Self {
                title: "Requests",
                subtitle: "Review and manage incoming requests.",
                show_new_request: false,
            },
        }
    }
}
