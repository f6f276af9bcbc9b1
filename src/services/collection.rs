//! Collections and Queries
//!
//! Names of the hosted collections and the small query language the portal
//! needs: equality filters, one ordering column and a row limit.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A row as exchanged with the data service
pub type Record = Map<String, Value>;

/// Hosted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Profiles,
    UserRoles,
    RequestTeams,
    RequestTypes,
    Requests,
    RequestComments,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Profiles,
        Collection::UserRoles,
        Collection::RequestTeams,
        Collection::RequestTypes,
        Collection::Requests,
        Collection::RequestComments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Profiles => "profiles",
            Collection::UserRoles => "user_roles",
            Collection::RequestTeams => "request_teams",
            Collection::RequestTypes => "request_types",
            Collection::Requests => "requests",
            Collection::RequestComments => "request_comments",
        }
    }

    /// Column identifying a row for `get` and `update`
    pub fn primary_key(&self) -> &'static str {
        match self {
            Collection::UserRoles => "user_id",
            Collection::RequestTeams => "key",
            _ => "id",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordering of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Filter/order/limit query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose `column` equals `value`
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `record` passes every filter
    pub fn matches(&self, record: &Record) -> bool {
        self.filters
            .iter()
            .all(|(column, value)| record.get(column).unwrap_or(&Value::Null) == value)
    }
}

/// Decode a record into a typed row
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

/// Encode a typed payload as a record
pub fn to_record<T: Serialize>(payload: &T) -> Result<Record> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::invalid(format!("expected an object payload, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_filters_compare_json_values() {
        let query = Query::new().eq("status", "submitted").eq("active", true);
        let Value::Object(hit) = json!({"status": "submitted", "active": true}) else {
            unreachable!()
        };
        let Value::Object(miss) = json!({"status": "submitted"}) else {
            unreachable!()
        };
        assert!(query.matches(&hit));
        assert!(!query.matches(&miss));
    }

    #[test]
    fn null_filter_matches_missing_column() {
        let query = Query::new().eq("team_key", Value::Null);
        assert!(query.matches(&Record::new()));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(to_record(&"plain").is_err());
    }
}
