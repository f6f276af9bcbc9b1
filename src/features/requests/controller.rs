//! Requests Controller
//!
//! Loads the request list scoped to the viewer's role and feeds the table.

use std::sync::Arc;

use ahash::AHashMap;

use super::page::{RequestsPage, requests_table};
use crate::components::composite::data_table::DataTable;
use crate::domain::profile::{Profile, ProfileRecord};
use crate::domain::request::{Request, RequestSummary};
use crate::domain::request_type::RequestType;
use crate::error::Result;
use crate::services::collection::{Collection, Query};
use crate::services::data::list_as;
use crate::services::{DataService, Notifier};

/// Newest-first query over the requests `profile` may see
pub fn scoped_query(profile: &Profile) -> Query {
    let query = Query::new().order_by("created_at", false);
    if profile.role.is_staff() {
        query
    } else {
        query.eq("requester_id", profile.id.as_str())
    }
}

/// Requests visible to `profile`, joined with type and requester names
///
/// Requester names are only looked up for staff.
pub async fn load_summaries<B>(
    backend: &B,
    profile: &Profile,
    limit: Option<usize>,
) -> Result<Vec<RequestSummary>>
where
    B: DataService + ?Sized,
{
    let mut query = scoped_query(profile);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    let all = Query::new();

    let (requests, types) = futures::try_join!(
        list_as::<Request, _>(backend, Collection::Requests, &query),
        list_as::<RequestType, _>(backend, Collection::RequestTypes, &all),
    )?;
    let type_names: AHashMap<String, String> =
        types.into_iter().map(|t| (t.id, t.name)).collect();

    let requester_names: AHashMap<String, String> = if profile.role.is_staff() {
        list_as::<ProfileRecord, _>(backend, Collection::Profiles, &all)
            .await?
            .into_iter()
            .filter_map(|p| p.full_name.map(|name| (p.id, name)))
            .collect()
    } else {
        AHashMap::new()
    };

    Ok(requests
        .into_iter()
        .map(|request| {
            let type_name = request
                .request_type_id
                .as_ref()
                .and_then(|id| type_names.get(id))
                .cloned();
            let requester_name = requester_names.get(&request.requester_id).cloned();
            RequestSummary::new(request, type_name, requester_name)
        })
        .collect())
}

/// Requests page controller
pub struct RequestsController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    profile: Profile,
    table: DataTable<RequestSummary>,
}

impl<B: DataService> RequestsController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier, profile: Profile, page_size: usize) -> Self {
        let table = requests_table(profile.role, page_size);
        Self {
            backend,
            notifier,
            profile,
            table,
        }
    }

    /// Fetch the rows; on failure the table keeps its previous rows
    pub async fn load(&mut self) -> Result<()> {
        match load_summaries(self.backend.as_ref(), &self.profile, None).await {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), role = %self.profile.role, "requests loaded");
                self.table.set_rows(rows);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn page(&self) -> RequestsPage {
        RequestsPage::for_role(self.profile.role)
    }

    pub fn table(&self) -> &DataTable<RequestSummary> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<RequestSummary> {
        &mut self.table
    }
}
