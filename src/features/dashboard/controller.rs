//! Dashboard Controller
//!
//! Status counts and the most recent requests for the viewer.

use std::sync::Arc;

use crate::constants::RECENT_REQUESTS_LIMIT;
use crate::domain::profile::Profile;
use crate::domain::request::{Request, RequestStatus, RequestSummary};
use crate::error::Result;
use crate::features::requests::controller::{load_summaries, scoped_query};
use crate::services::collection::Collection;
use crate::services::data::list_as;
use crate::services::{DataService, Notifier};

/// Request counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub in_review: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl DashboardStats {
    pub fn from_requests(requests: &[Request]) -> Self {
        let count = |status: RequestStatus| requests.iter().filter(|r| r.status == status).count();
        Self {
            total: requests.len(),
            in_review: count(RequestStatus::InReview),
            approved: count(RequestStatus::Approved),
            rejected: count(RequestStatus::Rejected),
        }
    }
}

/// Dashboard page controller
pub struct DashboardController<B> {
    backend: Arc<B>,
    notifier: Notifier,
    profile: Profile,
    stats: Option<DashboardStats>,
    recent: Option<Vec<RequestSummary>>,
}

impl<B: DataService> DashboardController<B> {
    pub fn new(backend: Arc<B>, notifier: Notifier, profile: Profile) -> Self {
        Self {
            backend,
            notifier,
            profile,
            stats: None,
            recent: None,
        }
    }

    /// Fetch counts and recent requests together
    pub async fn load(&mut self) -> Result<()> {
        let backend = self.backend.as_ref();
        let query = scoped_query(&self.profile);
        let loaded = futures::try_join!(
            list_as::<Request, _>(backend, Collection::Requests, &query),
            load_summaries(backend, &self.profile, Some(RECENT_REQUESTS_LIMIT)),
        );
        match loaded {
            Ok((requests, recent)) => {
                self.stats = Some(DashboardStats::from_requests(&requests));
                self.recent = Some(recent);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Counts; zeros until loaded
    pub fn stats(&self) -> DashboardStats {
        self.stats.unwrap_or_default()
    }

    pub fn recent(&self) -> &[RequestSummary] {
        self.recent.as_deref().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.stats.is_none()
    }

    pub fn view(&self) -> super::page::DashboardView {
        super::page::DashboardView::new(self.profile.role, self.stats(), self.recent())
    }
}
