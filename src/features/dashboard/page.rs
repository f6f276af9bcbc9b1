//! Dashboard Page

use super::controller::DashboardStats;
use crate::components::composite::status_badge::StatusBadge;
use crate::domain::request::RequestSummary;
use crate::domain::role::Role;
use crate::utils::format::format_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
    pub icon: &'static str,
}

impl StatCard {
    fn new(title: &'static str, value: usize, icon: &'static str) -> Self {
        Self { title, value, icon }
    }
}

/// One line of the recent requests card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentItem {
    pub id: String,
    pub title: String,
    pub badge: StatusBadge,
    /// "Type • Requester • Date"
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub cards: Vec<StatCard>,
    pub recent_title: &'static str,
    pub recent: Vec<RecentItem>,
    /// Shown instead of the list when nothing is recent
    pub empty_message: Option<&'static str>,
}

impl DashboardView {
    pub fn new(role: Role, stats: DashboardStats, recent: &[RequestSummary]) -> Self {
        let staff = role.is_staff();
        let cards = vec![
            StatCard::new("Total Requests", stats.total, "file-text"),
            StatCard::new("In Review", stats.in_review, "clock"),
            StatCard::new("Approved", stats.approved, "check-circle"),
            StatCard::new("Rejected", stats.rejected, "x-circle"),
        ];

        let recent: Vec<RecentItem> = recent
            .iter()
            .map(|r| {
                let mut meta = r.type_label().to_string();
                if let Some(name) = r.requester_name.as_deref().filter(|_| staff) {
                    meta.push_str(" • ");
                    meta.push_str(name);
                }
                meta.push_str(" • ");
                meta.push_str(&format_date(&r.created_at));
                RecentItem {
                    id: r.id.clone(),
                    title: r.title.clone(),
                    badge: StatusBadge::for_request(r.status),
                    meta,
                }
            })
            .collect();

        Self {
            heading: "Dashboard",
            subtitle: if staff {
                "Manage incoming requests across teams."
            } else {
                "Track your requests at a glance."
            },
            cards,
            recent_title: if staff { "Latest Requests" } else { "Your Recent Requests" },
            empty_message: recent.is_empty().then_some("No requests yet."),
            recent,
        }
    }
}
