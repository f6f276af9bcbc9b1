//! Status Badge
//!
//! Maps a workflow status to its badge label and variant.

use crate::domain::request::RequestStatus;
use crate::theme::colors::{BadgeColors, PortalColors};

/// Visual variant of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
    AwaitingApproval,
    Approved,
    Rejected,
}

/// Every status a badge knows how to present
///
/// Request statuses are a subset; the remaining ones are used by request types
/// (active/inactive) and extended approval workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeStatus {
    Draft,
    Submitted,
    InReview,
    PreApproved,
    PendingLandlord,
    LandlordApproved,
    LandlordRejected,
    Rejected,
    Approved,
    Accepted,
    Cancelled,
    Active,
    Inactive,
}

impl BadgeStatus {
    /// Parse the wire form (`in_review`, `pre-approved`, ...)
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "draft" => BadgeStatus::Draft,
            "submitted" => BadgeStatus::Submitted,
            "in_review" => BadgeStatus::InReview,
            "pre-approved" => BadgeStatus::PreApproved,
            "pending-landlord" => BadgeStatus::PendingLandlord,
            "landlord-approved" => BadgeStatus::LandlordApproved,
            "landlord-rejected" => BadgeStatus::LandlordRejected,
            "rejected" => BadgeStatus::Rejected,
            "approved" => BadgeStatus::Approved,
            "accepted" => BadgeStatus::Accepted,
            "cancelled" => BadgeStatus::Cancelled,
            "active" => BadgeStatus::Active,
            "inactive" => BadgeStatus::Inactive,
            _ => return None,
        })
    }

    /// Configured label and variant
    pub fn config(self) -> (&'static str, BadgeVariant) {
        match self {
            BadgeStatus::Draft => ("Draft", BadgeVariant::Secondary),
            BadgeStatus::Submitted => ("Submitted", BadgeVariant::AwaitingApproval),
            BadgeStatus::InReview => ("In Review", BadgeVariant::AwaitingApproval),
            BadgeStatus::PreApproved => ("Pre-Approved", BadgeVariant::Default),
            BadgeStatus::PendingLandlord => ("Validation", BadgeVariant::AwaitingApproval),
            BadgeStatus::LandlordApproved => ("Accepted", BadgeVariant::Approved),
            BadgeStatus::LandlordRejected => ("Refused", BadgeVariant::Rejected),
            BadgeStatus::Rejected => ("Rejected", BadgeVariant::Rejected),
            BadgeStatus::Approved => ("Accepted", BadgeVariant::Approved),
            BadgeStatus::Accepted => ("Accepted", BadgeVariant::Approved),
            BadgeStatus::Cancelled => ("Cancelled", BadgeVariant::Secondary),
            BadgeStatus::Active => ("Active", BadgeVariant::Default),
            BadgeStatus::Inactive => ("Inactive", BadgeVariant::Secondary),
        }
    }
}

impl From<RequestStatus> for BadgeStatus {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Submitted => BadgeStatus::Submitted,
            RequestStatus::InReview => BadgeStatus::InReview,
            RequestStatus::Approved => BadgeStatus::Approved,
            RequestStatus::Rejected => BadgeStatus::Rejected,
            RequestStatus::Cancelled => BadgeStatus::Cancelled,
        }
    }
}

/// A rendered badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl StatusBadge {
    /// Badge with the configured label
    pub fn new(status: BadgeStatus) -> Self {
        let (label, variant) = status.config();
        Self {
            label: label.to_string(),
            variant,
        }
    }

    /// Badge with an explicit label overriding the configured one
    pub fn with_label(status: BadgeStatus, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::new(status)
        }
    }

    /// Badge for a request status, labelled the way request pages show it
    pub fn for_request(status: RequestStatus) -> Self {
        Self::with_label(status.into(), status.label())
    }

    pub fn colors(&self) -> BadgeColors {
        PortalColors::badge(self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_labels() {
        assert_eq!(StatusBadge::new(BadgeStatus::Approved).label, "Accepted");
        assert_eq!(StatusBadge::new(BadgeStatus::PendingLandlord).label, "Validation");
        assert_eq!(
            StatusBadge::new(BadgeStatus::InReview).variant,
            BadgeVariant::AwaitingApproval
        );
        assert_eq!(BadgeStatus::parse("landlord-rejected"), Some(BadgeStatus::LandlordRejected));
        assert_eq!(BadgeStatus::parse("unknown"), None);
    }

    #[test]
    fn request_pages_override_label() {
        let badge = StatusBadge::for_request(RequestStatus::Approved);
        assert_eq!(badge.label, "Approved");
        assert_eq!(badge.variant, BadgeVariant::Approved);
        assert_eq!(badge.colors().background.hex(), "#DCFAF5");
    }
}
