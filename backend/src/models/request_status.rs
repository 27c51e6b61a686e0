//! Request lifecycle statuses and the values used to filter by them.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema, Default,
)]
#[serde(rename_all = "snake_case")]
/// Workflow status of a work request.
pub enum RequestStatus {
    /// Waiting for a manager decision.
    #[default]
    PendingApproval,
    /// Approved by a manager; the assignee may action it.
    Approved,
    /// Rejected by a manager. Terminal.
    Rejected,
    /// Worked on by the assignee; may be closed.
    Actioned,
    /// Closed by the assignee. Terminal.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request status `{0}`")]
pub struct UnknownStatus(pub String);

impl RequestStatus {
    /// Every status, in workflow order.
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::PendingApproval,
        RequestStatus::Approved,
        RequestStatus::Actioned,
        RequestStatus::Closed,
        RequestStatus::Rejected,
    ];

    pub fn db_value(&self) -> &'static str {
        match self {
            RequestStatus::PendingApproval => "pending_approval",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Actioned => "actioned",
            RequestStatus::Closed => "closed",
        }
    }

    /// True once the request has passed the approval gate.
    pub fn manager_approved(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::Actioned | RequestStatus::Closed
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Closed)
    }

    /// Whether the state machine has an edge from `self` to `next`.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::PendingApproval, RequestStatus::Approved)
                | (RequestStatus::PendingApproval, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Actioned)
                | (RequestStatus::Actioned, RequestStatus::Closed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.db_value())
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.db_value() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
/// Outcome of the approval gate chosen by a manager.
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Status filter used by list views: everything, or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.db_value(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
