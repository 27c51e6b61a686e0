//! Read-side projections over a set of requests.
//!
//! Everything here is a pure function of its input: no I/O, no mutation. List
//! views recompute these on every read of the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Request, RequestStatus, StatusFilter};

/// Subsequence of `requests` matching `filter`, in the input order.
pub fn filter_by_status(requests: &[Request], filter: StatusFilter) -> Vec<&Request> {
    requests
        .iter()
        .filter(|request| filter.matches(request.status))
        .collect()
}

/// Number of requests per status, plus the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub all: usize,
    pub pending_approval: usize,
    pub approved: usize,
    pub actioned: usize,
    pub closed: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(status) => *self.slot(status),
        }
    }

    fn slot(&self, status: RequestStatus) -> &usize {
        match status {
            RequestStatus::PendingApproval => &self.pending_approval,
            RequestStatus::Approved => &self.approved,
            RequestStatus::Actioned => &self.actioned,
            RequestStatus::Closed => &self.closed,
            RequestStatus::Rejected => &self.rejected,
        }
    }

    fn slot_mut(&mut self, status: RequestStatus) -> &mut usize {
        match status {
            RequestStatus::PendingApproval => &mut self.pending_approval,
            RequestStatus::Approved => &mut self.approved,
            RequestStatus::Actioned => &mut self.actioned,
            RequestStatus::Closed => &mut self.closed,
            RequestStatus::Rejected => &mut self.rejected,
        }
    }
}

pub fn count_by_status(requests: &[Request]) -> StatusCounts {
    requests
        .iter()
        .fold(StatusCounts::default(), |mut counts, request| {
            counts.all += 1;
            *counts.slot_mut(request.status) += 1;
            counts
        })
}

/// Display label for a status.
pub fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::PendingApproval => "Pending Approval",
        RequestStatus::Approved => "Approved",
        RequestStatus::Rejected => "Rejected",
        RequestStatus::Actioned => "Actioned",
        RequestStatus::Closed => "Closed",
    }
}

/// CSS class of the status badge rendered by web clients.
pub fn badge_class(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::PendingApproval => "status-pending",
        RequestStatus::Approved => "status-approved",
        RequestStatus::Rejected => "status-rejected",
        RequestStatus::Actioned => "status-actioned",
        RequestStatus::Closed => "status-closed",
    }
}
