//! Work request records and the payloads that create or move them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    models::request_status::{Decision, RequestStatus},
    services::projection::{badge_class, status_label},
    types::{RequestId, UserId},
    validation::rules,
};

pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_DESCRIPTION_LENGTH: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
/// Stored representation of a work request.
pub struct Request {
    pub id: RequestId,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub assigned_to: UserId,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Derived from `status`, never stored on the domain value.
    pub fn manager_approved(&self) -> bool {
        self.status.manager_approved()
    }

    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to == user_id
    }
}

/// Fields of a request that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub assigned_to: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewRequest {
    /// Materializes the record the store persists for this draft.
    pub fn into_request(self, id: RequestId) -> Request {
        Request {
            id,
            title: self.title,
            description: self.description,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status: RequestStatus::PendingApproval,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload submitted by an employee to open a request.
pub struct CreateRequest {
    #[validate(
        custom(function = "rules::validate_not_blank"),
        length(max = MAX_TITLE_LENGTH)
    )]
    pub title: String,
    #[validate(
        custom(function = "rules::validate_not_blank"),
        length(max = MAX_DESCRIPTION_LENGTH)
    )]
    pub description: String,
    /// Employee who will carry out the work.
    pub assigned_to: UserId,
}

impl CreateRequest {
    /// Trims surrounding whitespace; limits apply to the trimmed text.
    pub fn normalized(self) -> Self {
        CreateRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            assigned_to: self.assigned_to,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Manager decision payload for `PUT /api/requests/{id}/approve`.
pub struct DecisionPayload {
    pub status: Decision,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Public-facing representation of a request returned by the API.
pub struct RequestResponse {
    pub id: RequestId,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub created_by_username: Option<String>,
    pub assigned_to: UserId,
    pub assigned_to_username: Option<String>,
    pub status: RequestStatus,
    pub status_label: String,
    pub badge_class: String,
    pub manager_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestResponse {
    /// Attaches directory usernames; unknown users stay `None`.
    pub fn with_usernames(
        mut self,
        lookup: impl Fn(UserId) -> Option<String>,
    ) -> Self {
        self.created_by_username = lookup(self.created_by);
        self.assigned_to_username = lookup(self.assigned_to);
        self
    }
}

impl From<Request> for RequestResponse {
    fn from(request: Request) -> Self {
        let manager_approved = request.manager_approved();
        RequestResponse {
            id: request.id,
            title: request.title,
            description: request.description,
            created_by: request.created_by,
            created_by_username: None,
            assigned_to: request.assigned_to,
            assigned_to_username: None,
            status: request.status,
            status_label: status_label(request.status).to_string(),
            badge_class: badge_class(request.status).to_string(),
            manager_approved,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
