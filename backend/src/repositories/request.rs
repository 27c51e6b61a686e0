//! Request store trait and its PostgreSQL implementation.
//!
//! The lifecycle engine is the only caller. Status changes go through
//! [`RequestStore::compare_and_set_status`], which must apply the check and the
//! write as one atomic step so that at most one concurrent transition wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{NewRequest, Request, RequestStatus};
use crate::types::{RequestId, UserId};

const REQUEST_COLUMNS: &str =
    "id, title, description, created_by, assigned_to, status, created_at, updated_at";

/// Failure of the storage collaborator itself, as opposed to a rule violation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A referenced user has no row in the user table.
    #[error("user {0} is not registered")]
    UnknownUser(UserId),
}

/// Durable collection of request records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persist a new request and return it with its freshly assigned id.
    /// Fails with [`StoreError::UnknownUser`] when the creator or assignee has no user row.
    async fn insert(&self, request: NewRequest) -> Result<Request, StoreError>;

    /// Find a request by id.
    async fn get_by_id(&self, id: RequestId) -> Result<Option<Request>, StoreError>;

    /// Move a request from `expected` to `next` if, and only if, it is currently
    /// in `expected`. Returns `None` when the request is missing or its status
    /// no longer matches; the record is untouched in that case.
    async fn compare_and_set_status(
        &self,
        id: RequestId,
        expected: RequestStatus,
        next: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Request>, StoreError>;

    /// All requests in creation order.
    async fn list_all(&self) -> Result<Vec<Request>, StoreError>;
}

/// Request store backed by the `requests` table.
#[derive(Debug, Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn insert(&self, request: NewRequest) -> Result<Request, StoreError> {
        let status = RequestStatus::PendingApproval;
        let query = format!(
            "INSERT INTO requests (title, description, created_by, assigned_to, status, \
             manager_approved, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING {}",
            REQUEST_COLUMNS
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.created_by)
            .bind(request.assigned_to)
            .bind(status.db_value())
            .bind(status.manager_approved())
            .bind(request.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    if db.constraint() == Some("requests_assigned_to_fkey") {
                        StoreError::UnknownUser(request.assigned_to)
                    } else {
                        StoreError::UnknownUser(request.created_by)
                    }
                }
                other => StoreError::Database(other),
            })?;
        Ok(row)
    }

    async fn get_by_id(&self, id: RequestId) -> Result<Option<Request>, StoreError> {
        let query = format!("SELECT {} FROM requests WHERE id = $1", REQUEST_COLUMNS);
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn compare_and_set_status(
        &self,
        id: RequestId,
        expected: RequestStatus,
        next: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Request>, StoreError> {
        // Status and the approval flag change in the same statement.
        let query = format!(
            "UPDATE requests SET status = $1, manager_approved = $2, updated_at = $3 \
             WHERE id = $4 AND status = $5 RETURNING {}",
            REQUEST_COLUMNS
        );
        let row = sqlx::query_as::<_, Request>(&query)
            .bind(next.db_value())
            .bind(next.manager_approved())
            .bind(updated_at)
            .bind(id)
            .bind(expected.db_value())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Request>, StoreError> {
        let query = format!("SELECT {} FROM requests ORDER BY id ASC", REQUEST_COLUMNS);
        let rows = sqlx::query_as::<_, Request>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
