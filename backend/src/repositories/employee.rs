//! Read-only view of the employee directory.
//!
//! The directory is owned by the identity side of the system; this crate only
//! resolves assignees and lists who requests can be assigned to.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Employee;
use crate::repositories::request::StoreError;
use crate::types::UserId;

/// Lookup of assignable employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Resolve an employee by id. Managers and unknown ids resolve to `None`.
    async fn get_employee(&self, id: UserId) -> Result<Option<Employee>, StoreError>;

    /// Every assignable employee, ordered by username.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
}

/// Directory backed by the shared `users` table.
#[derive(Debug, Clone)]
pub struct PgEmployeeDirectory {
    pool: PgPool,
}

impl PgEmployeeDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for PgEmployeeDirectory {
    async fn get_employee(&self, id: UserId) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, Employee>(
            "SELECT id, username FROM users WHERE id = $1 AND LOWER(role) = 'employee'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, username FROM users WHERE LOWER(role) = 'employee' ORDER BY username, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
