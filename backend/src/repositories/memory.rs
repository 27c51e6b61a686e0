//! In-memory implementations of the request store and employee directory.
//!
//! Used by the `memory` store backend and by tests. All state is lost on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{Employee, NewRequest, Request, RequestStatus};
use crate::repositories::{
    employee::EmployeeDirectory,
    request::{RequestStore, StoreError},
};
use crate::types::{RequestId, UserId};

#[derive(Debug)]
struct MemoryState {
    /// Kept sorted by id, which is also creation order.
    requests: Vec<Request>,
    next_id: i64,
}

/// Request store holding records in a `Vec` behind a `RwLock`.
///
/// Every mutation happens under the write guard, so the status check in
/// `compare_and_set_status` and the write that follows cannot interleave with
/// another transition on the same request.
#[derive(Debug)]
pub struct InMemoryRequestStore {
    inner: RwLock<MemoryState>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::with_requests(Vec::new())
    }

    /// Seeds the store with existing records; ids keep counting after the largest one.
    pub fn with_requests(mut requests: Vec<Request>) -> Self {
        requests.sort_by_key(|request| request.id);
        let next_id = requests.last().map_or(1, |request| request.id.get() + 1);
        Self {
            inner: RwLock::new(MemoryState { requests, next_id }),
        }
    }

    fn position(requests: &[Request], id: RequestId) -> Option<usize> {
        requests.binary_search_by_key(&id, |request| request.id).ok()
    }
}

impl Default for InMemoryRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn insert(&self, request: NewRequest) -> Result<Request, StoreError> {
        let mut state = self.inner.write().await;
        let id = RequestId::new(state.next_id);
        state.next_id += 1;
        let record = request.into_request(id);
        state.requests.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: RequestId) -> Result<Option<Request>, StoreError> {
        let state = self.inner.read().await;
        Ok(Self::position(&state.requests, id).map(|idx| state.requests[idx].clone()))
    }

    async fn compare_and_set_status(
        &self,
        id: RequestId,
        expected: RequestStatus,
        next: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Request>, StoreError> {
        let mut state = self.inner.write().await;
        let Some(idx) = Self::position(&state.requests, id) else {
            return Ok(None);
        };
        let record = &mut state.requests[idx];
        if record.status != expected {
            return Ok(None);
        }
        record.status = next;
        record.updated_at = updated_at;
        Ok(Some(record.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Request>, StoreError> {
        let state = self.inner.read().await;
        Ok(state.requests.clone())
    }
}

/// Fixed employee roster.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: Vec<Employee>,
}

impl InMemoryEmployeeDirectory {
    pub fn new(mut employees: Vec<Employee>) -> Self {
        employees.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        Self { employees }
    }

    /// Roster served when running without a database.
    pub fn demo() -> Self {
        Self::new(vec![
            Employee::new(UserId::new(101), "Test Employee 1"),
            Employee::new(UserId::new(102), "Test Employee 2"),
        ])
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn get_employee(&self, id: UserId) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.clone())
    }
}
