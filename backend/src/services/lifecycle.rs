//! Request lifecycle engine.
//!
//! Owns every status change of a request. Each mutating operation checks the
//! caller's role, then the record, then the transition table, and finally asks
//! the store to apply the change with a compare-and-set so that two concurrent
//! transitions on the same request cannot both succeed.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use validator::Validate;

use crate::{
    models::{Actor, CreateRequest, Decision, NewRequest, Request, RequestStatus, StatusFilter},
    repositories::{EmployeeDirectory, RequestStore, StoreError},
    services::projection::{count_by_status, filter_by_status, StatusCounts},
    types::RequestId,
    validation,
};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Authorization(String),
    #[error("request {id} is {current} and cannot move to {attempted}")]
    InvalidState {
        id: RequestId,
        current: RequestStatus,
        attempted: RequestStatus,
    },
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Filtered list plus per-status counts, both taken from the same read.
#[derive(Debug, Clone)]
pub struct RequestOverview {
    pub requests: Vec<Request>,
    pub counts: StatusCounts,
    pub filter: StatusFilter,
}

#[derive(Clone)]
pub struct RequestLifecycle {
    store: Arc<dyn RequestStore>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl RequestLifecycle {
    pub fn new(store: Arc<dyn RequestStore>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { store, directory }
    }

    /// Opens a new request in `pending_approval`. Employees only.
    ///
    /// Title and description are trimmed before they are validated and stored.
    pub async fn create(
        &self,
        actor: &Actor,
        draft: CreateRequest,
    ) -> Result<Request, LifecycleError> {
        if !actor.is_employee() {
            return Err(LifecycleError::Authorization(
                "Only employees can create requests".into(),
            ));
        }

        let draft = draft.normalized();
        let mut errors = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation::messages(&e),
        };
        if self.directory.get_employee(draft.assigned_to).await?.is_none() {
            errors.push("assigned_to: unknown_employee".into());
        }
        if !errors.is_empty() {
            return Err(LifecycleError::Validation(errors));
        }

        let created = self
            .store
            .insert(NewRequest {
                title: draft.title,
                description: draft.description,
                created_by: actor.id,
                assigned_to: draft.assigned_to,
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| match err {
                StoreError::UnknownUser(id) if id == actor.id => {
                    tracing::warn!(actor_id = %actor.id, "creator has no user record");
                    LifecycleError::Authorization("Your account is not registered".into())
                }
                StoreError::UnknownUser(_) => {
                    LifecycleError::Validation(vec!["assigned_to: unknown_employee".into()])
                }
                other => LifecycleError::Store(other),
            })?;

        tracing::info!(
            request_id = %created.id,
            created_by = %created.created_by,
            assigned_to = %created.assigned_to,
            "request created"
        );
        Ok(created)
    }

    /// Records a manager's decision on a pending request.
    pub async fn approve_or_reject(
        &self,
        actor: &Actor,
        id: RequestId,
        decision: Decision,
    ) -> Result<Request, LifecycleError> {
        if !actor.is_manager() {
            return Err(LifecycleError::Authorization(
                "Only managers can approve or reject requests".into(),
            ));
        }
        let current = self.fetch(id).await?;
        self.transition(actor, current, decision.status()).await
    }

    /// Marks an approved request as worked on. Assignee only.
    pub async fn action(&self, actor: &Actor, id: RequestId) -> Result<Request, LifecycleError> {
        let current = self.fetch_for_assignee(actor, id, "action").await?;
        self.transition(actor, current, RequestStatus::Actioned).await
    }

    /// Closes an actioned request. Assignee only.
    pub async fn close(&self, actor: &Actor, id: RequestId) -> Result<Request, LifecycleError> {
        let current = self.fetch_for_assignee(actor, id, "close").await?;
        self.transition(actor, current, RequestStatus::Closed).await
    }

    /// Requests matching `filter`, in creation order. Visible to every role.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: StatusFilter,
    ) -> Result<Vec<Request>, LifecycleError> {
        tracing::debug!(actor_id = %actor.id, %filter, "listing requests");
        let all = self.store.list_all().await?;
        Ok(filter_by_status(&all, filter).into_iter().cloned().collect())
    }

    pub async fn overview(
        &self,
        actor: &Actor,
        filter: StatusFilter,
    ) -> Result<RequestOverview, LifecycleError> {
        tracing::debug!(actor_id = %actor.id, %filter, "loading request overview");
        let all = self.store.list_all().await?;
        let counts = count_by_status(&all);
        let requests = filter_by_status(&all, filter).into_iter().cloned().collect();
        Ok(RequestOverview {
            requests,
            counts,
            filter,
        })
    }

    pub async fn get(&self, actor: &Actor, id: RequestId) -> Result<Request, LifecycleError> {
        tracing::debug!(actor_id = %actor.id, request_id = %id, "loading request");
        self.fetch(id).await
    }

    async fn fetch(&self, id: RequestId) -> Result<Request, LifecycleError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("Request {} not found", id)))
    }

    async fn fetch_for_assignee(
        &self,
        actor: &Actor,
        id: RequestId,
        verb: &str,
    ) -> Result<Request, LifecycleError> {
        if !actor.is_employee() {
            return Err(LifecycleError::Authorization(format!(
                "Only employees can {} requests",
                verb
            )));
        }
        let current = self.fetch(id).await?;
        if !current.is_assigned_to(actor.id) {
            return Err(LifecycleError::Authorization(format!(
                "Only the assigned employee can {} this request",
                verb
            )));
        }
        Ok(current)
    }

    async fn transition(
        &self,
        actor: &Actor,
        current: Request,
        next: RequestStatus,
    ) -> Result<Request, LifecycleError> {
        if !current.status.can_transition_to(next) {
            tracing::debug!(
                request_id = %current.id,
                actor_id = %actor.id,
                current = %current.status,
                attempted = %next,
                terminal = current.status.is_terminal(),
                "status change rejected"
            );
            return Err(LifecycleError::InvalidState {
                id: current.id,
                current: current.status,
                attempted: next,
            });
        }

        let now = Utc::now();
        match self
            .store
            .compare_and_set_status(current.id, current.status, next, now)
            .await?
        {
            Some(updated) => {
                tracing::info!(
                    request_id = %updated.id,
                    actor_id = %actor.id,
                    from = %current.status,
                    to = %updated.status,
                    "request status changed"
                );
                Ok(updated)
            }
            None => {
                // Another transition committed between our read and the write.
                let latest = self.fetch(current.id).await?;
                tracing::warn!(
                    request_id = %current.id,
                    actor_id = %actor.id,
                    expected = %current.status,
                    found = %latest.status,
                    attempted = %next,
                    "concurrent status change rejected"
                );
                Err(LifecycleError::InvalidState {
                    id: latest.id,
                    current: latest.status,
                    attempted: next,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use chrono::Utc;

    use super::*;
    use crate::models::Employee;
    use crate::repositories::{MockEmployeeDirectory, MockRequestStore};
    use crate::types::UserId;

    fn pending(id: i64, assignee: i64) -> Request {
        NewRequest {
            title: "Printer jam".into(),
            description: "Third floor".into(),
            created_by: UserId::new(1),
            assigned_to: UserId::new(assignee),
            created_at: Utc::now(),
        }
        .into_request(RequestId::new(id))
    }

    fn engine(store: MockRequestStore, directory: MockEmployeeDirectory) -> RequestLifecycle {
        RequestLifecycle::new(Arc::new(store), Arc::new(directory))
    }

    #[tokio::test]
    async fn lost_compare_and_set_reports_current_status() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut store = MockRequestStore::new();
        let counter = reads.clone();
        store.expect_get_by_id().times(2).returning(move |id| {
            let mut request = pending(id.get(), 2);
            if counter.fetch_add(1, Ordering::SeqCst) > 0 {
                request.status = RequestStatus::Rejected;
            }
            Ok(Some(request))
        });
        store
            .expect_compare_and_set_status()
            .times(1)
            .returning(|_, _, _, _| Ok(None));

        let err = engine(store, MockEmployeeDirectory::new())
            .approve_or_reject(
                &Actor::manager(UserId::new(9)),
                RequestId::new(3),
                Decision::Approved,
            )
            .await
            .expect_err("conflict");

        assert!(matches!(
            err,
            LifecycleError::InvalidState {
                current: RequestStatus::Rejected,
                attempted: RequestStatus::Approved,
                ..
            }
        ));
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn store_failures_propagate_as_store_errors() {
        let mut store = MockRequestStore::new();
        store
            .expect_list_all()
            .returning(|| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let err = engine(store, MockEmployeeDirectory::new())
            .list(&Actor::employee(UserId::new(2)), StatusFilter::All)
            .await
            .expect_err("store down");
        assert!(matches!(err, LifecycleError::Store(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn role_is_checked_before_touching_the_store() {
        let store = MockRequestStore::new();
        let directory = MockEmployeeDirectory::new();
        let lifecycle = engine(store, directory);

        let err = lifecycle
            .approve_or_reject(
                &Actor::employee(UserId::new(2)),
                RequestId::new(1),
                Decision::Rejected,
            )
            .await
            .expect_err("employees cannot decide");
        assert!(matches!(err, LifecycleError::Authorization(_)));

        let err = lifecycle
            .action(&Actor::manager(UserId::new(9)), RequestId::new(1))
            .await
            .expect_err("managers cannot action");
        assert!(matches!(err, LifecycleError::Authorization(_)));
    }

    #[tokio::test]
    async fn create_collects_field_and_assignee_errors_together() {
        let mut directory = MockEmployeeDirectory::new();
        directory.expect_get_employee().returning(|_| Ok(None));
        let mut store = MockRequestStore::new();
        store.expect_insert().never();

        let err = engine(store, directory)
            .create(
                &Actor::employee(UserId::new(2)),
                CreateRequest {
                    title: "".into(),
                    description: "x".into(),
                    assigned_to: UserId::new(77),
                },
            )
            .await
            .expect_err("invalid draft");

        match err {
            LifecycleError::Validation(messages) => {
                assert!(messages.contains(&"title: blank".to_string()));
                assert!(messages.contains(&"assigned_to: unknown_employee".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_trims_text_and_stamps_creator() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_get_employee()
            .returning(|id| Ok(Some(Employee::new(id, "bob"))));
        let mut store = MockRequestStore::new();
        store
            .expect_insert()
            .withf(|draft| draft.title == "Desk" && draft.created_by == UserId::new(5))
            .returning(|draft| Ok(draft.into_request(RequestId::new(1))));

        let created = engine(store, directory)
            .create(
                &Actor::employee(UserId::new(5)),
                CreateRequest {
                    title: "  Desk ".into(),
                    description: "Needs a new chair".into(),
                    assigned_to: UserId::new(6),
                },
            )
            .await
            .expect("created");
        assert_eq!(created.status, RequestStatus::PendingApproval);
        assert_eq!(created.assigned_to, UserId::new(6));
    }

    #[tokio::test]
    async fn length_limits_apply_to_trimmed_text() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_get_employee()
            .returning(|id| Ok(Some(Employee::new(id, "bob"))));
        let mut store = MockRequestStore::new();
        store
            .expect_insert()
            .withf(|draft| draft.title.len() == 200 && !draft.title.starts_with(' '))
            .returning(|draft| Ok(draft.into_request(RequestId::new(1))));

        let before = Utc::now();
        let created = engine(store, directory)
            .create(
                &Actor::employee(UserId::new(5)),
                CreateRequest {
                    title: format!("  {}  ", "x".repeat(200)),
                    description: "Padded by the client".into(),
                    assigned_to: UserId::new(6),
                },
            )
            .await
            .expect("200 characters after trimming is within the limit");
        assert_eq!(created.title, "x".repeat(200));
        assert!(created.created_at >= before && created.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn unregistered_creator_is_an_authorization_error() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_get_employee()
            .returning(|id| Ok(Some(Employee::new(id, "bob"))));
        let mut store = MockRequestStore::new();
        store
            .expect_insert()
            .returning(|draft| Err(StoreError::UnknownUser(draft.created_by)));

        let err = engine(store, directory)
            .create(
                &Actor::employee(UserId::new(55)),
                CreateRequest {
                    title: "Desk".into(),
                    description: "Wobbly".into(),
                    assigned_to: UserId::new(6),
                },
            )
            .await
            .expect_err("creator missing from user table");
        assert!(matches!(err, LifecycleError::Authorization(_)));
    }

    #[tokio::test]
    async fn assignee_removed_before_insert_is_a_validation_error() {
        let mut directory = MockEmployeeDirectory::new();
        directory
            .expect_get_employee()
            .returning(|id| Ok(Some(Employee::new(id, "bob"))));
        let mut store = MockRequestStore::new();
        store
            .expect_insert()
            .returning(|draft| Err(StoreError::UnknownUser(draft.assigned_to)));

        let err = engine(store, directory)
            .create(
                &Actor::employee(UserId::new(5)),
                CreateRequest {
                    title: "Desk".into(),
                    description: "Wobbly".into(),
                    assigned_to: UserId::new(6),
                },
            )
            .await
            .expect_err("assignee vanished");
        assert!(
            matches!(err, LifecycleError::Validation(ref m) if m == &vec!["assigned_to: unknown_employee".to_string()])
        );
    }

    #[test]
    fn invalid_state_message_names_both_statuses() {
        let err = LifecycleError::InvalidState {
            id: RequestId::new(4),
            current: RequestStatus::Closed,
            attempted: RequestStatus::Actioned,
        };
        assert_eq!(
            err.to_string(),
            "request 4 is closed and cannot move to actioned"
        );
    }
}
