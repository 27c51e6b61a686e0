use std::collections::HashMap;

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath},
    models::{Actor, CreateRequest, DecisionPayload, Request, RequestResponse, StatusFilter},
    services::StatusCounts,
    state::AppState,
    types::{RequestId, UserId},
};

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct RequestListQuery {
    /// `all` (default) or one of the five statuses.
    pub status: Option<String>,
}

impl RequestListQuery {
    fn filter(&self) -> Result<StatusFilter, AppError> {
        self.status
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|_| AppError::Validation(vec!["status: unknown_status".into()]))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestOverviewResponse {
    pub requests: Vec<RequestResponse>,
    pub counts: StatusCounts,
    pub filter: String,
}

/// Plain array of requests matching the filter, in creation order.
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<Vec<RequestResponse>>, AppError> {
    let requests = state.lifecycle.list(&actor, query.filter()?).await?;
    let names = usernames(&state).await?;
    Ok(Json(
        requests
            .into_iter()
            .map(|request| respond(request, &names))
            .collect(),
    ))
}

pub async fn request_overview(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<RequestOverviewResponse>, AppError> {
    let overview = state.lifecycle.overview(&actor, query.filter()?).await?;
    let names = usernames(&state).await?;

    Ok(Json(RequestOverviewResponse {
        requests: overview
            .requests
            .into_iter()
            .map(|request| respond(request, &names))
            .collect(),
        counts: overview.counts,
        filter: overview.filter.to_string(),
    }))
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiJson(payload): ApiJson<CreateRequest>,
) -> Result<(StatusCode, Json<RequestResponse>), AppError> {
    let created = state.lifecycle.create(&actor, payload).await?;
    let names = usernames(&state).await?;
    Ok((StatusCode::CREATED, Json(respond(created, &names))))
}

pub async fn get_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(request_id): ApiPath<RequestId>,
) -> Result<Json<RequestResponse>, AppError> {
    let request = state.lifecycle.get(&actor, request_id).await?;
    let names = usernames(&state).await?;
    Ok(Json(respond(request, &names)))
}

pub async fn decide_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(request_id): ApiPath<RequestId>,
    ApiJson(payload): ApiJson<DecisionPayload>,
) -> Result<Json<RequestResponse>, AppError> {
    let updated = state
        .lifecycle
        .approve_or_reject(&actor, request_id, payload.status)
        .await?;
    let names = usernames(&state).await?;
    Ok(Json(respond(updated, &names)))
}

pub async fn action_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(request_id): ApiPath<RequestId>,
) -> Result<Json<RequestResponse>, AppError> {
    let updated = state.lifecycle.action(&actor, request_id).await?;
    let names = usernames(&state).await?;
    Ok(Json(respond(updated, &names)))
}

pub async fn close_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    ApiPath(request_id): ApiPath<RequestId>,
) -> Result<Json<RequestResponse>, AppError> {
    let updated = state.lifecycle.close(&actor, request_id).await?;
    let names = usernames(&state).await?;
    Ok(Json(respond(updated, &names)))
}

async fn usernames(state: &AppState) -> Result<HashMap<UserId, String>, AppError> {
    let employees = state.directory.list_employees().await?;
    Ok(employees
        .into_iter()
        .map(|employee| (employee.id, employee.username))
        .collect())
}

fn respond(request: Request, names: &HashMap<UserId, String>) -> RequestResponse {
    RequestResponse::from(request).with_usernames(|id| names.get(&id).cloned())
}
