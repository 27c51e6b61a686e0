#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::requests::{RequestListQuery, RequestOverviewResponse},
    models::{CreateRequest, Decision, DecisionPayload, Employee, RequestResponse, RequestStatus},
    services::StatusCounts,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_requests_doc,
        request_overview_doc,
        create_request_doc,
        get_request_doc,
        decide_request_doc,
        action_request_doc,
        close_request_doc,
        list_employees_doc
    ),
    components(
        schemas(
            // requests
            CreateRequest,
            DecisionPayload,
            Decision,
            RequestStatus,
            RequestResponse,
            RequestListQuery,
            RequestOverviewResponse,
            StatusCounts,
            // directory
            Employee
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Requests", description = "Work request lifecycle"),
        (name = "Employees", description = "Assignable employees")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Requests matching the filter, in creation order", body = [RequestResponse]),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Requests"
)]
fn list_requests_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/overview",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Filtered requests with per-status counts", body = RequestOverviewResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Requests"
)]
fn request_overview_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created in pending_approval", body = RequestResponse),
        (status = 400, description = "Malformed body, blank or oversized text, or unknown assignee"),
        (status = 403, description = "Caller is not an employee")
    ),
    tag = "Requests"
)]
fn create_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, body = RequestResponse),
        (status = 404, description = "Unknown request")
    ),
    tag = "Requests"
)]
fn get_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/approve",
    params(("id" = i64, Path, description = "Request id")),
    request_body = DecisionPayload,
    responses(
        (status = 200, description = "Decision recorded", body = RequestResponse),
        (status = 403, description = "Caller is not a manager"),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request is no longer pending approval")
    ),
    tag = "Requests"
)]
fn decide_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/action",
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request actioned", body = RequestResponse),
        (status = 403, description = "Caller is not the assignee"),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request is not approved")
    ),
    tag = "Requests"
)]
fn action_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/close",
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request closed", body = RequestResponse),
        (status = 403, description = "Caller is not the assignee"),
        (status = 404, description = "Unknown request"),
        (status = 409, description = "Request is not actioned")
    ),
    tag = "Requests"
)]
fn close_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/employees",
    responses((status = 200, body = [Employee])),
    tag = "Employees"
)]
fn list_employees_doc() {}
