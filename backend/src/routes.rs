use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs::ApiDoc, handlers, middleware, state::AppState};

/// Full HTTP surface: authenticated request and directory routes plus public API docs.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/api/requests",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route(
            "/api/requests/overview",
            get(handlers::requests::request_overview),
        )
        .route("/api/requests/{id}", get(handlers::requests::get_request))
        .route(
            "/api/requests/{id}/approve",
            put(handlers::requests::decide_request),
        )
        .route(
            "/api/requests/{id}/action",
            put(handlers::requests::action_request),
        )
        .route(
            "/api/requests/{id}/close",
            put(handlers::requests::close_request),
        )
        .route("/api/auth/employees", get(handlers::employees::list_employees))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ));

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(axum_middleware::from_fn(middleware::log_error_responses))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
