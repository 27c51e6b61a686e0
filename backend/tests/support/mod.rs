#![allow(dead_code)]
use std::{env, sync::Arc};

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use requestflow_backend::{
    config::{Config, StoreBackend},
    models::{Actor, Employee, Role},
    repositories::{EmployeeDirectory, InMemoryEmployeeDirectory, InMemoryRequestStore, RequestStore},
    routes,
    services::RequestLifecycle,
    state::AppState,
    types::UserId,
};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub const EMPLOYEE_A: UserId = UserId::new(1);
pub const EMPLOYEE_B: UserId = UserId::new(2);
pub const EMPLOYEE_C: UserId = UserId::new(3);
pub const MANAGER: UserId = UserId::new(10);

pub fn test_config() -> Config {
    Config {
        database_url: test_database_url().unwrap_or_default(),
        jwt_secret: "a_secure_token_that_is_long_enough_123".into(),
        bind_addr: "127.0.0.1:0".into(),
        store_backend: StoreBackend::Memory,
    }
}

pub fn test_database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL").ok()
}

pub fn directory() -> Arc<InMemoryEmployeeDirectory> {
    Arc::new(InMemoryEmployeeDirectory::new(vec![
        Employee::new(EMPLOYEE_A, "alice"),
        Employee::new(EMPLOYEE_B, "bob"),
        Employee::new(EMPLOYEE_C, "carol"),
    ]))
}

pub fn employee(id: UserId) -> Actor {
    Actor::employee(id)
}

pub fn manager() -> Actor {
    Actor::manager(MANAGER)
}

/// Engine over a fresh in-memory store and the three-employee roster.
pub fn memory_lifecycle() -> RequestLifecycle {
    let store: Arc<dyn RequestStore> = Arc::new(InMemoryRequestStore::new());
    let directory: Arc<dyn EmployeeDirectory> = directory();
    RequestLifecycle::new(store, directory)
}

/// Full router over a fresh in-memory store.
pub fn memory_app() -> Router {
    let directory: Arc<dyn EmployeeDirectory> = directory();
    let store: Arc<dyn RequestStore> = Arc::new(InMemoryRequestStore::new());
    let config = test_config();
    let lifecycle = RequestLifecycle::new(store, directory.clone());
    routes::router(AppState::new(lifecycle, directory, config))
}

/// Signs an HS256 token with the claims the auth middleware reads.
pub fn token_for(actor: &Actor) -> String {
    let claims = json!({
        "sub": actor.id.to_string(),
        "role": actor.role.as_str(),
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_config().jwt_secret.as_ref()),
    )
    .expect("create token")
}

pub fn json_request(method: Method, uri: &str, actor: &Actor, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(actor)));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Connects to `TEST_DATABASE_URL` and applies migrations; `None` when unset.
pub async fn test_pool() -> Option<PgPool> {
    let url = test_database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    Some(pool)
}

pub async fn seed_user(pool: &PgPool, role: Role) -> UserId {
    let username = format!("{}-{}", role.as_str(), uuid::Uuid::new_v4());
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&username)
    .bind(format!("{}@example.com", username))
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .expect("seed user");
    UserId::new(id)
}
