//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use taskboard_api::auth::jwt::JwtConfig;
use taskboard_api::config::{LogFormat, ServerConfig};
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_db::{create_pool, run_migrations, DbPool, IN_MEMORY_URL};
use taskboard_events::EventBus;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-42";

/// Build a test `ServerConfig` with safe defaults and no database URL.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        password_min_length: 8,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = create_pool(IN_MEMORY_URL, 1).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: DbPool) -> Router {
    let state = AppState::new(pool, test_config(), Arc::new(EventBus::default()));
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user and their access token.
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Register `name` through the API (email `<name>@example.com`).
pub async fn register(app: &Router, name: &str) -> TestUser {
    let email = format!("{}@example.com", name.to_lowercase());
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["user"]["id"].as_i64().unwrap(),
        email,
        token: json["accessToken"].as_str().unwrap().to_string(),
    }
}

/// Create a project as `owner` and return its id.
pub async fn create_project(app: &Router, owner: &TestUser, team_leader_id: Option<i64>) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        json!({ "name": "Website", "teamLeaderId": team_leader_id }),
        &owner.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a task and return the response body's `data`.
pub async fn create_task(app: &Router, user: &TestUser, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/tasks", body, &user.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
