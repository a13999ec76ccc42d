//! Integration tests for the users API endpoints.
//!
//! These tests drive the real router with an in-memory user service,
//! so no database connection is required.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_api::api::{create_router, AppState};
use user_api::domain::{User, UserInput};
use user_api::errors::{AppError, AppResult};
use user_api::infra::Database;
use user_api::services::UserService;
use user_api::types::{Paginated, PaginationParams};

// =============================================================================
// In-memory user service
// =============================================================================

/// In-memory UserService with auto-increment ids that are never reused.
struct InMemoryUserService {
    users: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserService {
    fn new() -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    async fn list_users(
        &self,
        name: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<User>> {
        let users = self.users.lock().unwrap();
        let matched: Vec<User> = users
            .values()
            .filter(|u| match &name {
                Some(name) => u.name.as_deref() == Some(name.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        let total = matched.len() as u64;
        let data: Vec<User> = matched
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.users
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create_user(&self, input: UserInput) -> AppResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            name: input.name,
            email: input.email,
        };
        self.users.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }

    async fn replace_user(&self, id: i64, input: UserInput) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&id) {
            return Err(AppError::NotFound);
        }
        let user = User {
            id,
            name: input.name,
            email: input.email,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

// =============================================================================
// Test helpers
// =============================================================================

/// Build the full application router over the in-memory service.
fn test_app() -> Router {
    test_app_with_database(MockDatabase::new(DatabaseBackend::Postgres))
}

/// Build the router with a prepared mock database (for health checks).
fn test_app_with_database(mock: MockDatabase) -> Router {
    let database = Arc::new(Database::from_connection(mock.into_connection()));
    let state = AppState::new(Arc::new(InMemoryUserService::new()), database);
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome_banner() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Welcome to User API");
}

#[tokio::test]
async fn test_health_reports_healthy_database() {
    let app = test_app_with_database(MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }]));

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degrades_when_database_unreachable() {
    let app = test_app_with_database(MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        ))]));

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let app = test_app();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Alice", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) =
        send_json(&app, Method::GET, &format!("/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Alice");
    assert_eq!(fetched["email"], "alice@example.com");
}

#[tokio::test]
async fn test_users_crud_end_to_end() {
    let app = test_app();

    // Create Bob; the first assigned id is 1
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Bob", "email": "bob@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    // Fetch it back
    let (status, fetched) = send_json(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"id": 1, "name": "Bob", "email": "bob@x.com"}));

    // Delete it; empty success
    let (status, body) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    // Gone now
    let (status, _) = send_json(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/users/12345", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let app = test_app();

    let (_, created) = send_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Carol", "email": "carol@example.com"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (first, _) = send(&app, Method::DELETE, &format!("/users/{}", id), None).await;
    let (second, _) = send(&app, Method::DELETE, &format!("/users/{}", id), None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let app = test_app();

    let mut ids = Vec::new();
    for i in 0..3 {
        let (status, created) = send_json(
            &app,
            Method::POST,
            "/users",
            Some(json!({"name": format!("User {}", i), "email": null})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(created["id"].as_i64().unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_name_filter_matches_exactly() {
    let app = test_app();

    for (name, email) in [("Bob", "bob@x.com"), ("Bobby", "bobby@x.com")] {
        send_json(
            &app,
            Method::POST,
            "/users",
            Some(json!({"name": name, "email": email})),
        )
        .await;
    }

    // Exact match only; "Bobby" must not show up
    let (status, page) = send_json(&app, Method::GET, "/users?name=Bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["email"], "bob@x.com");
}

#[tokio::test]
async fn test_name_filter_with_no_matches_returns_empty_page() {
    let app = test_app();

    let (status, page) = send_json(&app, Method::GET, "/users?name=nobody", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["meta"]["total"], 0);
}

#[tokio::test]
async fn test_replace_overwrites_whole_record() {
    let app = test_app();

    let (_, created) = send_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Alice", "email": "alice@example.com"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Omitted fields are replaced too; no partial-update semantics
    let (status, replaced) = send_json(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(json!({"name": "Alicia"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Alicia");
    assert_eq!(replaced["email"], Value::Null);

    let (_, fetched) = send_json(&app, Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(fetched["email"], Value::Null);
}

#[tokio::test]
async fn test_replace_unknown_id_returns_not_found() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/users/999",
        Some(json!({"name": "Nobody", "email": null})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_returns_bad_request() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_is_paginated() {
    let app = test_app();

    for i in 0..3 {
        send_json(
            &app,
            Method::POST,
            "/users",
            Some(json!({"name": format!("User {}", i), "email": null})),
        )
        .await;
    }

    let (status, page) =
        send_json(&app, Method::GET, "/users?page=2&per_page=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["meta"]["page"], 2);
    assert_eq!(page["meta"]["per_page"], 2);
    assert_eq!(page["meta"]["total"], 3);
    assert_eq!(page["meta"]["total_pages"], 2);
}
