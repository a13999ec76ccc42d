//! User collection handlers.
//!
//! The explicit routing table for the `users` collection resource: each
//! path + method pair maps to one handler, and each handler is a direct
//! pass-through to the user service.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{User, UserInput};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginatedUsers, PaginationParams};

/// Name filter for the user list endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameFilter {
    /// Exact, case-sensitive name to match
    #[param(example = "John Doe")]
    pub name: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user).put(replace_user).delete(delete_user),
        )
}

/// List users, optionally filtered by exact name match
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(NameFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of users; empty page when nothing matches", body = PaginatedUsers)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<NameFilter>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Paginated<User>>> {
    let page = state.user_service.list_users(filter.name, pagination).await?;
    Ok(Json(page))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Create a new user; the storage layer assigns the ID
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed request body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UserInput>,
) -> AppResult<Created<User>> {
    let user = state.user_service.create_user(input).await?;
    Ok(Created(user))
}

/// Wholesale-replace an existing user record
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "User not found")
    )
)]
pub async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<UserInput>,
) -> AppResult<Json<User>> {
    let user = state.user_service.replace_user(id, input).await?;
    Ok(Json(user))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}
