//! User service - Orchestrates user collection operations.
//!
//! There is no business logic here by design: every operation is a single
//! atomic pass-through to the repository, surfacing its result or failure
//! signal unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserInput};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users, optionally filtered by exact name match
    async fn list_users(
        &self,
        name: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// Create a new user with a freshly assigned ID
    async fn create_user(&self, input: UserInput) -> AppResult<User>;

    /// Wholesale-replace an existing user record
    async fn replace_user(&self, id: i64, input: UserInput) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(
        &self,
        name: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<User>> {
        let (users, total) = self.repo.list(name, params.clone()).await?;
        Ok(Paginated::new(users, params.page, params.limit(), total))
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, input: UserInput) -> AppResult<User> {
        self.repo.create(input).await
    }

    async fn replace_user(&self, id: i64, input: UserInput) -> AppResult<User> {
        self.repo.replace(id, input).await
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
