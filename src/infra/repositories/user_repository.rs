//! User repository: the set of operations permitted against the users
//! collection, each a direct pass-through to storage.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserInput};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Name filtering is exact, case-sensitive equality; substring matching
/// is deliberately not offered.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// List users ordered by ID, optionally filtered by exact name match
    async fn list(
        &self,
        name: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Insert a new user; the storage sequence assigns the ID
    async fn create(&self, input: UserInput) -> AppResult<User>;

    /// Wholesale-replace the record with the given ID
    async fn replace(&self, id: i64, input: UserInput) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(
        &self,
        name: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut query = UserEntity::find().order_by_asc(user::Column::Id);

        if let Some(name) = name {
            query = query.filter(user::Column::Name.eq(name));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn create(&self, input: UserInput) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn replace(&self, id: i64, input: UserInput) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.email = Set(input.email);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
