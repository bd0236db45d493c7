//! User repository.

use std::sync::Arc;

use crate::entities::{
    user::{self, UserRole, UserStatus},
    User,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use troophq_common::{AppError, AppResult};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by badge number.
    pub async fn find_by_badge_number(&self, badge_number: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::BadgeNumber.eq(badge_number))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get users awaiting approval, newest first.
    pub async fn find_pending(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .filter(user::Column::Status.eq(UserStatus::Pending))
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get approved troopers, alphabetical by name.
    pub async fn find_approved_troopers(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .filter(user::Column::Status.eq(UserStatus::Approved))
            .filter(user::Column::Role.eq(UserRole::Trooper))
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count approved troopers.
    pub async fn count_approved_troopers(&self) -> AppResult<u64> {
        User::find()
            .filter(user::Column::Status.eq(UserStatus::Approved))
            .filter(user::Column::Role.eq(UserRole::Trooper))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count users awaiting approval.
    pub async fn count_pending(&self) -> AppResult<u64> {
        User::find()
            .filter(user::Column::Status.eq(UserStatus::Pending))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
