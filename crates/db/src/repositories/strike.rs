//! Strike repository.
//!
//! Strikes are immutable: there is intentionally no update or delete here.

use std::sync::Arc;

use crate::entities::{strike, user, Strike};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use troophq_common::{AppError, AppResult};

/// Strike repository for database operations.
#[derive(Clone)]
pub struct StrikeRepository {
    db: Arc<DatabaseConnection>,
}

impl StrikeRepository {
    /// Create a new strike repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new strike.
    pub async fn create(&self, model: strike::ActiveModel) -> AppResult<strike::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a trooper's strikes with the issuing supervisor attached,
    /// newest first.
    pub async fn find_by_user_with_issuers(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<(strike::Model, Option<user::Model>)>> {
        Strike::find()
            .filter(strike::Column::UserId.eq(user_id))
            .order_by_desc(strike::Column::IssuedAt)
            .find_also_related(crate::entities::User)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all strikes ever issued.
    pub async fn count_all(&self) -> AppResult<u64> {
        Strike::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
