//! Profile approval workflow.
//!
//! Governs the user status machine: `pending -> approved` and
//! `pending -> denied`, both driven by supervisors. Transitions out of a
//! non-pending state fail explicitly rather than silently overwriting, and
//! a supervisor cannot act on their own profile.

use sea_orm::Set;
use troophq_common::{AppError, AppResult};
use troophq_db::{
    entities::user::{self, UserStatus},
    repositories::UserRepository,
};

/// Profile workflow service.
#[derive(Clone)]
pub struct ProfileService {
    user_repo: UserRepository,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// List users awaiting approval, newest first.
    pub async fn pending_profiles(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_pending().await
    }

    /// List approved troopers, alphabetical by name.
    pub async fn approved_troopers(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_approved_troopers().await
    }

    /// Approve a pending profile, recording the approver and timestamp.
    pub async fn approve(&self, supervisor_id: &str, user_id: &str) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;

        if user.id == supervisor_id {
            return Err(AppError::Forbidden(
                "Supervisors cannot approve their own profile".to_string(),
            ));
        }

        if user.status != UserStatus::Pending {
            return Err(AppError::InvalidState(
                "Profile has already been reviewed".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let mut model: user::ActiveModel = user.into();
        model.status = Set(UserStatus::Approved);
        model.approved_by = Set(Some(supervisor_id.to_string()));
        model.approved_at = Set(Some(now.into()));
        model.updated_at = Set(Some(now.into()));

        let user = self.user_repo.update(model).await?;

        tracing::info!(user_id = %user.id, supervisor_id, "Profile approved");

        Ok(user)
    }

    /// Deny a pending profile with a reason.
    pub async fn deny(
        &self,
        supervisor_id: &str,
        user_id: &str,
        reason: &str,
    ) -> AppResult<user::Model> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "Denial reason is required".to_string(),
            ));
        }

        let user = self.user_repo.get_by_id(user_id).await?;

        if user.id == supervisor_id {
            return Err(AppError::Forbidden(
                "Supervisors cannot deny their own profile".to_string(),
            ));
        }

        if user.status != UserStatus::Pending {
            return Err(AppError::InvalidState(
                "Profile has already been reviewed".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let mut model: user::ActiveModel = user.into();
        model.status = Set(UserStatus::Denied);
        model.denial_reason = Set(Some(reason.to_string()));
        model.updated_at = Set(Some(now.into()));

        let user = self.user_repo.update(model).await?;

        tracing::info!(user_id = %user.id, supervisor_id, "Profile denied");

        Ok(user)
    }
}
