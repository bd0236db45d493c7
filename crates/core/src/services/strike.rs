//! Disciplinary strike service.
//!
//! Strike issuance is a guarded creation, not a state machine: the target
//! must exist and be approved at issuance time, and strikes are immutable
//! once written.

use sea_orm::Set;
use serde::Deserialize;
use troophq_common::{AppError, AppResult, IdGenerator};
use troophq_db::{
    entities::{
        strike,
        user::{self, UserStatus},
    },
    repositories::{StrikeRepository, UserRepository},
};
use validator::Validate;

/// Strike service.
#[derive(Clone)]
pub struct StrikeService {
    strike_repo: StrikeRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for issuing a strike.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueStrikeInput {
    pub user_id: String,

    #[validate(length(min = 5, message = "Reason must be at least 5 characters"))]
    pub reason: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
}

impl StrikeService {
    /// Create a new strike service.
    #[must_use]
    pub fn new(strike_repo: StrikeRepository, user_repo: UserRepository) -> Self {
        Self {
            strike_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Issue a strike against an approved trooper.
    pub async fn issue(
        &self,
        supervisor_id: &str,
        input: IssueStrikeInput,
    ) -> AppResult<strike::Model> {
        input.validate()?;

        if input.user_id == supervisor_id {
            return Err(AppError::Forbidden(
                "Supervisors cannot issue strikes against themselves".to_string(),
            ));
        }

        let target = self
            .user_repo
            .find_by_id(&input.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trooper not found".to_string()))?;

        if target.status != UserStatus::Approved {
            return Err(AppError::InvalidState(
                "Can only issue strikes to approved troopers".to_string(),
            ));
        }

        let model = strike::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(input.user_id),
            reason: Set(input.reason),
            description: Set(input.description),
            issued_by: Set(supervisor_id.to_string()),
            issued_at: Set(chrono::Utc::now().into()),
        };

        let strike = self.strike_repo.create(model).await?;

        tracing::info!(
            strike_id = %strike.id,
            user_id = %strike.user_id,
            supervisor_id,
            "Strike issued"
        );

        Ok(strike)
    }

    /// List the caller's own strikes with issuers attached, newest first.
    pub async fn my_strikes(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<(strike::Model, Option<user::Model>)>> {
        self.strike_repo.find_by_user_with_issuers(user_id).await
    }
}
