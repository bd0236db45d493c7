//! Incident report service.
//!
//! Submission is gated on the author being approved; review drives the
//! report status machine `pending -> approved | rejected`. Reviews are
//! one-shot: once a report leaves `pending` it cannot be re-reviewed.

use sea_orm::Set;
use serde::Deserialize;
use troophq_common::{AppError, AppResult, IdGenerator};
use troophq_db::{
    entities::{
        report::{self, ReportStatus},
        user::{self, UserStatus},
    },
    repositories::{ReportRepository, UserRepository},
};
use validator::Validate;

/// Report service.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for submitting a new incident report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportInput {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,

    #[serde(deserialize_with = "deserialize_incident_date")]
    pub incident_date: chrono::DateTime<chrono::FixedOffset>,

    pub location: Option<String>,
}

/// Accepts either an RFC 3339 timestamp or a plain `YYYY-MM-DD` date,
/// which is what the dashboard's date picker submits. Date-only values
/// resolve to midnight UTC.
fn deserialize_incident_date<'de, D>(
    deserializer: D,
) -> Result<chrono::DateTime<chrono::FixedOffset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt);
    }

    raw.parse::<chrono::NaiveDate>()
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().into())
        .map_err(serde::de::Error::custom)
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub fn new(report_repo: ReportRepository, user_repo: UserRepository) -> Self {
        Self {
            report_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a new report. Only approved users may submit.
    pub async fn submit(&self, user_id: &str, input: SubmitReportInput) -> AppResult<report::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;

        if user.status != UserStatus::Approved {
            return Err(AppError::Forbidden(
                "Only approved troopers can submit reports".to_string(),
            ));
        }

        input.validate()?;

        let now = chrono::Utc::now();
        let model = report::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            title: Set(input.title),
            description: Set(input.description),
            incident_date: Set(input.incident_date),
            location: Set(input.location),
            status: Set(ReportStatus::Pending),
            reviewed_by: Set(None),
            review_notes: Set(None),
            reviewed_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        self.report_repo.create(model).await
    }

    /// List the caller's own reports, newest first.
    pub async fn my_reports(&self, user_id: &str) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_by_user(user_id).await
    }

    /// List pending reports with authors attached, newest first.
    pub async fn pending_reports(
        &self,
    ) -> AppResult<Vec<(report::Model, Option<user::Model>)>> {
        self.report_repo.find_pending_with_authors().await
    }

    /// Review a pending report, recording reviewer, notes, and timestamp.
    ///
    /// `outcome` must be `approved` or `rejected`; notes are mandatory for
    /// a rejection. Reviews are terminal, and a supervisor cannot review
    /// their own report.
    pub async fn review(
        &self,
        supervisor_id: &str,
        report_id: &str,
        outcome: &str,
        notes: Option<String>,
    ) -> AppResult<report::Model> {
        let status = parse_outcome(outcome)?;

        if status == ReportStatus::Rejected
            && notes.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Review notes are required when rejecting a report".to_string(),
            ));
        }

        let report = self.report_repo.get_by_id(report_id).await?;

        if report.user_id == supervisor_id {
            return Err(AppError::Forbidden(
                "Supervisors cannot review their own reports".to_string(),
            ));
        }

        if report.status != ReportStatus::Pending {
            return Err(AppError::InvalidState(
                "Report has already been reviewed".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let mut model: report::ActiveModel = report.into();
        model.status = Set(status);
        model.reviewed_by = Set(Some(supervisor_id.to_string()));
        model.review_notes = Set(notes);
        model.reviewed_at = Set(Some(now.into()));
        model.updated_at = Set(Some(now.into()));

        let report = self.report_repo.update(model).await?;

        tracing::info!(
            report_id = %report.id,
            supervisor_id,
            outcome = status.as_str(),
            "Report reviewed"
        );

        Ok(report)
    }
}

fn parse_outcome(outcome: &str) -> AppResult<ReportStatus> {
    match outcome {
        "approved" => Ok(ReportStatus::Approved),
        "rejected" => Ok(ReportStatus::Rejected),
        _ => Err(AppError::Validation(
            "Invalid status. Must be 'approved' or 'rejected'".to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use troophq_db::entities::user::UserRole;

    fn test_user(id: &str, status: UserStatus) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: "$argon2id$test".to_string(),
            name: "Test Trooper".to_string(),
            badge_number: format!("B-{id}"),
            role: UserRole::Trooper,
            rank: None,
            profile_image_url: None,
            status,
            denial_reason: None,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn pending_report(id: &str, user_id: &str) -> report::Model {
        report::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Speeding stop".to_string(),
            description: "Vehicle clocked at 95 in a 60 zone on Route 9.".to_string(),
            incident_date: Utc::now().into(),
            location: Some("Route 9, mile 42".to_string()),
            status: ReportStatus::Pending,
            reviewed_by: None,
            review_notes: None,
            reviewed_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> ReportService {
        let db = Arc::new(db);
        ReportService::new(
            ReportRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    fn valid_input() -> SubmitReportInput {
        SubmitReportInput {
            title: "Speeding stop".to_string(),
            description: "Vehicle clocked at 95 in a 60 zone on Route 9.".to_string(),
            incident_date: Utc::now().into(),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_submit_rejected_for_pending_user() {
        let author = test_user("user1", UserStatus::Pending);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[author]])
            .into_connection();

        let service = service_with(db);
        let result = service.submit("user1", valid_input()).await;

        match result {
            Err(AppError::Forbidden(msg)) => {
                assert_eq!(msg, "Only approved troopers can submit reports");
            }
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_rejected_for_denied_user() {
        let author = test_user("user1", UserStatus::Denied);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[author]])
            .into_connection();

        let service = service_with(db);
        let result = service.submit("user1", valid_input()).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_submit_validates_description_length() {
        let author = test_user("user1", UserStatus::Approved);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[author]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .submit(
                "user1",
                SubmitReportInput {
                    title: "Speeding stop".to_string(),
                    description: "too short".to_string(),
                    incident_date: Utc::now().into(),
                    location: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_creates_pending_report() {
        let author = test_user("user1", UserStatus::Approved);
        let created = pending_report("rep1", "user1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[author]])
            .append_query_results([[created]])
            .into_connection();

        let service = service_with(db);
        let report = service.submit("user1", valid_input()).await.unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.user_id, "user1");
    }

    #[test]
    fn test_submit_input_accepts_date_only_incident_date() {
        let input: SubmitReportInput = serde_json::from_str(
            r#"{"title":"Speeding stop","description":"Vehicle clocked at 95 in a 60 zone on Route 9.","incidentDate":"2024-06-01"}"#,
        )
        .unwrap();

        assert_eq!(
            input.incident_date.to_rfc3339(),
            "2024-06-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_submit_input_accepts_rfc3339_incident_date() {
        let input: SubmitReportInput = serde_json::from_str(
            r#"{"title":"Speeding stop","description":"Vehicle clocked at 95 in a 60 zone on Route 9.","incidentDate":"2024-06-01T14:30:00-05:00"}"#,
        )
        .unwrap();

        assert_eq!(
            input.incident_date.to_rfc3339(),
            "2024-06-01T14:30:00-05:00"
        );
    }

    #[test]
    fn test_submit_input_rejects_unparseable_incident_date() {
        let result = serde_json::from_str::<SubmitReportInput>(
            r#"{"title":"Speeding stop","description":"Vehicle clocked at 95 in a 60 zone on Route 9.","incidentDate":"last tuesday"}"#,
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_review_invalid_outcome() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = service_with(db);
        let result = service.review("sup1", "rep1", "escalated", None).await;

        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Invalid status. Must be 'approved' or 'rejected'");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_review_reject_requires_notes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = service_with(db);
        let result = service.review("sup1", "rep1", "rejected", None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);
        let result = service
            .review("sup1", "rep1", "rejected", Some("  ".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_review_approve_notes_optional() {
        let target = pending_report("rep1", "user1");
        let reviewed = report::Model {
            status: ReportStatus::Approved,
            reviewed_by: Some("sup1".to_string()),
            reviewed_at: Some(Utc::now().into()),
            ..target.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![target], vec![reviewed]])
            .into_connection();

        let service = service_with(db);
        let report = service.review("sup1", "rep1", "approved", None).await.unwrap();

        assert_eq!(report.status, ReportStatus::Approved);
        assert_eq!(report.reviewed_by.as_deref(), Some("sup1"));
    }

    #[tokio::test]
    async fn test_review_own_report_forbidden() {
        let target = pending_report("rep1", "sup1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[target]])
            .into_connection();

        let service = service_with(db);
        let result = service.review("sup1", "rep1", "approved", None).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_review_is_terminal() {
        let mut target = pending_report("rep1", "user1");
        target.status = ReportStatus::Approved;
        target.reviewed_by = Some("sup2".to_string());
        target.reviewed_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[target]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .review("sup1", "rep1", "rejected", Some("second opinion".to_string()))
            .await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_review_missing_report() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<report::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.review("sup1", "ghost", "approved", None).await;

        assert!(matches!(result, Err(AppError::ReportNotFound)));
    }
}
