//! API response types.
//!
//! Users cross the wire through [`UserResponse`], which has no password
//! hash field at all; stripping is structural, not a serializer option.

use serde::Serialize;
use troophq_db::entities::{
    report::{self, ReportStatus},
    strike,
    user::{self, UserRole, UserStatus},
};

/// A user as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub badge_number: String,
    pub role: UserRole,
    pub rank: Option<String>,
    pub profile_image_url: Option<String>,
    pub status: UserStatus,
    pub denial_reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            badge_number: user.badge_number,
            role: user.role,
            rank: user.rank,
            profile_image_url: user.profile_image_url,
            status: user.status,
            denial_reason: user.denial_reason,
            approved_by: user.approved_by,
            approved_at: user.approved_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// An incident report as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub incident_date: chrono::DateTime<chrono::FixedOffset>,
    pub location: Option<String>,
    pub status: ReportStatus,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl From<report::Model> for ReportResponse {
    fn from(report: report::Model) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            title: report.title,
            description: report.description,
            incident_date: report.incident_date,
            location: report.location,
            status: report.status,
            reviewed_by: report.reviewed_by,
            review_notes: report.review_notes,
            reviewed_at: report.reviewed_at,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// A report joined with its author, for the supervisor review queue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWithAuthorResponse {
    #[serde(flatten)]
    pub report: ReportResponse,
    pub user: Option<UserResponse>,
}

impl From<(report::Model, Option<user::Model>)> for ReportWithAuthorResponse {
    fn from((report, author): (report::Model, Option<user::Model>)) -> Self {
        Self {
            report: report.into(),
            user: author.map(Into::into),
        }
    }
}

/// A strike joined with the supervisor who issued it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeResponse {
    pub id: String,
    pub user_id: String,
    pub reason: String,
    pub description: String,
    pub issued_by: String,
    pub issued_at: chrono::DateTime<chrono::FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<UserResponse>,
}

impl From<strike::Model> for StrikeResponse {
    fn from(strike: strike::Model) -> Self {
        Self {
            id: strike.id,
            user_id: strike.user_id,
            reason: strike.reason,
            description: strike.description,
            issued_by: strike.issued_by,
            issued_at: strike.issued_at,
            supervisor: None,
        }
    }
}

impl From<(strike::Model, Option<user::Model>)> for StrikeResponse {
    fn from((strike, issuer): (strike::Model, Option<user::Model>)) -> Self {
        Self {
            supervisor: issuer.map(Into::into),
            ..strike.into()
        }
    }
}
