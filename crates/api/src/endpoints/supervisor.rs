//! Supervisor endpoints: approval queues, review, strikes, and stats.
//!
//! Every route here is gated by the [`Supervisor`] extractor; role checks
//! never reach the service layer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use troophq_common::AppResult;
use troophq_core::{IssueStrikeInput, Stats};

use crate::{
    extractors::Supervisor,
    middleware::AppState,
    response::{ReportResponse, ReportWithAuthorResponse, StrikeResponse, UserResponse},
};

/// List registrations awaiting a decision, newest first.
async fn pending_profiles(
    Supervisor(_): Supervisor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.profile_service.pending_profiles().await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Profile decision response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDecisionResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Approve a pending profile.
async fn approve_profile(
    Supervisor(session): Supervisor,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ProfileDecisionResponse>> {
    let user = state
        .profile_service
        .approve(&session.user_id, &user_id)
        .await?;

    Ok(Json(ProfileDecisionResponse {
        message: "Profile approved successfully",
        user: user.into(),
    }))
}

/// Denial request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenyProfileRequest {
    pub reason: Option<String>,
}

/// Deny a pending profile with a reason.
async fn deny_profile(
    Supervisor(session): Supervisor,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<DenyProfileRequest>,
) -> AppResult<Json<ProfileDecisionResponse>> {
    let user = state
        .profile_service
        .deny(
            &session.user_id,
            &user_id,
            req.reason.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(ProfileDecisionResponse {
        message: "Profile denied successfully",
        user: user.into(),
    }))
}

/// List pending reports with their authors, newest first.
async fn pending_reports(
    Supervisor(_): Supervisor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReportWithAuthorResponse>>> {
    let reports = state.report_service.pending_reports().await?;

    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

/// Review request body. The dashboard posts `{status, notes}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// Review decision response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportResponse {
    pub message: String,
    pub report: ReportResponse,
}

/// Approve or reject a pending report.
async fn review_report(
    Supervisor(session): Supervisor,
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    Json(req): Json<ReviewReportRequest>,
) -> AppResult<Json<ReviewReportResponse>> {
    let report = state
        .report_service
        .review(&session.user_id, &report_id, &req.status, req.notes)
        .await?;

    let message = format!("Report {} successfully", report.status.as_str());

    Ok(Json(ReviewReportResponse {
        message,
        report: report.into(),
    }))
}

/// List approved troopers, alphabetical by name.
async fn troopers(
    Supervisor(_): Supervisor,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.profile_service.approved_troopers().await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Strike issuance response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStrikeResponse {
    pub message: &'static str,
    pub strike: StrikeResponse,
}

/// Issue a strike against an approved trooper.
async fn issue_strike(
    Supervisor(session): Supervisor,
    State(state): State<AppState>,
    Json(input): Json<IssueStrikeInput>,
) -> AppResult<(StatusCode, Json<IssueStrikeResponse>)> {
    let strike = state.strike_service.issue(&session.user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueStrikeResponse {
            message: "Strike issued successfully",
            strike: strike.into(),
        }),
    ))
}

/// Dashboard statistics.
async fn stats(
    Supervisor(_): Supervisor,
    State(state): State<AppState>,
) -> AppResult<Json<Stats>> {
    let stats = state.stats_service.overview().await?;

    Ok(Json(stats))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending-profiles", get(pending_profiles))
        .route("/approve-profile/{user_id}", post(approve_profile))
        .route("/deny-profile/{user_id}", post(deny_profile))
        .route("/pending-reports", get(pending_reports))
        .route("/review-report/{report_id}", post(review_report))
        .route("/troopers", get(troopers))
        .route("/issue-strike", post(issue_strike))
        .route("/stats", get(stats))
}
