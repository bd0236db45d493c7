//! Incident report endpoints for troopers.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use troophq_common::AppResult;
use troophq_core::SubmitReportInput;

use crate::{extractors::Session, middleware::AppState, response::ReportResponse};

/// List the caller's own reports, newest first.
async fn my_reports(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReportResponse>>> {
    let reports = state.report_service.my_reports(&session.user_id).await?;

    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

/// Submit a new incident report.
async fn submit(
    session: Session,
    State(state): State<AppState>,
    Json(input): Json<SubmitReportInput>,
) -> AppResult<(StatusCode, Json<ReportResponse>)> {
    let report = state
        .report_service
        .submit(&session.user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(report.into())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-reports", get(my_reports))
        .route("/", post(submit))
}
