//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use troophq_common::AppError;
use troophq_core::{AuthService, ProfileService, ReportService, StatsService, StrikeService};

use crate::extractors::Session;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub report_service: ReportService,
    pub strike_service: StrikeService,
    pub stats_service: StatsService,
}

/// Authentication middleware.
///
/// A missing Authorization header passes through so that public routes
/// work; protected routes reject via the [`Session`] extractor. A header
/// that is present but does not verify fails the request outright.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    if let Some(token) = token {
        match state.auth_service.verify_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(Session {
                    user_id: claims.sub,
                    role: claims.role,
                });
            }
            Err(_) => {
                tracing::debug!("Rejected request with invalid bearer token");
                return AppError::Unauthorized("Invalid token".to_string()).into_response();
            }
        }
    }

    next.run(req).await
}
