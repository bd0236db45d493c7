//! API endpoints.

mod auth;
mod reports;
mod strikes;
mod supervisor;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/reports", reports::router())
        .nest("/strikes", strikes::router())
        .nest("/supervisor", supervisor::router())
}
