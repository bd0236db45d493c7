//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use troophq_common::AppError;

/// Authenticated session extractor.
///
/// Populated by the auth middleware from verified token claims. The role
/// is carried from the token, not re-read from the database on every
/// request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub role: String,
}

impl Session {
    /// Whether this session belongs to a supervisor.
    #[must_use]
    pub fn is_supervisor(&self) -> bool {
        self.role == "supervisor"
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))
    }
}

/// Supervisor-gated session extractor.
#[derive(Debug, Clone)]
pub struct Supervisor(pub Session);

impl<S> FromRequestParts<S> for Supervisor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        if !session.is_supervisor() {
            return Err(AppError::Forbidden(
                "Supervisor access required".to_string(),
            ));
        }

        Ok(Self(session))
    }
}
