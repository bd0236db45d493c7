//! Authentication endpoints.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use troophq_common::AppResult;
use troophq_core::RegisterInput;

use crate::{middleware::AppState, response::UserResponse};

/// Registration response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Register a new account. It stays pending until a supervisor approves it.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.auth_service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. Awaiting supervisor approval.",
            user: user.into(),
        }),
    ))
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserResponse,
}

/// Authenticate and receive a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token: outcome.token,
        user: outcome.user.into(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
