//! Strike endpoints for troopers.

use axum::{extract::State, routing::get, Json, Router};
use troophq_common::AppResult;

use crate::{extractors::Session, middleware::AppState, response::StrikeResponse};

/// List the caller's own strikes with the issuing supervisor attached.
async fn my_strikes(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StrikeResponse>>> {
    let strikes = state.strike_service.my_strikes(&session.user_id).await?;

    Ok(Json(strikes.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/my-strikes", get(my_strikes))
}
