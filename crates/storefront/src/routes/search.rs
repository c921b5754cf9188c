//! Search history route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Recent searches, most recent first.
#[instrument(skip(state))]
pub async fn history(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.history().entries().await)
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    state.history().clear().await;
    StatusCode::NO_CONTENT
}

/// Remove one search, matched case-insensitively.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<String>>> {
    if !state.history().remove(&query).await {
        return Err(AppError::NotFound(format!("search \"{query}\"")));
    }
    Ok(Json(state.history().entries().await))
}
