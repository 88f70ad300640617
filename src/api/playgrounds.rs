use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{optional_text, validate_non_negative, validate_required};
use super::{ApiError, AppState};
use crate::db::{NewPlayground, PlaygroundRow};

/// GET /playgrounds
pub async fn list_playgrounds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlaygroundRow>>, ApiError> {
    let playgrounds = state
        .store()
        .list_playgrounds()
        .await
        .map_err(ApiError::database)?;
    Ok(Json(playgrounds))
}

/// POST /playgrounds
pub async fn create_playground(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPlayground>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaygroundRow>), ApiError> {
    let Json(payload) = payload?;

    let new = NewPlayground {
        name: validate_required("name", &payload.name)?,
        address: optional_text(payload.address.as_deref()),
        city: optional_text(payload.city.as_deref()),
        capacity: validate_non_negative("capacity", payload.capacity)?,
    };

    let playground = state
        .store()
        .create_playground(&new)
        .await
        .map_err(ApiError::create_failed("playground"))?;

    Ok((StatusCode::CREATED, Json(playground)))
}
