use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ensure_exists_opt, optional_text, validate_non_negative, validate_required};
use super::{ApiError, AppState};
use crate::db::{ClubRow, NewClub};
use crate::entities::playgrounds;

/// GET /clubs
pub async fn list_clubs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ClubRow>>, ApiError> {
    let clubs = state.store().list_clubs().await.map_err(ApiError::database)?;
    Ok(Json(clubs))
}

/// POST /clubs
pub async fn create_club(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewClub>, JsonRejection>,
) -> Result<(StatusCode, Json<ClubRow>), ApiError> {
    let Json(payload) = payload?;
    let store = state.store();

    let new = NewClub {
        name: validate_required("name", &payload.name)?,
        city: optional_text(payload.city.as_deref()),
        founded_year: validate_non_negative("founded_year", payload.founded_year)?,
        playground_id: payload.playground_id,
    };
    ensure_exists_opt::<playgrounds::Entity>(store, "playground_id", new.playground_id).await?;

    let club = store
        .create_club(&new)
        .await
        .map_err(ApiError::create_failed("club"))?;

    Ok((StatusCode::CREATED, Json(club)))
}
