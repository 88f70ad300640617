use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{
    ensure_exists, ensure_exists_opt, validate_date, validate_non_negative, validate_required,
};
use super::{ApiError, AppState};
use crate::db::{NewPlayer, PlayerRow};
use crate::entities::{genders, positions, teams};

/// GET /players
pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerRow>>, ApiError> {
    let players = state
        .store()
        .list_players()
        .await
        .map_err(ApiError::database)?;
    Ok(Json(players))
}

/// POST /players
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerRow>), ApiError> {
    let Json(payload) = payload?;
    let store = state.store();

    let birth_date = match payload.birth_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Some(
            validate_date("birth_date", date)?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        _ => None,
    };

    let new = NewPlayer {
        first_name: validate_required("first_name", &payload.first_name)?,
        last_name: validate_required("last_name", &payload.last_name)?,
        birth_date,
        jersey_number: validate_non_negative("jersey_number", payload.jersey_number)?,
        team_id: payload.team_id,
        position_id: payload.position_id,
        gender_id: payload.gender_id,
    };
    ensure_exists::<genders::Entity>(store, "gender_id", new.gender_id).await?;
    ensure_exists_opt::<teams::Entity>(store, "team_id", new.team_id).await?;
    ensure_exists_opt::<positions::Entity>(store, "position_id", new.position_id).await?;

    let player = store
        .create_player(&new)
        .await
        .map_err(ApiError::create_failed("player"))?;

    Ok((StatusCode::CREATED, Json(player)))
}
