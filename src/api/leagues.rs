use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ensure_exists, validate_required};
use super::{ApiError, AppState};
use crate::db::{LeagueRow, NewLeague};
use crate::entities::{genders, league_types, match_systems, seasons};

/// GET /leagues
pub async fn list_leagues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeagueRow>>, ApiError> {
    let leagues = state
        .store()
        .list_leagues()
        .await
        .map_err(ApiError::database)?;
    Ok(Json(leagues))
}

/// POST /leagues
pub async fn create_league(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLeague>, JsonRejection>,
) -> Result<(StatusCode, Json<LeagueRow>), ApiError> {
    let Json(payload) = payload?;
    let store = state.store();

    let name = validate_required("name", &payload.name)?;
    ensure_exists::<seasons::Entity>(store, "season_id", payload.season_id).await?;
    ensure_exists::<league_types::Entity>(store, "league_type_id", payload.league_type_id).await?;
    ensure_exists::<match_systems::Entity>(store, "match_system_id", payload.match_system_id)
        .await?;
    ensure_exists::<genders::Entity>(store, "gender_id", payload.gender_id).await?;

    let new = NewLeague { name, ..payload };
    let league = store
        .create_league(&new)
        .await
        .map_err(ApiError::create_failed("league"))?;

    Ok((StatusCode::CREATED, Json(league)))
}
