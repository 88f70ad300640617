use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{ensure_exists, ensure_exists_opt, validate_required};
use super::{ApiError, AppState};
use crate::db::{NewTeam, TeamRow};
use crate::entities::{clubs, genders, leagues};

/// GET /teams
pub async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamRow>>, ApiError> {
    let teams = state.store().list_teams().await.map_err(ApiError::database)?;
    Ok(Json(teams))
}

/// POST /teams
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamRow>), ApiError> {
    let Json(payload) = payload?;
    let store = state.store();

    let name = validate_required("name", &payload.name)?;
    ensure_exists::<clubs::Entity>(store, "club_id", payload.club_id).await?;
    ensure_exists::<genders::Entity>(store, "gender_id", payload.gender_id).await?;
    ensure_exists_opt::<leagues::Entity>(store, "league_id", payload.league_id).await?;

    let new = NewTeam { name, ..payload };
    let team = store
        .create_team(&new)
        .await
        .map_err(ApiError::create_failed("team"))?;

    Ok((StatusCode::CREATED, Json(team)))
}
