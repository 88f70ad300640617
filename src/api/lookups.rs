//! Genders, positions, league types and match systems.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{optional_text, validate_required};
use super::{ApiError, AppState};
use crate::db::{LookupKind, LookupRow, NewLookup};

const MAX_ABBREVIATION_LEN: usize = 10;

async fn list(state: &AppState, kind: LookupKind) -> Result<Json<Vec<LookupRow>>, ApiError> {
    let rows = state
        .store()
        .list_lookups(kind)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(rows))
}

async fn create(
    state: &AppState,
    kind: LookupKind,
    payload: Result<Json<NewLookup>, JsonRejection>,
) -> Result<(StatusCode, Json<LookupRow>), ApiError> {
    let Json(payload) = payload?;
    let new = validate_lookup(kind, &payload)?;

    let row = state
        .store()
        .create_lookup(kind, &new)
        .await
        .map_err(ApiError::create_failed(kind.label()))?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Keeps only the fields the kind has; the rest are dropped.
fn validate_lookup(kind: LookupKind, payload: &NewLookup) -> Result<NewLookup, ApiError> {
    let name = validate_required("name", &payload.name)?;

    let abbreviation = match kind {
        LookupKind::Position => optional_text(payload.abbreviation.as_deref()),
        _ => None,
    };
    if let Some(abbr) = &abbreviation
        && abbr.chars().count() > MAX_ABBREVIATION_LEN
    {
        return Err(ApiError::validation(format!(
            "abbreviation must be {MAX_ABBREVIATION_LEN} characters or less"
        )));
    }

    let description = match kind {
        LookupKind::LeagueType | LookupKind::MatchSystem => {
            optional_text(payload.description.as_deref())
        }
        _ => None,
    };

    Ok(NewLookup {
        name,
        abbreviation,
        description,
    })
}

/// GET /genders
pub async fn list_genders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LookupRow>>, ApiError> {
    list(&state, LookupKind::Gender).await
}

/// POST /genders
pub async fn create_gender(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLookup>, JsonRejection>,
) -> Result<(StatusCode, Json<LookupRow>), ApiError> {
    create(&state, LookupKind::Gender, payload).await
}

/// GET /positions
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LookupRow>>, ApiError> {
    list(&state, LookupKind::Position).await
}

/// POST /positions
pub async fn create_position(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLookup>, JsonRejection>,
) -> Result<(StatusCode, Json<LookupRow>), ApiError> {
    create(&state, LookupKind::Position, payload).await
}

/// GET /league-types
pub async fn list_league_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LookupRow>>, ApiError> {
    list(&state, LookupKind::LeagueType).await
}

/// POST /league-types
pub async fn create_league_type(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLookup>, JsonRejection>,
) -> Result<(StatusCode, Json<LookupRow>), ApiError> {
    create(&state, LookupKind::LeagueType, payload).await
}

/// GET /match-systems
pub async fn list_match_systems(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LookupRow>>, ApiError> {
    list(&state, LookupKind::MatchSystem).await
}

/// POST /match-systems
pub async fn create_match_system(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLookup>, JsonRejection>,
) -> Result<(StatusCode, Json<LookupRow>), ApiError> {
    create(&state, LookupKind::MatchSystem, payload).await
}
