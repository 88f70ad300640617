use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{validate_date, validate_date_range, validate_required};
use super::{ApiError, AppState};
use crate::db::{NewSeason, SeasonRow};

/// GET /seasons
pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SeasonRow>>, ApiError> {
    let seasons = state
        .store()
        .list_seasons()
        .await
        .map_err(ApiError::database)?;
    Ok(Json(seasons))
}

/// POST /seasons
pub async fn create_season(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewSeason>, JsonRejection>,
) -> Result<(StatusCode, Json<SeasonRow>), ApiError> {
    let Json(payload) = payload?;
    let new = validate_season(&payload)?;

    let season = state
        .store()
        .create_season(&new)
        .await
        .map_err(ApiError::create_failed("season"))?;

    Ok((StatusCode::CREATED, Json(season)))
}

fn validate_season(payload: &NewSeason) -> Result<NewSeason, ApiError> {
    let name = validate_required("name", &payload.name)?;
    let start = validate_date("start_date", &payload.start_date)?;
    let end = validate_date("end_date", &payload.end_date)?;
    validate_date_range(start, end)?;

    Ok(NewSeason {
        name,
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        is_active: payload.is_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(start: &str, end: &str) -> NewSeason {
        NewSeason {
            name: "2024/25".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            is_active: true,
        }
    }

    #[test]
    fn valid_season_is_normalized() {
        let new = validate_season(&season(" 2024-09-01 ", "2025-06-30")).unwrap();
        assert_eq!(new.start_date, "2024-09-01");
        assert!(new.is_active);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(validate_season(&season("2025-06-30", "2024-09-01")).is_err());
    }
}
