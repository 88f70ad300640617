use chrono::NaiveDate;
use sea_orm::{EntityTrait, PrimaryKeyTrait};

use super::ApiError;
use crate::db::Store;

const MAX_NAME_LEN: usize = 100;

/// Trims a required string field; empty or overlong values are rejected.
pub fn validate_required(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "{field} must be {MAX_NAME_LEN} characters or less"
        )));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional string field; blank becomes `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses a `YYYY-MM-DD` date.
pub fn validate_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::validation(format!(
            "Invalid {field}: '{value}'. Expected format YYYY-MM-DD"
        ))
    })
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if start > end {
        return Err(ApiError::validation(
            "start_date must be on or before end_date",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: Option<i32>) -> Result<Option<i32>, ApiError> {
    match value {
        Some(v) if v < 0 => Err(ApiError::validation(format!(
            "Invalid {field}: {v}. Must not be negative"
        ))),
        other => Ok(other),
    }
}

/// Rejects a reference to a row that does not exist.
pub async fn ensure_exists<E>(store: &Store, field: &str, id: i32) -> Result<(), ApiError>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let found = store.exists::<E>(id).await.map_err(ApiError::database)?;
    if !found {
        return Err(ApiError::validation(format!(
            "Invalid {field}: {id} does not exist"
        )));
    }
    Ok(())
}

/// Like [`ensure_exists`] for nullable references.
pub async fn ensure_exists_opt<E>(
    store: &Store,
    field: &str,
    id: Option<i32>,
) -> Result<(), ApiError>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    match id {
        Some(id) => ensure_exists::<E>(store, field, id).await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "  Sparta  ").unwrap(), "Sparta");
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
        assert!(validate_required("name", &"x".repeat(101)).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  Praha ")), Some("Praha".to_string()));
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("start_date", "2024-09-01").is_ok());
        assert!(validate_date("start_date", "2024-13-01").is_err());
        assert!(validate_date("start_date", "01.09.2024").is_err());
        assert!(validate_date("start_date", "").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let start = validate_date("start_date", "2024-09-01").unwrap();
        let end = validate_date("end_date", "2025-06-30").unwrap();

        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert_eq!(validate_non_negative("capacity", Some(0)).unwrap(), Some(0));
        assert_eq!(validate_non_negative("capacity", None).unwrap(), None);
        assert!(validate_non_negative("capacity", Some(-1)).is_err());
    }
}
