// src/utils/query.rs

use crate::error::AppError;

/// Parses a comma-separated id list such as `1,4,7`. Blank items are skipped.
pub fn parse_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid id '{item}'")))
        })
        .collect()
}

/// Parses a comma-separated list of usernames.
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
