// src/models/platform.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformStats {
    /// Empty when no page has been viewed yet.
    pub most_popular_page: String,
    pub monthly_active_users_count: i64,
    pub current_online_users_count: i64,
}

/// Page views of one UTC calendar day.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DailyStat {
    pub day: chrono::NaiveDate,
    pub page_views: i64,
    pub active_users: i64,
}

/// View count of a single URL.
#[derive(Debug, Clone, FromRow)]
pub struct UrlViews {
    pub url: String,
    pub views: i64,
}

/// Query parameters for the daily distribution.
#[derive(Debug, Deserialize, Validate)]
pub struct DailyStatsParams {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,

    /// Number of days to return (default: 50, max: 100).
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}
