// src/handlers/platform.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::platform::DailyStatsParams,
    stats::{DEFAULT_DAILY_LIMIT, Page, StatsEngine},
};

/// Most popular page, monthly active users and the online gauge.
pub async fn get_platform_stats(
    State(engine): State<StatsEngine>,
) -> Result<impl IntoResponse, AppError> {
    let stats = engine.platform_stats().await?;
    Ok(Json(stats))
}

/// Page views and active users per day.
///
/// Rejects ranges where `start_date >= end_date` with 422.
pub async fn get_daily_distribution(
    State(engine): State<StatsEngine>,
    Query(params): Query<DailyStatsParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let page = Page::from_params(params.limit, params.offset, DEFAULT_DAILY_LIMIT);
    let days = engine
        .daily_stats(params.start_date, params.end_date, page)
        .await?;

    Ok(Json(days))
}
