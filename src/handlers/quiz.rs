// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use validator::Validate;

use super::with_threshold;
use crate::{
    error::AppError,
    models::quiz::{QuizListParams, QuizStatsParams, ThresholdParams},
    stats::{DEFAULT_LIMIT, Page, StatsEngine},
    utils::query::parse_ids,
};

/// Lists quizzes ordered by submission count.
pub async fn list_quizzes(
    State(engine): State<StatsEngine>,
    Query(params): Query<QuizListParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let ids = params.ids.as_deref().map(parse_ids).transpose()?;
    let page = Page::from_params(params.limit, params.offset, DEFAULT_LIMIT);

    let quizzes = with_threshold(engine, params.success_threshold)
        .list_quizzes(ids.as_deref(), page)
        .await?;

    Ok(Json(quizzes))
}

/// Global quiz counters.
pub async fn get_quiz_stats(
    State(engine): State<StatsEngine>,
    Query(params): Query<QuizStatsParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let ids = params.ids.as_deref().map(parse_ids).transpose()?;
    let stats = with_threshold(engine, params.success_threshold)
        .quiz_stats(ids.as_deref())
        .await?;

    Ok(Json(stats))
}

/// Quiz detail with per-question statistics.
pub async fn get_quiz(
    State(engine): State<StatsEngine>,
    Path(id): Path<i64>,
    Query(params): Query<ThresholdParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let quiz = with_threshold(engine, params.success_threshold)
        .get_quiz(id)
        .await?;

    Ok(Json(quiz))
}
