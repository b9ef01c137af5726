// src/handlers/student.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use validator::Validate;

use super::with_threshold;
use crate::{
    error::AppError,
    models::{quiz::ThresholdParams, student::StudentListParams},
    stats::{DEFAULT_LIMIT, Page, StatsEngine},
    utils::query::parse_names,
};

/// Lists students ordered by successful submissions.
pub async fn list_students(
    State(engine): State<StatsEngine>,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let usernames = params.usernames.as_deref().map(parse_names);
    let page = Page::from_params(params.limit, params.offset, DEFAULT_LIMIT);

    let students = with_threshold(engine, params.success_threshold)
        .list_students(usernames.as_deref(), page)
        .await?;

    Ok(Json(students))
}

/// Student counts and the top three students.
pub async fn get_student_stats(
    State(engine): State<StatsEngine>,
    Query(params): Query<ThresholdParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let stats = with_threshold(engine, params.success_threshold)
        .student_stats()
        .await?;

    Ok(Json(stats))
}

/// Student detail with per-quiz counters.
pub async fn get_student(
    State(engine): State<StatsEngine>,
    Path(username): Path<String>,
    Query(params): Query<ThresholdParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let student = with_threshold(engine, params.success_threshold)
        .get_student(&username)
        .await?;

    Ok(Json(student))
}
