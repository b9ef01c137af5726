// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One row per question, joined with the answers given to it.
/// Questions nobody answered still appear, with zero totals.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionTotals {
    pub id: i64,
    pub quiz_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub total_answers: i64,
    pub correct_answers: i64,
    pub spent_time_seconds: i64,
}

/// One row per submission with its answers folded into counts.
/// Submissions without answers have `total_count = 0`.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionTotals {
    pub submission_id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub correct_count: i64,
    pub total_count: i64,
    pub spent_time_seconds: i64,
}

/// Aggregated quiz row returned by the quiz listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub questions_count: i64,
    pub total_submissions_count: i64,
    pub successful_submissions_count: i64,
    pub avg_time_spent_sec: f64,
}

/// Per-question answer statistics embedded in [`QuizDetail`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub total_answers: i64,
    pub correct_answers: i64,
    pub avg_time_spent_sec: f64,
}

/// Quiz summary plus the questions that received at least one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub summary: QuizSummary,
    pub questions: Vec<QuestionSummary>,
}

/// Global quiz counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizStats {
    pub quizzes_count: i64,
    pub submissions_count: i64,
    pub successful_submissions_count: i64,
    pub avg_time_spent_sec: f64,
}

/// Query parameters for listing quizzes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuizListParams {
    /// Number of items to return (default: 20, max: 100).
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    /// Comma-separated quiz ids, e.g. `ids=1,4,7`.
    pub ids: Option<String>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub success_threshold: Option<f64>,
}

/// Query parameters for the quiz stats summary.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuizStatsParams {
    pub ids: Option<String>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub success_threshold: Option<f64>,
}

/// Optional success threshold override, shared by the detail and stats routes.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ThresholdParams {
    #[validate(range(min = 0.0, max = 1.0))]
    pub success_threshold: Option<f64>,
}
