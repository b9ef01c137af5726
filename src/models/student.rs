// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user with the student role, without credentials.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRecord {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Aggregated student row returned by the student listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub successful_submissions: i64,
    pub total_submissions: i64,
    pub total_time_spent_sec: i64,
}

/// Submission counts of one student on one quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentQuizSummary {
    /// Quiz id.
    pub id: i64,
    pub successful_submissions_count: i64,
    pub total_submissions_count: i64,
    /// Mean of the per-submission total answer time.
    pub avg_time_spent_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub summary: StudentSummary,
    pub quizzes: Vec<StudentQuizSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopStudent {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub successful_submissions: i64,
    pub total_submissions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStats {
    /// Every user with the student role.
    pub total_students: i64,
    /// Students with at least one submission.
    pub active_students: i64,
    pub top_students: Vec<TopStudent>,
}

/// Query parameters for listing students.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StudentListParams {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    /// Comma-separated usernames.
    pub usernames: Option<String>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub success_threshold: Option<f64>,
}
