// src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use super::{StatsStore, SubmissionFilter};
use crate::models::{
    platform::{DailyStat, UrlViews},
    quiz::{QuestionTotals, QuizRecord, SubmissionTotals},
    student::StudentRecord,
    user::{ROLE_STUDENT, User},
};

/// [`StatsStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for PgStore {
    async fn quizzes(&self, ids: Option<&[i64]>) -> Result<Vec<QuizRecord>, sqlx::Error> {
        sqlx::query_as::<_, QuizRecord>(
            r#"
            SELECT id, title, description, image, created_at
            FROM quizzes
            WHERE ($1::BIGINT[] IS NULL OR id = ANY($1))
            ORDER BY id
            "#,
        )
        .bind(ids.map(<[i64]>::to_vec))
        .fetch_all(&self.pool)
        .await
    }

    async fn question_totals(
        &self,
        quiz_ids: Option<&[i64]>,
    ) -> Result<Vec<QuestionTotals>, sqlx::Error> {
        sqlx::query_as::<_, QuestionTotals>(
            r#"
            SELECT
                q.id, q.quiz_id, q.title, q.description, q.image, q.created_at,
                COUNT(a.submission_id) AS total_answers,
                COUNT(a.submission_id) FILTER (WHERE o.is_correct) AS correct_answers,
                COALESCE(SUM(a.spent_time_seconds), 0)::BIGINT AS spent_time_seconds
            FROM quiz_questions q
            LEFT JOIN quiz_submission_answers a ON a.question_id = q.id
            LEFT JOIN quiz_question_options o ON o.id = a.selected_option_id
            WHERE ($1::BIGINT[] IS NULL OR q.quiz_id = ANY($1))
            GROUP BY q.id
            ORDER BY q.id
            "#,
        )
        .bind(quiz_ids.map(<[i64]>::to_vec))
        .fetch_all(&self.pool)
        .await
    }

    async fn submission_totals(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<SubmissionTotals>, sqlx::Error> {
        sqlx::query_as::<_, SubmissionTotals>(
            r#"
            SELECT
                s.id AS submission_id, s.quiz_id, s.user_id,
                COUNT(a.question_id) FILTER (WHERE o.is_correct) AS correct_count,
                COUNT(a.question_id) AS total_count,
                COALESCE(SUM(a.spent_time_seconds), 0)::BIGINT AS spent_time_seconds
            FROM quiz_submissions s
            LEFT JOIN quiz_submission_answers a ON a.submission_id = s.id
            LEFT JOIN quiz_question_options o ON o.id = a.selected_option_id
            WHERE ($1::BIGINT[] IS NULL OR s.quiz_id = ANY($1))
              AND ($2::BIGINT[] IS NULL OR s.user_id = ANY($2))
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .bind(filter.quiz_ids.clone())
        .bind(filter.user_ids.clone())
        .fetch_all(&self.pool)
        .await
    }

    async fn students(
        &self,
        usernames: Option<&[String]>,
    ) -> Result<Vec<StudentRecord>, sqlx::Error> {
        sqlx::query_as::<_, StudentRecord>(
            r#"
            SELECT id, username, name
            FROM users
            WHERE role = $1
              AND ($2::TEXT[] IS NULL OR username = ANY($2))
            ORDER BY id
            "#,
        )
        .bind(ROLE_STUDENT)
        .bind(usernames.map(<[String]>::to_vec))
        .fetch_all(&self.pool)
        .await
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn page_views_by_url(&self) -> Result<Vec<UrlViews>, sqlx::Error> {
        sqlx::query_as::<_, UrlViews>(
            r#"
            SELECT url, COUNT(*) AS views
            FROM page_views
            GROUP BY url
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn active_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM page_views WHERE created_at >= $1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
    }

    async fn daily_page_views(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>, sqlx::Error> {
        sqlx::query_as::<_, DailyStat>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::DATE AS day,
                COUNT(*) AS page_views,
                COUNT(DISTINCT user_id) AS active_users
            FROM page_views
            WHERE (created_at AT TIME ZONE 'UTC')::DATE BETWEEN $1 AND $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
    }
}
