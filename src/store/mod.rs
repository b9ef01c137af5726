// src/store/mod.rs

//! Read-only access to the relational data the statistics engine aggregates.
//!
//! Implementations return flat grouped rows (one per submission, question,
//! day or URL). Ratios, thresholds, nesting, ordering and pagination are left
//! to [`crate::stats::StatsEngine`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    platform::{DailyStat, UrlViews},
    quiz::{QuestionTotals, QuizRecord, SubmissionTotals},
    student::StudentRecord,
    user::User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Restricts which submissions [`StatsStore::submission_totals`] returns.
/// `None` means unrestricted.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub quiz_ids: Option<Vec<i64>>,
    pub user_ids: Option<Vec<i64>>,
}

impl SubmissionFilter {
    pub fn for_quizzes(ids: Option<&[i64]>) -> Self {
        Self {
            quiz_ids: ids.map(<[i64]>::to_vec),
            user_ids: None,
        }
    }

    pub fn for_users(ids: Option<&[i64]>) -> Self {
        Self {
            quiz_ids: None,
            user_ids: ids.map(<[i64]>::to_vec),
        }
    }

    pub(crate) fn matches(&self, quiz_id: i64, user_id: i64) -> bool {
        self.quiz_ids.as_ref().is_none_or(|ids| ids.contains(&quiz_id))
            && self.user_ids.as_ref().is_none_or(|ids| ids.contains(&user_id))
    }
}

#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Quizzes, optionally restricted to `ids`.
    async fn quizzes(&self, ids: Option<&[i64]>) -> Result<Vec<QuizRecord>, sqlx::Error>;

    /// Every question of the matching quizzes with its answer totals.
    async fn question_totals(
        &self,
        quiz_ids: Option<&[i64]>,
    ) -> Result<Vec<QuestionTotals>, sqlx::Error>;

    /// One row per submission, including submissions without answers.
    async fn submission_totals(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<SubmissionTotals>, sqlx::Error>;

    /// Users with the student role, optionally restricted to `usernames`.
    async fn students(&self, usernames: Option<&[String]>)
    -> Result<Vec<StudentRecord>, sqlx::Error>;

    async fn find_user(&self, username: &str) -> Result<Option<User>, sqlx::Error>;

    async fn page_views_by_url(&self) -> Result<Vec<UrlViews>, sqlx::Error>;

    /// Distinct users with a page view at or after `since`.
    async fn active_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error>;

    /// Per-day page views for the inclusive UTC day range. Days without views are absent.
    async fn daily_page_views(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>, sqlx::Error>;
}
