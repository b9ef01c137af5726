// src/stats/mod.rs

//! Statistics aggregation engine.
//!
//! Stateless: every call reads from the [`StatsStore`] and folds the flat
//! grouped rows into quiz, student and platform metrics.

pub mod platform;
pub mod quiz;
pub mod student;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::store::StatsStore;

pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.2;
pub const DEFAULT_LIMIT: i64 = 20;
pub const DEFAULT_DAILY_LIMIT: i64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Start date {start} should be less than the end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("{0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

/// Source of the "currently online" gauge.
pub trait OnlineUsers: Send + Sync {
    fn online_users(&self) -> i64;
}

/// Placeholder gauge reporting a fixed number of online users.
/// Not backed by any session or heartbeat data.
#[derive(Debug, Clone, Copy)]
pub struct StaticOnlineUsers(pub i64);

impl Default for StaticOnlineUsers {
    fn default() -> Self {
        Self(1)
    }
}

impl OnlineUsers for StaticOnlineUsers {
    fn online_users(&self) -> i64 {
        self.0
    }
}

/// Limit/offset window applied after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Builds a page from optional query values.
    pub fn from_params(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        Self::new(limit.unwrap_or(default_limit), offset.unwrap_or(0))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

pub(crate) fn paginate<T>(rows: Vec<T>, page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    rows.into_iter().skip(offset).take(limit).collect()
}

/// `numerator / denominator`, or `None` when the denominator is not positive.
pub fn ratio(numerator: i64, denominator: i64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// A submission is successful when its accuracy is defined and strictly above `threshold`.
pub fn is_successful(correct: i64, total: i64, threshold: f64) -> bool {
    ratio(correct, total).is_some_and(|accuracy| accuracy > threshold)
}

/// Mean of `count` values summing to `sum`; 0 for an empty set.
pub fn mean(sum: i64, count: i64) -> f64 {
    ratio(sum, count).unwrap_or(0.0)
}

/// Submission counters shared by quiz and student aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SubmissionTally {
    pub total: i64,
    pub successful: i64,
    pub answers: i64,
    /// Submissions with at least one answer.
    pub answered: i64,
    pub spent_time_seconds: i64,
}

impl SubmissionTally {
    pub(crate) fn add(&mut self, correct: i64, answers: i64, spent: i64, threshold: f64) {
        self.total += 1;
        self.successful += i64::from(is_successful(correct, answers, threshold));
        self.answers += answers;
        self.answered += i64::from(answers > 0);
        self.spent_time_seconds += spent;
    }
}

/// Entry point of the aggregation engine.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn StatsStore>,
    online: Arc<dyn OnlineUsers>,
    success_threshold: f64,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self {
            store,
            online: Arc::new(StaticOnlineUsers::default()),
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }

    pub fn with_online_users(mut self, online: Arc<dyn OnlineUsers>) -> Self {
        self.online = online;
        self
    }

    /// Copy of the engine counting submissions as successful above `threshold`.
    pub fn with_success_threshold(&self, threshold: f64) -> Self {
        Self {
            success_threshold: threshold,
            ..self.clone()
        }
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }

    pub fn store(&self) -> &Arc<dyn StatsStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(3, 0), None);
        assert_eq!(ratio(0, -1), None);
        assert_eq!(ratio(1, 4), Some(0.25));
    }

    #[test]
    fn success_threshold_is_strict() {
        assert!(!is_successful(1, 5, 0.2));
        assert!(!is_successful(20, 100, 0.2));
        assert!(is_successful(21, 100, 0.2));
        assert!(!is_successful(0, 0, 0.0));
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(0, 0), 0.0);
        assert_eq!(mean(90, 3), 30.0);
    }

    #[test]
    fn paginate_skips_then_takes() {
        let rows: Vec<i32> = (0..10).collect();
        assert_eq!(paginate(rows.clone(), Page::new(3, 2)), vec![2, 3, 4]);
        assert_eq!(paginate(rows.clone(), Page::new(5, 8)), vec![8, 9]);
        assert!(paginate(rows.clone(), Page::new(5, 20)).is_empty());
        assert!(paginate(rows, Page::new(-1, 0)).is_empty());
    }

    #[test]
    fn tally_counts_empty_submissions_as_unsuccessful() {
        let mut tally = SubmissionTally::default();
        tally.add(0, 0, 0, 0.2);
        tally.add(3, 4, 40, 0.2);
        assert_eq!(tally.total, 2);
        assert_eq!(tally.successful, 1);
        assert_eq!(tally.answers, 4);
        assert_eq!(tally.answered, 1);
        assert_eq!(tally.spent_time_seconds, 40);
    }
}
