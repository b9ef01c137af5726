// src/stats/platform.rs

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{Page, StatsEngine, StatsError, paginate};
use crate::models::platform::{DailyStat, PlatformStats, UrlViews};

/// Trailing window for monthly active users.
const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Most viewed URL; ties go to the lexicographically smallest URL.
fn most_popular(pages: &[UrlViews]) -> Option<&UrlViews> {
    pages
        .iter()
        .max_by(|a, b| a.views.cmp(&b.views).then_with(|| b.url.cmp(&a.url)))
}

impl StatsEngine {
    pub async fn platform_stats(&self) -> Result<PlatformStats, StatsError> {
        self.platform_stats_at(Utc::now()).await
    }

    /// Snapshot evaluated as of `now`.
    pub async fn platform_stats_at(&self, now: DateTime<Utc>) -> Result<PlatformStats, StatsError> {
        let since = now - Duration::days(ACTIVE_WINDOW_DAYS);
        let (pages, monthly_active_users_count) = tokio::try_join!(
            self.store.page_views_by_url(),
            self.store.active_users_since(since),
        )?;

        Ok(PlatformStats {
            most_popular_page: most_popular(&pages)
                .map(|page| page.url.clone())
                .unwrap_or_default(),
            monthly_active_users_count,
            current_online_users_count: self.online.online_users(),
        })
    }

    /// Page views and distinct users per day in `[start, end]`, oldest day first.
    pub async fn daily_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: Page,
    ) -> Result<Vec<DailyStat>, StatsError> {
        if start >= end {
            return Err(StatsError::InvalidRange { start, end });
        }

        let mut days = self.store.daily_page_views(start, end).await?;
        days.sort_by_key(|d| d.day);
        Ok(paginate(days, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(url: &str, views: i64) -> UrlViews {
        UrlViews {
            url: url.to_string(),
            views,
        }
    }

    #[test]
    fn most_popular_prefers_higher_count() {
        let pages = vec![views("/a", 2), views("/b", 5), views("/c", 1)];
        assert_eq!(most_popular(&pages).map(|p| p.url.as_str()), Some("/b"));
    }

    #[test]
    fn most_popular_breaks_ties_by_url() {
        let pages = vec![views("/quizzes", 4), views("/home", 4), views("/x", 1)];
        assert_eq!(most_popular(&pages).map(|p| p.url.as_str()), Some("/home"));
    }

    #[test]
    fn most_popular_of_nothing() {
        assert!(most_popular(&[]).is_none());
    }
}
