// src/store/memory.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::{StatsStore, SubmissionFilter};
use crate::models::{
    platform::{DailyStat, UrlViews},
    quiz::{QuestionTotals, QuizRecord, SubmissionTotals},
    student::StudentRecord,
    user::{ROLE_STUDENT, User},
};

#[derive(Debug, Clone)]
struct QuestionRow {
    id: i64,
    quiz_id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SubmissionRow {
    id: i64,
    quiz_id: i64,
    user_id: i64,
}

#[derive(Debug, Clone)]
struct AnswerRow {
    submission_id: i64,
    question_id: i64,
    selected_option_id: i64,
    spent_time_seconds: i64,
}

#[derive(Debug, Clone)]
struct PageViewRow {
    user_id: i64,
    url: String,
    created_at: DateTime<Utc>,
}

/// In-process tables with the same grouping semantics as [`super::PgStore`].
///
/// Populated through the `add_*` builders, then shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<User>,
    quizzes: Vec<QuizRecord>,
    questions: Vec<QuestionRow>,
    /// option id -> is_correct
    options: HashMap<i64, bool>,
    submissions: Vec<SubmissionRow>,
    answers: Vec<AnswerRow>,
    page_views: Vec<PageViewRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, id: i64, username: &str, name: &str, role: &str) -> &mut Self {
        self.add_user_with_password(id, username, name, role, "")
    }

    pub fn add_user_with_password(
        &mut self,
        id: i64,
        username: &str,
        name: &str,
        role: &str,
        password_hash: &str,
    ) -> &mut Self {
        self.users.push(User {
            id,
            username: username.to_owned(),
            name: name.to_owned(),
            password: password_hash.to_owned(),
            role: role.to_owned(),
            created_at: Utc::now(),
        });
        self
    }

    pub fn add_quiz(&mut self, id: i64, title: &str) -> &mut Self {
        self.quizzes.push(QuizRecord {
            id,
            title: title.to_owned(),
            description: None,
            image: None,
            created_at: Utc::now(),
        });
        self
    }

    pub fn add_question(&mut self, id: i64, quiz_id: i64) -> &mut Self {
        self.questions.push(QuestionRow {
            id,
            quiz_id,
            title: format!("Question {id}"),
            created_at: Utc::now(),
        });
        self
    }

    pub fn add_option(&mut self, id: i64, is_correct: bool) -> &mut Self {
        self.options.insert(id, is_correct);
        self
    }

    pub fn add_submission(&mut self, id: i64, quiz_id: i64, user_id: i64) -> &mut Self {
        self.submissions.push(SubmissionRow {
            id,
            quiz_id,
            user_id,
        });
        self
    }

    pub fn add_answer(
        &mut self,
        submission_id: i64,
        question_id: i64,
        selected_option_id: i64,
        spent_time_seconds: i64,
    ) -> &mut Self {
        self.answers.push(AnswerRow {
            submission_id,
            question_id,
            selected_option_id,
            spent_time_seconds,
        });
        self
    }

    pub fn add_page_view(&mut self, user_id: i64, url: &str, created_at: DateTime<Utc>) -> &mut Self {
        self.page_views.push(PageViewRow {
            user_id,
            url: url.to_owned(),
            created_at,
        });
        self
    }

    fn is_correct(&self, option_id: i64) -> bool {
        self.options.get(&option_id).copied().unwrap_or(false)
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn quizzes(&self, ids: Option<&[i64]>) -> Result<Vec<QuizRecord>, sqlx::Error> {
        let mut quizzes: Vec<QuizRecord> = self
            .quizzes
            .iter()
            .filter(|q| ids.is_none_or(|ids| ids.contains(&q.id)))
            .cloned()
            .collect();
        quizzes.sort_by_key(|q| q.id);
        Ok(quizzes)
    }

    async fn question_totals(
        &self,
        quiz_ids: Option<&[i64]>,
    ) -> Result<Vec<QuestionTotals>, sqlx::Error> {
        let mut rows: Vec<QuestionTotals> = self
            .questions
            .iter()
            .filter(|q| quiz_ids.is_none_or(|ids| ids.contains(&q.quiz_id)))
            .map(|q| {
                let mut row = QuestionTotals {
                    id: q.id,
                    quiz_id: q.quiz_id,
                    title: q.title.clone(),
                    description: None,
                    image: None,
                    created_at: q.created_at,
                    total_answers: 0,
                    correct_answers: 0,
                    spent_time_seconds: 0,
                };
                for answer in self.answers.iter().filter(|a| a.question_id == q.id) {
                    row.total_answers += 1;
                    row.correct_answers += i64::from(self.is_correct(answer.selected_option_id));
                    row.spent_time_seconds += answer.spent_time_seconds;
                }
                row
            })
            .collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn submission_totals(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<SubmissionTotals>, sqlx::Error> {
        let mut rows: Vec<SubmissionTotals> = self
            .submissions
            .iter()
            .filter(|s| filter.matches(s.quiz_id, s.user_id))
            .map(|s| {
                let mut row = SubmissionTotals {
                    submission_id: s.id,
                    quiz_id: s.quiz_id,
                    user_id: s.user_id,
                    correct_count: 0,
                    total_count: 0,
                    spent_time_seconds: 0,
                };
                for answer in self.answers.iter().filter(|a| a.submission_id == s.id) {
                    row.total_count += 1;
                    row.correct_count += i64::from(self.is_correct(answer.selected_option_id));
                    row.spent_time_seconds += answer.spent_time_seconds;
                }
                row
            })
            .collect();
        rows.sort_by_key(|r| r.submission_id);
        Ok(rows)
    }

    async fn students(
        &self,
        usernames: Option<&[String]>,
    ) -> Result<Vec<StudentRecord>, sqlx::Error> {
        let mut students: Vec<StudentRecord> = self
            .users
            .iter()
            .filter(|u| u.role == ROLE_STUDENT)
            .filter(|u| usernames.is_none_or(|names| names.contains(&u.username)))
            .map(|u| StudentRecord {
                id: u.id,
                username: u.username.clone(),
                name: u.name.clone(),
            })
            .collect();
        students.sort_by_key(|s| s.id);
        Ok(students)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn page_views_by_url(&self) -> Result<Vec<UrlViews>, sqlx::Error> {
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for view in &self.page_views {
            *counts.entry(view.url.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(url, views)| UrlViews {
                url: url.to_owned(),
                views,
            })
            .collect())
    }

    async fn active_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        let users: HashSet<i64> = self
            .page_views
            .iter()
            .filter(|v| v.created_at >= since)
            .map(|v| v.user_id)
            .collect();
        Ok(users.len() as i64)
    }

    async fn daily_page_views(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>, sqlx::Error> {
        let mut days: BTreeMap<NaiveDate, (i64, HashSet<i64>)> = BTreeMap::new();
        for view in &self.page_views {
            let day = view.created_at.date_naive();
            if day < start || day > end {
                continue;
            }
            let entry = days.entry(day).or_default();
            entry.0 += 1;
            entry.1.insert(view.user_id);
        }
        Ok(days
            .into_iter()
            .map(|(day, (page_views, users))| DailyStat {
                day,
                page_views,
                active_users: users.len() as i64,
            })
            .collect())
    }
}
