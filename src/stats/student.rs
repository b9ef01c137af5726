// src/stats/student.rs

use std::collections::{BTreeMap, HashMap};

use super::{Page, StatsEngine, StatsError, SubmissionTally, mean, paginate};
use crate::{
    models::{
        quiz::SubmissionTotals,
        student::{
            StudentDetail, StudentQuizSummary, StudentRecord, StudentStats, StudentSummary,
            TopStudent,
        },
    },
    store::SubmissionFilter,
};

const TOP_STUDENTS: usize = 3;

impl StatsEngine {
    /// Lists students, most successful submissions first.
    pub async fn list_students(
        &self,
        usernames: Option<&[String]>,
        page: Page,
    ) -> Result<Vec<StudentSummary>, StatsError> {
        let usernames = usernames.filter(|names| !names.is_empty());
        let (students, submissions) = self.fetch_student_rows(usernames).await?;
        let summaries = self.summarize_students(&students, &submissions);
        Ok(paginate(summaries, page))
    }

    /// Single student with per-quiz submission counters.
    pub async fn get_student(&self, username: &str) -> Result<StudentDetail, StatsError> {
        let usernames = [username.to_owned()];
        let (students, submissions) = self.fetch_student_rows(Some(&usernames[..])).await?;

        let summary = self
            .summarize_students(&students, &submissions)
            .into_iter()
            .next()
            .ok_or_else(|| StatsError::NotFound(format!("Student '{username}' not found")))?;

        let mut per_quiz: BTreeMap<i64, SubmissionTally> = BTreeMap::new();
        for s in submissions.iter().filter(|s| s.user_id == summary.id) {
            per_quiz.entry(s.quiz_id).or_default().add(
                s.correct_count,
                s.total_count,
                s.spent_time_seconds,
                self.success_threshold,
            );
        }

        let quizzes = per_quiz
            .into_iter()
            .map(|(quiz_id, tally)| StudentQuizSummary {
                id: quiz_id,
                successful_submissions_count: tally.successful,
                total_submissions_count: tally.total,
                avg_time_spent_sec: mean(tally.spent_time_seconds, tally.answered),
            })
            .collect();

        Ok(StudentDetail { summary, quizzes })
    }

    /// Student counts and the three students with the most successful submissions.
    pub async fn student_stats(&self) -> Result<StudentStats, StatsError> {
        let (students, submissions) = self.fetch_student_rows(None).await?;

        let summaries = self.summarize_students(&students, &submissions);
        let active: Vec<&StudentSummary> =
            summaries.iter().filter(|s| s.total_submissions > 0).collect();

        let top_students = active
            .iter()
            .take(TOP_STUDENTS)
            .map(|s| TopStudent {
                id: s.id,
                username: s.username.clone(),
                name: s.name.clone(),
                successful_submissions: s.successful_submissions,
                total_submissions: s.total_submissions,
            })
            .collect();

        tracing::debug!(
            students = students.len(),
            active = active.len(),
            "Computed student stats"
        );

        Ok(StudentStats {
            total_students: students.len() as i64,
            active_students: active.len() as i64,
            top_students,
        })
    }

    async fn fetch_student_rows(
        &self,
        usernames: Option<&[String]>,
    ) -> Result<(Vec<StudentRecord>, Vec<SubmissionTotals>), StatsError> {
        match usernames {
            // The user ids are only known once the students are resolved.
            Some(names) => {
                let students = self.store.students(Some(names)).await?;
                let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
                let submissions = self
                    .store
                    .submission_totals(&SubmissionFilter::for_users(Some(ids.as_slice())))
                    .await?;
                Ok((students, submissions))
            }
            None => {
                let filter = SubmissionFilter::default();
                let rows = tokio::try_join!(
                    self.store.students(None),
                    self.store.submission_totals(&filter),
                )?;
                Ok(rows)
            }
        }
    }

    /// Sorted by successful submissions descending, then id.
    fn summarize_students(
        &self,
        students: &[StudentRecord],
        submissions: &[SubmissionTotals],
    ) -> Vec<StudentSummary> {
        let mut tallies: HashMap<i64, SubmissionTally> = HashMap::new();
        for s in submissions {
            tallies.entry(s.user_id).or_default().add(
                s.correct_count,
                s.total_count,
                s.spent_time_seconds,
                self.success_threshold,
            );
        }

        let mut summaries: Vec<StudentSummary> = students
            .iter()
            .map(|student| {
                let tally = tallies.get(&student.id).copied().unwrap_or_default();
                StudentSummary {
                    id: student.id,
                    username: student.username.clone(),
                    name: student.name.clone(),
                    successful_submissions: tally.successful,
                    total_submissions: tally.total,
                    total_time_spent_sec: tally.spent_time_seconds,
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.successful_submissions
                .cmp(&a.successful_submissions)
                .then(a.id.cmp(&b.id))
        });
        summaries
    }
}
