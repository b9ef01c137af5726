// src/stats/quiz.rs

use std::collections::HashMap;

use super::{Page, StatsEngine, StatsError, SubmissionTally, mean, paginate};
use crate::{
    models::quiz::{
        QuestionSummary, QuestionTotals, QuizDetail, QuizRecord, QuizStats, QuizSummary,
        SubmissionTotals,
    },
    store::SubmissionFilter,
};

/// Drops an empty id filter so that it means "no restriction".
fn effective_ids(ids: Option<&[i64]>) -> Option<&[i64]> {
    ids.filter(|ids| !ids.is_empty())
}

impl StatsEngine {
    /// Lists quizzes with their submission counters, most submitted first.
    pub async fn list_quizzes(
        &self,
        ids: Option<&[i64]>,
        page: Page,
    ) -> Result<Vec<QuizSummary>, StatsError> {
        let (quizzes, questions, submissions) = self.fetch_quiz_rows(effective_ids(ids)).await?;
        let summaries = self.summarize_quizzes(quizzes, &questions, &submissions);
        Ok(paginate(summaries, page))
    }

    /// Single quiz with per-question answer statistics.
    pub async fn get_quiz(&self, id: i64) -> Result<QuizDetail, StatsError> {
        let ids = [id];
        let (quizzes, questions, submissions) = self.fetch_quiz_rows(Some(&ids[..])).await?;

        let summary = self
            .summarize_quizzes(quizzes, &questions, &submissions)
            .into_iter()
            .next()
            .ok_or_else(|| StatsError::NotFound("No quiz matches given ID".to_string()))?;

        let questions = questions
            .into_iter()
            .filter(|q| q.total_answers > 0)
            .map(|q| QuestionSummary {
                avg_time_spent_sec: mean(q.spent_time_seconds, q.total_answers),
                id: q.id,
                title: q.title,
                description: q.description,
                image: q.image,
                created_at: q.created_at,
                total_answers: q.total_answers,
                correct_answers: q.correct_answers,
            })
            .collect();

        Ok(QuizDetail { summary, questions })
    }

    /// Global counters over all quizzes, or only over `ids` when given.
    pub async fn quiz_stats(&self, ids: Option<&[i64]>) -> Result<QuizStats, StatsError> {
        let ids = effective_ids(ids);
        let filter = SubmissionFilter::for_quizzes(ids);
        let (quizzes, submissions) = tokio::try_join!(
            self.store.quizzes(ids),
            self.store.submission_totals(&filter),
        )?;

        let mut tally = SubmissionTally::default();
        for s in &submissions {
            tally.add(
                s.correct_count,
                s.total_count,
                s.spent_time_seconds,
                self.success_threshold,
            );
        }

        tracing::debug!(
            quizzes = quizzes.len(),
            submissions = tally.total,
            "Computed quiz stats"
        );

        Ok(QuizStats {
            quizzes_count: quizzes.len() as i64,
            submissions_count: tally.total,
            successful_submissions_count: tally.successful,
            avg_time_spent_sec: mean(tally.spent_time_seconds, tally.answers),
        })
    }

    async fn fetch_quiz_rows(
        &self,
        ids: Option<&[i64]>,
    ) -> Result<(Vec<QuizRecord>, Vec<QuestionTotals>, Vec<SubmissionTotals>), StatsError> {
        let filter = SubmissionFilter::for_quizzes(ids);
        let rows = tokio::try_join!(
            self.store.quizzes(ids),
            self.store.question_totals(ids),
            self.store.submission_totals(&filter),
        )?;
        Ok(rows)
    }

    fn summarize_quizzes(
        &self,
        quizzes: Vec<QuizRecord>,
        questions: &[QuestionTotals],
        submissions: &[SubmissionTotals],
    ) -> Vec<QuizSummary> {
        let mut question_counts: HashMap<i64, i64> = HashMap::new();
        for q in questions {
            *question_counts.entry(q.quiz_id).or_default() += 1;
        }

        let mut tallies: HashMap<i64, SubmissionTally> = HashMap::new();
        for s in submissions {
            tallies.entry(s.quiz_id).or_default().add(
                s.correct_count,
                s.total_count,
                s.spent_time_seconds,
                self.success_threshold,
            );
        }

        let mut summaries: Vec<QuizSummary> = quizzes
            .into_iter()
            .map(|quiz| {
                let tally = tallies.get(&quiz.id).copied().unwrap_or_default();
                QuizSummary {
                    questions_count: question_counts.get(&quiz.id).copied().unwrap_or(0),
                    total_submissions_count: tally.total,
                    successful_submissions_count: tally.successful,
                    avg_time_spent_sec: mean(tally.spent_time_seconds, tally.answers),
                    id: quiz.id,
                    title: quiz.title,
                    description: quiz.description,
                    image: quiz.image,
                    created_at: quiz.created_at,
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.total_submissions_count
                .cmp(&a.total_submissions_count)
                .then(b.successful_submissions_count.cmp(&a.successful_submissions_count))
                .then(a.id.cmp(&b.id))
        });
        summaries
    }
}
