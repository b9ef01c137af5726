// tests/common/mod.rs

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use quiz_stats_backend::{
    models::user::{ROLE_EDITOR, ROLE_STUDENT},
    store::MemoryStore,
};
use sqlx::PgPool;

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const CAROL: i64 = 3;
pub const DAVE: i64 = 4;
pub const EDITOR: i64 = 9;

/// Option ids are derived from the question id: `q * 10 + 1` is correct, `q * 10 + 2` is not.
pub fn correct(question: i64) -> i64 {
    question * 10 + 1
}

pub fn wrong(question: i64) -> i64 {
    question * 10 + 2
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Raw table rows that can be loaded into either store.
///
/// Every question gets one correct and one wrong option (see [`correct`] and [`wrong`]).
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    users: Vec<(i64, &'static str, &'static str, &'static str)>,
    quizzes: Vec<(i64, &'static str)>,
    questions: Vec<(i64, i64)>,
    submissions: Vec<(i64, i64, i64)>,
    answers: Vec<(i64, i64, i64, i64)>,
    page_views: Vec<(i64, &'static str, DateTime<Utc>)>,
}

impl Fixture {
    pub fn user(&mut self, id: i64, username: &'static str, name: &'static str, role: &'static str) -> &mut Self {
        self.users.push((id, username, name, role));
        self
    }

    pub fn quiz(&mut self, id: i64, title: &'static str) -> &mut Self {
        self.quizzes.push((id, title));
        self
    }

    pub fn question(&mut self, id: i64, quiz_id: i64) -> &mut Self {
        self.questions.push((id, quiz_id));
        self
    }

    pub fn submission(&mut self, id: i64, quiz_id: i64, user_id: i64) -> &mut Self {
        self.submissions.push((id, quiz_id, user_id));
        self
    }

    pub fn answer(&mut self, submission_id: i64, question_id: i64, option_id: i64, seconds: i64) -> &mut Self {
        self.answers.push((submission_id, question_id, option_id, seconds));
        self
    }

    pub fn page_view(&mut self, user_id: i64, url: &'static str, at: DateTime<Utc>) -> &mut Self {
        self.page_views.push((user_id, url, at));
        self
    }

    pub fn memory_store(&self) -> MemoryStore {
        let mut store = MemoryStore::new();
        for &(id, username, name, role) in &self.users {
            store.add_user(id, username, name, role);
        }
        for &(id, title) in &self.quizzes {
            store.add_quiz(id, title);
        }
        for &(id, quiz_id) in &self.questions {
            store
                .add_question(id, quiz_id)
                .add_option(correct(id), true)
                .add_option(wrong(id), false);
        }
        for &(id, quiz_id, user_id) in &self.submissions {
            store.add_submission(id, quiz_id, user_id);
        }
        for &(submission_id, question_id, option_id, seconds) in &self.answers {
            store.add_answer(submission_id, question_id, option_id, seconds);
        }
        for &(user_id, url, created_at) in &self.page_views {
            store.add_page_view(user_id, url, created_at);
        }
        store
    }

    /// Inserts the rows into a migrated database, keeping the fixture ids.
    pub async fn insert_into(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        for &(id, username, name, role) in &self.users {
            sqlx::query("INSERT INTO users (id, username, name, password, role) VALUES ($1, $2, $3, '', $4)")
                .bind(id)
                .bind(username)
                .bind(name)
                .bind(role)
                .execute(pool)
                .await?;
        }
        for &(id, title) in &self.quizzes {
            sqlx::query("INSERT INTO quizzes (id, title) VALUES ($1, $2)")
                .bind(id)
                .bind(title)
                .execute(pool)
                .await?;
        }
        for &(id, quiz_id) in &self.questions {
            sqlx::query("INSERT INTO quiz_questions (id, quiz_id, title) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(quiz_id)
                .bind(format!("Question {id}"))
                .execute(pool)
                .await?;
            for (option_id, is_correct) in [(correct(id), true), (wrong(id), false)] {
                sqlx::query(
                    "INSERT INTO quiz_question_options (id, question_id, is_correct) VALUES ($1, $2, $3)",
                )
                .bind(option_id)
                .bind(id)
                .bind(is_correct)
                .execute(pool)
                .await?;
            }
        }
        for &(id, quiz_id, user_id) in &self.submissions {
            sqlx::query("INSERT INTO quiz_submissions (id, quiz_id, user_id) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(quiz_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        }
        for &(submission_id, question_id, option_id, seconds) in &self.answers {
            sqlx::query(
                r#"
                INSERT INTO quiz_submission_answers
                    (submission_id, question_id, selected_option_id, spent_time_seconds)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(submission_id)
            .bind(question_id)
            .bind(option_id)
            .bind(seconds as i32)
            .execute(pool)
            .await?;
        }
        for &(user_id, url, created_at) in &self.page_views {
            sqlx::query("INSERT INTO page_views (user_id, url, created_at) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(url)
                .bind(created_at)
                .execute(pool)
                .await?;
        }
        Ok(())
    }
}

/// Four quizzes, four students and one editor.
///
/// * Quiz 1 (questions 10..=14): alice 1/5 correct (exactly 20%, not successful),
///   bob 2/5, carol 5/5.
/// * Quiz 2 (questions 20, 21): alice 1/2, bob an empty submission, carol 2/2.
/// * Quiz 3: no questions, no submissions.
/// * Quiz 4: one question nobody answered.
/// * Dave never submitted anything.
pub fn seeded_fixture() -> Fixture {
    let mut fx = Fixture::default();
    fx.user(ALICE, "alice", "Alice", ROLE_STUDENT)
        .user(BOB, "bob", "Bob", ROLE_STUDENT)
        .user(CAROL, "carol", "Carol", ROLE_STUDENT)
        .user(DAVE, "dave", "Dave", ROLE_STUDENT)
        .user(EDITOR, "ed", "Editor", ROLE_EDITOR)
        .quiz(1, "Algebra")
        .quiz(2, "Geometry")
        .quiz(3, "Empty")
        .quiz(4, "Draft");

    for q in 10..=14 {
        fx.question(q, 1);
    }
    fx.question(20, 2).question(21, 2).question(40, 4);

    // Quiz 1
    fx.submission(100, 1, ALICE).answer(100, 10, correct(10), 10);
    for q in 11..=14 {
        fx.answer(100, q, wrong(q), 10);
    }

    fx.submission(101, 1, BOB)
        .answer(101, 10, correct(10), 20)
        .answer(101, 11, correct(11), 20);
    for q in 12..=14 {
        fx.answer(101, q, wrong(q), 20);
    }

    fx.submission(102, 1, CAROL);
    for q in 10..=14 {
        fx.answer(102, q, correct(q), 6);
    }

    // Quiz 2
    fx.submission(103, 2, ALICE)
        .answer(103, 20, correct(20), 30)
        .answer(103, 21, wrong(21), 50);
    fx.submission(104, 2, BOB);
    fx.submission(105, 2, CAROL)
        .answer(105, 20, correct(20), 5)
        .answer(105, 21, correct(21), 5);

    // Page views
    fx.page_view(ALICE, "/quizzes", at(2024, 3, 30, 9, 0))
        .page_view(BOB, "/quizzes", at(2024, 3, 29, 9, 0))
        .page_view(ALICE, "/home", at(2024, 3, 29, 10, 0))
        .page_view(BOB, "/home", at(2024, 1, 1, 10, 0))
        .page_view(CAROL, "/stats", at(2024, 1, 1, 11, 0))
        .page_view(CAROL, "/stats", at(2024, 1, 2, 8, 0))
        .page_view(ALICE, "/home", at(2024, 1, 3, 23, 59));

    fx
}

pub fn seeded_store() -> MemoryStore {
    seeded_fixture().memory_store()
}
