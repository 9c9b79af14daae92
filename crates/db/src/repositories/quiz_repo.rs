//! Repository for the `quizzes`, `quiz_choices`, and `quiz_submissions`
//! tables.

use chrono::NaiveDate;
use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::quiz::{CreateQuizChoice, Quiz, QuizChoice, QuizSubmission};

/// Column list for quizzes queries.
const QUIZ_COLUMNS: &str = "id, post_id, created_by, question, ends_on, created_at";

/// Column list for quiz_choices queries.
const CHOICE_COLUMNS: &str = "id, quiz_id, choice_text, is_correct";

/// Column list for quiz_submissions queries.
const SUBMISSION_COLUMNS: &str = "id, quiz_id, user_id, choice_id, is_correct, created_at";

/// Provides CRUD and submission operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Create a quiz with its choices in a single transaction.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        created_by: DbId,
        question: &str,
        choices: &[CreateQuizChoice],
        ends_on: NaiveDate,
    ) -> Result<(Quiz, Vec<QuizChoice>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO quizzes (post_id, created_by, question, ends_on)
             VALUES ($1, $2, $3, $4)
             RETURNING {QUIZ_COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(post_id)
            .bind(created_by)
            .bind(question)
            .bind(ends_on)
            .fetch_one(&mut *tx)
            .await?;

        let choice_query = format!(
            "INSERT INTO quiz_choices (quiz_id, choice_text, is_correct)
             VALUES ($1, $2, $3)
             RETURNING {CHOICE_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(choices.len());
        for choice in choices {
            let row = sqlx::query_as::<_, QuizChoice>(&choice_query)
                .bind(quiz.id)
                .bind(&choice.choice_text)
                .bind(choice.is_correct)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok((quiz, rows))
    }

    /// Find a quiz by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quizzes attached to a post, newest first.
    pub async fn list_by_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE post_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// List the choices of a quiz, including the answer flag. Callers
    /// strip `is_correct` before exposing choices externally.
    pub async fn list_choices(pool: &PgPool, quiz_id: DbId) -> Result<Vec<QuizChoice>, sqlx::Error> {
        let query = format!(
            "SELECT {CHOICE_COLUMNS} FROM quiz_choices WHERE quiz_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, QuizChoice>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Find a user's existing submission for a quiz, if any.
    pub async fn find_submission(
        pool: &PgPool,
        quiz_id: DbId,
        user_id: DbId,
    ) -> Result<Option<QuizSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM quiz_submissions
             WHERE quiz_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, QuizSubmission>(&query)
            .bind(quiz_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Grade and record a submission in one transaction.
    ///
    /// Resolves the chosen answer's correctness inside the transaction so
    /// the recorded `is_correct` always reflects the choice row at submit
    /// time. Returns `None` if the (quiz, choice) pair does not exist.
    pub async fn submit(
        pool: &PgPool,
        quiz_id: DbId,
        user_id: DbId,
        choice_id: DbId,
    ) -> Result<Option<QuizSubmission>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let graded: Option<(bool,)> = sqlx::query_as(
            "SELECT is_correct FROM quiz_choices WHERE id = $1 AND quiz_id = $2",
        )
        .bind(choice_id)
        .bind(quiz_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((is_correct,)) = graded else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO quiz_submissions (quiz_id, user_id, choice_id, is_correct)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let submission = sqlx::query_as::<_, QuizSubmission>(&query)
            .bind(quiz_id)
            .bind(user_id)
            .bind(choice_id)
            .bind(is_correct)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(submission))
    }

    /// List all submissions for a quiz, newest first.
    pub async fn list_submissions(
        pool: &PgPool,
        quiz_id: DbId,
    ) -> Result<Vec<QuizSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM quiz_submissions
             WHERE quiz_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, QuizSubmission>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a quiz and its choices. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
