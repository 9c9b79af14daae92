//! Quiz models and DTOs.

use chrono::NaiveDate;
use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub post_id: DbId,
    pub created_by: DbId,
    pub question: String,
    pub ends_on: NaiveDate,
    pub created_at: Timestamp,
}

/// A row from the `quiz_choices` table.
///
/// `is_correct` is never serialized to API responses; grading happens
/// server-side only.
#[derive(Debug, Clone, FromRow)]
pub struct QuizChoice {
    pub id: DbId,
    pub quiz_id: DbId,
    pub choice_text: String,
    pub is_correct: bool,
}

/// Public view of a quiz choice (no answer flag).
#[derive(Debug, Serialize)]
pub struct QuizChoiceResponse {
    pub id: DbId,
    pub choice_text: String,
}

impl From<QuizChoice> for QuizChoiceResponse {
    fn from(c: QuizChoice) -> Self {
        QuizChoiceResponse {
            id: c.id,
            choice_text: c.choice_text,
        }
    }
}

/// One choice in a quiz-creation request.
#[derive(Debug, Deserialize)]
pub struct CreateQuizChoice {
    pub choice_text: String,
    pub is_correct: bool,
}

/// DTO for creating a quiz with its choices.
#[derive(Debug, Deserialize)]
pub struct CreateQuiz {
    pub post_id: DbId,
    pub question: String,
    pub choices: Vec<CreateQuizChoice>,
    pub ends_on: NaiveDate,
}

/// DTO for submitting an answer.
#[derive(Debug, Deserialize)]
pub struct QuizSubmissionRequest {
    pub choice_id: DbId,
}

/// A recorded submission row from `quiz_submissions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizSubmission {
    pub id: DbId,
    pub quiz_id: DbId,
    pub user_id: DbId,
    pub choice_id: DbId,
    pub is_correct: bool,
    pub created_at: Timestamp,
}
