//! Handlers for quizzes: creation, answer submission, and results.
//!
//! The correct-answer flag never leaves the server; choices are exposed
//! through [`QuizChoiceResponse`] and grading happens in the repository
//! transaction at submit time.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use mindscribe_core::error::CoreError;
use mindscribe_core::poll::{has_ended, validate_end_date, validate_question, validate_quiz_choices};
use mindscribe_core::types::DbId;
use mindscribe_db::models::quiz::{
    CreateQuiz, Quiz, QuizChoiceResponse, QuizSubmission, QuizSubmissionRequest,
};
use mindscribe_db::repositories::QuizRepo;

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A quiz with its (answer-stripped) choices.
#[derive(Debug, Serialize)]
pub struct QuizView {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub choices: Vec<QuizChoiceResponse>,
}

/// POST /api/v1/quizzes
///
/// Create a quiz on a post. Exactly one choice must be marked correct.
pub async fn create_quiz(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateQuiz>,
) -> AppResult<(StatusCode, Json<DataResponse<QuizView>>)> {
    validate_question(&input.question)?;

    let pairs: Vec<(String, bool)> = input
        .choices
        .iter()
        .map(|c| (c.choice_text.clone(), c.is_correct))
        .collect();
    validate_quiz_choices(&pairs)?;
    validate_end_date(input.ends_on, Utc::now().date_naive())?;

    let post = fetch_post(&state, input.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let (quiz, choices) = QuizRepo::create(
        &state.pool,
        input.post_id,
        auth_user.user_id,
        &input.question,
        &input.choices,
        input.ends_on,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: QuizView {
                quiz,
                choices: choices.into_iter().map(QuizChoiceResponse::from).collect(),
            },
        }),
    ))
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuizView>>> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "quiz", id }))?;
    let choices = QuizRepo::list_choices(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: QuizView {
            quiz,
            choices: choices.into_iter().map(QuizChoiceResponse::from).collect(),
        },
    }))
}

/// GET /api/v1/posts/{post_id}/quizzes
pub async fn list_quizzes_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<QuizView>>>> {
    fetch_post(&state, post_id).await?;

    let quizzes = QuizRepo::list_by_post(&state.pool, post_id).await?;
    let mut views = Vec::with_capacity(quizzes.len());
    for quiz in quizzes {
        let choices = QuizRepo::list_choices(&state.pool, quiz.id).await?;
        views.push(QuizView {
            quiz,
            choices: choices.into_iter().map(QuizChoiceResponse::from).collect(),
        });
    }
    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/quizzes/{id}/submit
///
/// Submit an answer. One submission per user per quiz; closed quizzes
/// and repeat submissions are rejected.
pub async fn submit_answer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<QuizSubmissionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<QuizSubmission>>)> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "quiz", id }))?;

    if has_ended(quiz.ends_on, Utc::now().date_naive()) {
        return Err(AppError::Core(CoreError::quiz_submission(
            "Quiz has ended and no longer accepts submissions",
        )));
    }

    if QuizRepo::find_submission(&state.pool, id, auth_user.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::QuizSubmission {
            message: "You have already submitted an answer to this quiz".into(),
            status: 409,
        }));
    }

    let submission = QuizRepo::submit(&state.pool, id, auth_user.user_id, input.choice_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "quiz choice",
            id: input.choice_id,
        }))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: submission }),
    ))
}

/// GET /api/v1/quizzes/{id}/submissions
///
/// All submissions, visible only to the quiz creator or post author.
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<QuizSubmission>>>> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "quiz", id }))?;

    let post = fetch_post(&state, quiz.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let submissions = QuizRepo::list_submissions(&state.pool, id).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /api/v1/quizzes/{id}/my-submission
pub async fn my_submission(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuizSubmission>>> {
    QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "quiz", id }))?;

    let submission = QuizRepo::find_submission(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No submission for this quiz yet".into()))?;
    Ok(Json(DataResponse { data: submission }))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn delete_quiz(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "quiz", id }))?;

    let post = fetch_post(&state, quiz.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    QuizRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
