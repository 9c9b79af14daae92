//! Route definitions for quizzes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quizzes;
use crate::state::AppState;

/// Quiz routes mounted at `/quizzes`.
///
/// ```text
/// POST   /                    -> create_quiz (post owner)
/// GET    /{id}                -> get_quiz (answers stripped)
/// DELETE /{id}                -> delete_quiz (post owner)
/// POST   /{id}/submit         -> submit_answer (one per user)
/// GET    /{id}/submissions    -> list_submissions (post owner)
/// GET    /{id}/my-submission  -> my_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(quizzes::create_quiz))
        .route("/{id}", get(quizzes::get_quiz).delete(quizzes::delete_quiz))
        .route("/{id}/submit", post(quizzes::submit_answer))
        .route("/{id}/submissions", get(quizzes::list_submissions))
        .route("/{id}/my-submission", get(quizzes::my_submission))
}
