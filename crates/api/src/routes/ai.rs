//! Route definitions for the LLM content assistant.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Assistant routes mounted at `/ai`. All return 503 when no API key is
/// configured.
///
/// ```text
/// POST /suggest-topics        -> suggest_topics (author/admin)
/// GET  /suggestions           -> list_suggestions
/// POST /suggestions/{id}/use  -> mark_suggestion_used
/// POST /analyze               -> analyze_content (author/admin)
/// POST /improve               -> improve_content (author/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suggest-topics", post(ai::suggest_topics))
        .route("/suggestions", get(ai::list_suggestions))
        .route("/suggestions/{id}/use", post(ai::mark_suggestion_used))
        .route("/analyze", post(ai::analyze_content))
        .route("/improve", post(ai::improve_content))
}
