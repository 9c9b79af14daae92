//! Handlers for the LLM content assistant.
//!
//! All endpoints return 503 when no API key is configured. Assistant
//! output is persisted (suggestions per user, analyses per post) so
//! results survive the request.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use mindscribe_core::content::validate_content;
use mindscribe_core::error::CoreError;
use mindscribe_core::types::DbId;
use mindscribe_ai::AiClient;
use mindscribe_db::models::ai::{
    AnalyzeContentRequest, ContentAnalysis, ContentSuggestion, ImproveContentRequest,
    SuggestTopicsRequest,
};
use mindscribe_db::models::post::UpdatePostAnnotations;
use mindscribe_db::repositories::{AiRepo, PostRepo};

use super::posts::fetch_post;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuthor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for content improvement; nothing is persisted.
#[derive(Debug, Serialize)]
pub struct ImprovedContent {
    pub improved: String,
}

/// Resolve the assistant client, or fail with a 503-style error when the
/// platform runs without an API key.
fn require_ai(state: &AppState) -> AppResult<Arc<AiClient>> {
    state.ai.clone().ok_or(AppError::ServiceUnavailable(
        "The content assistant is not configured",
    ))
}

/// POST /api/v1/ai/suggest-topics
///
/// Suggest blog topics for the caller's interests and persist them.
pub async fn suggest_topics(
    State(state): State<AppState>,
    RequireAuthor(user): RequireAuthor,
    Json(input): Json<SuggestTopicsRequest>,
) -> AppResult<Json<DataResponse<Vec<ContentSuggestion>>>> {
    let ai = require_ai(&state)?;

    if input.interests.is_empty() || input.interests.iter().all(|i| i.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "At least one interest is required".into(),
        )));
    }

    let suggestions = ai.suggest_topics(&input.interests).await?;
    if suggestions.is_empty() {
        return Err(AppError::Core(CoreError::External(
            "The assistant returned no usable suggestions".into(),
        )));
    }

    let mut stored = Vec::with_capacity(suggestions.len());
    for suggestion in &suggestions {
        let row = AiRepo::create_suggestion(
            &state.pool,
            user.user_id,
            &suggestion.topic,
            &suggestion.description,
        )
        .await?;
        stored.push(row);
    }

    Ok(Json(DataResponse { data: stored }))
}

/// GET /api/v1/ai/suggestions
pub async fn list_suggestions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ContentSuggestion>>>> {
    let suggestions = AiRepo::list_suggestions(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: suggestions }))
}

/// POST /api/v1/ai/suggestions/{id}/use
pub async fn mark_suggestion_used(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContentSuggestion>>> {
    let suggestion = AiRepo::mark_suggestion_used(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "suggestion",
            id,
        }))?;
    Ok(Json(DataResponse { data: suggestion }))
}

/// POST /api/v1/ai/analyze
///
/// Analyze content and persist the result. When a post id is given, the
/// analysis is linked to it and the post's annotation fields are updated
/// with the raw analysis text as the summary.
pub async fn analyze_content(
    State(state): State<AppState>,
    RequireAuthor(_user): RequireAuthor,
    Json(input): Json<AnalyzeContentRequest>,
) -> AppResult<Json<DataResponse<ContentAnalysis>>> {
    let ai = require_ai(&state)?;
    validate_content(&input.content)?;

    if let Some(post_id) = input.post_id {
        fetch_post(&state, post_id).await?;
    }

    let analysis = ai.analyze_content(&input.content).await?;
    let stored = AiRepo::create_analysis(&state.pool, input.post_id, &analysis).await?;

    if let Some(post_id) = input.post_id {
        PostRepo::update_annotations(
            &state.pool,
            post_id,
            &UpdatePostAnnotations {
                ai_summary: Some(analysis),
                ai_keywords: None,
                ai_sentiment: None,
            },
        )
        .await?;
    }

    Ok(Json(DataResponse { data: stored }))
}

/// GET /api/v1/posts/{post_id}/analyses
pub async fn list_post_analyses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ContentAnalysis>>>> {
    let post = fetch_post(&state, post_id).await?;
    super::posts::ensure_post_owner(&post, &auth_user)?;

    let analyses = AiRepo::list_analyses_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: analyses }))
}

/// POST /api/v1/ai/improve
///
/// Rewrite content for clarity. Stateless; nothing is persisted.
pub async fn improve_content(
    State(state): State<AppState>,
    RequireAuthor(_user): RequireAuthor,
    Json(input): Json<ImproveContentRequest>,
) -> AppResult<Json<DataResponse<ImprovedContent>>> {
    let ai = require_ai(&state)?;
    validate_content(&input.content)?;

    let improved = ai
        .improve_content(&input.content, input.style_guide.as_deref())
        .await?;

    Ok(Json(DataResponse {
        data: ImprovedContent { improved },
    }))
}
