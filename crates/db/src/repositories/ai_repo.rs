//! Repository for the `content_suggestions` and `content_analyses` tables.

use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::ai::{ContentAnalysis, ContentSuggestion};

/// Column list for content_suggestions queries.
const SUGGESTION_COLUMNS: &str = "id, user_id, topic, description, is_used, created_at";

/// Column list for content_analyses queries.
const ANALYSIS_COLUMNS: &str = "id, post_id, analysis, created_at";

/// Persists LLM assistant outputs.
pub struct AiRepo;

impl AiRepo {
    /// Store one suggested topic for a user.
    pub async fn create_suggestion(
        pool: &PgPool,
        user_id: DbId,
        topic: &str,
        description: &str,
    ) -> Result<ContentSuggestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_suggestions (user_id, topic, description)
             VALUES ($1, $2, $3)
             RETURNING {SUGGESTION_COLUMNS}"
        );
        sqlx::query_as::<_, ContentSuggestion>(&query)
            .bind(user_id)
            .bind(topic)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// List a user's suggestions, newest first.
    pub async fn list_suggestions(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContentSuggestion>, sqlx::Error> {
        let query = format!(
            "SELECT {SUGGESTION_COLUMNS} FROM content_suggestions
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ContentSuggestion>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a suggestion as used. Only the owner's suggestion can be
    /// marked. Returns the updated row, or `None` if not found.
    pub async fn mark_suggestion_used(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ContentSuggestion>, sqlx::Error> {
        let query = format!(
            "UPDATE content_suggestions SET is_used = true
             WHERE id = $1 AND user_id = $2
             RETURNING {SUGGESTION_COLUMNS}"
        );
        sqlx::query_as::<_, ContentSuggestion>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Store an analysis result, optionally linked to a post.
    pub async fn create_analysis(
        pool: &PgPool,
        post_id: Option<DbId>,
        analysis: &str,
    ) -> Result<ContentAnalysis, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_analyses (post_id, analysis)
             VALUES ($1, $2)
             RETURNING {ANALYSIS_COLUMNS}"
        );
        sqlx::query_as::<_, ContentAnalysis>(&query)
            .bind(post_id)
            .bind(analysis)
            .fetch_one(pool)
            .await
    }

    /// List analyses linked to a post, newest first.
    pub async fn list_analyses_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<ContentAnalysis>, sqlx::Error> {
        let query = format!(
            "SELECT {ANALYSIS_COLUMNS} FROM content_analyses
             WHERE post_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ContentAnalysis>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }
}
