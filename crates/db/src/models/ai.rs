//! Persisted LLM assistant output models.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content_suggestions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentSuggestion {
    pub id: DbId,
    pub user_id: DbId,
    pub topic: String,
    pub description: String,
    pub is_used: bool,
    pub created_at: Timestamp,
}

/// A row from the `content_analyses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentAnalysis {
    pub id: DbId,
    pub post_id: Option<DbId>,
    pub analysis: String,
    pub created_at: Timestamp,
}

/// Request body for topic suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestTopicsRequest {
    pub interests: Vec<String>,
}

/// Request body for content analysis.
#[derive(Debug, Deserialize)]
pub struct AnalyzeContentRequest {
    pub content: String,
    pub post_id: Option<DbId>,
}

/// Request body for content improvement.
#[derive(Debug, Deserialize)]
pub struct ImproveContentRequest {
    pub content: String,
    pub style_guide: Option<String>,
}
