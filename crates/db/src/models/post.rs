//! Post entity model and DTOs.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub language: String,
    pub status: String,
    pub likes: i32,
    pub dislikes: i32,
    pub views: i32,
    pub comment_count: i32,
    pub is_collaborative: bool,
    pub moderation_flagged: bool,
    pub moderation_reason: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_keywords: Option<String>,
    pub ai_sentiment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    /// Auto-generated from the title if `None`.
    pub slug: Option<String>,
    pub content: String,
    pub language: Option<String>,
    pub status: Option<String>,
}

/// DTO for updating an existing post. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
}

/// DTO for patching AI-derived annotations onto a post.
#[derive(Debug, Deserialize)]
pub struct UpdatePostAnnotations {
    pub ai_summary: Option<String>,
    pub ai_keywords: Option<String>,
    pub ai_sentiment: Option<String>,
}
