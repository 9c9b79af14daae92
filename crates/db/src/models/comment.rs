//! Comment entity model and DTOs.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub moderation_flagged: bool,
    pub moderation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
}

/// DTO for editing a comment.
#[derive(Debug, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}
