//! Translation models for posts, tags, and categories.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_translations` table. Unique per (post, language).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostTranslation {
    pub id: DbId,
    pub post_id: DbId,
    pub language: String,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a post translation.
#[derive(Debug, Deserialize)]
pub struct UpsertPostTranslation {
    pub language: String,
    pub title: String,
    pub content: String,
}

/// A row from the `tag_translations` or `category_translations` table.
///
/// Both tables have the same shape; `owner_id` is the tag or category id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NameTranslation {
    pub id: DbId,
    #[sqlx(rename = "owner_id")]
    pub owner_id: DbId,
    pub language: String,
    pub name: String,
}

/// DTO for upserting a tag/category name translation.
#[derive(Debug, Deserialize)]
pub struct UpsertNameTranslation {
    pub language: String,
    pub name: String,
}
